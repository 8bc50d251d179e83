//! Database models

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A bird species entry with its media assets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    pub id: i64,
    pub name_common: String,
    pub name_scientific: String,
    /// Child rows in insertion order
    pub images: Vec<BirdImage>,
    pub audio: Vec<BirdAudio>,
}

/// An image URL owned by a bird record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirdImage {
    pub id: i64,
    pub bird_id: i64,
    pub image_url: String,
}

/// An audio clip URL owned by a bird record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirdAudio {
    pub id: i64,
    pub bird_id: i64,
    pub audio_url: String,
}

/// Validated input for creating a bird record with its children
#[derive(Debug, Clone, Default)]
pub struct NewBird {
    pub name_common: String,
    pub name_scientific: String,
    pub images: Vec<String>,
    pub audio: Vec<String>,
}

/// A named, categorized collection of bird records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirdGroup {
    pub id: i64,
    pub name: String,
    pub category: GroupCategory,
    pub description: String,
}

/// Fixed enumeration of group categories
///
/// Stored as the lowercase string in the `category` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupCategory {
    Location,
    Genus,
    Color,
    Behavior,
    Other,
}

impl GroupCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupCategory::Location => "location",
            GroupCategory::Genus => "genus",
            GroupCategory::Color => "color",
            GroupCategory::Behavior => "behavior",
            GroupCategory::Other => "other",
        }
    }
}

impl fmt::Display for GroupCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "location" => Ok(GroupCategory::Location),
            "genus" => Ok(GroupCategory::Genus),
            "color" => Ok(GroupCategory::Color),
            "behavior" => Ok(GroupCategory::Behavior),
            "other" => Ok(GroupCategory::Other),
            other => Err(Error::InvalidInput(format!(
                "Unknown group category: {}",
                other
            ))),
        }
    }
}
