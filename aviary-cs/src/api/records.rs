//! Bird record endpoints: creation, bulk upload, listing, random selection
//!
//! Form and JSON inputs both allow `images`/`audio` to arrive as a single
//! value or a list; normalization at this boundary always yields an
//! ordered Vec<String> before the database layer is reached.

use axum::{
    extract::{Form, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::birds;
use crate::error::{ApiError, ApiResult};
use crate::AppState;
use aviary_common::db::models::{Bird, NewBird};

/// External representation of a bird record
#[derive(Debug, Serialize)]
pub struct BirdResponse {
    pub id: i64,
    pub name_common: String,
    pub name_scientific: String,
    /// URL strings in stored (insertion) order
    pub images: Vec<String>,
    pub audio: Vec<String>,
}

impl From<Bird> for BirdResponse {
    fn from(bird: Bird) -> Self {
        Self {
            id: bird.id,
            name_common: bird.name_common,
            name_scientific: bird.name_scientific,
            images: bird.images.into_iter().map(|i| i.image_url).collect(),
            audio: bird.audio.into_iter().map(|a| a.audio_url).collect(),
        }
    }
}

/// A JSON field that may be a single string or a list of strings
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(s) if s.is_empty() => Vec::new(),
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(list) => list.into_iter().filter(|s| !s.is_empty()).collect(),
        }
    }
}

/// One entry of a bulk upload payload
#[derive(Debug, Deserialize)]
pub struct UploadEntry {
    #[serde(default)]
    pub name_common: Option<String>,
    #[serde(default)]
    pub name_scientific: Option<String>,
    #[serde(default)]
    pub images: Option<OneOrMany>,
    #[serde(default)]
    pub audio: Option<OneOrMany>,
}

impl UploadEntry {
    /// Validate required fields, yielding the input for the create operation
    fn into_new_bird(self) -> Result<NewBird, String> {
        let name_common = match self.name_common {
            Some(name) if !name.is_empty() => name,
            _ => return Err("Missing required field: name_common".to_string()),
        };
        let name_scientific = match self.name_scientific {
            Some(name) if !name.is_empty() => name,
            _ => return Err("Missing required field: name_scientific".to_string()),
        };

        Ok(NewBird {
            name_common,
            name_scientific,
            images: self.images.map(OneOrMany::into_vec).unwrap_or_default(),
            audio: self.audio.map(OneOrMany::into_vec).unwrap_or_default(),
        })
    }
}

/// Normalize ordered form pairs into a validated create input.
///
/// Required name fields take their first non-empty occurrence; repeatable
/// `images`/`audio` keys accumulate in submission order, no deduplication.
/// Validation happens before any persistence write.
fn normalize_form(pairs: Vec<(String, String)>) -> Result<NewBird, ApiError> {
    let mut new_bird = NewBird::default();

    for (key, value) in pairs {
        match key.as_str() {
            "name_common" => {
                if new_bird.name_common.is_empty() {
                    new_bird.name_common = value;
                }
            }
            "name_scientific" => {
                if new_bird.name_scientific.is_empty() {
                    new_bird.name_scientific = value;
                }
            }
            "images" => {
                if !value.is_empty() {
                    new_bird.images.push(value);
                }
            }
            "audio" => {
                if !value.is_empty() {
                    new_bird.audio.push(value);
                }
            }
            // Unknown keys are ignored
            _ => {}
        }
    }

    if new_bird.name_common.is_empty() {
        return Err(ApiError::BadRequest(
            "Missing required field: name_common".to_string(),
        ));
    }
    if new_bird.name_scientific.is_empty() {
        return Err(ApiError::BadRequest(
            "Missing required field: name_scientific".to_string(),
        ));
    }

    Ok(new_bird)
}

/// POST /create
///
/// Creates one bird record with its media assets from a URL-encoded form.
/// 400 when a required name is missing or empty, 409 when either name is
/// already taken.
pub async fn create_bird(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> ApiResult<Json<BirdResponse>> {
    let new_bird = normalize_form(pairs)?;
    let bird = birds::create_bird(&state.db, &new_bird).await?;
    Ok(Json(BirdResponse::from(bird)))
}

/// Outcome summary for a bulk upload
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub created: Vec<BirdResponse>,
    pub skipped: Vec<SkippedEntry>,
}

/// A bulk-upload entry that was not created, and why
#[derive(Debug, Serialize)]
pub struct SkippedEntry {
    pub name_common: String,
    pub reason: String,
}

/// POST /bird-data-upload
///
/// Creates multiple bird records from a JSON array. Entries are created
/// independently: a validation failure or name conflict skips that entry
/// with a reason instead of failing the whole request.
pub async fn bird_data_upload(
    State(state): State<AppState>,
    Json(entries): Json<Vec<UploadEntry>>,
) -> ApiResult<Json<UploadResponse>> {
    let mut created = Vec::new();
    let mut skipped = Vec::new();

    for entry in entries {
        let name_common = entry.name_common.clone().unwrap_or_default();

        let new_bird = match entry.into_new_bird() {
            Ok(new_bird) => new_bird,
            Err(reason) => {
                skipped.push(SkippedEntry {
                    name_common,
                    reason,
                });
                continue;
            }
        };

        match birds::create_bird(&state.db, &new_bird).await {
            Ok(bird) => created.push(BirdResponse::from(bird)),
            Err(ApiError::Conflict(reason)) => skipped.push(SkippedEntry {
                name_common,
                reason,
            }),
            Err(other) => return Err(other),
        }
    }

    Ok(Json(UploadResponse { created, skipped }))
}

/// GET /get-all
///
/// All bird records ordered by id.
pub async fn get_all(State(state): State<AppState>) -> ApiResult<Json<Vec<BirdResponse>>> {
    let birds = birds::list_birds(&state.db).await?;
    Ok(Json(birds.into_iter().map(BirdResponse::from).collect()))
}

/// GET /get-random
///
/// One uniformly random bird record; 404 when the catalog is empty.
pub async fn get_random(State(state): State<AppState>) -> ApiResult<Json<BirdResponse>> {
    let bird = birds::random_bird(&state.db)
        .await?
        .ok_or_else(|| ApiError::NotFound("The catalog is empty".to_string()))?;
    Ok(Json(BirdResponse::from(bird)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn normalize_accepts_repeated_media_keys_in_order() {
        let new_bird = normalize_form(pairs(&[
            ("name_common", "American Crow"),
            ("name_scientific", "Corvus brachyrhynchos"),
            ("images", "u1"),
            ("audio", "a1"),
            ("audio", "a2"),
        ]))
        .unwrap();

        assert_eq!(new_bird.name_common, "American Crow");
        assert_eq!(new_bird.images, vec!["u1"]);
        assert_eq!(new_bird.audio, vec!["a1", "a2"]);
    }

    #[test]
    fn normalize_single_media_value_yields_one_element_list() {
        let new_bird = normalize_form(pairs(&[
            ("name_common", "Blue Jay"),
            ("name_scientific", "Cyanocitta cristata"),
            ("images", "u1"),
        ]))
        .unwrap();

        assert_eq!(new_bird.images, vec!["u1"]);
        assert!(new_bird.audio.is_empty());
    }

    #[test]
    fn normalize_rejects_missing_name_common() {
        let result = normalize_form(pairs(&[("name_scientific", "Corvus corax")]));
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn normalize_rejects_empty_name_scientific() {
        let result = normalize_form(pairs(&[
            ("name_common", "Common Raven"),
            ("name_scientific", ""),
        ]));
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn normalize_drops_empty_media_values() {
        let new_bird = normalize_form(pairs(&[
            ("name_common", "Common Raven"),
            ("name_scientific", "Corvus corax"),
            ("images", ""),
        ]))
        .unwrap();

        assert!(new_bird.images.is_empty());
    }

    #[test]
    fn upload_entry_accepts_string_or_list_media() {
        let single: UploadEntry = serde_json::from_str(
            r#"{"name_common": "c", "name_scientific": "s", "images": "u1"}"#,
        )
        .unwrap();
        let many: UploadEntry = serde_json::from_str(
            r#"{"name_common": "c", "name_scientific": "s", "images": ["u1", "u2"]}"#,
        )
        .unwrap();

        assert_eq!(single.into_new_bird().unwrap().images, vec!["u1"]);
        assert_eq!(many.into_new_bird().unwrap().images, vec!["u1", "u2"]);
    }

    #[test]
    fn upload_entry_without_names_is_rejected() {
        let entry: UploadEntry = serde_json::from_str(r#"{"images": "u1"}"#).unwrap();
        assert!(entry.into_new_bird().is_err());
    }
}
