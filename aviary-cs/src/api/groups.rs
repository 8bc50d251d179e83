//! Group endpoints: creation, membership, lookup by name

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

use crate::db::{birds, groups};
use crate::error::{ApiError, ApiResult};
use crate::AppState;
use aviary_common::db::models::{BirdGroup, GroupCategory};

/// External representation of a group; category is the lowercase
/// enumeration string
#[derive(Debug, Serialize)]
pub struct GroupResponse {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub description: String,
}

impl From<BirdGroup> for GroupResponse {
    fn from(group: BirdGroup) -> Self {
        Self {
            id: group.id,
            name: group.name,
            category: group.category.as_str().to_string(),
            description: group.description,
        }
    }
}

/// Request body for POST /create-group
///
/// Required fields are Options so a missing key is a validation failure
/// (400) in the handler rather than an extractor rejection (422).
#[derive(Debug, Deserialize)]
pub struct CreateGroupRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: String,
}

/// POST /create-group
///
/// 400 when the name or category is missing/empty or the category is not
/// one of the enumeration values, 409 when the group name is already
/// taken.
pub async fn create_group(
    State(state): State<AppState>,
    Json(request): Json<CreateGroupRequest>,
) -> ApiResult<Json<GroupResponse>> {
    let name = match request.name {
        Some(name) if !name.is_empty() => name,
        _ => {
            return Err(ApiError::BadRequest(
                "Missing required field: name".to_string(),
            ))
        }
    };
    let category_str = match request.category {
        Some(category) if !category.is_empty() => category,
        _ => {
            return Err(ApiError::BadRequest(
                "Missing required field: category".to_string(),
            ))
        }
    };

    let category = GroupCategory::from_str(&category_str)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let group = groups::create_group(&state.db, &name, category, &request.description).await?;

    Ok(Json(GroupResponse::from(group)))
}

/// Request body for POST /add-to-group
#[derive(Debug, Deserialize)]
pub struct AddToGroupRequest {
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub birds: Vec<String>,
}

/// Outcome of an add-to-group request: which names were added and which
/// did not resolve to an existing bird record
#[derive(Debug, Serialize)]
pub struct AddToGroupResponse {
    pub group: String,
    pub added: Vec<String>,
    pub skipped: Vec<String>,
}

/// POST /add-to-group
///
/// Adds the named birds to the named group. Names that do not resolve to
/// an existing record are skipped without failing the request; repeat
/// additions are deduplicated silently. 404 when the group itself does
/// not exist.
pub async fn add_to_group(
    State(state): State<AppState>,
    Json(request): Json<AddToGroupRequest>,
) -> ApiResult<Json<AddToGroupResponse>> {
    let group_name = match request.group {
        Some(name) if !name.is_empty() => name,
        _ => {
            return Err(ApiError::BadRequest(
                "Missing required field: group".to_string(),
            ))
        }
    };

    let group = groups::find_group_by_name(&state.db, &group_name)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No group named '{}'", group_name)))?;

    let mut added = Vec::new();
    let mut skipped = Vec::new();

    for name_common in request.birds {
        match birds::find_bird_id_by_common_name(&state.db, &name_common).await? {
            Some(bird_id) => {
                groups::add_member(&state.db, group.id, bird_id).await?;
                added.push(name_common);
            }
            None => {
                debug!("Skipping unknown bird name: {}", name_common);
                skipped.push(name_common);
            }
        }
    }

    Ok(Json(AddToGroupResponse {
        group: group.name,
        added,
        skipped,
    }))
}

/// Query parameters for GET /get-group
#[derive(Debug, Deserialize)]
pub struct GroupQuery {
    pub name: String,
}

/// A group with its member records' common names
#[derive(Debug, Serialize)]
pub struct GroupDetailResponse {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub description: String,
    pub members: Vec<String>,
}

/// GET /get-group?name=...
///
/// 404 when no group has the given name.
pub async fn get_group(
    State(state): State<AppState>,
    Query(query): Query<GroupQuery>,
) -> ApiResult<Json<GroupDetailResponse>> {
    let group = groups::find_group_by_name(&state.db, &query.name)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No group named '{}'", query.name)))?;

    let members = groups::member_common_names(&state.db, group.id).await?;

    Ok(Json(GroupDetailResponse {
        id: group.id,
        name: group.name,
        category: group.category.as_str().to_string(),
        description: group.description,
        members,
    }))
}
