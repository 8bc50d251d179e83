//! Group database operations

use crate::error::{ApiError, ApiResult};
use aviary_common::db::models::{BirdGroup, GroupCategory};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;

/// Create a new group. Group names are unique; a duplicate maps to Conflict.
pub async fn create_group(
    pool: &SqlitePool,
    name: &str,
    category: GroupCategory,
    description: &str,
) -> ApiResult<BirdGroup> {
    let id = sqlx::query("INSERT INTO bird_groups (name, category, description) VALUES (?, ?, ?)")
        .bind(name)
        .bind(category.as_str())
        .bind(description)
        .execute(pool)
        .await
        .map_err(|e| {
            ApiError::conflict_on_unique(e, &format!("A group named '{}' already exists", name))
        })?
        .last_insert_rowid();

    Ok(BirdGroup {
        id,
        name: name.to_string(),
        category,
        description: description.to_string(),
    })
}

/// Look up a group by its unique name
pub async fn find_group_by_name(pool: &SqlitePool, name: &str) -> ApiResult<Option<BirdGroup>> {
    let row = sqlx::query("SELECT id, name, category, description FROM bird_groups WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => {
            let category_str: String = row.get("category");
            Ok(Some(BirdGroup {
                id: row.get("id"),
                name: row.get("name"),
                category: GroupCategory::from_str(&category_str)?,
                description: row.get("description"),
            }))
        }
        None => Ok(None),
    }
}

/// Add a bird to a group.
///
/// Repeat additions are silently deduplicated by the UNIQUE(group_id,
/// bird_id) constraint; INSERT OR IGNORE makes that a no-op instead of an
/// error.
pub async fn add_member(pool: &SqlitePool, group_id: i64, bird_id: i64) -> ApiResult<()> {
    sqlx::query("INSERT OR IGNORE INTO group_members (group_id, bird_id) VALUES (?, ?)")
        .bind(group_id)
        .bind(bird_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Common names of a group's members, in membership insertion order
pub async fn member_common_names(pool: &SqlitePool, group_id: i64) -> ApiResult<Vec<String>> {
    let names = sqlx::query_scalar(
        r#"
        SELECT b.name_common
        FROM group_members gm
        JOIN birds b ON b.id = gm.bird_id
        WHERE gm.group_id = ?
        ORDER BY gm.id
        "#,
    )
    .bind(group_id)
    .fetch_all(pool)
    .await?;

    Ok(names)
}
