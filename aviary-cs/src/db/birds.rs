//! Bird record database operations
//!
//! The one non-trivial operation lives here: creating a bird record
//! together with its child image/audio rows in a single transaction.

use crate::error::{ApiError, ApiResult};
use aviary_common::db::models::{Bird, BirdAudio, BirdImage, NewBird};
use sqlx::{Row, SqlitePool};

const CONFLICT_MESSAGE: &str =
    "A bird with the same common or scientific name already exists";

/// Create a bird record with its child asset rows in one transaction.
///
/// The parent row is inserted first, then the children in input order.
/// Any failure before commit rolls the whole operation back, so a bird is
/// never persisted with a partial child set. Name uniqueness is enforced
/// by the schema's UNIQUE constraints; a violation surfaces here as a
/// Conflict rather than a pre-check, which closes the race window between
/// concurrent identical-name submissions.
pub async fn create_bird(pool: &SqlitePool, new_bird: &NewBird) -> ApiResult<Bird> {
    let mut tx = pool.begin().await?;

    let bird_id = sqlx::query("INSERT INTO birds (name_common, name_scientific) VALUES (?, ?)")
        .bind(&new_bird.name_common)
        .bind(&new_bird.name_scientific)
        .execute(&mut *tx)
        .await
        .map_err(|e| ApiError::conflict_on_unique(e, CONFLICT_MESSAGE))?
        .last_insert_rowid();

    let mut images = Vec::with_capacity(new_bird.images.len());
    for image_url in &new_bird.images {
        let id = sqlx::query("INSERT INTO bird_images (bird_id, image_url) VALUES (?, ?)")
            .bind(bird_id)
            .bind(image_url)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();
        images.push(BirdImage {
            id,
            bird_id,
            image_url: image_url.clone(),
        });
    }

    let mut audio = Vec::with_capacity(new_bird.audio.len());
    for audio_url in &new_bird.audio {
        let id = sqlx::query("INSERT INTO bird_audio (bird_id, audio_url) VALUES (?, ?)")
            .bind(bird_id)
            .bind(audio_url)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();
        audio.push(BirdAudio {
            id,
            bird_id,
            audio_url: audio_url.clone(),
        });
    }

    tx.commit().await?;

    Ok(Bird {
        id: bird_id,
        name_common: new_bird.name_common.clone(),
        name_scientific: new_bird.name_scientific.clone(),
        images,
        audio,
    })
}

/// Load all bird records with their children, ordered by id
pub async fn list_birds(pool: &SqlitePool) -> ApiResult<Vec<Bird>> {
    let rows = sqlx::query("SELECT id, name_common, name_scientific FROM birds ORDER BY id")
        .fetch_all(pool)
        .await?;

    let mut birds = Vec::with_capacity(rows.len());
    for row in rows {
        birds.push(load_with_children(pool, &row).await?);
    }

    Ok(birds)
}

/// Pick one bird uniformly at random, or None when the catalog is empty
pub async fn random_bird(pool: &SqlitePool) -> ApiResult<Option<Bird>> {
    let row = sqlx::query(
        "SELECT id, name_common, name_scientific FROM birds ORDER BY RANDOM() LIMIT 1",
    )
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(Some(load_with_children(pool, &row).await?)),
        None => Ok(None),
    }
}

/// Resolve a bird id from its common name
pub async fn find_bird_id_by_common_name(
    pool: &SqlitePool,
    name_common: &str,
) -> ApiResult<Option<i64>> {
    let id = sqlx::query_scalar("SELECT id FROM birds WHERE name_common = ?")
        .bind(name_common)
        .fetch_optional(pool)
        .await?;

    Ok(id)
}

/// Build a Bird from a parent row, fetching children in insertion order
async fn load_with_children(pool: &SqlitePool, row: &sqlx::sqlite::SqliteRow) -> ApiResult<Bird> {
    let bird_id: i64 = row.get("id");

    let images = sqlx::query(
        "SELECT id, bird_id, image_url FROM bird_images WHERE bird_id = ? ORDER BY id",
    )
    .bind(bird_id)
    .fetch_all(pool)
    .await?
    .iter()
    .map(|r| BirdImage {
        id: r.get("id"),
        bird_id: r.get("bird_id"),
        image_url: r.get("image_url"),
    })
    .collect();

    let audio = sqlx::query(
        "SELECT id, bird_id, audio_url FROM bird_audio WHERE bird_id = ? ORDER BY id",
    )
    .bind(bird_id)
    .fetch_all(pool)
    .await?
    .iter()
    .map(|r| BirdAudio {
        id: r.get("id"),
        bird_id: r.get("bird_id"),
        audio_url: r.get("audio_url"),
    })
    .collect();

    Ok(Bird {
        id: bird_id,
        name_common: row.get("name_common"),
        name_scientific: row.get("name_scientific"),
        images,
        audio,
    })
}
