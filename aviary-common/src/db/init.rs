//! Database initialization
//!
//! Creates the database on first run and applies the schema idempotently.
//! Uniqueness of bird names and group names is enforced here, at the
//! storage layer, so concurrent identical submissions cannot both succeed
//! even if the application-level checks miss the race.

use crate::Result;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Foreign keys are OFF by default in SQLite and must be enabled on
    // every connection for the child-row and membership constraints to
    // hold. WAL allows concurrent readers with one writer.
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_millis(5000));

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create all tables (idempotent, safe to call multiple times)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_birds_table(pool).await?;
    create_bird_images_table(pool).await?;
    create_bird_audio_table(pool).await?;
    create_bird_groups_table(pool).await?;
    create_group_members_table(pool).await?;
    Ok(())
}

async fn create_birds_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS birds (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name_common TEXT NOT NULL UNIQUE,
            name_scientific TEXT NOT NULL UNIQUE,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_bird_images_table(pool: &SqlitePool) -> Result<()> {
    // Child rows are composition: they cannot outlive the parent bird.
    // Insertion order is preserved by the autoincrement id.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bird_images (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            bird_id INTEGER NOT NULL REFERENCES birds(id) ON DELETE CASCADE,
            image_url TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_bird_audio_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bird_audio (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            bird_id INTEGER NOT NULL REFERENCES birds(id) ON DELETE CASCADE,
            audio_url TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_bird_groups_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bird_groups (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            category TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_group_members_table(pool: &SqlitePool) -> Result<()> {
    // UNIQUE(group_id, bird_id) deduplicates repeated additions
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS group_members (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            group_id INTEGER NOT NULL REFERENCES bird_groups(id) ON DELETE CASCADE,
            bird_id INTEGER NOT NULL REFERENCES birds(id) ON DELETE CASCADE,
            UNIQUE(group_id, bird_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
