//! # Aviary Common Library
//!
//! Shared code for the Aviary bird catalog service including:
//! - Database initialization and schema
//! - Database models (birds, media assets, groups)
//! - Configuration loading
//! - Common error types

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
