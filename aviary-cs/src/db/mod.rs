//! Database operations for the catalog service

pub mod birds;
pub mod groups;
