//! HTTP API handlers for aviary-cs

pub mod groups;
pub mod health;
pub mod records;

pub use groups::{add_to_group, create_group, get_group};
pub use health::health_routes;
pub use records::{bird_data_upload, create_bird, get_all, get_random};
