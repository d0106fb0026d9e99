//! Diesel row types and their conversions to domain entities.

#[cfg(feature = "server")]
pub mod config;
pub mod note;
pub mod resource;
pub mod saved_resource;
