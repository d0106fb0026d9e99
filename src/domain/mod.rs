//! Domain entities shared by the repository and service layers.

pub mod note;
pub mod resource;
pub mod saved_resource;
pub mod types;
pub mod viewer;
