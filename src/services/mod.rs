pub mod errors;
pub mod notes;
pub mod resources;
pub mod saved;

pub use errors::{ServiceError, ServiceResult};
