//! Raw caller input and its validated payloads.

pub mod notes;
pub mod resources;
