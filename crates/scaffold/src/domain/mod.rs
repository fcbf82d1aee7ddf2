//! Domain types: layout entries, file states and scaffold events.

pub mod errors;
pub mod model;
