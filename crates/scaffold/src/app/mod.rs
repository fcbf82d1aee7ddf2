//! Application layer orchestrating domain logic and infrastructure.

pub mod layout;
pub mod scaffold;
