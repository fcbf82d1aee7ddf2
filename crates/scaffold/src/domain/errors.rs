//! Domain-specific errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("layout entry is empty")]
    EmptyEntry,
    #[error("layout entry '{0}' must be relative to the project root")]
    AbsoluteEntry(String),
    #[error("layout entry '{0}' escapes the project root")]
    ParentTraversal(String),
    #[error("layout entry '{0}' does not name a file")]
    MissingFileName(String),
}
