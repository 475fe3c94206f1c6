//! Error types for organogram operations.

use std::io;

use thiserror::Error;

use organograma_core::identifier::ParseNodeIdError;

/// The main error type for organogram operations.
///
/// The `Input` variant keeps the rejected JSON text next to the parser error,
/// so callers can point at the failing line and column.
#[derive(Debug, Error)]
pub enum OrganogramaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid input: {err}")]
    Input { err: serde_json::Error, src: String },

    #[error("Invalid node id: {0}")]
    NodeId(#[from] ParseNodeIdError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(#[from] crate::export::Error),
}

impl OrganogramaError {
    /// Create a new `Input` error with the associated source text.
    pub fn new_input_error(err: serde_json::Error, src: impl Into<String>) -> Self {
        Self::Input {
            err,
            src: src.into(),
        }
    }
}
