//! Error types for the routing engine's boundary surface.
//!
//! Per the error-handling design: only two outcomes are fatal at the
//! public boundary (`UnknownNode`, `Configuration`). Every other outcome
//! (infeasible, out-of-window) is a plain sentinel value threaded through
//! the oracle/solver/optimizer, never an error variant.

use thiserror::Error;

/// Result type alias used throughout the crate's fallible boundary operations.
pub type Result<T> = std::result::Result<T, RoutingError>;

#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("unknown node id: {0}")]
    UnknownNode(i64),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("propagation error: {0}")]
    Propagation(String),
}

impl RoutingError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn propagation(msg: impl Into<String>) -> Self {
        Self::Propagation(msg.into())
    }
}
