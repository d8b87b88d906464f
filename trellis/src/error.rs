//! Error types.

use thiserror::Error;

/// Structural errors: mistakes in the code that builds or queries a tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("element '{parent}' already has a child with id '{id}'")]
    DuplicateId { parent: String, id: String },

    #[error("no element at path '{path}' under '{from}'")]
    NotFound { from: String, path: String },

    #[error("invalid element id '{0}': ids must be non-empty and contain no '.'")]
    InvalidId(String),

    #[error("cannot add '{child}' under '{parent}': it would become its own ancestor")]
    Cycle { parent: String, child: String },

    #[error("element handle does not refer to a live element")]
    UnknownElement,
}

/// Per-frame drawing errors. Caught at the element boundary and logged.
#[derive(Debug, Error)]
pub enum DrawError {
    #[error("backend error: {0}")]
    Backend(String),

    #[error("render hook failed: {0}")]
    Callback(#[from] anyhow::Error),
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
