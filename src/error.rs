//! Error and diagnostic types for graph resolution

use std::path::PathBuf;
use thiserror::Error;

/// Hard failures. Resolution itself never fails; only IO and
/// (de)serialization at the edges do.
#[derive(Error, Debug)]
pub enum SchemaOrgError {
    #[error("Failed to load input from {path}: {reason}")]
    LoadError { path: String, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(PathBuf),
}

/// Recoverable problems found during a resolution pass.
///
/// These are logged with `tracing::warn!` as they are found and returned
/// with the resolved graph so hosts can surface them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveWarning {
    #[error("{node_type} {id} is missing required field '{field}'")]
    MissingRequiredField {
        node_type: String,
        id: String,
        field: String,
    },

    #[error("Nodes sharing @id {id} disagree on their primary type: keeping '{kept}', also saw '{discarded}'")]
    ConflictingTypes {
        id: String,
        kept: String,
        discarded: String,
    },

    #[error("No canonical host configured: {nodes} node(s) keep relative ids and urls")]
    MissingCanonicalHost { nodes: usize },
}
