//! Kernel error types.

use thiserror::Error;

/// Errors surfaced by the registry and its collaborators.
///
/// Lookups never produce an error; a missing zone or section is reported as
/// `None`. These variants cover configuration mistakes and collaborator
/// failures, which the render path logs and skips.
#[derive(Debug, Error)]
pub enum PostViewsError {
    #[error("section '{section}' targets unknown zone '{zone}'")]
    UnknownZone { section: String, zone: String },

    #[error("template error")]
    Template(#[from] tera::Error),

    #[error("query failed: {0}")]
    Query(String),

    #[error("render failed: {0}")]
    Render(String),
}

/// Result type alias using PostViewsError.
pub type Result<T> = std::result::Result<T, PostViewsError>;
