//! Error types for the payment-file coordination layer.

use std::fmt;

use thiserror::Error;

/// Result type alias using the payfile error type.
pub type Result<T> = std::result::Result<T, PayfileError>;

/// The stage of a multi-step file operation that failed.
///
/// Attached to [`PayfileError::Render`] so callers can tell whether a
/// rendering request died while fetching the file, recomputing its derived
/// control fields, or writing the plaintext output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStage {
    /// Fetching the file from storage
    Read,
    /// Recomputing derived control fields
    Build,
    /// Writing the plaintext rendering
    Write,
}

impl fmt::Display for RenderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderStage::Read => write!(f, "reading"),
            RenderStage::Build => write!(f, "building"),
            RenderStage::Write => write!(f, "writing plaintext"),
        }
    }
}

/// Main error type for the coordination layer.
///
/// Propagation is deliberately asymmetric and observable: read-path lookups
/// (`get_file`, `get_batch`) are normalized to `NotFound`, delete paths pass
/// the storage error through verbatim, and multi-stage operations wrap each
/// stage's failure with the file id and stage name without discarding the
/// cause.
#[derive(Error, Debug)]
pub enum PayfileError {
    /// Requested resource does not exist
    #[error("not found")]
    NotFound,

    /// Resource identifier collision (reserved; no operation produces this today)
    #[error("already exists")]
    AlreadyExists,

    /// Backend storage failure with an opaque cause
    #[error("storage failure: {0}")]
    Storage(String),

    /// Supplied header fails structural construction (e.g. unsupported entry class)
    #[error("batch construction failed: {0}")]
    Construction(String),

    /// Business-rule violation surfaced verbatim from the format engine
    #[error("validation failed: {0}")]
    Validation(String),

    /// A stage of a multi-step file operation failed
    #[error("problem {stage} file {file_id}")]
    Render {
        file_id: String,
        stage: RenderStage,
        #[source]
        source: Box<PayfileError>,
    },

    /// General error from anyhow
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PayfileError {
    /// Wrap an error with the file id and the stage that produced it.
    pub fn at_stage(self, file_id: impl Into<String>, stage: RenderStage) -> Self {
        PayfileError::Render {
            file_id: file_id.into(),
            stage,
            source: Box::new(self),
        }
    }

    /// True when this error is a not-found condition, including one wrapped
    /// inside stage context.
    pub fn is_not_found(&self) -> bool {
        match self {
            PayfileError::NotFound => true,
            PayfileError::Render { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}
