//! Coordination layer for structured payment-file records.
//!
//! This crate provides a 'manager' that accepts caller-supplied file and
//! batch headers, assigns consistent resource identifiers across every
//! sub-record of an aggregate, and orchestrates two collaborators behind
//! traits: a [`storage::Repository`] that persists file aggregates and a
//! [`format::FormatEngine`] that owns the file-format grammar (construction,
//! validation, plaintext rendering).
//!
//! The coordinator itself is stateless: construct one [`FileManager`] at
//! process start over a repository and an engine, and share it across
//! concurrent callers.

pub mod domain;
pub mod error;
pub mod format;
pub mod id;
pub mod manager;
pub mod storage;

// Re-export commonly used types
pub use domain::{Batch, BatchControl, BatchHeader, File, FileControl, FileHeader};
pub use error::{PayfileError, RenderStage, Result};
pub use format::{FormatEngine, MockFormatEngine};
pub use id::next_id;
pub use manager::{FileManager, FileService};
pub use storage::{InMemoryRepository, Repository};
