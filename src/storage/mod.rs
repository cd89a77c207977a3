//! Storage abstraction for persisting files and their batches.
//!
//! This module defines the `Repository` trait, the contract the coordinator
//! requires from any persistence backend. The coordinator holds no durable
//! state of its own; everything lives behind this trait.

use async_trait::async_trait;

use crate::domain::{Batch, File};
use crate::error::Result;

pub mod memory;

pub use memory::InMemoryRepository;

/// Storage trait for persisting and querying file aggregates.
///
/// Semantics the coordinator depends on:
/// - Stores are upserts keyed by identifier: `store_file` by `File.id`,
///   `store_batch` by `(file_id, Batch.id)`. Concurrent writers race on
///   last-write-wins; backends wanting stronger isolation must provide it
///   themselves.
/// - Batch identifiers are scoped to their owning file, so two files may each
///   hold a batch with the same identifier.
/// - Enumerations are infallible and carry no ordering guarantee.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Upsert a file by its identifier.
    ///
    /// # Errors
    /// Returns a backend-specific [`crate::PayfileError::Storage`] on failure.
    async fn store_file(&self, file: File) -> Result<()>;

    /// Fetch a file by identifier. Fails with `NotFound` when absent.
    async fn find_file(&self, id: &str) -> Result<File>;

    /// All stored files, in no particular order.
    async fn find_all_files(&self) -> Vec<File>;

    /// Remove a file (and, structurally, its batches). Fails when absent.
    async fn delete_file(&self, id: &str) -> Result<()>;

    /// Upsert a batch under an existing file.
    ///
    /// # Errors
    /// Fails with `NotFound` when `file_id` does not name a stored file.
    async fn store_batch(&self, file_id: &str, batch: Batch) -> Result<()>;

    /// Fetch a batch by file and batch identifier. Fails with `NotFound`
    /// when either is absent.
    async fn find_batch(&self, file_id: &str, batch_id: &str) -> Result<Batch>;

    /// All batches owned by `file_id`; empty when the file is unknown or has
    /// none.
    async fn find_all_batches(&self, file_id: &str) -> Vec<Batch>;

    /// Remove a batch from its owning file. Fails when either is absent.
    async fn delete_batch(&self, file_id: &str, batch_id: &str) -> Result<()>;
}
