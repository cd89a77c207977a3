//! File coordination: the service surface and its concrete implementation.
//!
//! This module defines the `FileService` trait — the operation surface a
//! transport layer consumes — and `FileManager`, the stateless coordinator
//! implementing it over a [`Repository`] and a [`FormatEngine`].
//!
//! The one piece of logic with real invariants here is resource-identifier
//! assignment. When a caller submits a header with an empty `id`, the
//! coordinator generates one and assigns it uniformly to the aggregate, its
//! header, and its control record, so every sub-record of the aggregate
//! answers to the same identifier. When the caller supplies an `id`, it is
//! honored verbatim on the aggregate and control record while the header is
//! left exactly as submitted. That asymmetry is observable behavior inherited
//! from the system this replaces; keep it (see DESIGN.md).

use std::io::Cursor;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Batch, BatchHeader, File, FileHeader};
use crate::error::{RenderStage, Result};
use crate::format::FormatEngine;
use crate::id::next_id;
use crate::storage::Repository;

/// Operation surface for interacting with payment-file records.
///
/// Each operation is a single-shot request/response; implementations hold no
/// cross-call session state and are safe for concurrent invocation.
#[async_trait]
pub trait FileService: Send + Sync {
    /// Create a new file record from a caller-supplied header and return its
    /// resource identifier.
    async fn create_file(&self, header: FileHeader) -> Result<String>;

    /// Retrieve a file by its resource identifier.
    ///
    /// Any storage failure is surfaced as `NotFound`; callers cannot
    /// distinguish "absent" from "backend error" on this path.
    async fn get_file(&self, id: &str) -> Result<File>;

    /// All files visible to the caller. Unordered, unpaginated.
    async fn get_files(&self) -> Vec<File>;

    /// Delete a file and, with it, its batches. Storage errors pass through
    /// verbatim.
    async fn delete_file(&self, id: &str) -> Result<()>;

    /// Produce the file's canonical plaintext rendering as a readable byte
    /// stream. Requires a header and at least one batch; each failing stage
    /// is reported with the file id and stage name.
    async fn get_file_contents(&self, id: &str) -> Result<Cursor<Vec<u8>>>;

    /// Run the format engine's validation over a stored file, returning its
    /// verdict unchanged.
    async fn validate_file(&self, id: &str) -> Result<()>;

    /// Create a new batch within a file and return its resource identifier.
    async fn create_batch(&self, file_id: &str, header: BatchHeader) -> Result<String>;

    /// Retrieve a batch by file and batch identifier. Normalized to
    /// `NotFound` like `get_file`.
    async fn get_batch(&self, file_id: &str, batch_id: &str) -> Result<Batch>;

    /// All batches owned by `file_id`; empty when there are none.
    async fn get_batches(&self, file_id: &str) -> Vec<Batch>;

    /// Remove a batch from its owning file. Storage errors pass through
    /// verbatim.
    async fn delete_batch(&self, file_id: &str, batch_id: &str) -> Result<()>;
}

/// Stateless coordinator over a storage backend and a format engine.
///
/// Holds only shared references to its collaborators; all mutable state lives
/// in the repository, so a single `FileManager` can serve concurrent callers
/// without internal locking.
///
/// # Example
/// ```ignore
/// let manager = FileManager::new(
///     Arc::new(InMemoryRepository::new()),
///     Arc::new(MockFormatEngine::new()),
/// );
/// let file_id = manager.create_file(FileHeader::default()).await?;
/// let batch_id = manager.create_batch(&file_id, BatchHeader::default()).await?;
/// ```
pub struct FileManager<R, E> {
    store: Arc<R>,
    engine: Arc<E>,
}

impl<R: Repository, E: FormatEngine> FileManager<R, E> {
    /// Create a coordinator over the given repository and format engine.
    pub fn new(store: Arc<R>, engine: Arc<E>) -> Self {
        Self { store, engine }
    }
}

#[async_trait]
impl<R: Repository, E: FormatEngine> FileService for FileManager<R, E> {
    #[tracing::instrument(skip(self, header), fields(header_id = %header.id))]
    async fn create_file(&self, header: FileHeader) -> Result<String> {
        let mut file = self.engine.build_file();
        file.set_header(header);
        if file.header.id.is_empty() {
            let id = next_id();
            file.id = id.clone();
            file.header.id = id.clone();
            file.control.id = id;
        } else {
            file.id = file.header.id.clone();
            file.control.id = file.header.id.clone();
        }
        let id = file.id.clone();
        self.store.store_file(file).await?;
        tracing::info!(file_id = %id, "created file");
        Ok(id)
    }

    async fn get_file(&self, id: &str) -> Result<File> {
        self.store
            .find_file(id)
            .await
            .map_err(|_| crate::PayfileError::NotFound)
    }

    async fn get_files(&self) -> Vec<File> {
        self.store.find_all_files().await
    }

    #[tracing::instrument(skip(self))]
    async fn delete_file(&self, id: &str) -> Result<()> {
        self.store.delete_file(id).await
    }

    #[tracing::instrument(skip(self))]
    async fn get_file_contents(&self, id: &str) -> Result<Cursor<Vec<u8>>> {
        let mut file = self
            .get_file(id)
            .await
            .map_err(|e| e.at_stage(id, RenderStage::Read))?;
        self.engine
            .finalize(&mut file)
            .map_err(|e| e.at_stage(id, RenderStage::Build))?;

        let mut buf = Vec::new();
        self.engine
            .render(&file, &mut buf)
            .map_err(|e| e.at_stage(id, RenderStage::Write))?;
        tracing::debug!(file_id = %id, bytes = buf.len(), "rendered file contents");
        Ok(Cursor::new(buf))
    }

    async fn validate_file(&self, id: &str) -> Result<()> {
        let file = self
            .get_file(id)
            .await
            .map_err(|e| e.at_stage(id, RenderStage::Read))?;
        self.engine.validate(&file)
    }

    #[tracing::instrument(skip(self, header), fields(header_id = %header.id))]
    async fn create_batch(&self, file_id: &str, header: BatchHeader) -> Result<String> {
        let mut batch = self.engine.build_batch(header)?;
        if batch.header.id.is_empty() {
            let id = next_id();
            batch.id = id.clone();
            batch.header.id = id.clone();
            batch.control.id = id;
        } else {
            batch.id = batch.header.id.clone();
            batch.control.id = batch.header.id.clone();
        }
        let id = batch.id.clone();
        self.store.store_batch(file_id, batch).await?;
        tracing::info!(file_id = %file_id, batch_id = %id, "created batch");
        Ok(id)
    }

    async fn get_batch(&self, file_id: &str, batch_id: &str) -> Result<Batch> {
        self.store
            .find_batch(file_id, batch_id)
            .await
            .map_err(|_| crate::PayfileError::NotFound)
    }

    async fn get_batches(&self, file_id: &str) -> Vec<Batch> {
        self.store.find_all_batches(file_id).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete_batch(&self, file_id: &str, batch_id: &str) -> Result<()> {
        self.store.delete_batch(file_id, batch_id).await
    }
}
