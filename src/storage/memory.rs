//! In-memory implementation of the `Repository` trait.
//!
//! Process-local reference backend: a single map of files guarded by a
//! read-write lock, with batches stored inside their owning file. Useful for
//! tests and for single-process deployments that do not need durability.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::{Batch, File};
use crate::error::{PayfileError, Result};
use crate::storage::Repository;

/// Map-backed repository. Construct once at process start and share behind
/// an `Arc`; interior locking makes it safe for concurrent coordinator calls.
#[derive(Default)]
pub struct InMemoryRepository {
    files: RwLock<HashMap<String, File>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn store_file(&self, file: File) -> Result<()> {
        self.files.write().insert(file.id.clone(), file);
        Ok(())
    }

    async fn find_file(&self, id: &str) -> Result<File> {
        self.files
            .read()
            .get(id)
            .cloned()
            .ok_or(PayfileError::NotFound)
    }

    async fn find_all_files(&self) -> Vec<File> {
        self.files.read().values().cloned().collect()
    }

    async fn delete_file(&self, id: &str) -> Result<()> {
        match self.files.write().remove(id) {
            Some(_) => Ok(()),
            None => Err(PayfileError::NotFound),
        }
    }

    async fn store_batch(&self, file_id: &str, batch: Batch) -> Result<()> {
        let mut files = self.files.write();
        let file = files.get_mut(file_id).ok_or(PayfileError::NotFound)?;
        match file.batches.iter_mut().find(|b| b.id == batch.id) {
            Some(existing) => *existing = batch,
            None => file.batches.push(batch),
        }
        Ok(())
    }

    async fn find_batch(&self, file_id: &str, batch_id: &str) -> Result<Batch> {
        self.files
            .read()
            .get(file_id)
            .and_then(|f| f.batch(batch_id))
            .cloned()
            .ok_or(PayfileError::NotFound)
    }

    async fn find_all_batches(&self, file_id: &str) -> Vec<Batch> {
        self.files
            .read()
            .get(file_id)
            .map(|f| f.batches.clone())
            .unwrap_or_default()
    }

    async fn delete_batch(&self, file_id: &str, batch_id: &str) -> Result<()> {
        let mut files = self.files.write();
        let file = files.get_mut(file_id).ok_or(PayfileError::NotFound)?;
        let before = file.batches.len();
        file.batches.retain(|b| b.id != batch_id);
        if file.batches.len() == before {
            return Err(PayfileError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_with_id(id: &str) -> File {
        let mut file = File::default();
        file.id = id.to_string();
        file
    }

    fn batch_with_id(id: &str) -> Batch {
        let mut batch = Batch::default();
        batch.id = id.to_string();
        batch
    }

    #[tokio::test]
    async fn store_file_is_an_upsert() {
        let repo = InMemoryRepository::new();
        let mut file = file_with_id("f1");
        repo.store_file(file.clone()).await.unwrap();

        file.header.origin = "231380104".to_string();
        repo.store_file(file.clone()).await.unwrap();

        let found = repo.find_file("f1").await.unwrap();
        assert_eq!(found.header.origin, "231380104");
        assert_eq!(repo.find_all_files().await.len(), 1);
    }

    #[tokio::test]
    async fn find_and_delete_missing_file_fail_not_found() {
        let repo = InMemoryRepository::new();
        assert!(matches!(
            repo.find_file("nope").await.unwrap_err(),
            PayfileError::NotFound
        ));
        assert!(matches!(
            repo.delete_file("nope").await.unwrap_err(),
            PayfileError::NotFound
        ));
    }

    #[tokio::test]
    async fn store_batch_requires_an_existing_file() {
        let repo = InMemoryRepository::new();
        let err = repo.store_batch("nope", batch_with_id("b1")).await.unwrap_err();
        assert!(matches!(err, PayfileError::NotFound));
    }

    #[tokio::test]
    async fn store_batch_replaces_by_id_within_the_file() {
        let repo = InMemoryRepository::new();
        repo.store_file(file_with_id("f1")).await.unwrap();

        repo.store_batch("f1", batch_with_id("b1")).await.unwrap();
        let mut updated = batch_with_id("b1");
        updated.header.company_name = "Acme".to_string();
        repo.store_batch("f1", updated).await.unwrap();

        let batches = repo.find_all_batches("f1").await;
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].header.company_name, "Acme");
    }

    #[tokio::test]
    async fn batch_ids_are_scoped_per_file() {
        let repo = InMemoryRepository::new();
        repo.store_file(file_with_id("f1")).await.unwrap();
        repo.store_file(file_with_id("f2")).await.unwrap();

        repo.store_batch("f1", batch_with_id("b1")).await.unwrap();
        repo.store_batch("f2", batch_with_id("b1")).await.unwrap();

        assert_eq!(repo.find_all_batches("f1").await.len(), 1);
        assert_eq!(repo.find_all_batches("f2").await.len(), 1);

        repo.delete_batch("f1", "b1").await.unwrap();
        assert!(repo.find_all_batches("f1").await.is_empty());
        assert_eq!(repo.find_all_batches("f2").await.len(), 1);
    }

    #[tokio::test]
    async fn deleting_a_file_removes_its_batches() {
        let repo = InMemoryRepository::new();
        repo.store_file(file_with_id("f1")).await.unwrap();
        repo.store_batch("f1", batch_with_id("b1")).await.unwrap();

        repo.delete_file("f1").await.unwrap();
        assert!(repo.find_all_batches("f1").await.is_empty());
        assert!(matches!(
            repo.find_batch("f1", "b1").await.unwrap_err(),
            PayfileError::NotFound
        ));
    }
}
