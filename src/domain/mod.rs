//! Core domain types for the payment-file coordination layer.
//!
//! This module contains pure domain types with no persistence dependencies:
//! - Files and their header/control records
//! - Batches nested within files

pub mod batch;
pub mod file;

pub use batch::{Batch, BatchControl, BatchHeader};
pub use file::{File, FileControl, FileHeader};
