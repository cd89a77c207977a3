//! File aggregate types.
//!
//! A file is the top-level payment-file record: one header, one control
//! (summary) record, and an ordered sequence of batches. Resource identifiers
//! are opaque strings; caller-supplied values are honored verbatim, so they
//! are not constrained to any particular shape here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::batch::Batch;

/// Caller-supplied identity and routing metadata for a file.
///
/// An empty `id` asks the coordinator to assign one; a non-empty `id` is
/// honored verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHeader {
    #[serde(default)]
    pub id: String,
    /// Routing identifier of the originating institution
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub origin_name: String,
    /// Routing identifier of the receiving institution
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub destination_name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Summary totals for a file, recomputed by the format engine when the file
/// is finalized for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileControl {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub batch_count: i64,
    #[serde(default)]
    pub entry_count: i64,
    #[serde(default)]
    pub total_debit: i64,
    #[serde(default)]
    pub total_credit: i64,
}

/// The file aggregate.
///
/// Invariant maintained by the coordinator: after creation with a generated
/// identifier, `id == header.id == control.id`. When the caller supplies an
/// identifier, `id == control.id` and the header keeps exactly what the
/// caller sent (see the coordinator docs for this asymmetry).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    #[serde(default)]
    pub id: String,
    pub header: FileHeader,
    pub control: FileControl,
    #[serde(default)]
    pub batches: Vec<Batch>,
}

impl File {
    /// Replace the file's header with a caller-supplied one.
    pub fn set_header(&mut self, header: FileHeader) {
        self.header = header;
    }

    /// Find a batch by identifier.
    pub fn batch(&self, batch_id: &str) -> Option<&Batch> {
        self.batches.iter().find(|b| b.id == batch_id)
    }
}
