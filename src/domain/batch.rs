//! Batch aggregate types.
//!
//! A batch belongs to exactly one file and carries its own header and control
//! record. Batch identifiers are unique within their owning file, not
//! globally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Caller-supplied identity and company metadata for a batch.
///
/// The `entry_class` names the classification code the format engine uses to
/// pick a batch shape; the engine rejects codes it does not support. As with
/// files, an empty `id` asks the coordinator to assign one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchHeader {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub company_identification: String,
    #[serde(default)]
    pub entry_class: String,
    #[serde(default)]
    pub effective_date: Option<DateTime<Utc>>,
}

/// Summary totals for a batch, recomputed by the format engine when the
/// owning file is finalized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchControl {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub entry_count: i64,
    #[serde(default)]
    pub total_debit: i64,
    #[serde(default)]
    pub total_credit: i64,
}

/// The batch aggregate.
///
/// Same identifier invariant as [`crate::domain::File`], scoped to the batch:
/// generated identifiers land on `id`, `header.id`, and `control.id`
/// uniformly; caller-supplied ones land on `id` and `control.id` only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    #[serde(default)]
    pub id: String,
    pub header: BatchHeader,
    pub control: BatchControl,
}
