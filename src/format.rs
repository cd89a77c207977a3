//! Format engine abstraction for constructing, validating, and rendering
//! payment files.
//!
//! This module defines the `FormatEngine` trait to abstract the file-format
//! library, enabling testability with mock implementations. The coordinator
//! never inspects file contents itself; everything grammar-shaped (field
//! layouts, checksums, entry semantics) lives behind this seam.

use std::io::Write;

use crate::domain::{Batch, BatchHeader, File, FileHeader};
use crate::error::{PayfileError, Result};

/// Trait for the file-format engine collaborator.
///
/// All methods are synchronous: the engine is a CPU-bound library with no
/// suspension points of its own. Implementations must be shareable across
/// concurrent coordinator calls.
///
/// # Example
/// ```ignore
/// let engine = MockFormatEngine::new();
/// let mut file = engine.build_file();
/// file.set_header(header);
/// engine.finalize(&mut file)?;
/// engine.render(&file, &mut buf)?;
/// ```
pub trait FormatEngine: Send + Sync {
    /// Construct an empty file aggregate.
    fn build_file(&self) -> File;

    /// Construct a batch from a caller-supplied header.
    ///
    /// # Errors
    /// Returns [`PayfileError::Construction`] when the header is structurally
    /// invalid, e.g. an unsupported entry classification code.
    fn build_batch(&self, header: BatchHeader) -> Result<Batch>;

    /// Recompute the file's derived control fields in place.
    ///
    /// # Errors
    /// Fails unless the file carries a header and at least one batch; a file
    /// with no batches is never rendered as an empty body.
    fn finalize(&self, file: &mut File) -> Result<()>;

    /// Check the file against the format's business rules.
    ///
    /// # Errors
    /// Returns [`PayfileError::Validation`] with the engine's verdict.
    fn validate(&self, file: &File) -> Result<()>;

    /// Render the file's canonical plaintext representation into `w`.
    fn render(&self, file: &File, w: &mut dyn Write) -> Result<()>;
}

// ============================================================================
// Test/Mock Implementation
// ============================================================================

use parking_lot::Mutex;

/// Entry classification codes the mock engine accepts by default.
const DEFAULT_ENTRY_CLASSES: &[&str] = &["PPD", "CCD", "WEB", "TEL"];

/// Mock format engine for testing.
///
/// Implements just enough structure to exercise the coordinator: batch
/// construction rejects unknown entry classes, finalization enforces the
/// header-plus-one-batch minimum and sums batch controls into the file
/// control, and rendering emits one diagnostic line per record. Validation
/// and rendering failures can be injected.
///
/// # Example
/// ```ignore
/// let engine = MockFormatEngine::new();
/// engine.fail_validation("batch 1 out of balance");
/// assert!(engine.validate(&file).is_err());
/// ```
pub struct MockFormatEngine {
    supported_classes: Vec<String>,
    validation_error: Mutex<Option<String>>,
    render_error: Mutex<Option<String>>,
    calls: Mutex<Vec<String>>,
}

impl MockFormatEngine {
    /// Create a mock engine accepting the default entry classes.
    pub fn new() -> Self {
        Self {
            supported_classes: DEFAULT_ENTRY_CLASSES.iter().map(|s| s.to_string()).collect(),
            validation_error: Mutex::new(None),
            render_error: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Replace the set of entry classes `build_batch` accepts.
    pub fn with_supported_classes(mut self, classes: &[&str]) -> Self {
        self.supported_classes = classes.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Make every subsequent `validate` call fail with `message`.
    pub fn fail_validation(&self, message: &str) {
        *self.validation_error.lock() = Some(message.to_string());
    }

    /// Make every subsequent `render` call fail with `message`.
    pub fn fail_render(&self, message: &str) {
        *self.render_error.lock() = Some(message.to_string());
    }

    /// Names of the trait methods invoked so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, op: &str) {
        self.calls.lock().push(op.to_string());
    }
}

impl Default for MockFormatEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatEngine for MockFormatEngine {
    fn build_file(&self) -> File {
        self.record("build_file");
        File::default()
    }

    fn build_batch(&self, header: BatchHeader) -> Result<Batch> {
        self.record("build_batch");
        if !header.entry_class.is_empty()
            && !self.supported_classes.iter().any(|c| c == &header.entry_class)
        {
            return Err(PayfileError::Construction(format!(
                "unsupported entry class '{}'",
                header.entry_class
            )));
        }
        Ok(Batch {
            id: String::new(),
            header,
            control: Default::default(),
        })
    }

    fn finalize(&self, file: &mut File) -> Result<()> {
        self.record("finalize");
        if file.header == FileHeader::default() {
            return Err(PayfileError::Construction(
                "file has no header".to_string(),
            ));
        }
        if file.batches.is_empty() {
            return Err(PayfileError::Construction(
                "file must contain at least one batch".to_string(),
            ));
        }
        file.control.batch_count = file.batches.len() as i64;
        file.control.entry_count = file.batches.iter().map(|b| b.control.entry_count).sum();
        file.control.total_debit = file.batches.iter().map(|b| b.control.total_debit).sum();
        file.control.total_credit = file.batches.iter().map(|b| b.control.total_credit).sum();
        Ok(())
    }

    fn validate(&self, _file: &File) -> Result<()> {
        self.record("validate");
        match self.validation_error.lock().as_ref() {
            Some(message) => Err(PayfileError::Validation(message.clone())),
            None => Ok(()),
        }
    }

    fn render(&self, file: &File, w: &mut dyn Write) -> Result<()> {
        self.record("render");
        if let Some(message) = self.render_error.lock().as_ref() {
            return Err(PayfileError::Other(anyhow::anyhow!(message.clone())));
        }
        writeln!(
            w,
            "file {} origin={} destination={}",
            file.id, file.header.origin, file.header.destination
        )
        .map_err(anyhow::Error::from)?;
        for batch in &file.batches {
            writeln!(
                w,
                "batch {} class={} company={}",
                batch.id, batch.header.entry_class, batch.header.company_name
            )
            .map_err(anyhow::Error::from)?;
        }
        writeln!(
            w,
            "control {} batches={} entries={} debit={} credit={}",
            file.control.id,
            file.control.batch_count,
            file.control.entry_count,
            file.control.total_debit,
            file.control.total_credit
        )
        .map_err(anyhow::Error::from)?;
        Ok(())
    }
}
