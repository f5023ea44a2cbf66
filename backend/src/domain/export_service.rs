//! Export service domain logic.
//!
//! Turns the saved feedback list into CSV text and hands it to a download
//! sink. Serialization ([`to_csv`]) is pure; delivery is behind the
//! [`DownloadSink`] trait so it can be swapped for a stub in tests.
//!
//! ## CSV Format
//!
//! Every field, header included, is double-quoted; embedded quotes are
//! doubled; rows are separated by `\n` with no trailing newline:
//!
//! ```csv
//! "name","email","topic","rating","message","at"
//! "Ana","a@x.com","water","5","Great, thanks!","2025-03-01T10:00:00.000Z"
//! ```

use std::fs;
use std::path::{Component, Path, PathBuf};

use chrono::{NaiveDate, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use shared::FeedbackEntry;

use crate::error::ExportError;
use crate::storage::keys::FEEDBACK;
use crate::storage::LocalRecordStore;

/// Column order of the feedback export
pub const FEEDBACK_COLUMNS: [&str; 6] = ["name", "email", "topic", "rating", "message", "at"];

/// A ready-to-deliver CSV file
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
    pub row_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    /// No feedback is saved; no file should be produced
    NothingToExport,
    Ready(CsvExport),
}

/// Where a finished export ends up
pub trait DownloadSink {
    /// Deliver `export`, returning a human-readable location
    fn deliver(&self, export: &CsvExport) -> Result<String, ExportError>;
}

/// Sink that writes the file into a directory, creating it if needed
#[derive(Debug, Clone)]
pub struct DirectorySink {
    directory: PathBuf,
}

impl DirectorySink {
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    /// Sink for a user-typed subdirectory of the export directory.
    ///
    /// The export directory is `export_dir`, falling back to the downloads
    /// or home directory. `custom_path` must be relative, may not start with
    /// `~` and may not contain `..`; anything else is refused with
    /// [`ExportError::OutsideExportDirectory`].
    pub fn within_export_dir(custom_path: Option<&str>, export_dir: Option<&Path>) -> Result<Self, ExportError> {
        let root = export_dir
            .map(Path::to_path_buf)
            .or_else(dirs::download_dir)
            .or_else(dirs::home_dir)
            .ok_or(ExportError::NoExportDirectory)?;

        let cleaned = match custom_path.map(sanitize_path) {
            Some(cleaned) if !cleaned.is_empty() => cleaned,
            _ => return Ok(Self::new(root)),
        };

        let relative = Path::new(&cleaned);
        if cleaned.starts_with('~') {
            return Err(ExportError::OutsideExportDirectory(relative.to_path_buf()));
        }
        let mut directory = root;
        for component in relative.components() {
            match component {
                Component::Normal(part) => directory.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(ExportError::OutsideExportDirectory(relative.to_path_buf()));
                }
            }
        }
        Ok(Self::new(directory))
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl DownloadSink for DirectorySink {
    fn deliver(&self, export: &CsvExport) -> Result<String, ExportError> {
        fs::create_dir_all(&self.directory).map_err(|source| ExportError::Delivery {
            path: self.directory.clone(),
            source,
        })?;

        let file_path = self.directory.join(&export.filename);
        fs::write(&file_path, &export.content).map_err(|source| ExportError::Delivery {
            path: file_path.clone(),
            source,
        })?;

        Ok(file_path.to_string_lossy().to_string())
    }
}

/// Serialize `records` as CSV with the given column order.
///
/// Each record is looked up by field name; missing and null fields render as
/// empty strings, numbers and booleans as their JSON text.
pub fn to_csv<T: Serialize>(records: &[T], columns: &[&str]) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(columns)?;
    for record in records {
        let value = serde_json::to_value(record)?;
        let row: Vec<String> = columns.iter().map(|column| field_text(&value, column)).collect();
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.into_error().into()))?;
    let mut text = String::from_utf8(bytes)?;
    // Rows are newline-joined, not newline-terminated
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

fn field_text(record: &Value, column: &str) -> String {
    match record.get(column) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// `sdg-feedback-<YYYY-MM-DD>.csv`
pub fn feedback_filename(date: NaiveDate) -> String {
    format!("sdg-feedback-{}.csv", date.format("%Y-%m-%d"))
}

/// Basic cleanup of a user-typed directory path: surrounding quotes, escaped
/// spaces and trailing separators.
fn sanitize_path(path: &str) -> String {
    let mut cleaned = path.trim();
    if cleaned.len() >= 2
        && ((cleaned.starts_with('"') && cleaned.ends_with('"'))
            || (cleaned.starts_with('\'') && cleaned.ends_with('\'')))
    {
        cleaned = cleaned[1..cleaned.len() - 1].trim();
    }

    let mut cleaned = cleaned.replace("\\ ", " ");
    while cleaned.len() > 1 && (cleaned.ends_with('/') || cleaned.ends_with('\\')) {
        cleaned.pop();
    }
    cleaned
}

/// Export service for saved feedback
#[derive(Clone)]
pub struct ExportService {
    store: LocalRecordStore,
}

impl ExportService {
    pub fn new(store: LocalRecordStore) -> Self {
        Self { store }
    }

    /// Build today's feedback export
    pub fn export_feedback(&self) -> Result<ExportOutcome, ExportError> {
        self.export_feedback_on(Utc::now().date_naive())
    }

    /// Build the feedback export as if run on `date`
    pub fn export_feedback_on(&self, date: NaiveDate) -> Result<ExportOutcome, ExportError> {
        let entries: Vec<FeedbackEntry> = self.store.load(&FEEDBACK);
        if entries.is_empty() {
            info!("📄 EXPORT: no local feedback to export");
            return Ok(ExportOutcome::NothingToExport);
        }

        let content = to_csv(&entries, &FEEDBACK_COLUMNS)?;
        let export = CsvExport {
            filename: feedback_filename(date),
            content,
            row_count: entries.len(),
        };

        info!(
            "✅ EXPORT: generated {} ({} rows, {} bytes)",
            export.filename,
            export.row_count,
            export.content.len()
        );
        Ok(ExportOutcome::Ready(export))
    }

    /// Build today's export and hand it to `sink`. `Ok(None)` when there was
    /// nothing to export.
    pub fn export_to_sink(&self, sink: &dyn DownloadSink) -> Result<Option<(CsvExport, String)>, ExportError> {
        let export = match self.export_feedback()? {
            ExportOutcome::NothingToExport => return Ok(None),
            ExportOutcome::Ready(export) => export,
        };

        match sink.deliver(&export) {
            Ok(location) => {
                info!("✅ EXPORT: delivered {} to {}", export.filename, location);
                Ok(Some((export, location)))
            }
            Err(e) => {
                error!("❌ EXPORT: failed to deliver {}: {}", export.filename, e);
                Err(e)
            }
        }
    }
}
