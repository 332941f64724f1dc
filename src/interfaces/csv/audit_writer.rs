use crate::domain::audit::AuditEntry;
use crate::domain::ports::AuditLog;
use crate::error::{DicepayError, Result};
use async_trait::async_trait;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

/// Appends one `timestamp,die1,die2` row per roll to a CSV sink.
///
/// Every row is flushed as soon as it is written.
pub struct CsvAuditLog<W: Write> {
    writer: Mutex<csv::Writer<W>>,
}

impl<W: Write> CsvAuditLog<W> {
    /// Wraps a fresh sink. The header row is written with the first entry.
    pub fn new(sink: W) -> Self {
        Self::with_header(sink, true)
    }

    fn with_header(sink: W, has_headers: bool) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(has_headers)
            .from_writer(sink);
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the log and returns the underlying sink.
    pub fn into_inner(self) -> Result<W> {
        let writer = self
            .writer
            .into_inner()
            .map_err(|_| DicepayError::Storage("audit log lock poisoned".to_string()))?;
        writer
            .into_inner()
            .map_err(|e| DicepayError::Io(e.into_error()))
    }
}

impl CsvAuditLog<File> {
    /// Opens `path` for appending, writing the header only if the file is new or empty.
    pub fn append<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let is_empty = file.metadata()?.len() == 0;
        Ok(Self::with_header(file, is_empty))
    }
}

#[async_trait]
impl<W: Write + Send> AuditLog for CsvAuditLog<W> {
    async fn record(&self, entry: &AuditEntry) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| DicepayError::Storage("audit log lock poisoned".to_string()))?;
        writer.serialize(entry)?;
        writer.flush()?;
        Ok(())
    }
}
