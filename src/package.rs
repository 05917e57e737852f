//! Archive packaging for a generated set.
//!
//! The [`ArchivePackager`] trait turns named byte blobs into one downloadable
//! container. [`ZipPackager`] writes a standard zip:
//!
//! - image entries are **stored** (they are already compressed);
//! - text entries (`index.html`, `styles.css`) are **deflated**;
//! - every entry carries the zip epoch timestamp (1980-01-01), so identical
//!   input produces an identical archive.

use std::collections::HashSet;
use std::io::{Cursor, Write};
use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

#[derive(Error, Debug)]
pub enum PackageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Duplicate archive entry: {0}")]
    DuplicateEntry(String),
}

/// Whether an entry's bytes are worth compressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Already-compressed image data.
    Image,
    /// Markup or stylesheet text.
    Text,
}

/// One named file in the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub bytes: Vec<u8>,
    pub kind: EntryKind,
}

impl ArchiveEntry {
    pub fn image(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
            kind: EntryKind::Image,
        }
    }

    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bytes: text.into().into_bytes(),
            kind: EntryKind::Text,
        }
    }
}

/// Packs entries into a single container.
pub trait ArchivePackager {
    fn pack(&self, entries: &[ArchiveEntry]) -> Result<Vec<u8>, PackageError>;
}

/// In-memory zip writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipPackager;

impl ZipPackager {
    pub fn new() -> Self {
        Self
    }
}

impl ArchivePackager for ZipPackager {
    fn pack(&self, entries: &[ArchiveEntry]) -> Result<Vec<u8>, PackageError> {
        let mut seen = HashSet::new();
        if let Some(dup) = entries.iter().find(|e| !seen.insert(e.name.as_str())) {
            return Err(PackageError::DuplicateEntry(dup.name.clone()));
        }

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for entry in entries {
            let method = match entry.kind {
                EntryKind::Image => CompressionMethod::Stored,
                EntryKind::Text => CompressionMethod::Deflated,
            };
            let options = SimpleFileOptions::default()
                .compression_method(method)
                .last_modified_time(DateTime::default());
            writer.start_file(entry.name.as_str(), options)?;
            writer.write_all(&entry.bytes)?;
        }
        Ok(writer.finish()?.into_inner())
    }
}
