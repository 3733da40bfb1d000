//! In-memory ZIP bundles

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::StorageResult;

/// Builds a ZIP archive in memory, one file at a time
pub struct ArchiveBuilder {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    entries: usize,
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
            entries: 0,
        }
    }

    /// Append a file. Names must be unique within the archive.
    pub fn add_file(&mut self, name: &str, bytes: &[u8]) -> StorageResult<()> {
        self.writer.start_file(name, self.options)?;
        self.writer.write_all(bytes)?;
        self.entries += 1;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Finish the central directory and return the archive bytes
    pub fn finish(self) -> StorageResult<Vec<u8>> {
        Ok(self.writer.finish()?.into_inner())
    }
}
