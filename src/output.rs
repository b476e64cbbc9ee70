//! Output management module
//!
//! Writes accepted words to the output word list with buffering.

use crate::error::{Error, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Default buffer size for file writing (64KB)
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Output file writer with buffering
///
/// Opening truncates any existing file, so a rerun never appends to the
/// previous result.
pub struct OutputWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    lines_written: u64,
    bytes_written: u64,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(path: PathBuf, buffer_size: usize) -> Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| Error::file(&path, e))?;

        let writer = BufWriter::with_capacity(buffer_size.max(1), file);

        Ok(Self {
            writer,
            path,
            lines_written: 0,
            bytes_written: 0,
        })
    }

    /// Write a line to the output
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{}", line).map_err(|e| Error::file(&self.path, e))?;
        self.lines_written += 1;
        self.bytes_written += line.len() as u64 + 1; // +1 for newline
        Ok(())
    }

    /// Flush the buffer to disk
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| Error::file(&self.path, e))
    }

    /// Get the output path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get number of lines written
    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    /// Get bytes written
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}

impl Drop for OutputWriter {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}
