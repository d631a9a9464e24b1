//! Output sinks
//!
//! The merged document is always assembled in memory first and handed to a
//! sink exactly once. The file sink writes through a temporary file in the
//! destination directory and renames it into place, so an output path that
//! is also one of the inputs is replaced atomically.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::Result;

/// Destination for the rendered document
pub trait OutputSink {
    /// Commit the complete document
    fn commit(&mut self, content: &str) -> Result<()>;

    /// Human-readable destination, for logs and the run summary
    fn describe(&self) -> String;
}

/// Atomic file destination
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputSink for FileSink {
    fn commit(&mut self, content: &str) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut temp = tempfile::Builder::new()
            .prefix(".tmp_")
            .suffix(".m3u")
            .tempfile_in(&dir)?;
        temp.write_all(content.as_bytes())?;
        temp.as_file().sync_all()?;

        tracing::debug!(
            temp = %temp.path().display(),
            path = %self.path.display(),
            "Replacing output file"
        );

        // On failure the temporary file is removed when `PersistError` drops
        temp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory destination, for library callers and tests
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    content: Option<String>,
    commits: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed content, if any
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Number of commits received
    pub fn commits(&self) -> usize {
        self.commits
    }
}

impl OutputSink for MemorySink {
    fn commit(&mut self, content: &str) -> Result<()> {
        self.content = Some(content.to_string());
        self.commits += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}
