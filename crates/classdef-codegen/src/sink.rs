//! Destinations for finished artifacts.
//!
//! Sinks only ever see complete artifacts: a failed run drops its
//! [`GeneratedArtifact`](crate::GeneratedArtifact) before reaching one.

use crate::code_builder::render_lines;
use classdef_core::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Accepts the final ordered line sequence of one artifact.
pub trait OutputSink {
    /// Persists `lines`, each terminated by a newline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IoError`] if the lines cannot be persisted.
    fn write_lines(&mut self, lines: &[String]) -> Result<()>;
}

/// Writes the artifact to a file, atomically.
///
/// The content goes to `<output>.tmp` first and is renamed over the
/// destination, so readers never observe a half-written file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Creates a sink targeting `path`. Nothing is touched until the
    /// artifact is flushed.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Destination path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl OutputSink for FileSink {
    fn write_lines(&mut self, lines: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::IoError {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, render_lines(lines)).map_err(|e| Error::IoError {
            path: temp_path.display().to_string(),
            source: e,
        })?;

        if let Err(e) = fs::rename(&temp_path, &self.path) {
            // Leave no temp file behind
            let _ = fs::remove_file(&temp_path);
            return Err(Error::IoError {
                path: self.path.display().to_string(),
                source: e,
            });
        }

        tracing::info!("Wrote {} lines to {}", lines.len(), self.path.display());
        Ok(())
    }
}

/// Keeps the flushed lines in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
    lines: Option<Vec<String>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: None }
    }

    /// Lines received, or `None` if nothing was flushed.
    #[must_use]
    pub fn lines(&self) -> Option<&[String]> {
        self.lines.as_deref()
    }

    /// Text received, or `None` if nothing was flushed.
    #[must_use]
    pub fn content(&self) -> Option<String> {
        self.lines.as_deref().map(render_lines)
    }

    /// Whether an artifact was flushed.
    #[must_use]
    pub const fn is_written(&self) -> bool {
        self.lines.is_some()
    }
}

impl OutputSink for MemorySink {
    fn write_lines(&mut self, lines: &[String]) -> Result<()> {
        self.lines = Some(lines.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_file_sink_writes_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Transform.ts");
        let mut sink = FileSink::new(&path);

        sink.write_lines(&lines(&["a", "", "b"])).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "a\n\nb\n");
        assert!(!dir.path().join("Transform.ts.tmp").exists());
    }

    #[test]
    fn test_file_sink_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("codegen/bindings/Transform.cc");
        let mut sink = FileSink::new(&path);

        sink.write_lines(&lines(&["x"])).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_file_sink_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.ts");
        fs::write(&path, "stale\n").unwrap();

        FileSink::new(&path).write_lines(&lines(&["fresh"])).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh\n");
    }

    #[test]
    fn test_file_sink_construction_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/out.ts");
        let sink = FileSink::new(&path);

        assert_eq!(sink.path(), path);
        assert!(!dir.path().join("nested").exists());
    }

    #[test]
    fn test_file_sink_unwritable_destination() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();

        let err = FileSink::new(blocker.join("out.ts"))
            .write_lines(&lines(&["x"]))
            .unwrap_err();
        assert!(err.is_io_error());
    }

    #[test]
    fn test_memory_sink() {
        let mut sink = MemorySink::new();
        assert!(!sink.is_written());
        assert_eq!(sink.content(), None);

        sink.write_lines(&lines(&["a", "b"])).unwrap();
        assert!(sink.is_written());
        assert_eq!(sink.content().unwrap(), "a\nb\n");
    }
}
