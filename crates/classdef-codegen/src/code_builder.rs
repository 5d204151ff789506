//! Ordered line buffer behind every emitter.
//!
//! A [`CodeBuilder`] starts with the standard header already in place and
//! accumulates rendered blocks. [`CodeBuilder::finish`] consumes it, so
//! appending after the epilogue or finishing twice does not compile. The
//! resulting [`GeneratedArtifact`] only reaches disk through
//! [`GeneratedArtifact::flush`], which consumes it in turn.
//!
//! # Examples
//!
//! ```
//! use classdef_codegen::{CodeBuilder, MemorySink};
//!
//! let mut builder = CodeBuilder::new("// header\n");
//! builder.push_block("int x;\n\n");
//! let artifact = builder.finish("// end\n");
//!
//! let mut sink = MemorySink::new();
//! artifact.flush(&mut sink).unwrap();
//! assert_eq!(sink.content().unwrap(), "// header\nint x;\n\n// end\n");
//! ```

use crate::sink::OutputSink;
use classdef_core::Result;
use serde::Serialize;

/// Accumulation state of a [`CodeBuilder`].
///
/// The later `Finished` and `Closed` states are the [`GeneratedArtifact`]
/// and its consumption by [`GeneratedArtifact::flush`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuilderState {
    /// Header inserted, nothing else yet
    Idle,
    /// At least one block appended
    Accumulating,
}

/// Buffer of output lines, header first.
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    lines: Vec<String>,
    state: BuilderState,
}

impl CodeBuilder {
    /// Creates a builder holding `header`.
    #[must_use]
    pub fn new(header: &str) -> Self {
        let mut lines = Vec::new();
        extend_lines(&mut lines, header);
        Self {
            lines,
            state: BuilderState::Idle,
        }
    }

    /// Appends a rendered block, split into lines.
    pub fn push_block(&mut self, block: &str) {
        extend_lines(&mut self.lines, block);
        self.state = BuilderState::Accumulating;
    }

    /// Appends one empty line.
    pub fn push_blank(&mut self) {
        self.lines.push(String::new());
        self.state = BuilderState::Accumulating;
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> BuilderState {
        self.state
    }

    /// Lines accumulated so far.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Appends the epilogue and seals the buffer.
    ///
    /// Trailing blank lines are dropped so the artifact ends with exactly
    /// one newline once written.
    #[must_use]
    pub fn finish(mut self, epilogue: &str) -> GeneratedArtifact {
        extend_lines(&mut self.lines, epilogue);
        while self.lines.last().is_some_and(String::is_empty) {
            self.lines.pop();
        }
        GeneratedArtifact { lines: self.lines }
    }
}

/// A complete artifact, staged in memory until flushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    lines: Vec<String>,
}

impl GeneratedArtifact {
    /// Final ordered lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The artifact text, one trailing newline.
    #[must_use]
    pub fn content(&self) -> String {
        render_lines(&self.lines)
    }

    /// Hands the lines to `sink`. This is the only write the artifact
    /// ever performs.
    ///
    /// # Errors
    ///
    /// Propagates the sink's error.
    pub fn flush(self, sink: &mut dyn OutputSink) -> Result<()> {
        sink.write_lines(&self.lines)
    }
}

/// Joins lines with `\n` and terminates the last one.
#[must_use]
pub fn render_lines(lines: &[String]) -> String {
    let mut out = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}

fn extend_lines(lines: &mut Vec<String>, block: &str) {
    lines.extend(block.lines().map(|line| line.trim_end().to_string()));
}
