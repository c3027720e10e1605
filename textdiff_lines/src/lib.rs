//! Line sequences for the textdiff engine.
//!
//! This crate turns raw text into an ordered, newline-stripped list of lines
//! and records enough metadata about the source to report on it later:
//! - every `\n` terminates a line, a `\r` right before it is dropped too
//! - a trailing segment without `\n` still becomes the last line
//! - empty input yields an empty sequence
//!
//! # Example
//!
//! ```rust
//! use textdiff_lines::split;
//!
//! let seq = split("aaa\r\nbbb\nccc");
//! assert_eq!(seq.lines(), ["aaa", "bbb", "ccc"]);
//! assert!(!seq.metadata.final_newline);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// Facts about the text a [`LineSequence`] was split from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceMetadata {
    pub source_name: Option<String>,
    pub original_bytes: usize,
    pub line_count: usize,
    /// Whether the last line was terminated. Empty input counts as terminated.
    pub final_newline: bool,
    pub crlf_lines: usize,
}

/// Ordered, 0-indexed list of lines with their terminators stripped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LineSequence {
    pub metadata: SourceMetadata,
    lines: Vec<String>,
}

impl LineSequence {
    /// Build a sequence from lines that were already split by the caller.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines = lines.into_iter().map(Into::into).collect::<Vec<String>>();
        let metadata = SourceMetadata {
            source_name: None,
            original_bytes: lines.iter().map(|line| line.len() + 1).sum(),
            line_count: lines.len(),
            final_newline: true,
            crlf_lines: 0,
        };
        Self { metadata, lines }
    }

    /// Attach a display name for the source (path or label).
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.metadata.source_name = Some(name.into());
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}

impl Index<usize> for LineSequence {
    type Output = str;

    fn index(&self, idx: usize) -> &str {
        &self.lines[idx]
    }
}

impl fmt::Display for LineSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.iter() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Split raw text into a [`LineSequence`].
pub fn split(input: &str) -> LineSequence {
    let mut lines = Vec::new();
    let mut crlf_lines = 0usize;
    let mut final_newline = true;
    let mut start = 0usize;

    while start < input.len() {
        let next_lf = input[start..].find('\n').map(|idx| start + idx);
        let (segment, next_start) = if let Some(lf_idx) = next_lf {
            (&input[start..=lf_idx], lf_idx + 1)
        } else {
            final_newline = false;
            (&input[start..], input.len())
        };

        let (raw, line_ending) = split_line_ending(segment);
        if line_ending == "\r\n" {
            crlf_lines += 1;
        }
        lines.push(raw.to_string());
        start = next_start;
    }

    LineSequence {
        metadata: SourceMetadata {
            source_name: None,
            original_bytes: input.len(),
            line_count: lines.len(),
            final_newline,
            crlf_lines,
        },
        lines,
    }
}

/// Same as [`split`], tagging the result with a source name.
pub fn split_named(input: &str, name: impl Into<String>) -> LineSequence {
    split(input).with_source_name(name)
}

fn split_line_ending(segment: &str) -> (&str, &str) {
    if let Some(raw) = segment.strip_suffix("\r\n") {
        (raw, "\r\n")
    } else if let Some(raw) = segment.strip_suffix('\n') {
        (raw, "\n")
    } else {
        (segment, "")
    }
}
