//! Line-oriented diff engine.
//!
//! This crate computes a minimal edit script between two line sequences,
//! groups it into hunks with configurable context, merges hunks whose context
//! overlaps, and renders them as unified, classic or generic text.
//!
//! Primary entrypoints:
//! - [`diff_text`]
//! - [`diff_strings`]
//! - [`diff_sequences`]
//! - [`format_summary_report`]
//!
//! # Example
//!
//! ```rust
//! use textdiff::{DiffConfig, diff_text};
//!
//! let a = ["aaa", "bbb", "ccc"];
//! let b = ["aaa", "xxx", "ccc"];
//! let out = diff_text(&a, &b, DiffConfig::default());
//! assert_eq!(out, "@@ -1,3 +1,3 @@\n aaa\n-bbb\n+xxx\n ccc\n");
//! ```

mod findings;
mod format;
mod hunk;
mod lcs;
mod merge;
mod model;
mod report;

pub use format::{format_hunks, unified_header};
pub use hunk::build_hunks;
pub use lcs::compute_edit_script;
pub use merge::HunkMerger;
pub use model::{
    DEFAULT_CONTEXT_LINES, Diff, DiffAlgorithm, DiffConfig, DiffFormat, DiffStats, EditOp,
    Finding, FindingLevel, Hunk, HunkLine, LineTag,
};
pub use report::format_summary_report;
pub use textdiff_lines::{LineSequence, SourceMetadata, split, split_named};

/// Diff two already-split line sequences and render the result.
///
/// Returns the empty string when the sequences are equal.
pub fn diff_text<A, B>(source_a: &[A], source_b: &[B], config: DiffConfig) -> String
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let hunks = compute_hunks(source_a, source_b, config);
    format_hunks(&hunks, config.format)
}

/// Split both texts into lines and diff them.
pub fn diff_strings(text_a: &str, text_b: &str, config: DiffConfig) -> String {
    let a = split(text_a);
    let b = split(text_b);
    diff_text(a.lines(), b.lines(), config)
}

/// Diff two sequences and keep the structured result.
pub fn diff_sequences(a: &LineSequence, b: &LineSequence, config: DiffConfig) -> Diff {
    let hunks = compute_hunks(a.lines(), b.lines(), config);
    let has_changes = !hunks.is_empty();
    let stats = build_stats(&hunks);
    let findings = findings::collect_findings(a, b, has_changes);

    Diff {
        format: config.format,
        context_lines: config.context_lines,
        has_changes,
        hunks,
        stats,
        findings,
    }
}

fn compute_hunks<A, B>(a: &[A], b: &[B], config: DiffConfig) -> Vec<Hunk>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let script = compute_edit_script(a, b, config.algorithm);
    if script.is_empty() {
        return Vec::new();
    }
    build_hunks(&script, a, b, config.context_lines)
}

fn build_stats(hunks: &[Hunk]) -> DiffStats {
    let mut stats = DiffStats {
        hunks: hunks.len(),
        ..DiffStats::default()
    };

    for hunk in hunks {
        stats.inserted_lines += hunk.count(LineTag::Insert);
        stats.deleted_lines += hunk.count(LineTag::Delete);
    }

    stats
}
