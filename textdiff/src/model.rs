use std::convert::Infallible;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Output style used when rendering hunks.
///
/// Deserializes through [`FromStr`], so unknown names become
/// [`DiffFormat::Generic`] instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum DiffFormat {
    #[default]
    Unified,
    Classic,
    Generic,
}

impl DiffFormat {
    pub fn delete_marker(self) -> char {
        match self {
            DiffFormat::Unified => '-',
            DiffFormat::Classic => '<',
            DiffFormat::Generic => '*',
        }
    }

    pub fn insert_marker(self) -> char {
        match self {
            DiffFormat::Unified => '+',
            DiffFormat::Classic => '>',
            DiffFormat::Generic => '*',
        }
    }

    pub fn context_marker(self) -> char {
        ' '
    }

    pub fn has_header(self) -> bool {
        self == DiffFormat::Unified
    }
}

/// Unknown names resolve to [`DiffFormat::Generic`].
impl FromStr for DiffFormat {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "unified" => DiffFormat::Unified,
            "classic" | "old" => DiffFormat::Classic,
            _ => DiffFormat::Generic,
        })
    }
}

impl From<String> for DiffFormat {
    fn from(name: String) -> Self {
        match name.parse() {
            Ok(format) => format,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for DiffFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiffFormat::Unified => "unified",
            DiffFormat::Classic => "classic",
            DiffFormat::Generic => "generic",
        };
        f.write_str(name)
    }
}

/// Edit-script algorithm. Both produce minimal scripts; alignment of
/// ambiguous regions can differ between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffAlgorithm {
    #[default]
    Myers,
    Lcs,
}

pub const DEFAULT_CONTEXT_LINES: usize = 3;

/// Per-call diff configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    pub format: DiffFormat,
    pub context_lines: usize,
    pub algorithm: DiffAlgorithm,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            format: DiffFormat::Unified,
            context_lines: DEFAULT_CONTEXT_LINES,
            algorithm: DiffAlgorithm::Myers,
        }
    }
}

impl DiffConfig {
    pub fn new(format: DiffFormat, context_lines: usize) -> Self {
        Self {
            format,
            context_lines,
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: DiffFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_context_lines(mut self, context_lines: usize) -> Self {
        self.context_lines = context_lines;
        self
    }

    pub fn with_algorithm(mut self, algorithm: DiffAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
}

/// One maximal run of the edit script, as zero-based half-open ranges into
/// both sequences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditOp {
    Equal { a: Range<usize>, b: Range<usize> },
    Delete { a: Range<usize>, b: Range<usize> },
    Insert { a: Range<usize>, b: Range<usize> },
}

impl EditOp {
    pub fn a_range(&self) -> Range<usize> {
        match self {
            EditOp::Equal { a, .. } | EditOp::Delete { a, .. } | EditOp::Insert { a, .. } => {
                a.clone()
            }
        }
    }

    pub fn b_range(&self) -> Range<usize> {
        match self {
            EditOp::Equal { b, .. } | EditOp::Delete { b, .. } | EditOp::Insert { b, .. } => {
                b.clone()
            }
        }
    }

    pub fn is_equal(&self) -> bool {
        matches!(self, EditOp::Equal { .. })
    }
}

/// Role of a line inside a hunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineTag {
    Context,
    Delete,
    Insert,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HunkLine {
    pub tag: LineTag,
    pub text: String,
}

impl HunkLine {
    pub(crate) fn new(tag: LineTag, text: &str) -> Self {
        Self {
            tag,
            text: text.to_string(),
        }
    }
}

/// A renderable change block. Starts are 1-based; lengths count context
/// plus changed lines on each side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hunk {
    pub start_a: usize,
    pub len_a: usize,
    pub start_b: usize,
    pub len_b: usize,
    pub lines: Vec<HunkLine>,
}

impl Hunk {
    /// One past the last line of `a` covered by this hunk (1-based).
    pub fn end_a(&self) -> usize {
        self.start_a + self.len_a
    }

    pub fn end_b(&self) -> usize {
        self.start_b + self.len_b
    }

    pub fn count(&self, tag: LineTag) -> usize {
        self.lines.iter().filter(|line| line.tag == tag).count()
    }

    /// `inserted - deleted` contributed by this hunk.
    pub fn length_difference(&self) -> isize {
        self.count(LineTag::Insert) as isize - self.count(LineTag::Delete) as isize
    }
}

/// Aggregate counters for diff output.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DiffStats {
    pub hunks: usize,
    pub inserted_lines: usize,
    pub deleted_lines: usize,
}

/// Note attached to a diff result that the rendered text cannot express.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub code: String,
    pub level: FindingLevel,
    pub message: String,
}

/// Severity level for a [`Finding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingLevel {
    Warning,
    Info,
}

/// Structured diff result.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Diff {
    pub format: DiffFormat,
    pub context_lines: usize,
    pub has_changes: bool,
    pub hunks: Vec<Hunk>,
    pub stats: DiffStats,
    pub findings: Vec<Finding>,
}

impl Diff {
    /// Render the hunks in the format this diff was computed for.
    pub fn render(&self) -> String {
        crate::format::format_hunks(&self.hunks, self.format)
    }
}
