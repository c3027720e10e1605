use std::ops::Range;

use crate::merge::HunkMerger;
use crate::model::{EditOp, Hunk, HunkLine, LineTag};

/// Adjacent non-equal runs plus the sizes of the equal runs around them.
#[derive(Debug)]
struct ChangeGroup<'s> {
    changes: &'s [EditOp],
    equal_before: usize,
    equal_after: usize,
}

impl ChangeGroup<'_> {
    fn a_range(&self) -> Range<usize> {
        span(self.changes.iter().map(EditOp::a_range))
    }

    fn b_range(&self) -> Range<usize> {
        span(self.changes.iter().map(EditOp::b_range))
    }
}

fn span(mut ranges: impl Iterator<Item = Range<usize>>) -> Range<usize> {
    let first = ranges.next().unwrap_or(0..0);
    let end = ranges.last().map_or(first.end, |last| last.end);
    first.start..end
}

/// Group an edit script into hunks with up to `context_lines` lines of
/// context on each side, merging neighbours whose context overlaps.
///
/// Groups are folded strictly left to right: each hunk's `start_b` is its
/// `start_a` shifted by the length difference of every group before it.
pub fn build_hunks<A, B>(ops: &[EditOp], a: &[A], b: &[B], context_lines: usize) -> Vec<Hunk>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let mut hunks = Vec::new();

    let (merger, _drift) = change_groups(ops).into_iter().fold(
        (HunkMerger::new(), 0isize),
        |(mut merger, drift), group| {
            let hunk = build_hunk(&group, a, b, context_lines, drift);
            let drift = drift + hunk.length_difference();
            if let Some(done) = merger.push(hunk) {
                hunks.push(done);
            }
            (merger, drift)
        },
    );
    hunks.extend(merger.finish());

    log::debug!(
        "built {} hunk(s) from {} edit run(s) with {} context line(s)",
        hunks.len(),
        ops.len(),
        context_lines
    );
    hunks
}

fn change_groups(ops: &[EditOp]) -> Vec<ChangeGroup<'_>> {
    let equal_len = |op: Option<&EditOp>| match op {
        Some(op) if op.is_equal() => op.a_range().len(),
        _ => 0,
    };

    let mut groups = Vec::new();
    let mut i = 0usize;
    while i < ops.len() {
        if ops[i].is_equal() {
            i += 1;
            continue;
        }

        let start = i;
        while i < ops.len() && !ops[i].is_equal() {
            i += 1;
        }

        groups.push(ChangeGroup {
            changes: &ops[start..i],
            equal_before: equal_len(start.checked_sub(1).and_then(|idx| ops.get(idx))),
            equal_after: equal_len(ops.get(i)),
        });
    }

    groups
}

fn build_hunk<A, B>(
    group: &ChangeGroup<'_>,
    a: &[A],
    b: &[B],
    context_lines: usize,
    drift: isize,
) -> Hunk
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let changed_a = group.a_range();
    let changed_b = group.b_range();
    let leading = group.equal_before.min(context_lines);
    let trailing = group.equal_after.min(context_lines);

    let first_a = changed_a.start - leading;
    let first_b = first_a.saturating_add_signed(drift);
    debug_assert_eq!(first_b + leading, changed_b.start);

    let mut lines = Vec::with_capacity(leading + changed_a.len() + changed_b.len() + trailing);
    for line in &a[first_a..changed_a.start] {
        lines.push(HunkLine::new(LineTag::Context, line.as_ref()));
    }
    for op in group.changes {
        match op {
            EditOp::Delete { a: range, .. } => {
                for line in &a[range.clone()] {
                    lines.push(HunkLine::new(LineTag::Delete, line.as_ref()));
                }
            }
            EditOp::Insert { b: range, .. } => {
                for line in &b[range.clone()] {
                    lines.push(HunkLine::new(LineTag::Insert, line.as_ref()));
                }
            }
            EditOp::Equal { .. } => {}
        }
    }
    for line in &a[changed_a.end..changed_a.end + trailing] {
        lines.push(HunkLine::new(LineTag::Context, line.as_ref()));
    }

    Hunk {
        start_a: first_a + 1,
        len_a: leading + changed_a.len() + trailing,
        start_b: first_b + 1,
        len_b: leading + changed_b.len() + trailing,
        lines,
    }
}
