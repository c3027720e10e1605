use crate::model::{Hunk, LineTag};

#[derive(Debug, Default)]
enum MergeState {
    #[default]
    Idle,
    Accumulating(Hunk),
}

/// Folds successive hunks, joining neighbours whose context windows overlap
/// or touch.
///
/// Feed hunks in ascending `start_a` order with [`HunkMerger::push`]; every
/// hunk that can no longer grow is handed back. [`HunkMerger::finish`]
/// returns the last accumulated hunk.
#[derive(Debug, Default)]
pub struct HunkMerger {
    state: MergeState,
}

impl HunkMerger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, current: Hunk) -> Option<Hunk> {
        match std::mem::take(&mut self.state) {
            MergeState::Idle => {
                self.state = MergeState::Accumulating(current);
                None
            }
            MergeState::Accumulating(previous) => {
                if current.overlaps(&previous) {
                    let mut current = current;
                    current.unshift(previous);
                    self.state = MergeState::Accumulating(current);
                    None
                } else {
                    self.state = MergeState::Accumulating(current);
                    Some(previous)
                }
            }
        }
    }

    pub fn finish(self) -> Option<Hunk> {
        match self.state {
            MergeState::Idle => None,
            MergeState::Accumulating(hunk) => Some(hunk),
        }
    }
}

impl Hunk {
    /// Whether this hunk starts inside, or directly after, the trailing
    /// context of `previous`. Touching windows merge.
    pub fn overlaps(&self, previous: &Hunk) -> bool {
        self.start_a <= previous.end_a()
    }

    /// Splice `previous` onto the front of this hunk, dropping the context
    /// lines both hunks share.
    pub fn unshift(&mut self, previous: Hunk) {
        let shared = previous.end_a().saturating_sub(self.start_a);
        debug_assert_eq!(previous.end_b().saturating_sub(self.start_b), shared);
        debug_assert!(
            self.lines[..shared]
                .iter()
                .all(|line| line.tag == LineTag::Context)
        );

        let end_a = self.end_a();
        let end_b = self.end_b();
        let mut lines = previous.lines;
        lines.extend(self.lines.drain(shared..));

        self.start_a = previous.start_a;
        self.start_b = previous.start_b;
        self.len_a = end_a - previous.start_a;
        self.len_b = end_b - previous.start_b;
        self.lines = lines;
    }
}
