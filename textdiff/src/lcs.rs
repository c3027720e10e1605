use std::collections::HashMap;

use xxhash_rust::xxh3::xxh3_64;

use crate::model::{DiffAlgorithm, EditOp};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Equal,
    Delete,
    Insert,
}

/// Compute a minimal edit script turning `a` into `b`.
///
/// The script is a list of maximal runs. Inside every region between two
/// equal runs, deletions come before insertions. Identical inputs produce an
/// empty script rather than a single equal run.
pub fn compute_edit_script<A, B>(a: &[A], b: &[B], algorithm: DiffAlgorithm) -> Vec<EditOp>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let (a_tokens, b_tokens) = intern_lines(a, b);
    if a_tokens == b_tokens {
        return Vec::new();
    }

    let prefix = a_tokens
        .iter()
        .zip(&b_tokens)
        .take_while(|(x, y)| x == y)
        .count();
    let suffix = a_tokens[prefix..]
        .iter()
        .rev()
        .zip(b_tokens[prefix..].iter().rev())
        .take_while(|(x, y)| x == y)
        .count();
    let a_mid = &a_tokens[prefix..a_tokens.len() - suffix];
    let b_mid = &b_tokens[prefix..b_tokens.len() - suffix];

    let mut ops = vec![Op::Equal; prefix];
    ops.extend(match algorithm {
        DiffAlgorithm::Myers => compute_ops_myers(a_mid, b_mid),
        DiffAlgorithm::Lcs => compute_ops_lcs(a_mid, b_mid),
    });
    ops.extend(std::iter::repeat_n(Op::Equal, suffix));

    let script = coalesce(&deletes_first(ops));
    log::trace!(
        "edit script: {} run(s) for {} -> {} line(s) via {:?}",
        script.len(),
        a.len(),
        b.len(),
        algorithm
    );
    script
}

/// Map every distinct line to a small integer so the solvers compare
/// integers. Lines are bucketed by xxh3 and compared by content within a
/// bucket, so hash collisions never merge different lines.
fn intern_lines<'a, A, B>(a: &'a [A], b: &'a [B]) -> (Vec<u64>, Vec<u64>)
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let mut buckets: HashMap<u64, Vec<(&'a str, u64)>> = HashMap::new();
    let mut next_id = 0u64;
    let mut token = |line: &'a str| -> u64 {
        let bucket = buckets.entry(xxh3_64(line.as_bytes())).or_default();
        if let Some((_, id)) = bucket.iter().find(|(seen, _)| *seen == line) {
            return *id;
        }
        let id = next_id;
        next_id += 1;
        bucket.push((line, id));
        id
    };

    let a_tokens = a.iter().map(|line| token(line.as_ref())).collect();
    let b_tokens = b.iter().map(|line| token(line.as_ref())).collect();
    (a_tokens, b_tokens)
}

fn compute_ops_myers(a: &[u64], b: &[u64]) -> Vec<Op> {
    if a.is_empty() {
        return vec![Op::Insert; b.len()];
    }
    if b.is_empty() {
        return vec![Op::Delete; a.len()];
    }

    let n = a.len() as isize;
    let m = b.len() as isize;
    let max = (a.len() + b.len()) as isize;
    let offset = max + 1;
    let v_len = (2 * max + 3) as usize;

    // Furthest-reaching x per diagonal k, one snapshot per edit distance d.
    let mut v = vec![0isize; v_len];
    let mut trace: Vec<Vec<isize>> = Vec::new();

    for d in 0..=max {
        let mut current = v.clone();
        let mut k = -d;
        while k <= d {
            let idx = (k + offset) as usize;
            let take_down = k == -d || (k != d && v[idx - 1] < v[idx + 1]);
            let mut x = if take_down {
                v[idx + 1]
            } else {
                v[idx - 1] + 1
            };
            let mut y = x - k;

            while x < n && y < m && a[x as usize] == b[y as usize] {
                x += 1;
                y += 1;
            }
            current[idx] = x;

            if x >= n && y >= m {
                trace.push(current);
                return backtrack_ops(a, b, &trace, offset);
            }
            k += 2;
        }
        trace.push(current.clone());
        v = current;
    }

    Vec::new()
}

fn backtrack_ops(a: &[u64], b: &[u64], trace: &[Vec<isize>], offset: isize) -> Vec<Op> {
    let mut x = a.len() as isize;
    let mut y = b.len() as isize;
    let mut rev_ops = Vec::new();

    for d in (1..trace.len()).rev() {
        let d = d as isize;
        let k = x - y;
        let prev = &trace[(d - 1) as usize];
        let idx = (k + offset) as usize;
        let go_down = k == -d || (k != d && prev[idx - 1] < prev[idx + 1]);
        let prev_k = if go_down { k + 1 } else { k - 1 };
        let prev_x = prev[(prev_k + offset) as usize];
        let prev_y = prev_x - prev_k;

        while x > prev_x && y > prev_y {
            rev_ops.push(Op::Equal);
            x -= 1;
            y -= 1;
        }

        if x == prev_x {
            rev_ops.push(Op::Insert);
            y -= 1;
        } else {
            rev_ops.push(Op::Delete);
            x -= 1;
        }
    }

    while x > 0 && y > 0 && a[(x - 1) as usize] == b[(y - 1) as usize] {
        rev_ops.push(Op::Equal);
        x -= 1;
        y -= 1;
    }
    while x > 0 {
        rev_ops.push(Op::Delete);
        x -= 1;
    }
    while y > 0 {
        rev_ops.push(Op::Insert);
        y -= 1;
    }

    rev_ops.reverse();
    rev_ops
}

fn compute_ops_lcs(a: &[u64], b: &[u64]) -> Vec<Op> {
    let n = a.len();
    let m = b.len();

    let mut lcs = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if a[i] == b[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut i = 0usize;
    let mut j = 0usize;
    let mut ops = Vec::new();

    while i < n && j < m {
        if a[i] == b[j] {
            ops.push(Op::Equal);
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            ops.push(Op::Delete);
            i += 1;
        } else {
            ops.push(Op::Insert);
            j += 1;
        }
    }

    ops.extend(std::iter::repeat_n(Op::Delete, n - i));
    ops.extend(std::iter::repeat_n(Op::Insert, m - j));
    ops
}

/// Reorder each run of non-equal ops so all deletions precede insertions.
fn deletes_first(ops: Vec<Op>) -> Vec<Op> {
    let mut out = Vec::with_capacity(ops.len());
    let mut deletes = 0usize;
    let mut inserts = 0usize;

    let flush = |out: &mut Vec<Op>, deletes: &mut usize, inserts: &mut usize| {
        out.extend(std::iter::repeat_n(Op::Delete, std::mem::take(deletes)));
        out.extend(std::iter::repeat_n(Op::Insert, std::mem::take(inserts)));
    };

    for op in ops {
        match op {
            Op::Equal => {
                flush(&mut out, &mut deletes, &mut inserts);
                out.push(Op::Equal);
            }
            Op::Delete => deletes += 1,
            Op::Insert => inserts += 1,
        }
    }

    flush(&mut out, &mut deletes, &mut inserts);
    out
}

fn coalesce(ops: &[Op]) -> Vec<EditOp> {
    let mut script = Vec::new();
    let mut i = 0usize;
    let mut j = 0usize;

    for run in ops.chunk_by(|left, right| left == right) {
        let len = run.len();
        let edit = match run[0] {
            Op::Equal => {
                let edit = EditOp::Equal {
                    a: i..i + len,
                    b: j..j + len,
                };
                i += len;
                j += len;
                edit
            }
            Op::Delete => {
                let edit = EditOp::Delete {
                    a: i..i + len,
                    b: j..j,
                };
                i += len;
                edit
            }
            Op::Insert => {
                let edit = EditOp::Insert {
                    a: i..i,
                    b: j..j + len,
                };
                j += len;
                edit
            }
        };
        script.push(edit);
    }

    script
}
