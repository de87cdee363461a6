//! Longest-common-subsequence alignment of block identity keys

/// One step of an edit script turning `old` into `new`.
///
/// Indices point into the key sequences the script was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    Equal { old: usize, new: usize },
    Delete { old: usize },
    Insert { new: usize },
}

/// Compute a minimal edit script between two key sequences.
///
/// Runs in O(n·m) time and memory for `n = old.len()`, `m = new.len()`.
/// Among equally short scripts, a delete is taken before an insert whenever
/// consuming from `old` keeps at least as many matches as consuming from
/// `new`.
pub fn edit_script<K: PartialEq>(old: &[K], new: &[K]) -> Vec<EditOp> {
    let (n, m) = (old.len(), new.len());
    let width = m + 1;

    // table[i * width + j] = LCS length of old[i..] and new[j..]
    let mut table = vec![0usize; (n + 1) * width];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            table[i * width + j] = if old[i] == new[j] {
                table[(i + 1) * width + j + 1] + 1
            } else {
                table[(i + 1) * width + j].max(table[i * width + j + 1])
            };
        }
    }

    let mut script = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if old[i] == new[j] {
            script.push(EditOp::Equal { old: i, new: j });
            i += 1;
            j += 1;
        } else if table[(i + 1) * width + j] >= table[i * width + j + 1] {
            script.push(EditOp::Delete { old: i });
            i += 1;
        } else {
            script.push(EditOp::Insert { new: j });
            j += 1;
        }
    }
    script.extend((i..n).map(|old| EditOp::Delete { old }));
    script.extend((j..m).map(|new| EditOp::Insert { new }));
    script
}
