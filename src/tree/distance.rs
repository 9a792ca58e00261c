//! Levenshtein edit distance.
//!
//! Distances are measured in `char`s, not bytes, so accented words compare
//! the way a reader expects.

/// Minimum number of single-character insertions, deletions and
/// substitutions turning `source` into `target`.
///
/// Uses the two-row dynamic programming formulation: `O(m * n)` time,
/// `O(n)` space.
///
/// # Example
///
/// ```rust
/// use wordtree::tree::levenshtein;
///
/// assert_eq!(levenshtein("kitten", "sitting"), 3);
/// assert_eq!(levenshtein("", "abc"), 3);
/// ```
pub fn levenshtein(source: &str, target: &str) -> usize {
    let source_chars: Vec<char> = source.chars().collect();
    let target_chars: Vec<char> = target.chars().collect();

    let m = source_chars.len();
    let n = target_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev_row: Vec<usize> = (0..=n).collect();
    let mut curr_row = vec![0; n + 1];

    for i in 1..=m {
        curr_row[0] = i;

        for j in 1..=n {
            let cost = usize::from(source_chars[i - 1] != target_chars[j - 1]);

            curr_row[j] = (prev_row[j] + 1) // deletion
                .min(curr_row[j - 1] + 1) // insertion
                .min(prev_row[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[n]
}

/// Cheap lower bound on [`levenshtein`]: the difference in `char` length.
pub(crate) fn length_gap(source: &str, target: &str) -> usize {
    source.chars().count().abs_diff(target.chars().count())
}
