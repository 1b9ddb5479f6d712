/// Levenshtein edit distance between `source` and `target`, by character.
pub fn distance(source: &str, target: &str) -> usize {
    strsim::levenshtein(source, target)
}

/// Edit distance, or `None` once it is certain to exceed `limit`.
///
/// Stops as soon as every cell of a row is above the limit, which keeps a
/// dictionary scan cheap when most candidates are far away.
pub fn bounded_distance(source: &str, target: &str, limit: usize) -> Option<usize> {
    let source: Vec<char> = source.chars().collect();
    let target: Vec<char> = target.chars().collect();
    if source.len().abs_diff(target.len()) > limit {
        return None;
    }
    let d = edit_distance(&source, &target, limit);
    (d <= limit).then_some(d)
}

fn edit_distance(source: &[char], target: &[char], limit: usize) -> usize {
    let m = source.len();
    let n = target.len();
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
        let mut row_min = curr_row[0];

        for j in 1..=n {
            let cost = usize::from(source[i - 1] != target[j - 1]);
            curr_row[j] = (prev_row[j] + 1)
                .min(curr_row[j - 1] + 1)
                .min(prev_row[j - 1] + cost);
            row_min = row_min.min(curr_row[j]);
        }

        // The row minimum never shrinks, so the last cell stays above the limit.
        if row_min > limit {
            return row_min;
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[n]
}
