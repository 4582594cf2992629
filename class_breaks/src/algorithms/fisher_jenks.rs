//! Fisher–Jenks optimal classification.

use super::stats::unique_count;

/// Partition minimising the total within-class sum of squared deviations.
///
/// Exact dynamic program over the sorted values, `O(k·n²)`. The class
/// count is capped at the number of distinct values.
pub fn fisher_jenks(sorted: &[f64], k: usize) -> Vec<f64> {
    let n = sorted.len();
    let k = k.min(unique_count(sorted)).max(1);

    let mut s1 = vec![0.0; n + 1];
    let mut s2 = vec![0.0; n + 1];
    for (i, v) in sorted.iter().enumerate() {
        s1[i + 1] = s1[i] + v;
        s2[i + 1] = s2[i] + v * v;
    }
    // Within-class sum of squares of sorted[a..=b].
    let ssd = |a: usize, b: usize| -> f64 {
        let w = (b - a + 1) as f64;
        let s = s1[b + 1] - s1[a];
        (s2[b + 1] - s2[a] - s * s / w).max(0.0)
    };

    // cost[c][j]: best cost of sorted[0..=j] in c + 1 classes.
    // start[c][j]: first index of the last class in that solution.
    let mut cost = vec![vec![f64::INFINITY; n]; k];
    let mut start = vec![vec![0usize; n]; k];
    for j in 0..n {
        cost[0][j] = ssd(0, j);
    }
    for c in 1..k {
        for j in c..n {
            for i in c..=j {
                let candidate = cost[c - 1][i - 1] + ssd(i, j);
                if candidate < cost[c][j] {
                    cost[c][j] = candidate;
                    start[c][j] = i;
                }
            }
        }
    }

    let mut edges = Vec::with_capacity(k);
    let mut end = n - 1;
    for c in (0..k).rev() {
        edges.push(sorted[end]);
        if c == 0 {
            break;
        }
        end = start[c][end] - 1;
    }
    edges.reverse();
    edges.dedup();
    edges
}
