//! Maximum breaks classification.

/// Break at the midpoints of the `k - 1` widest gaps between neighbouring
/// values, plus the maximum.
///
/// Gaps are compared by size; when several gaps share a size only the
/// first of them produces a break, so ties can yield fewer classes than
/// requested. Gaps not wider than `mindiff` are ignored.
pub fn maximum_breaks(sorted: &[f64], k: usize, mindiff: f64) -> Vec<f64> {
    let gaps: Vec<f64> = sorted.windows(2).map(|w| w[1] - w[0]).collect();

    let mut sizes: Vec<f64> = gaps.iter().copied().filter(|g| *g > mindiff).collect();
    sizes.sort_by(|a, b| a.total_cmp(b));
    sizes.dedup();
    let keep = k.saturating_sub(1).min(sizes.len());
    let widest = &sizes[sizes.len() - keep..];

    let mut edges: Vec<f64> = widest
        .iter()
        .filter_map(|size| gaps.iter().position(|g| g == size))
        .map(|idx| (sorted[idx] + sorted[idx + 1]) / 2.0)
        .collect();
    edges.push(sorted[sorted.len() - 1]);
    edges.sort_by(|a, b| a.total_cmp(b));
    edges
}
