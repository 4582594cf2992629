//! Equal interval classification.

/// Split the value range into `k` classes of equal width.
///
/// The last edge is pinned to the maximum so the top class always
/// contains it. A zero-width range collapses to a single class.
pub fn equal_interval(sorted: &[f64], k: usize) -> Vec<f64> {
    let min = sorted[0];
    let max = sorted[sorted.len() - 1];
    let range = max - min;
    if range <= 0.0 {
        return vec![max];
    }

    let width = range / k as f64;
    let mut edges: Vec<f64> = (1..=k).map(|i| min + width * i as f64).collect();
    if let Some(last) = edges.last_mut() {
        *last = max;
    }
    edges
}
