//! Small statistics helpers over ascending value slices.

/// Arithmetic mean; `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median of an ascending slice; `None` when empty.
pub fn median(sorted: &[f64]) -> Option<f64> {
    let count = sorted.len();
    if count == 0 {
        return None;
    }
    Some(if count % 2 == 0 {
        (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
    } else {
        sorted[count / 2]
    })
}

/// Sum of squared deviations from the mean.
pub fn sum_squares(values: &[f64]) -> f64 {
    let m = mean(values);
    values
        .iter()
        .map(|v| {
            let diff = v - m;
            diff * diff
        })
        .sum()
}

/// Score at `pct` percent of an ascending slice, interpolating linearly
/// between neighbouring order statistics.
pub fn percentile(sorted: &[f64], pct: f64) -> f64 {
    let last = sorted.len() - 1;
    let idx = pct / 100.0 * last as f64;
    let lo = (idx.floor() as usize).min(last);
    let frac = idx - lo as f64;
    if frac <= 0.0 || lo == last {
        sorted[lo]
    } else {
        sorted[lo] + (sorted[lo + 1] - sorted[lo]) * frac
    }
}

/// Number of distinct values in an ascending slice.
pub fn unique_count(sorted: &[f64]) -> usize {
    let mut unique = sorted.to_vec();
    unique.dedup();
    unique.len()
}

/// Distinct values of an ascending slice.
pub fn unique(sorted: &[f64]) -> Vec<f64> {
    let mut unique = sorted.to_vec();
    unique.dedup();
    unique
}

/// Class index of every value: the first edge the value does not exceed.
/// Values above the last edge land in the last class.
pub fn bin1d(values: &[f64], edges: &[f64]) -> Vec<usize> {
    let last = edges.len().saturating_sub(1);
    values
        .iter()
        .map(|v| edges.iter().position(|edge| v <= edge).unwrap_or(last))
        .collect()
}

/// Contiguous runs of equal class ids, as `(start, end)` inclusive index
/// pairs into `assignment`.
pub fn class_ranges(assignment: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut start = 0;
    for i in 1..=assignment.len() {
        if i == assignment.len() || assignment[i] != assignment[start] {
            if i > start {
                ranges.push((start, i - 1));
            }
            start = i;
        }
    }
    ranges
}

/// Index of the center nearest to `value`; the first one wins ties.
pub fn nearest(value: f64, centers: &[f64]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (idx, center) in centers.iter().enumerate() {
        let distance = (value - center).abs();
        if distance < best_distance {
            best = idx;
            best_distance = distance;
        }
    }
    best
}
