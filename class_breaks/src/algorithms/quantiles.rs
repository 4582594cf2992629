//! Quantile classification.

use super::stats::percentile;

/// Percentile edges at every `100 / k` percent, duplicates removed.
pub fn quantiles(sorted: &[f64], k: usize) -> Vec<f64> {
    let step = 100.0 / k as f64;
    let mut edges: Vec<f64> = (1..=k)
        .map(|i| percentile(sorted, (step * i as f64).min(100.0)))
        .collect();
    edges.dedup();
    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantiles_squares() {
        let squares: Vec<f64> = (0..50).map(|x| (x * x) as f64).collect();
        let edges = quantiles(&squares, 5);
        let expected = [96.2, 384.4, 864.6, 1536.8, 2401.0];
        assert_eq!(edges.len(), 5);
        for (edge, want) in edges.iter().zip(expected) {
            assert!((edge - want).abs() < 1e-9, "{} != {}", edge, want);
        }
    }

    #[test]
    fn test_quantiles_collapse_duplicates() {
        let edges = quantiles(&[1.0, 1.0, 1.0, 1.0, 2.0], 4);
        assert_eq!(edges, vec![1.0, 2.0]);
    }
}
