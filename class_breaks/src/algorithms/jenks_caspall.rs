//! Jenks–Caspall classification and its forced and sampled variants.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::quantiles::quantiles;
use super::stats::{bin1d, class_ranges, median, nearest, sum_squares};

/// Upper bound on re-centering passes.
const MAX_ITERATIONS: usize = 1000;

/// Largest sample drawn by the sampled variant.
const MAX_SAMPLE: f64 = 1000.0;

/// Class maxima after converging from quantile classes.
///
/// Each pass moves every class center to the median of its members, then
/// reassigns every value to its nearest center, until assignments stop
/// changing.
pub fn jenks_caspall(sorted: &[f64], k: usize) -> Vec<f64> {
    let edges = quantiles(sorted, k);
    let mut assignment = bin1d(sorted, &edges);

    for _ in 0..MAX_ITERATIONS {
        let centers: Vec<f64> = class_ranges(&assignment)
            .into_iter()
            .filter_map(|(lo, hi)| median(&sorted[lo..=hi]))
            .collect();
        let next: Vec<usize> = sorted.iter().map(|v| nearest(*v, &centers)).collect();
        if next == assignment {
            break;
        }
        assignment = next;
    }

    class_ranges(&assignment)
        .into_iter()
        .map(|(_, hi)| sorted[hi])
        .collect()
}

/// Quantile classes refined by moving single values across class
/// boundaries while that lowers the total within-class sum of squares.
///
/// Unlike [`jenks_caspall`] classes never vanish, so the class count of
/// the initial quantile split is kept.
pub fn jenks_caspall_forced(sorted: &[f64], k: usize) -> Vec<f64> {
    let edges = quantiles(sorted, k);
    let mut ranges = class_ranges(&bin1d(sorted, &edges));
    let total = |ranges: &[(usize, usize)]| -> f64 {
        ranges
            .iter()
            .map(|&(lo, hi)| sum_squares(&sorted[lo..=hi]))
            .sum()
    };

    let mut best = total(&ranges);
    for _ in 0..MAX_ITERATIONS {
        let mut improved = false;
        for c in 0..ranges.len().saturating_sub(1) {
            let (lo, hi) = ranges[c];
            let (next_lo, next_hi) = ranges[c + 1];

            // Last member of class c moves up, or first member of c + 1 moves down.
            let mut candidates = Vec::with_capacity(2);
            if hi > lo {
                candidates.push(((lo, hi - 1), (next_lo - 1, next_hi)));
            }
            if next_hi > next_lo {
                candidates.push(((lo, hi + 1), (next_lo + 1, next_hi)));
            }

            for (left, right) in candidates {
                let mut trial = ranges.clone();
                trial[c] = left;
                trial[c + 1] = right;
                let score = total(&trial);
                if score < best - f64::EPSILON * best.abs().max(1.0) {
                    best = score;
                    ranges = trial;
                    improved = true;
                    break;
                }
            }
        }
        if !improved {
            break;
        }
    }

    let mut cuts: Vec<f64> = ranges.into_iter().map(|(_, hi)| sorted[hi]).collect();
    cuts.dedup();
    cuts
}

/// Jenks–Caspall over a random sample of the values.
///
/// `pct` of the values are drawn with replacement (at most 1000 and at
/// least `k`), and the sample always contains the minimum and maximum.
pub fn jenks_caspall_sampled(sorted: &[f64], k: usize, pct: f64, seed: u64) -> Vec<f64> {
    let n = sorted.len();
    let pct = if pct * n as f64 > MAX_SAMPLE {
        MAX_SAMPLE / n as f64
    } else {
        pct
    };
    let size = ((n as f64 * pct) as usize).max(k).max(2).min(n);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut sample: Vec<f64> = (0..size).map(|_| sorted[rng.gen_range(0..n)]).collect();
    sample[0] = sorted[0];
    sample[size - 1] = sorted[n - 1];
    sample.sort_by(|a, b| a.total_cmp(b));

    jenks_caspall(&sample, k)
}
