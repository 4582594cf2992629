//! Natural breaks classification (randomised k-medians).

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::stats::{class_ranges, median, nearest, unique};

/// Re-centering passes allowed per restart.
const MAX_ITERATIONS: usize = 100;

/// Class maxima of the best of `initial + 1` randomly seeded k-medians runs.
///
/// Each run seeds `k` distinct values at random, then alternates between
/// assigning values to the nearest center and moving centers to class
/// medians. Runs are scored by the total absolute deviation from the
/// assigned centers. The class count is capped at the number of distinct
/// values.
pub fn natural_breaks(sorted: &[f64], k: usize, initial: usize, seed: u64) -> Vec<f64> {
    let distinct = unique(sorted);
    let k = k.min(distinct.len());
    let mut rng = StdRng::seed_from_u64(seed);

    let mut best: Option<(f64, Vec<f64>)> = None;
    for _ in 0..=initial {
        let (fit, cuts) = single_run(sorted, &distinct, k, &mut rng);
        if best.as_ref().map_or(true, |(best_fit, _)| fit < *best_fit) {
            best = Some((fit, cuts));
        }
    }

    best.map(|(_, cuts)| cuts).unwrap_or_default()
}

fn single_run(sorted: &[f64], distinct: &[f64], k: usize, rng: &mut StdRng) -> (f64, Vec<f64>) {
    let mut centers: Vec<f64> = distinct.choose_multiple(rng, k).copied().collect();
    centers.sort_by(|a, b| a.total_cmp(b));
    let mut assignment: Vec<usize> = sorted.iter().map(|v| nearest(*v, &centers)).collect();

    for _ in 0..MAX_ITERATIONS {
        centers = class_ranges(&assignment)
            .into_iter()
            .filter_map(|(lo, hi)| median(&sorted[lo..=hi]))
            .collect();
        let next: Vec<usize> = sorted.iter().map(|v| nearest(*v, &centers)).collect();
        if next == assignment {
            break;
        }
        assignment = next;
    }

    let fit = sorted
        .iter()
        .zip(&assignment)
        .map(|(v, c)| (v - centers[*c]).abs())
        .sum();
    let cuts = class_ranges(&assignment)
        .into_iter()
        .map(|(_, hi)| sorted[hi])
        .collect();
    (fit, cuts)
}
