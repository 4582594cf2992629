//! Max-p classification: region growing from quantile seeds, then
//! boundary swapping.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::quantiles::quantiles;
use super::stats::{sum_squares, unique_count};

/// Upper bound on swapping rounds.
const MAX_SWAP_ROUNDS: usize = 10_000;

type Class = (usize, usize);

fn total_ss(sorted: &[f64], classes: &[Class]) -> f64 {
    classes
        .iter()
        .map(|&(lo, hi)| sum_squares(&sorted[lo..=hi]))
        .sum()
}

/// Class maxima of the best grown partition after local swapping.
///
/// Seeds are the values nearest to the quantile edges. Each of the
/// `initial` solutions grows the seeded classes in random order until
/// every value is claimed; the solution with the smallest within-class
/// sum of squares is then improved by moving single boundary values to
/// a neighbouring class whenever that strictly lowers the total.
pub fn max_p(sorted: &[f64], k: usize, initial: usize, seed: u64) -> Vec<f64> {
    let n = sorted.len();
    let seeds = seed_indices(sorted, k);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut best: Option<(f64, Vec<Class>)> = None;
    for _ in 0..initial.max(1) {
        let classes = grow(n, &seeds, &mut rng);
        let tss = total_ss(sorted, &classes);
        if best.as_ref().map_or(true, |(best_tss, _)| tss < *best_tss) {
            best = Some((tss, classes));
        }
    }
    let Some((mut best_tss, mut classes)) = best else {
        return Vec::new();
    };

    let mut order: Vec<usize> = (0..classes.len()).collect();
    for _ in 0..MAX_SWAP_ROUNDS {
        order.shuffle(&mut rng);
        let mut moved = false;
        for &id in &order {
            // Take the last value of the class below, then the first of the class above.
            if id > 0 {
                let (lo, hi) = classes[id - 1];
                if hi > lo {
                    let mut trial = classes.clone();
                    trial[id - 1] = (lo, hi - 1);
                    trial[id].0 -= 1;
                    let tss = total_ss(sorted, &trial);
                    if tss < best_tss {
                        best_tss = tss;
                        classes = trial;
                        moved = true;
                    }
                }
            }
            if id + 1 < classes.len() {
                let (lo, hi) = classes[id + 1];
                if hi > lo {
                    let mut trial = classes.clone();
                    trial[id + 1] = (lo + 1, hi);
                    trial[id].1 += 1;
                    let tss = total_ss(sorted, &trial);
                    if tss < best_tss {
                        best_tss = tss;
                        classes = trial;
                        moved = true;
                    }
                }
            }
        }
        if !moved {
            break;
        }
    }

    let mut cuts: Vec<f64> = classes.into_iter().map(|(_, hi)| sorted[hi]).collect();
    cuts.dedup();
    cuts
}

/// Distinct, ascending seed positions: the values nearest to the quantile
/// edges, shifted apart where they collide so that `min(k, n)` seeds exist
/// whenever the edges allow it.
fn seed_indices(sorted: &[f64], k: usize) -> Vec<usize> {
    let n = sorted.len();
    let edges = quantiles(sorted, k);
    let count = edges.len().max(k.min(unique_count(sorted))).min(n);
    let mut targets: Vec<usize> = edges
        .into_iter()
        .map(|q| nearest_index(sorted, q))
        .collect();
    targets.resize(count, n.saturating_sub(1));

    let mut seeds = Vec::with_capacity(count);
    for (i, target) in targets.into_iter().enumerate() {
        let floor = seeds.last().map_or(0, |&prev: &usize| prev + 1);
        let ceiling = n - (count - i);
        seeds.push(target.max(floor).min(ceiling));
    }
    seeds
}

fn nearest_index(sorted: &[f64], target: f64) -> usize {
    let mut best = 0;
    for (idx, v) in sorted.iter().enumerate() {
        if (v - target).abs() < (sorted[best] - target).abs() {
            best = idx;
        }
    }
    best
}

/// Grow one contiguous class around every seed, visiting seeds in random
/// order; each class absorbs unclaimed neighbours on both sides.
fn grow(n: usize, seeds: &[usize], rng: &mut StdRng) -> Vec<Class> {
    let mut owner: Vec<Option<usize>> = vec![None; n];
    let mut classes: Vec<Class> = seeds.iter().map(|&s| (s, s)).collect();
    for (id, &s) in seeds.iter().enumerate() {
        owner[s] = Some(id);
    }

    let mut order: Vec<usize> = (0..seeds.len()).collect();
    order.shuffle(rng);
    for id in order {
        loop {
            let (lo, hi) = classes[id];
            let mut grew = false;
            if lo > 0 && owner[lo - 1].is_none() {
                owner[lo - 1] = Some(id);
                classes[id].0 = lo - 1;
                grew = true;
            }
            if hi + 1 < n && owner[hi + 1].is_none() {
                owner[hi + 1] = Some(id);
                classes[id].1 = hi + 1;
                grew = true;
            }
            if !grew {
                break;
            }
        }
    }
    classes
}
