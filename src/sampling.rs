//! Sampling strategies over a domain pattern: uniform, Poisson-disc, and
//! Mitchell best-candidate.

use crate::cell::{Cell, Measure};
use crate::error::{Error, Result};
use crate::pattern::Pattern;
use rand::Rng;

/// Uniform sample of `n` cells from `domain`, without replacement. Fails
/// if `n` exceeds the domain's size.
pub fn sample(domain: &Pattern, n: usize, rng: &mut impl Rng) -> Result<Pattern> {
    if n > domain.size() {
        return Err(Error::invalid_argument(format!(
            "cannot sample {n} cells from a domain of size {}",
            domain.size()
        )));
    }
    let mut result = Pattern::new();
    for cell in domain.shuffled_cells(rng).take(n) {
        result.insert(cell.x, cell.y);
    }
    Ok(result)
}

/// Poisson-disc sample: repeatedly draws a candidate from `domain` in
/// shuffled order, rejecting it if it falls within `r` of an
/// already-accepted cell under `measure`, stopping once the domain's
/// candidates are exhausted.
pub fn sample_poisson(domain: &Pattern, measure: Measure, r: f64, rng: &mut impl Rng) -> Pattern {
    let mut accepted = Pattern::new();
    let mut rejected = 0u32;
    for candidate in domain.shuffled_cells(rng) {
        let too_close = accepted.cells().any(|&c| measure.dist(c, candidate) < r);
        if too_close {
            rejected += 1;
        } else {
            accepted.insert(candidate.x, candidate.y);
        }
    }
    log::debug!("sample_poisson: accepted {} cells, rejected {rejected}", accepted.size());
    accepted
}

/// Mitchell best-candidate sample: places `n` points one at a time, each
/// chosen from `k` random candidates as the one maximising the minimum
/// distance (under `measure`) to the points already placed.
pub fn sample_mitchell(domain: &Pattern, measure: Measure, n: usize, k: usize, rng: &mut impl Rng) -> Result<Pattern> {
    if n > domain.size() {
        return Err(Error::invalid_argument(format!(
            "cannot place {n} points in a domain of size {}",
            domain.size()
        )));
    }
    if k == 0 {
        return Err(Error::invalid_argument("mitchell sampling needs at least one candidate per round"));
    }

    let pool = domain.cell_list();
    let mut chosen: Vec<Cell> = Vec::with_capacity(n);
    let mut result = Pattern::new();

    for _ in 0..n {
        let mut best: Option<(Cell, f64)> = None;
        for _ in 0..k {
            let candidate = pool[rng.gen_range(0..pool.len())];
            if result.has_cell(candidate.x, candidate.y) {
                continue;
            }
            let min_dist = chosen
                .iter()
                .map(|&c| measure.dist(c, candidate))
                .fold(f64::INFINITY, f64::min);
            if best.map_or(true, |(_, best_dist)| min_dist > best_dist) {
                best = Some((candidate, min_dist));
            }
        }
        if let Some((cell, _)) = best {
            chosen.push(cell);
            result.insert(cell.x, cell.y);
        }
    }
    Ok(result)
}
