//! Voronoi tessellation over a configurable distance measure, with Lloyd
//! relaxation.

use crate::cell::{Cell, Measure};
use crate::error::{Error, Result};
use crate::multi_pattern::MultiPattern;
use crate::pattern::Pattern;

/// For every cell in `domain`, finds the seed minimising `measure`,
/// ties broken by seed iteration order, and emits one [`Pattern`] per seed
/// (aligned to `seeds`' order) into a [`MultiPattern`].
pub fn voronoi(seeds: &[Cell], domain: &Pattern, measure: Measure) -> Result<MultiPattern> {
    if seeds.is_empty() {
        return Err(Error::invalid_argument("voronoi requires at least one seed"));
    }
    let mut segments: Vec<Pattern> = vec![Pattern::new(); seeds.len()];
    for &cell in domain.cells() {
        let mut best_index = 0;
        let mut best_dist = measure.dist(cell, seeds[0]);
        for (index, &seed) in seeds.iter().enumerate().skip(1) {
            let dist = measure.dist(cell, seed);
            if dist < best_dist {
                best_dist = dist;
                best_index = index;
            }
        }
        segments[best_index].insert(cell.x, cell.y);
    }
    Ok(MultiPattern::from(segments))
}

fn nearest_in_segment(segment: &Pattern, target: Cell) -> Cell {
    segment
        .cells()
        .copied()
        .min_by(|&a, &b| a.euclidean2(target).cmp(&b.euclidean2(target)))
        .expect("segment has at least its own seed")
}

/// Iteratively recomputes the tessellation and replaces each seed with the
/// [`Pattern::centroid`] of its segment, rounded to the nearest cell the
/// segment actually contains. Stops when the seed set stabilises or
/// `max_iter` is reached (`None` means unbounded).
///
/// Returns the final segments, the final seeds, and whether the seed set
/// had already stabilised when the loop stopped.
pub fn voronoi_relax(
    seeds: &[Cell],
    domain: &Pattern,
    measure: Measure,
    max_iter: Option<u32>,
) -> Result<(MultiPattern, Vec<Cell>, bool)> {
    let mut current = seeds.to_vec();
    let mut iterations = 0u32;
    loop {
        let segments = voronoi(&current, domain, measure)?;
        let mut next = Vec::with_capacity(current.len());
        for (segment, &seed) in segments.iter().zip(&current) {
            // A seed that owns no domain cell (a duplicate of an earlier
            // seed, or one placed outside `domain`) has no centroid to
            // relax towards; it just keeps its current position.
            let replacement = match segment.centroid() {
                Ok(centroid) if segment.has_cell(centroid.x, centroid.y) => centroid,
                Ok(centroid) => nearest_in_segment(segment, centroid),
                Err(_) => seed,
            };
            next.push(replacement);
        }
        let converged = next == current;
        log::debug!("voronoi_relax: iteration {iterations}, converged={converged}");
        if converged {
            return Ok((segments, next, true));
        }
        current = next;
        iterations += 1;
        if let Some(limit) = max_iter {
            if iterations >= limit {
                let final_segments = voronoi(&current, domain, measure)?;
                return Ok((final_segments, current, false));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::square;

    #[test]
    fn segments_partition_domain_and_own_their_seed() {
        let domain = square(10);
        let seeds = vec![Cell::new(0, 0), Cell::new(9, 0), Cell::new(4, 9)];
        let segments = voronoi(&seeds, &domain, Measure::Manhattan).unwrap();
        assert_eq!(segments.len(), 3);

        let total: usize = segments.iter().map(Pattern::size).sum();
        assert_eq!(total, domain.size());

        for (segment, &seed) in segments.iter().zip(&seeds) {
            assert!(segment.has_cell(seed.x, seed.y));
            for &cell in segment.cells() {
                for &other in &seeds {
                    if other != seed {
                        assert!(Measure::Manhattan.dist(cell, seed) <= Measure::Manhattan.dist(cell, other));
                    }
                }
            }
        }
    }

    #[test]
    fn empty_seed_set_errors() {
        let domain = square(5);
        assert!(voronoi(&[], &domain, Measure::Euclidean).is_err());
    }

    #[test]
    fn relax_converges_on_a_square_domain() {
        let domain = square(20);
        let seeds = vec![Cell::new(1, 1), Cell::new(18, 1), Cell::new(9, 18)];
        let (segments, _, converged) = voronoi_relax(&seeds, &domain, Measure::Euclidean, Some(50)).unwrap();
        assert!(converged);
        let total: usize = segments.iter().map(Pattern::size).sum();
        assert_eq!(total, domain.size());
    }

    #[test]
    fn relax_does_not_panic_on_a_duplicated_seed() {
        // The later of two identical seeds owns an empty segment: every
        // tie in `voronoi` resolves to the earlier index.
        let domain = square(10);
        let seeds = vec![Cell::new(2, 2), Cell::new(2, 2), Cell::new(8, 8)];
        let (segments, final_seeds, _) = voronoi_relax(&seeds, &domain, Measure::Euclidean, Some(10)).unwrap();
        assert_eq!(final_seeds[1], Cell::new(2, 2));
        assert!(segments.get(1).unwrap().is_empty());
    }

    #[test]
    fn relax_does_not_panic_on_a_seed_outside_the_domain() {
        let domain = square(10);
        let seeds = vec![Cell::new(2, 2), Cell::new(100, 100)];
        let (_, final_seeds, _) = voronoi_relax(&seeds, &domain, Measure::Euclidean, Some(10)).unwrap();
        assert_eq!(final_seeds[1], Cell::new(100, 100));
    }
}
