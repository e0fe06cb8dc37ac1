//! The cellular-automata engine: synchronous and asynchronous `iterate`
//! driven by a configurable neighbourhood and a conjunctive birth/survival
//! ruleset.

mod rule;

pub use rule::{Rule, RuleSet};

use crate::cell::Cell;
use crate::pattern::Pattern;
use rand::Rng;

fn agrees(ruleset: &RuleSet, pattern: &Pattern, cell: Cell, alive: bool) -> bool {
    ruleset.rules().iter().all(|rule| {
        let count = rule.neighbourhood().count(pattern, cell);
        if alive {
            rule.survives(count)
        } else {
            rule.births(count)
        }
    })
}

/// Advances `pattern` one synchronous generation over `domain` under
/// `ruleset`: every rule in the set must agree for a cell to be alive next
/// generation. Returns the next pattern alongside whether it equals the
/// input (a fixed point).
pub fn iterate(pattern: &Pattern, domain: &Pattern, ruleset: &RuleSet) -> (Pattern, bool) {
    let mut next = Pattern::new();
    for &cell in domain.cells() {
        let alive = pattern.has_cell(cell.x, cell.y);
        if agrees(ruleset, pattern, cell, alive) {
            next.insert(cell.x, cell.y);
        }
    }
    let converged = next == *pattern;
    log::trace!("iterate: {} -> {} cells, converged={converged}", pattern.size(), next.size());
    (next, converged)
}

/// Runs `iterate` to a fixed point (or `max_steps`, if given), returning
/// the final pattern and whether it converged before the step budget ran
/// out.
pub fn iterate_to_convergence(
    pattern: &Pattern,
    domain: &Pattern,
    ruleset: &RuleSet,
    max_steps: Option<u32>,
) -> (Pattern, bool) {
    let mut current = pattern.clone();
    let mut steps = 0u32;
    loop {
        let (next, converged) = iterate(&current, domain, ruleset);
        if converged {
            return (next, true);
        }
        current = next;
        steps += 1;
        if let Some(limit) = max_steps {
            if steps >= limit {
                return (current, false);
            }
        }
    }
}

fn toggle(pattern: &Pattern, cell: Cell) -> Pattern {
    if pattern.has_cell(cell.x, cell.y) {
        pattern.filter(|c| c != cell)
    } else {
        let mut next = pattern.clone();
        next.insert(cell.x, cell.y);
        next
    }
}

/// Applies a single asynchronous step: scans `domain` in a freshly
/// shuffled order and returns at the first cell whose next state differs
/// from `pattern`, producing a pattern that differs by exactly one cell.
/// If no cell in `domain` would change, returns `pattern` unchanged with
/// `converged = true`.
pub fn async_iterate(pattern: &Pattern, domain: &Pattern, ruleset: &RuleSet, rng: &mut impl Rng) -> (Pattern, bool) {
    for cell in domain.shuffled_cells(rng) {
        let alive = pattern.has_cell(cell.x, cell.y);
        let next_alive = agrees(ruleset, pattern, cell, alive);
        if next_alive != alive {
            log::trace!("async_iterate: flipped {cell:?}");
            return (toggle(pattern, cell), false);
        }
    }
    (pattern.clone(), true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighbourhood::Neighbourhood;
    use crate::primitives::square;

    fn life_ruleset() -> RuleSet {
        RuleSet::from(Rule::parse("B3/S23", Neighbourhood::moore()).unwrap())
    }

    fn pat(cells: &[(i64, i64)]) -> Pattern {
        let mut p = Pattern::new();
        for &(x, y) in cells {
            p.insert(x, y);
        }
        p
    }

    fn domain_around(pattern: &Pattern, margin: i64) -> Pattern {
        let (min, max) = pattern.bbox().unwrap();
        let mut domain = Pattern::new();
        for y in (min.y - margin)..=(max.y + margin) {
            for x in (min.x - margin)..=(max.x + margin) {
                domain.insert(x, y);
            }
        }
        domain
    }

    #[test]
    fn block_is_a_still_life() {
        let block = square(2);
        let domain = domain_around(&block, 2);
        let (next, converged) = iterate(&block, &domain, &life_ruleset());
        assert_eq!(next, block);
        assert!(converged);
    }

    #[test]
    fn blinker_has_period_two() {
        let blinker = pat(&[(0, 0), (1, 0), (2, 0)]);
        let domain = domain_around(&blinker, 2);
        let rules = life_ruleset();
        let (gen1, converged1) = iterate(&blinker, &domain, &rules);
        assert!(!converged1);
        let (gen2, _) = iterate(&gen1, &domain, &rules);
        assert_eq!(gen2, blinker);
    }

    #[test]
    fn async_step_changes_exactly_one_cell() {
        let blinker = pat(&[(0, 0), (1, 0), (2, 0)]);
        let domain = domain_around(&blinker, 2);
        let rules = life_ruleset();
        let mut rng = rand::thread_rng();
        let (next, converged) = async_iterate(&blinker, &domain, &rules, &mut rng);
        assert!(!converged);
        let diff = next.sym_difference(&blinker);
        assert_eq!(diff.size(), 1);
    }
}
