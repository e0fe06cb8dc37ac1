//! Property-style checks mirroring the crate's core invariants: set algebra,
//! primitive shapes, cellular-automaton fixed points, decomposition and
//! sampling guarantees.

use latt::{
    automata, bsp, cast_360, circle, connected_components, convex_hull, flood_fill, interior_holes,
    iterate, line, max_rectangle, quad_bezier, sample_poisson, square, voronoi, Cell, Measure,
    Neighbourhood, Pattern, Rule, RuleSet,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn pat(cells: &[(i64, i64)]) -> Pattern {
    let mut p = Pattern::new();
    for &(x, y) in cells {
        p.insert(x, y);
    }
    p
}

fn life() -> RuleSet {
    RuleSet::from(Rule::parse("B3/S23", Neighbourhood::moore()).unwrap())
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
fn property_1_set_algebra_laws() {
    let a = pat(&[(0, 0), (1, 0), (2, 0)]);
    let b = pat(&[(1, 0), (2, 0), (3, 0)]);
    assert_eq!(a.union(&a), a);
    assert_eq!(a.intersection(&a), a);
    assert_eq!(a.difference(&a).size(), 0);
    assert_eq!(a.union(&b).size(), a.size() + b.size() - a.intersection(&b).size());
}

#[test]
fn property_2_square_size_and_shape() {
    assert_eq!(square(2).size(), 4);
    assert_eq!(square(2), Pattern::from_matrix(&[vec![1, 1], vec![1, 1]]));
}

#[test]
fn property_3_circle_interior_hole_is_single_and_within_radius() {
    let r = 6;
    let outline = circle(r);
    let holes = interior_holes(&outline, &Neighbourhood::von_neumann());
    assert_eq!(holes.len(), 1);
    let hole = holes.get(0).unwrap();
    for &cell in hole.cells() {
        assert!(cell.euclidean(Cell::new(0, 0)) < r as f64);
    }
}

#[test]
fn property_4_line_contiguity() {
    let a = Cell::new(-4, 3);
    let b = Cell::new(5, -2);
    let l = line(a, b);
    assert!(l.has_cell(a.x, a.y));
    assert!(l.has_cell(b.x, b.y));
    let filled = flood_fill(&l, a, &Neighbourhood::moore());
    assert_eq!(filled.size(), l.size());
}

#[test]
fn property_5_bezier_contiguity() {
    let p0 = Cell::new(-5, 0);
    let p1 = Cell::new(0, 8);
    let p2 = Cell::new(5, 0);
    let b = quad_bezier(p0, p1, p2, 20);
    assert!(b.has_cell(p0.x, p0.y));
    let filled = flood_fill(&b, p0, &Neighbourhood::moore());
    assert_eq!(filled.size(), b.size());
}

#[test]
fn property_6_neighbourhood_categorisation() {
    let n = Neighbourhood::moore();
    let categories = 1usize << n.len();
    assert_eq!(n.category_label().len(), categories);

    let mut isolated = Pattern::new();
    isolated.insert(0, 0);
    assert_eq!(n.categorise(&isolated, Cell::new(0, 0)), categories);

    let mut full = Pattern::new();
    for dy in -1..=1 {
        for dx in -1..=1 {
            full.insert(dx, dy);
        }
    }
    let medoid = full.medoid(Measure::Euclidean).unwrap();
    assert_eq!(n.categorise(&full, medoid), 1);
}

#[test]
fn property_7_still_lifes_are_fixed_points() {
    let block = square(2);
    let beehive = pat(&[(1, 0), (2, 0), (0, 1), (3, 1), (1, 2), (2, 2)]);
    let loaf = pat(&[(1, 0), (2, 0), (0, 1), (3, 1), (1, 2), (3, 2), (2, 3)]);

    for still_life in [block, beehive, loaf] {
        let domain = domain_around(&still_life, 2);
        let (next, converged) = iterate(&still_life, &domain, &life());
        assert_eq!(next, still_life);
        assert!(converged);
    }
}

#[test]
fn property_8_oscillators_have_period_two() {
    let blinker = pat(&[(0, 0), (1, 0), (2, 0)]);
    let toad = pat(&[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)]);
    let beacon = pat(&[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)]);

    for oscillator in [blinker, toad, beacon] {
        let domain = domain_around(&oscillator, 2);
        let rules = life();
        let (gen1, converged1) = iterate(&oscillator, &domain, &rules);
        assert!(!converged1);
        let (gen2, _) = iterate(&gen1, &domain, &rules);
        assert_eq!(gen2, oscillator);
    }
}

#[test]
fn property_9_async_step_flips_exactly_one_cell() {
    let blinker = pat(&[(0, 0), (1, 0), (2, 0)]);
    let domain = domain_around(&blinker, 2);
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let (next, converged) = automata::async_iterate(&blinker, &domain, &life(), &mut rng);
    assert!(!converged);
    assert_eq!(next.sym_difference(&blinker).size(), 1);
}

#[test]
fn property_10_bsp_partition_is_disjoint_and_covers_input() {
    let p = square(30);
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let segments = bsp(&p, 20, &mut rng).unwrap();
    let mut total = 0;
    for segment in segments.iter() {
        assert!(segment.size() <= 20);
        total += segment.size();
    }
    assert_eq!(total, p.size());
    assert_eq!(segments.flatten(), p);
}

#[test]
fn property_11_max_rectangle_ignores_stray_cells() {
    let mut p = square(10);
    let best = max_rectangle(&p).unwrap();
    assert_eq!(best, p);

    p.insert(1000, 1000);
    let best_with_stray = max_rectangle(&p).unwrap();
    assert_eq!(best_with_stray.size(), best.size());
}

#[test]
fn property_12_voronoi_segments_partition_and_keep_their_seed_closest() {
    let domain = square(10);
    let seeds = vec![Cell::new(0, 0), Cell::new(9, 0), Cell::new(4, 9)];
    let segments = voronoi(&seeds, &domain, Measure::Manhattan).unwrap();

    let total: usize = segments.iter().map(Pattern::size).sum();
    assert_eq!(total, domain.size());

    for (segment, &seed) in segments.iter().zip(&seeds) {
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
fn property_13_poisson_disc_respects_minimum_distance() {
    let domain = square(40);
    let mut rng = ChaCha8Rng::seed_from_u64(13);
    let picked = sample_poisson(&domain, Measure::Euclidean, 4.0, &mut rng);
    let cells = picked.cell_list();
    for i in 0..cells.len() {
        for j in (i + 1)..cells.len() {
            assert!(Measure::Euclidean.dist(cells[i], cells[j]) >= 4.0);
        }
        assert!(domain.has_cell(cells[i].x, cells[i].y));
    }
}

#[test]
fn property_14_raycast_360_is_connected_subset_containing_origin() {
    let domain = square(60).translate(-30, -30);
    let origin = Cell::new(0, 0);
    let visible = cast_360(origin, &domain, 8);
    assert!(visible.has_cell(origin.x, origin.y));
    for &cell in visible.cells() {
        assert!(domain.has_cell(cell.x, cell.y));
    }
    let filled = flood_fill(&visible, origin, &Neighbourhood::moore());
    assert_eq!(filled.size(), visible.size());
}

#[test]
fn property_15_convex_hull_of_five_corner_cells_fills_the_square() {
    let mut p = Pattern::new();
    for &(x, y) in &[(0, 0), (4, 0), (0, 4), (4, 4), (2, 2)] {
        p.insert(x, y);
    }
    assert_eq!(convex_hull(&p), square(5));
}

#[test]
fn connected_components_counts_distinct_blobs() {
    let mut p = square(2);
    for &cell in square(2).translate(10, 10).cells() {
        p.insert(cell.x, cell.y);
    }
    let components = connected_components(&p, &Neighbourhood::von_neumann());
    assert_eq!(components.len(), 2);
}
