//! Spatial decomposition: flood-fill, connected components, enclosed voids,
//! binary space partition, maximum inscribed rectangle, convex hull, and
//! neighbourhood-category partitioning.

use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::multi_pattern::MultiPattern;
use crate::neighbourhood::Neighbourhood;
use crate::pattern::Pattern;
use rand::Rng;
use std::collections::{BTreeMap, VecDeque};

/// Flood-fills `source` from `seed` under `neighbourhood`, visiting only
/// cells that are present in `source` and reachable through it. Returns an
/// empty pattern if `seed` itself is absent.
pub fn flood_fill(source: &Pattern, seed: Cell, neighbourhood: &Neighbourhood) -> Pattern {
    let mut result = Pattern::new();
    if !source.has_cell(seed.x, seed.y) {
        return result;
    }
    let mut queue = VecDeque::new();
    queue.push_back(seed);
    result.insert(seed.x, seed.y);
    while let Some(cell) = queue.pop_front() {
        for &offset in neighbourhood.offsets() {
            let neighbour = cell + offset;
            if source.has_cell(neighbour.x, neighbour.y) && !result.has_cell(neighbour.x, neighbour.y) {
                result.insert(neighbour.x, neighbour.y);
                queue.push_back(neighbour);
            }
        }
    }
    log::trace!("flood_fill: {} cells reached from {seed:?}", result.size());
    result
}

/// Splits `source` into its connected components under `neighbourhood`, in
/// the order each component's seed cell was first visited.
pub fn connected_components(source: &Pattern, neighbourhood: &Neighbourhood) -> MultiPattern {
    let mut visited = Pattern::new();
    let mut components = MultiPattern::new();
    for &cell in source.cells() {
        if visited.has_cell(cell.x, cell.y) {
            continue;
        }
        let component = flood_fill(source, cell, neighbourhood);
        for &member in component.cells() {
            visited.insert(member.x, member.y);
        }
        components.push(component);
    }
    log::debug!("connected_components: {} components", components.len());
    components
}

/// The connected components of `source`'s complement inside its bounding
/// box plus a one-cell halo, discarding any component that touches the
/// halo. What remains are the fully enclosed voids.
pub fn enclosed_voids(source: &Pattern, neighbourhood: &Neighbourhood) -> MultiPattern {
    let Some((min, max)) = source.bbox() else {
        return MultiPattern::new();
    };
    let halo_min = Cell::new(min.x - 1, min.y - 1);
    let halo_max = Cell::new(max.x + 1, max.y + 1);

    let mut complement = Pattern::new();
    for y in halo_min.y..=halo_max.y {
        for x in halo_min.x..=halo_max.x {
            if !source.has_cell(x, y) {
                complement.insert(x, y);
            }
        }
    }

    let mut result = MultiPattern::new();
    for component in connected_components(&complement, neighbourhood).iter() {
        let touches_halo = component
            .cells()
            .any(|&c| c.x == halo_min.x || c.x == halo_max.x || c.y == halo_min.y || c.y == halo_max.y);
        if !touches_halo {
            result.push(component.clone());
        }
    }
    result
}

/// Legacy-friendly alias for [`enclosed_voids`].
pub fn interior_holes(source: &Pattern, neighbourhood: &Neighbourhood) -> MultiPattern {
    enclosed_voids(source, neighbourhood)
}

fn cells_in_box(pattern: &Pattern, min: Cell, max: Cell) -> Pattern {
    let mut result = Pattern::new();
    for &cell in pattern.cells() {
        if cell.x >= min.x && cell.x <= max.x && cell.y >= min.y && cell.y <= max.y {
            result.insert(cell.x, cell.y);
        }
    }
    result
}

/// Picks a random cut position in the interior third..two-thirds of
/// `[lo, hi]` (a valid-cut-position range, i.e. one axis unit short of the
/// full span), falling back to the sole position when the range collapses.
fn interior_cut(lo: i64, hi: i64, rng: &mut impl Rng) -> i64 {
    if lo >= hi {
        return lo;
    }
    let span = hi - lo;
    let third_lo = lo + (span as f64 / 3.0).round() as i64;
    let third_hi = lo + (2.0 * span as f64 / 3.0).round() as i64;
    let third_lo = third_lo.clamp(lo, hi);
    let third_hi = third_hi.clamp(third_lo, hi);
    if third_lo == third_hi {
        third_lo
    } else {
        rng.gen_range(third_lo..=third_hi)
    }
}

fn bsp_recurse(pattern: &Pattern, min: Cell, max: Cell, max_size: usize, rng: &mut impl Rng, out: &mut MultiPattern) {
    let sub = cells_in_box(pattern, min, max);
    if sub.is_empty() {
        return;
    }
    let width = max.x - min.x + 1;
    let height = max.y - min.y + 1;
    if sub.size() <= max_size || (width <= 1 && height <= 1) {
        out.push(sub);
        return;
    }

    if width >= height {
        let cut = interior_cut(min.x, max.x - 1, rng);
        bsp_recurse(pattern, min, Cell::new(cut, max.y), max_size, rng, out);
        bsp_recurse(pattern, Cell::new(cut + 1, min.y), max, max_size, rng, out);
    } else {
        let cut = interior_cut(min.y, max.y - 1, rng);
        bsp_recurse(pattern, min, Cell::new(max.x, cut), max_size, rng, out);
        bsp_recurse(pattern, Cell::new(min.x, cut + 1), max, max_size, rng, out);
    }
}

/// Recursively splits `pattern`'s bounding box with axis-aligned cuts,
/// cutting the longer side at a random position in its interior third,
/// until every leaf has at most `max_size` cells. The output covers the
/// input exactly as a disjoint union.
pub fn bsp(pattern: &Pattern, max_size: usize, rng: &mut impl Rng) -> Result<MultiPattern> {
    if max_size == 0 {
        return Err(Error::invalid_argument("bsp max_size must be positive"));
    }
    let mut result = MultiPattern::new();
    if let Some((min, max)) = pattern.bbox() {
        bsp_recurse(pattern, min, max, max_size, rng, &mut result);
    }
    log::debug!("bsp: {} leaves, max_size {max_size}", result.len());
    Ok(result)
}

/// Finds the area, top-left column, width and height of the largest
/// all-filled rectangle in a row's histogram of "consecutive filled rows
/// above, inclusive" counts, in `O(width)`. Ties are broken towards the
/// leftmost column by popping bars of equal height before comparing areas.
fn largest_in_histogram(heights: &[i64]) -> (i64, usize, usize, i64) {
    let mut extended = heights.to_vec();
    extended.push(0);
    let mut stack: Vec<usize> = Vec::new();
    let mut best = (0i64, 0usize, 0usize, 0i64);
    for i in 0..extended.len() {
        while let Some(&top) = stack.last() {
            if extended[top] >= extended[i] {
                stack.pop();
                let height = extended[top];
                let left = stack.last().map_or(0, |&l| l + 1);
                let width = i - left;
                let area = height * width as i64;
                if area > best.0 {
                    best = (area, left, width, height);
                }
            } else {
                break;
            }
        }
        stack.push(i);
    }
    best
}

/// The largest axis-aligned all-present sub-rectangle of `pattern`, via a
/// per-row histogram reduced with the stack-based largest-rectangle
/// algorithm, in `O(width · height)` overall. Ties are broken towards the
/// smallest `y`, then the smallest `x`.
pub fn max_rectangle(pattern: &Pattern) -> Result<Pattern> {
    let Some((min, max)) = pattern.bbox() else {
        return Err(Error::EmptyPattern);
    };
    let width = (max.x - min.x + 1) as usize;
    let height = max.y - min.y + 1;

    let mut heights = vec![0i64; width];
    let mut best: Option<(i64, Cell, usize, i64)> = None; // (area, top-left, width, height)

    for row in 0..height {
        let y = min.y + row;
        for col in 0..width {
            let x = min.x + col as i64;
            if pattern.has_cell(x, y) {
                heights[col] += 1;
            } else {
                heights[col] = 0;
            }
        }
        let (area, left, w, h) = largest_in_histogram(&heights);
        if area > 0 && best.as_ref().map_or(true, |&(best_area, _, _, _)| area > best_area) {
            let top_left = Cell::new(min.x + left as i64, y - h + 1);
            best = Some((area, top_left, w, h));
        }
    }

    let (_, top_left, w, h) = best.ok_or(Error::EmptyPattern)?;
    let mut result = Pattern::new();
    for dy in 0..h {
        for dx in 0..w as i64 {
            result.insert(top_left.x + dx, top_left.y + dy);
        }
    }
    Ok(result)
}

/// The vertices of the integer convex hull of `pattern`'s cells, via
/// Andrew's monotone chain algorithm, in counterclockwise order starting
/// from the lowest, then leftmost, point.
pub fn convex_hull_points(pattern: &Pattern) -> Vec<Cell> {
    let mut points = pattern.cell_list();
    points.sort_by_key(|c| (c.x, c.y));
    points.dedup();
    if points.len() < 3 {
        return points;
    }

    fn cross(o: Cell, a: Cell, b: Cell) -> i64 {
        (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
    }

    let mut lower: Vec<Cell> = Vec::new();
    for &p in &points {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0 {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<Cell> = Vec::new();
    for &p in points.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0 {
            upper.pop();
        }
        upper.push(p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// The filled interior and boundary of the convex hull of `pattern`'s
/// cells: the hull edges are rasterised with [`crate::primitives::line`]
/// and unioned, then the region they enclose is found via the same
/// complement/component machinery as [`enclosed_voids`].
pub fn convex_hull(pattern: &Pattern) -> Pattern {
    let vertices = convex_hull_points(pattern);
    if vertices.len() < 2 {
        return vertices.into_iter().fold(Pattern::new(), |mut acc, c| {
            acc.insert(c.x, c.y);
            acc
        });
    }

    let mut boundary = Pattern::new();
    for window in vertices.windows(2) {
        boundary = boundary.union(&crate::primitives::line(window[0], window[1]));
    }
    boundary = boundary.union(&crate::primitives::line(vertices[vertices.len() - 1], vertices[0]));

    let interior = enclosed_voids(&boundary, &Neighbourhood::von_neumann()).flatten();
    boundary.union(&interior)
}

/// Groups `pattern`'s cells by their [`Neighbourhood::categorise`] value
/// against `pattern` itself, producing up to `2^n` sub-patterns ordered by
/// ascending category number.
pub fn neighbourhood_categories(pattern: &Pattern, neighbourhood: &Neighbourhood) -> MultiPattern {
    let mut groups: BTreeMap<usize, Pattern> = BTreeMap::new();
    for &cell in pattern.cells() {
        let category = neighbourhood.categorise(pattern, cell);
        groups.entry(category).or_default().insert(cell.x, cell.y);
    }
    groups.into_values().collect()
}
