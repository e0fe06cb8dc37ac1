//! Raycasting: a single Bresenham-style ray, and 360° visibility fan-out.

use crate::cell::Cell;
use crate::pattern::Pattern;

/// The cells of a Bresenham line from `a` to `b`, in stepping order
/// (`a` first, `b` last).
fn bresenham_points(a: Cell, b: Cell) -> Vec<Cell> {
    let mut points = Vec::new();
    let (mut x0, mut y0) = (a.x, a.y);
    let (x1, y1) = (b.x, b.y);

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        points.push(Cell::new(x0, y0));
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
    points
}

/// Steps a Bresenham line from `from` toward `to`, returning the prefix of
/// cells that lie in `domain`, stopping at the first cell outside it or at
/// `to`, whichever comes first. A ray whose origin is itself outside
/// `domain` returns an empty pattern.
pub fn cast(from: Cell, to: Cell, domain: &Pattern) -> Pattern {
    let mut result = Pattern::new();
    for point in bresenham_points(from, to) {
        if !domain.has_cell(point.x, point.y) {
            break;
        }
        result.insert(point.x, point.y);
        if point == to {
            break;
        }
    }
    result
}

fn perimeter(center: Cell, radius: i64) -> Vec<Cell> {
    if radius <= 0 {
        return vec![center];
    }
    let min_x = center.x - radius;
    let max_x = center.x + radius;
    let min_y = center.y - radius;
    let max_y = center.y + radius;

    let mut points = Vec::new();
    for x in min_x..=max_x {
        points.push(Cell::new(x, min_y));
        points.push(Cell::new(x, max_y));
    }
    for y in (min_y + 1)..max_y {
        points.push(Cell::new(min_x, y));
        points.push(Cell::new(max_x, y));
    }
    points
}

/// Casts a ray from `from` to every cell on the perimeter of the
/// axis-aligned square of side `2 · radius + 1` centred on `from`, and
/// unions the successful prefixes. The result contains `from` (when `from`
/// is itself in `domain`), is a subset of `domain`, and is Moore-connected.
pub fn cast_360(from: Cell, domain: &Pattern, radius: i64) -> Pattern {
    let mut result = Pattern::new();
    for target in perimeter(from, radius) {
        result = result.union(&cast(from, target, domain));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decomposition::flood_fill;
    use crate::neighbourhood::Neighbourhood;
    use crate::primitives::square;

    #[test]
    fn cast_contains_both_ends_when_domain_is_clear() {
        let domain = square(50).translate(-25, -25);
        let from = Cell::new(0, 0);
        let to = Cell::new(10, -7);
        let result = cast(from, to, &domain);
        assert!(result.has_cell(from.x, from.y));
        assert!(result.has_cell(to.x, to.y));
    }

    #[test]
    fn cast_stops_at_first_obstacle() {
        let mut domain = square(50).translate(-25, -25);
        let obstacle = Cell::new(5, 0);
        domain = domain.filter(|c| c != obstacle);
        let result = cast(Cell::new(0, 0), Cell::new(10, 0), &domain);
        assert!(!result.has_cell(10, 0));
        assert!(!result.has_cell(obstacle.x, obstacle.y));
    }

    #[test]
    fn cast_360_is_connected_subset_containing_origin() {
        let domain = square(100).translate(-50, -50);
        let from = Cell::new(0, 0);
        let result = cast_360(from, &domain, 5);
        assert!(result.has_cell(from.x, from.y));
        for &cell in result.cells() {
            assert!(domain.has_cell(cell.x, cell.y));
        }
        let filled = flood_fill(&result, from, &Neighbourhood::moore());
        assert_eq!(filled.size(), result.size());
    }
}
