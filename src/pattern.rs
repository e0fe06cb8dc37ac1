//! Finite cell sets: the core value type of this crate.

use crate::cell::{Cell, Measure};
use crate::error::{Error, Result};
use crate::multi_pattern::MultiPattern;
use crate::neighbourhood::Neighbourhood;
use crate::sampling;
use indexmap::IndexSet;
use rand::seq::SliceRandom;
use rand::Rng;
use std::ops::{Add, Mul, Sub};

/// A finite, immutable-after-construction set of [`Cell`]s.
///
/// Carries a cached bounding box and cell count alongside the membership
/// set, plus two display characters consumed only by external
/// pretty-printers (they play no role in the algorithms in this crate).
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pattern {
    cells: IndexSet<Cell>,
    bbox: Option<(Cell, Cell)>,
    on_char: char,
    off_char: char,
}

impl Default for Pattern {
    fn default() -> Self {
        Pattern::new()
    }
}

impl Pattern {
    /// Creates an empty pattern.
    pub fn new() -> Self {
        Pattern {
            cells: IndexSet::new(),
            bbox: None,
            on_char: '#',
            off_char: '.',
        }
    }

    /// Builds a pattern from a dense matrix: `rows[y][x] != 0` means the
    /// cell `(x, y)` is present.
    pub fn from_matrix(rows: &[Vec<u8>]) -> Self {
        let mut pattern = Pattern::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                if value != 0 {
                    pattern.insert(x as i64, y as i64);
                }
            }
        }
        pattern
    }

    /// The display character for a present cell.
    pub fn on_char(&self) -> char {
        self.on_char
    }

    /// The display character for an absent cell.
    pub fn off_char(&self) -> char {
        self.off_char
    }

    /// Sets the display characters used by external pretty-printers.
    pub fn with_chars(mut self, on_char: char, off_char: char) -> Self {
        self.on_char = on_char;
        self.off_char = off_char;
        self
    }

    /// Inserts a cell. Part of the builder phase: callers assembling a
    /// pattern (rasterisers, decomposition) insert freely before handing
    /// the value out; once observed, treat the pattern as immutable.
    pub fn insert(&mut self, x: i64, y: i64) {
        let cell = Cell::new(x, y);
        if self.cells.insert(cell) {
            self.bbox = Some(match self.bbox {
                None => (cell, cell),
                Some((min, max)) => (
                    Cell::new(min.x.min(x), min.y.min(y)),
                    Cell::new(max.x.max(x), max.y.max(y)),
                ),
            });
        }
    }

    /// Inserts a cell, rejecting it if it falls outside
    /// `[-MAX_COORDINATE, MAX_COORDINATE]` instead of silently accepting it.
    /// Used by operations (like [`enlarge`](Pattern::enlarge)) whose output
    /// coordinates are a function of the caller's input and can overflow the
    /// lattice bounds.
    pub(crate) fn try_insert(&mut self, x: i64, y: i64) -> Result<()> {
        if !Cell::new(x, y).in_bounds() {
            return Err(Error::OutOfDomain {
                max: crate::cell::MAX_COORDINATE,
            });
        }
        self.insert(x, y);
        Ok(())
    }

    /// Whether `(x, y)` is present.
    pub fn has_cell(&self, x: i64, y: i64) -> bool {
        self.cells.contains(&Cell::new(x, y))
    }

    /// Number of cells.
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The bounding box `(min, max)`, or `None` for an empty pattern.
    pub fn bbox(&self) -> Option<(Cell, Cell)> {
        self.bbox
    }

    /// A stable iterator over the cells, in insertion order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// A snapshot of the cells as a `Vec`.
    pub fn cell_list(&self) -> Vec<Cell> {
        self.cells.iter().copied().collect()
    }

    /// The cells in a freshly shuffled order.
    pub fn shuffled_cells(&self, rng: &mut impl Rng) -> impl Iterator<Item = Cell> {
        let mut list = self.cell_list();
        list.shuffle(rng);
        list.into_iter()
    }

    /// A uniformly random cell from the pattern.
    pub fn rcell(&self, rng: &mut impl Rng) -> Result<Cell> {
        if self.is_empty() {
            return Err(Error::EmptyPattern);
        }
        let index = rng.gen_range(0..self.size());
        Ok(*self.cells.get_index(index).expect("index in range"))
    }

    /// The cell minimising the summed distance to all other cells.
    pub fn medoid(&self, measure: Measure) -> Result<Cell> {
        if self.is_empty() {
            return Err(Error::EmptyPattern);
        }
        let list = self.cell_list();
        list.iter()
            .copied()
            .min_by(|&a, &b| {
                let cost = |c: Cell| -> f64 { list.iter().map(|&other| measure.dist(c, other)).sum() };
                cost(a).partial_cmp(&cost(b)).unwrap()
            })
            .ok_or(Error::EmptyPattern)
    }

    /// The average of the cell coordinates, rounded to the nearest cell.
    pub fn centroid(&self) -> Result<Cell> {
        if self.is_empty() {
            return Err(Error::EmptyPattern);
        }
        let n = self.size() as f64;
        let (sx, sy) = self.cells.iter().fold((0i64, 0i64), |(sx, sy), c| (sx + c.x, sy + c.y));
        let cx = (sx as f64 / n).round() as i64;
        let cy = (sy as f64 / n).round() as i64;
        Ok(Cell::new(cx, cy))
    }

    /// The union `self ∪ other`.
    pub fn union(&self, other: &Pattern) -> Pattern {
        let mut result = self.clone();
        for &cell in other.cells() {
            result.insert(cell.x, cell.y);
        }
        result
    }

    /// The difference `self \ other`.
    pub fn difference(&self, other: &Pattern) -> Pattern {
        let mut result = Pattern::new().with_chars(self.on_char, self.off_char);
        for &cell in self.cells() {
            if !other.has_cell(cell.x, cell.y) {
                result.insert(cell.x, cell.y);
            }
        }
        result
    }

    /// The intersection `self ∩ other`.
    pub fn intersection(&self, other: &Pattern) -> Pattern {
        let mut result = Pattern::new().with_chars(self.on_char, self.off_char);
        for &cell in self.cells() {
            if other.has_cell(cell.x, cell.y) {
                result.insert(cell.x, cell.y);
            }
        }
        result
    }

    /// The symmetric difference: cells in exactly one of `self`, `other`.
    pub fn sym_difference(&self, other: &Pattern) -> Pattern {
        self.difference(other).union(&other.difference(self))
    }

    /// Translates every cell by `(dx, dy)`.
    pub fn translate(&self, dx: i64, dy: i64) -> Pattern {
        let mut result = Pattern::new().with_chars(self.on_char, self.off_char);
        for &cell in self.cells() {
            result.insert(cell.x + dx, cell.y + dy);
        }
        result
    }

    /// Mirrors the pattern across the vertical axis through the bounding
    /// box's centre.
    pub fn hreflect(&self) -> Pattern {
        let Some((min, max)) = self.bbox else {
            return self.clone();
        };
        let mut result = Pattern::new().with_chars(self.on_char, self.off_char);
        for &cell in self.cells() {
            result.insert(min.x + max.x - cell.x, cell.y);
        }
        result
    }

    /// Mirrors the pattern across the horizontal axis through the bounding
    /// box's centre.
    pub fn vreflect(&self) -> Pattern {
        let Some((min, max)) = self.bbox else {
            return self.clone();
        };
        let mut result = Pattern::new().with_chars(self.on_char, self.off_char);
        for &cell in self.cells() {
            result.insert(cell.x, min.y + max.y - cell.y);
        }
        result
    }

    /// Rotates the pattern by `k` quarter-turns counterclockwise around its
    /// bounding box.
    pub fn rotate(&self, k: i32) -> Pattern {
        let steps = k.rem_euclid(4);
        let mut result = self.clone();
        for _ in 0..steps {
            result = result.rotate_once();
        }
        result
    }

    fn rotate_once(&self) -> Pattern {
        let Some((min, max)) = self.bbox else {
            return self.clone();
        };
        let width = max.x - min.x + 1;
        let mut result = Pattern::new().with_chars(self.on_char, self.off_char);
        for &cell in self.cells() {
            let lx = cell.x - min.x;
            let ly = cell.y - min.y;
            let nx = ly;
            let ny = width - 1 - lx;
            result.insert(min.x + nx, min.y + ny);
        }
        result
    }

    /// Enlarges the pattern by factor `f`: each cell `(x, y)` becomes an
    /// `f×f` block anchored at `(f·x, f·y)`.
    pub fn enlarge(&self, f: i64) -> Result<Pattern> {
        if f <= 0 {
            return Err(Error::invalid_argument("enlarge factor must be positive"));
        }
        let mut result = Pattern::new().with_chars(self.on_char, self.off_char);
        for &cell in self.cells() {
            for dy in 0..f {
                for dx in 0..f {
                    result.try_insert(f * cell.x + dx, f * cell.y + dy)?;
                }
            }
        }
        Ok(result)
    }

    /// Complement cells (not in this pattern) with at least one
    /// von-Neumann neighbour that *is* in this pattern: the ring of empty
    /// cells directly surrounding the pattern.
    pub fn edge(&self) -> Pattern {
        let nbhd = Neighbourhood::von_neumann();
        let mut result = Pattern::new().with_chars(self.on_char, self.off_char);
        for &cell in self.cells() {
            for &offset in nbhd.offsets() {
                let neighbour = cell + offset;
                if !self.has_cell(neighbour.x, neighbour.y) {
                    result.insert(neighbour.x, neighbour.y);
                }
            }
        }
        result
    }

    /// Legacy alias for [`edge`](Pattern::edge).
    pub fn surface(&self) -> Pattern {
        self.edge()
    }

    /// Cells in this pattern whose von-Neumann neighbour set is not fully
    /// contained in this pattern: the inner contour.
    pub fn interior_hull(&self) -> Pattern {
        let nbhd = Neighbourhood::von_neumann();
        let mut result = Pattern::new().with_chars(self.on_char, self.off_char);
        for &cell in self.cells() {
            if nbhd.offsets().iter().any(|&offset| {
                let neighbour = cell + offset;
                !self.has_cell(neighbour.x, neighbour.y)
            }) {
                result.insert(cell.x, cell.y);
            }
        }
        result
    }

    /// Keeps only the cells satisfying `predicate`.
    pub fn filter(&self, predicate: impl Fn(Cell) -> bool) -> Pattern {
        let mut result = Pattern::new().with_chars(self.on_char, self.off_char);
        for &cell in self.cells() {
            if predicate(cell) {
                result.insert(cell.x, cell.y);
            }
        }
        result
    }

    /// Uniform sample of `n` cells without replacement.
    pub fn sample(&self, n: usize, rng: &mut impl Rng) -> Result<Pattern> {
        sampling::sample(self, n, rng)
    }

    /// Poisson-disc sample with minimum separation `r` under `measure`.
    pub fn sample_poisson(&self, measure: Measure, r: f64, rng: &mut impl Rng) -> Pattern {
        sampling::sample_poisson(self, measure, r, rng)
    }

    /// Mitchell best-candidate sample of `n` points, `k` candidates per
    /// round.
    pub fn sample_mitchell(&self, measure: Measure, n: usize, k: usize, rng: &mut impl Rng) -> Result<Pattern> {
        sampling::sample_mitchell(self, measure, n, k, rng)
    }

    /// Deterministic value-noise thresholding: buckets every cell into one
    /// of `thresholds.len() + 1` layers by a lattice noise function of the
    /// given `frequency`, iterated `depth` octaves, and returns one
    /// [`Pattern`] per layer.
    pub fn perlin(&self, frequency: f64, depth: u32, thresholds: &[f64]) -> MultiPattern {
        crate::primitives::perlin(self, frequency, depth, thresholds)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl Eq for Pattern {}

impl std::fmt::Debug for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pattern")
            .field("size", &self.size())
            .field("bbox", &self.bbox)
            .finish()
    }
}

impl Add<&Pattern> for &Pattern {
    type Output = Pattern;

    fn add(self, rhs: &Pattern) -> Pattern {
        self.union(rhs)
    }
}

impl Sub<&Pattern> for &Pattern {
    type Output = Pattern;

    fn sub(self, rhs: &Pattern) -> Pattern {
        self.difference(rhs)
    }
}

impl Mul<&Pattern> for &Pattern {
    type Output = Pattern;

    fn mul(self, rhs: &Pattern) -> Pattern {
        self.intersection(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pat(cells: &[(i64, i64)]) -> Pattern {
        let mut p = Pattern::new();
        for &(x, y) in cells {
            p.insert(x, y);
        }
        p
    }

    #[test]
    fn set_algebra_laws() {
        let a = pat(&[(0, 0), (1, 0), (2, 0)]);
        let b = pat(&[(1, 0), (2, 0), (3, 0)]);
        assert_eq!(&a + &a, a);
        assert_eq!(&a * &a, a);
        assert_eq!((&a - &a).size(), 0);
        let union_size = (&a + &b).size();
        let inter_size = (&a * &b).size();
        assert_eq!(union_size, a.size() + b.size() - inter_size);
    }

    #[test]
    fn bbox_tracks_inserts() {
        let p = pat(&[(3, 4), (-1, 2), (0, 0)]);
        let (min, max) = p.bbox().unwrap();
        assert_eq!(min, Cell::new(-1, 0));
        assert_eq!(max, Cell::new(3, 4));
    }

    #[test]
    fn translate_shifts_bbox() {
        let p = pat(&[(0, 0), (1, 1)]).translate(5, -5);
        let (min, max) = p.bbox().unwrap();
        assert_eq!(min, Cell::new(5, -5));
        assert_eq!(max, Cell::new(6, -4));
    }

    #[test]
    fn rotate_four_times_is_identity() {
        let p = pat(&[(0, 0), (1, 0), (1, 1)]);
        assert_eq!(p.rotate(4), p);
        assert_eq!(p.rotate(0), p);
    }

    #[test]
    fn enlarge_scales_size() {
        let p = pat(&[(0, 0), (1, 0)]);
        let e = p.enlarge(3).unwrap();
        assert_eq!(e.size(), 2 * 9);
    }

    #[test]
    fn enlarge_past_max_coordinate_is_out_of_domain() {
        let p = pat(&[(crate::cell::MAX_COORDINATE, 0)]);
        let err = p.enlarge(2).unwrap_err();
        assert!(matches!(err, Error::OutOfDomain { .. }));
    }

    #[test]
    fn edge_and_interior_hull_of_square() {
        let mut p = Pattern::new();
        for y in 0..3 {
            for x in 0..3 {
                p.insert(x, y);
            }
        }
        let hull = p.interior_hull();
        // The single centre cell (1,1) has all four von-Neumann
        // neighbours present, so it is not part of the inner contour.
        assert!(!hull.has_cell(1, 1));
        assert!(hull.has_cell(0, 0));

        let edge = p.edge();
        assert!(edge.has_cell(1, -1));
        assert!(!edge.has_cell(1, 1));
    }
}
