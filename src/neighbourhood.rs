//! Ordered neighbour offsets and cell categorisation.

use crate::cell::Cell;
use crate::error::Error;
use crate::pattern::Pattern;

/// An ordered set of offset [`Cell`]s defining which neighbours of a cell
/// are examined by automata and decomposition algorithms.
///
/// Constant after construction: the offset order and the derived
/// [`category_label`](Neighbourhood::category_label) table never change.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Neighbourhood {
    offsets: Vec<Cell>,
    labels: Vec<String>,
}

impl Neighbourhood {
    /// Builds a neighbourhood from an explicit, non-empty, duplicate-free
    /// offset list.
    pub fn custom(offsets: Vec<Cell>) -> Result<Self, Error> {
        if offsets.is_empty() {
            return Err(Error::invalid_argument("neighbourhood must have at least one offset"));
        }
        let mut seen = std::collections::HashSet::new();
        for &offset in &offsets {
            if !seen.insert(offset) {
                return Err(Error::invalid_argument(format!("duplicate offset {offset:?}")));
            }
        }
        let labels = build_labels(&offsets);
        Ok(Neighbourhood { offsets, labels })
    }

    /// The 4 orthogonal neighbours: north, east, south, west.
    pub fn von_neumann() -> Self {
        Self::custom(vec![
            Cell::new(0, -1),
            Cell::new(1, 0),
            Cell::new(0, 1),
            Cell::new(-1, 0),
        ])
        .expect("von_neumann offsets are valid")
    }

    /// The 8 surrounding cells (orthogonal + diagonal).
    pub fn moore() -> Self {
        Self::custom(vec![
            Cell::new(0, -1),
            Cell::new(1, -1),
            Cell::new(1, 0),
            Cell::new(1, 1),
            Cell::new(0, 1),
            Cell::new(-1, 1),
            Cell::new(-1, 0),
            Cell::new(-1, -1),
        ])
        .expect("moore offsets are valid")
    }

    /// The 4 diagonal corners.
    pub fn diagonal() -> Self {
        Self::custom(vec![
            Cell::new(1, -1),
            Cell::new(1, 1),
            Cell::new(-1, 1),
            Cell::new(-1, -1),
        ])
        .expect("diagonal offsets are valid")
    }

    /// The 4 knight-short corners, at distance 2 on the diagonal axes.
    pub fn diagonal_2() -> Self {
        Self::custom(vec![
            Cell::new(2, -2),
            Cell::new(2, 2),
            Cell::new(-2, 2),
            Cell::new(-2, -2),
        ])
        .expect("diagonal_2 offsets are valid")
    }

    /// The 8 knight's-move offsets.
    pub fn knight() -> Self {
        Self::custom(vec![
            Cell::new(1, -2),
            Cell::new(2, -1),
            Cell::new(2, 1),
            Cell::new(1, 2),
            Cell::new(-1, 2),
            Cell::new(-2, 1),
            Cell::new(-2, -1),
            Cell::new(-1, -2),
        ])
        .expect("knight offsets are valid")
    }

    /// The offsets in iteration order.
    pub fn offsets(&self) -> &[Cell] {
        &self.offsets
    }

    /// Number of offsets, `n`.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Counts how many of this neighbourhood's offsets from `cell` lie in
    /// `pattern`.
    pub fn count(&self, pattern: &Pattern, cell: Cell) -> usize {
        self.offsets
            .iter()
            .filter(|&&offset| {
                let neighbour = cell + offset;
                pattern.has_cell(neighbour.x, neighbour.y)
            })
            .count()
    }

    /// Categorises `cell` against `pattern`: returns an index in
    /// `[1, 2^n]`. Category `1` is "every offset present", category `2^n`
    /// is "no offset present".
    pub fn categorise(&self, pattern: &Pattern, cell: Cell) -> usize {
        let n = self.offsets.len();
        let mut bitmask = 0usize;
        for (i, &offset) in self.offsets.iter().enumerate() {
            let neighbour = cell + offset;
            if pattern.has_cell(neighbour.x, neighbour.y) {
                bitmask |= 1 << i;
            }
        }
        (1usize << n) - bitmask
    }

    /// Display strings for each of the `2^n` categories, indexed by
    /// `category - 1`.
    pub fn category_label(&self) -> &[String] {
        &self.labels
    }
}

/// Standard light box-drawing glyphs indexed by a 4-bit `N|E|S|W` presence
/// mask (`N = 1`, `E = 2`, `S = 4`, `W = 8`), reproducing corridor art when
/// the neighbourhood is [`Neighbourhood::von_neumann`] in its canonical
/// N, E, S, W offset order.
const BOX_DRAWING: [char; 16] = [
    ' ', '╵', '╶', '└', '╷', '│', '┌', '├', '╴', '┘', '─', '┴', '┐', '┤', '┬', '┼',
];

fn is_von_neumann_order(offsets: &[Cell]) -> bool {
    offsets
        == [
            Cell::new(0, -1),
            Cell::new(1, 0),
            Cell::new(0, 1),
            Cell::new(-1, 0),
        ]
}

fn build_labels(offsets: &[Cell]) -> Vec<String> {
    let n = offsets.len();
    let total = 1usize << n;
    let von_neumann = is_von_neumann_order(offsets);
    (1..=total)
        .map(|category| {
            let bitmask = total - category;
            if von_neumann {
                BOX_DRAWING[bitmask].to_string()
            } else {
                format!("{bitmask:0n$b}")
            }
        })
        .collect()
}
