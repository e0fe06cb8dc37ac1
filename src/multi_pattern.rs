//! An ordered sequence of [`Pattern`]s, the typical output of a decomposition.

use crate::pattern::Pattern;

/// An ordered list of patterns. Carries only its element ordering as
/// semantic state — no shared bbox, no deduplication across members.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiPattern {
    patterns: Vec<Pattern>,
}

impl MultiPattern {
    pub fn new() -> Self {
        MultiPattern { patterns: Vec::new() }
    }

    pub fn push(&mut self, pattern: Pattern) {
        self.patterns.push(pattern);
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Pattern> {
        self.patterns.get(index)
    }

    /// Union of all member patterns, losing the decomposition boundary.
    pub fn flatten(&self) -> Pattern {
        let mut result = Pattern::new();
        for pattern in &self.patterns {
            result = result.union(pattern);
        }
        result
    }

    /// Sorts members by `(min.y, min.x, size)`, the ordering tests should
    /// use to compare decomposition outputs without over-constraining
    /// implementation-defined iteration order.
    pub fn sort_canonical(&mut self) {
        self.patterns.sort_by_key(|pattern| {
            let (min, _) = pattern.bbox().unwrap_or_default();
            (min.y, min.x, pattern.size())
        });
    }
}

impl From<Vec<Pattern>> for MultiPattern {
    fn from(patterns: Vec<Pattern>) -> Self {
        MultiPattern { patterns }
    }
}

impl FromIterator<Pattern> for MultiPattern {
    fn from_iter<T: IntoIterator<Item = Pattern>>(iter: T) -> Self {
        MultiPattern {
            patterns: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for MultiPattern {
    type Item = Pattern;
    type IntoIter = std::vec::IntoIter<Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.into_iter()
    }
}
