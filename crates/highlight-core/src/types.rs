//! Domain types shared by every stage of the pipeline.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A matched-term occurrence.
///
/// - `start_offset`/`end_offset`: byte offsets into the source, `start < end`
/// - `weight`: non-negative, assigned by the query weigher
/// - `term`: the analyzed term that matched, kept for tie-breaking and debugging
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub start_offset: usize,
    pub end_offset: usize,
    pub weight: f32,
    pub term: Option<Arc<str>>,
}

impl Hit {
    pub fn new(start_offset: usize, end_offset: usize, weight: f32) -> Self {
        Self { start_offset, end_offset, weight, term: None }
    }

    pub fn with_term(mut self, term: impl Into<Arc<str>>) -> Self {
        self.term = Some(term.into());
        self
    }

    /// The `(start, end)` key every hit enum is ordered by.
    pub fn offsets(&self) -> (usize, usize) {
        (self.start_offset, self.end_offset)
    }
}

/// A half-open candidate range `[start, end)` of the source produced by a segmenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fragment {
    pub start: usize,
    pub end: usize,
}

impl Fragment {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn contains_offset(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    pub fn contains_hit(&self, hit: &Hit) -> bool {
        self.start <= hit.start_offset && hit.end_offset <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// A chosen fragment, the hits that fall inside it and their combined score.
#[derive(Debug, Clone, PartialEq)]
pub struct Snippet {
    pub fragment: Fragment,
    pub hits: Vec<Hit>,
    pub score: f32,
}

/// How weights are combined when hits collapse or accumulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightCombiner {
    #[default]
    Max,
    Sum,
    First,
}

impl WeightCombiner {
    pub fn combine(self, acc: f32, weight: f32) -> f32 {
        match self {
            Self::Max => acc.max(weight),
            Self::Sum => acc + weight,
            Self::First => acc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combiners_fold_weights() {
        assert_eq!(WeightCombiner::Max.combine(1.0, 3.0), 3.0);
        assert_eq!(WeightCombiner::Sum.combine(1.0, 3.0), 4.0);
        assert_eq!(WeightCombiner::First.combine(1.0, 3.0), 1.0);
    }

    #[test]
    fn fragment_containment_is_half_open() {
        let f = Fragment::new(4, 9);
        assert!(f.contains_offset(4));
        assert!(!f.contains_offset(9));
        assert!(f.contains_hit(&Hit::new(4, 9, 1.0)));
        assert!(!f.contains_hit(&Hit::new(8, 10, 1.0)));
    }
}
