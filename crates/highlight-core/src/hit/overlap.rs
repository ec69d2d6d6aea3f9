use std::iter::Peekable;

use tracing::trace;

use crate::types::{Hit, WeightCombiner};

/// Collapses overlapping hits of an ordered hit enum.
///
/// Analyzers that reach the same span through more than one path (matched
/// fields, synonyms, stemmed and unstemmed forms) produce overlapping hits.
/// Each run of hits where `next.start < current.end` comes out as one hit
/// covering the union of the run, weighted by the configured combiner and
/// carrying the first hit's term. Touching hits are left alone.
pub struct OverlapMergingHitEnum<I: Iterator<Item = Hit>> {
    inner: Peekable<I>,
    combiner: WeightCombiner,
}

impl<I: Iterator<Item = Hit>> OverlapMergingHitEnum<I> {
    pub fn new(inner: I, combiner: WeightCombiner) -> Self {
        Self { inner: inner.peekable(), combiner }
    }
}

impl<I: Iterator<Item = Hit>> Iterator for OverlapMergingHitEnum<I> {
    type Item = Hit;

    fn next(&mut self) -> Option<Hit> {
        let mut current = self.inner.next()?;
        while let Some(next) = self.inner.next_if(|h| h.start_offset < current.end_offset) {
            trace!(
                from = ?current.offsets(),
                with = ?next.offsets(),
                "collapsing overlapping hits"
            );
            current.end_offset = current.end_offset.max(next.end_offset);
            current.weight = self.combiner.combine(current.weight, next.weight);
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hit::HitEnumExt;

    #[test]
    fn duplicate_spans_collapse_with_max_weight() {
        let hits = vec![Hit::new(0, 5, 1.0), Hit::new(0, 5, 3.0), Hit::new(7, 9, 1.0)];
        let out: Vec<Hit> = hits.into_iter().merge_overlaps(WeightCombiner::Max).collect();
        assert_eq!(out, vec![Hit::new(0, 5, 3.0), Hit::new(7, 9, 1.0)]);
    }

    #[test]
    fn chains_of_overlaps_span_the_union() {
        let hits = vec![Hit::new(0, 4, 1.0), Hit::new(2, 6, 1.0), Hit::new(5, 8, 2.0)];
        let out: Vec<Hit> = hits.into_iter().merge_overlaps(WeightCombiner::Sum).collect();
        assert_eq!(out, vec![Hit::new(0, 8, 4.0)]);
    }

    #[test]
    fn first_wins_keeps_leading_weight_and_term() {
        let hits = vec![Hit::new(3, 6, 0.5).with_term("run"), Hit::new(3, 9, 2.0).with_term("running")];
        let out: Vec<Hit> = hits.into_iter().merge_overlaps(WeightCombiner::First).collect();
        assert_eq!(out, vec![Hit::new(3, 9, 0.5).with_term("run")]);
    }

    #[test]
    fn touching_hits_stay_separate() {
        let hits = vec![Hit::new(0, 3, 1.0), Hit::new(3, 5, 1.0)];
        assert_eq!(hits.clone().into_iter().merge_overlaps(WeightCombiner::Max).collect::<Vec<_>>(), hits);
    }
}
