use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::iter::Peekable;

use tracing::trace;

use crate::types::{Fragment, Hit, Snippet, WeightCombiner};

pub trait SnippetChooser {
    /// Picks at most `max_snippets` fragments that contain hits.
    ///
    /// Both sequences must be ordered by offset. An empty result means no
    /// fragment holds a hit and the caller should fall back.
    fn choose(
        &self,
        fragments: &mut dyn Iterator<Item = Fragment>,
        hits: &mut dyn Iterator<Item = Hit>,
        max_snippets: usize,
    ) -> Vec<Snippet>;
}

/// Walks fragments and hits in lockstep, yielding every fragment that holds at
/// least one hit with its combined score.
///
/// A hit belongs to the fragment containing its start offset. Hits starting in
/// a gap between fragments are skipped, and a hit that runs past the end of its
/// fragment is dropped. Fragments stop being pulled once hits run out.
struct ScoredFragments<'f, 'h> {
    fragments: &'f mut dyn Iterator<Item = Fragment>,
    hits: Peekable<&'h mut dyn Iterator<Item = Hit>>,
    combiner: WeightCombiner,
}

impl<'f, 'h> ScoredFragments<'f, 'h> {
    fn new(
        fragments: &'f mut dyn Iterator<Item = Fragment>,
        hits: &'h mut dyn Iterator<Item = Hit>,
        combiner: WeightCombiner,
    ) -> Self {
        Self { fragments, hits: hits.peekable(), combiner }
    }
}

impl Iterator for ScoredFragments<'_, '_> {
    type Item = Snippet;

    fn next(&mut self) -> Option<Snippet> {
        loop {
            self.hits.peek()?;
            let fragment = self.fragments.next()?;
            while self.hits.next_if(|h| h.start_offset < fragment.start).is_some() {}

            let mut hits = Vec::new();
            let mut score: Option<f32> = None;
            while let Some(hit) = self.hits.next_if(|h| h.start_offset < fragment.end) {
                if hit.end_offset > fragment.end {
                    trace!(hit = ?hit.offsets(), fragment = ?fragment, "hit runs past its fragment");
                    continue;
                }
                score = Some(score.map_or(hit.weight, |s| self.combiner.combine(s, hit.weight)));
                hits.push(hit);
            }
            if let Some(score) = score {
                return Some(Snippet { fragment, hits, score });
            }
        }
    }
}

/// Highest scores first, ties going to the earlier fragment.
pub struct ScoreOrderSnippetChooser {
    combiner: WeightCombiner,
}

impl ScoreOrderSnippetChooser {
    pub fn new(combiner: WeightCombiner) -> Self {
        Self { combiner }
    }
}

impl Default for ScoreOrderSnippetChooser {
    fn default() -> Self {
        Self::new(WeightCombiner::Sum)
    }
}

/// Orders snippets by how good they are: score, then earlier start.
struct Ranked(Snippet);

impl Ranked {
    fn rank(&self, other: &Self) -> Ordering {
        self.0
            .score
            .total_cmp(&other.0.score)
            .then_with(|| other.0.fragment.start.cmp(&self.0.fragment.start))
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.rank(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank(other)
    }
}

impl SnippetChooser for ScoreOrderSnippetChooser {
    fn choose(
        &self,
        fragments: &mut dyn Iterator<Item = Fragment>,
        hits: &mut dyn Iterator<Item = Hit>,
        max_snippets: usize,
    ) -> Vec<Snippet> {
        if max_snippets == 0 {
            return Vec::new();
        }
        // Min-heap of the best `max_snippets` so far, worst on top.
        let mut heap: BinaryHeap<Reverse<Ranked>> = BinaryHeap::with_capacity(max_snippets + 1);
        for snippet in ScoredFragments::new(fragments, hits, self.combiner) {
            let candidate = Ranked(snippet);
            if heap.len() < max_snippets {
                heap.push(Reverse(candidate));
            } else if heap.peek().is_some_and(|Reverse(worst)| candidate > *worst) {
                heap.pop();
                heap.push(Reverse(candidate));
            }
        }
        let mut ranked: Vec<Ranked> = heap.into_iter().map(|Reverse(r)| r).collect();
        ranked.sort_unstable_by(|a, b| b.cmp(a));
        ranked.into_iter().map(|Ranked(s)| s).collect()
    }
}

/// The first fragments with hits, in source order. Stops pulling once it has enough.
pub struct SourceOrderSnippetChooser {
    combiner: WeightCombiner,
}

impl SourceOrderSnippetChooser {
    pub fn new(combiner: WeightCombiner) -> Self {
        Self { combiner }
    }
}

impl Default for SourceOrderSnippetChooser {
    fn default() -> Self {
        Self::new(WeightCombiner::Sum)
    }
}

impl SnippetChooser for SourceOrderSnippetChooser {
    fn choose(
        &self,
        fragments: &mut dyn Iterator<Item = Fragment>,
        hits: &mut dyn Iterator<Item = Hit>,
        max_snippets: usize,
    ) -> Vec<Snippet> {
        if max_snippets == 0 {
            return Vec::new();
        }
        ScoredFragments::new(fragments, hits, self.combiner).take(max_snippets).collect()
    }
}
