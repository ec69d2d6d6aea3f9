use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use super::BoxedHitEnum;
use crate::types::Hit;

/// The current hit of one source, waiting in the merge heap.
#[derive(Debug)]
struct Pending {
    hit: Hit,
    source: usize,
}

impl Pending {
    fn key(&self) -> (usize, usize, usize) {
        (self.hit.start_offset, self.hit.end_offset, self.source)
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Streaming k-way merge of ordered hit enums.
///
/// Holds at most one hit per live source. Equal `(start, end)` pairs from
/// different sources come out in source order.
pub struct MergingHitEnum<'a> {
    sources: Vec<BoxedHitEnum<'a>>,
    heap: BinaryHeap<Reverse<Pending>>,
    primed: bool,
}

impl<'a> MergingHitEnum<'a> {
    pub fn new(sources: Vec<BoxedHitEnum<'a>>) -> Self {
        let heap = BinaryHeap::with_capacity(sources.len());
        Self { sources, heap, primed: false }
    }

    fn pull(&mut self, source: usize) {
        if let Some(hit) = self.sources[source].next() {
            self.heap.push(Reverse(Pending { hit, source }));
        }
    }
}

impl Iterator for MergingHitEnum<'_> {
    type Item = Hit;

    fn next(&mut self) -> Option<Hit> {
        if !self.primed {
            self.primed = true;
            for source in 0..self.sources.len() {
                self.pull(source);
            }
        }
        let Reverse(Pending { hit, source }) = self.heap.pop()?;
        self.pull(source);
        Some(hit)
    }
}
