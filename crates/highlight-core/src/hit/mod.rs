//! Offset-ordered hit streams.
//!
//! A hit enum is any iterator of [`Hit`]s ordered by `(start_offset, end_offset)`.
//! Sources are pulled one hit at a time; nothing here materializes a stream.

mod merging;
mod overlap;

pub use merging::MergingHitEnum;
pub use overlap::OverlapMergingHitEnum;

use crate::types::{Hit, WeightCombiner};

pub trait HitEnum: Iterator<Item = Hit> {}

impl<I: Iterator<Item = Hit>> HitEnum for I {}

pub type BoxedHitEnum<'a> = Box<dyn Iterator<Item = Hit> + 'a>;

pub trait HitEnumExt: HitEnum + Sized {
    /// Collapse overlapping hits into one hit spanning their union.
    fn merge_overlaps(self, combiner: WeightCombiner) -> OverlapMergingHitEnum<Self> {
        OverlapMergingHitEnum::new(self, combiner)
    }

    fn boxed<'a>(self) -> BoxedHitEnum<'a>
    where
        Self: 'a,
    {
        Box::new(self)
    }
}

impl<I: HitEnum> HitEnumExt for I {}
