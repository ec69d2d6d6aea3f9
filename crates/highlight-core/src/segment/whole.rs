use super::{advance_chars, Segmenter, SegmenterFactory};
use crate::types::Fragment;

/// One fragment spanning the entire source, for fields that should not be fragmented.
#[derive(Debug, Clone, Copy, Default)]
pub struct WholeSourceSegmenterFactory;

impl SegmenterFactory for WholeSourceSegmenterFactory {
    fn segmenter<'a>(&'a self, source: &'a str) -> Box<dyn Segmenter + 'a> {
        Box::new(Some(Fragment::new(0, source.len())).filter(|f| !f.is_empty()).into_iter())
    }

    fn extract_no_match_fragment<'a>(&self, source: &'a str, size: usize) -> &'a str {
        &source[..advance_chars(source, 0, source.len(), size)]
    }
}
