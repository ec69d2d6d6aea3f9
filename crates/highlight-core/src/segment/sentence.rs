use tracing::trace;
use unicode_segmentation::{USentenceBoundIndices, UnicodeSegmentation};

use super::{advance_chars, CharScanningSegmenter, CharScanningSegmenterFactory, Locale, Segmenter, SegmenterFactory};
use crate::types::Fragment;

/// Fragments aligned to UAX #29 sentence boundaries.
///
/// Sentences longer than `fragment_char_size + boundary_max_scan` characters
/// are cut with the char-scanning rule, so a run-on sentence never becomes an
/// unbounded fragment.
#[derive(Debug, Clone)]
pub struct SentenceSegmenterFactory {
    locale: Locale,
    scanner: CharScanningSegmenterFactory,
}

impl SentenceSegmenterFactory {
    pub fn new(locale: Locale, scanner: CharScanningSegmenterFactory) -> Self {
        Self { locale, scanner }
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    fn max_sentence_chars(&self) -> usize {
        self.scanner.fragment_char_size() + self.scanner.boundary_max_scan()
    }
}

impl SegmenterFactory for SentenceSegmenterFactory {
    fn segmenter<'a>(&'a self, source: &'a str) -> Box<dyn Segmenter + 'a> {
        Box::new(SentenceSegmenter { factory: self, text: source, sentences: source.split_sentence_bound_indices(), split: None })
    }

    fn extract_no_match_fragment<'a>(&self, source: &'a str, size: usize) -> &'a str {
        if size == 0 {
            return "";
        }
        let target = advance_chars(source, 0, source.len(), size);
        if target >= source.len() {
            return source;
        }
        let ceiling = advance_chars(source, 0, source.len(), size + self.scanner.boundary_max_scan());
        match self.segmenter(source).find(|f| f.end >= target) {
            Some(f) if f.end <= ceiling => &source[..f.end],
            _ => self.scanner.extract_no_match_fragment(source, size),
        }
    }
}

pub struct SentenceSegmenter<'a> {
    factory: &'a SentenceSegmenterFactory,
    text: &'a str,
    sentences: USentenceBoundIndices<'a>,
    split: Option<CharScanningSegmenter<'a>>,
}

impl Iterator for SentenceSegmenter<'_> {
    type Item = Fragment;

    fn next(&mut self) -> Option<Fragment> {
        loop {
            if let Some(split) = &mut self.split {
                if let Some(fragment) = split.next() {
                    return Some(fragment);
                }
                self.split = None;
            }
            let (at, sentence) = self.sentences.next()?;
            let start = at + (sentence.len() - sentence.trim_start().len());
            let end = at + sentence.trim_end().len();
            if start >= end {
                continue;
            }
            if self.text[start..end].chars().nth(self.factory.max_sentence_chars()).is_some() {
                trace!(start, end, "splitting long sentence");
                self.split = Some(self.factory.scanner.segment_range(self.text, start, end));
                continue;
            }
            return Some(Fragment::new(start, end));
        }
    }
}
