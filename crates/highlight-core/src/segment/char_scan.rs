use super::{advance_chars, Segmenter, SegmenterFactory};
use crate::types::Fragment;

/// Elasticsearch's default `boundary_chars`. Whitespace always counts as a boundary.
pub const DEFAULT_BOUNDARY_CHARS: &str = ".,!? \t\n";

/// Fixed-size fragments whose edges are nudged onto word boundaries.
#[derive(Debug, Clone)]
pub struct CharScanningSegmenterFactory {
    fragment_char_size: usize,
    boundary_max_scan: usize,
    boundary_chars: Vec<char>,
}

impl CharScanningSegmenterFactory {
    pub fn new(fragment_char_size: usize, boundary_max_scan: usize) -> Self {
        Self {
            fragment_char_size: fragment_char_size.max(1),
            boundary_max_scan,
            boundary_chars: DEFAULT_BOUNDARY_CHARS.chars().collect(),
        }
    }

    pub fn with_boundary_chars(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.boundary_chars = chars.into_iter().collect();
        self
    }

    pub fn fragment_char_size(&self) -> usize {
        self.fragment_char_size
    }

    pub fn boundary_max_scan(&self) -> usize {
        self.boundary_max_scan
    }

    fn is_boundary(&self, c: char) -> bool {
        c.is_whitespace() || self.boundary_chars.contains(&c)
    }

    /// Fragment end for a boundary found at byte `at`: punctuation stays in the
    /// fragment, whitespace does not.
    fn end_at(at: usize, c: char) -> usize {
        if c.is_whitespace() {
            at
        } else {
            at + c.len_utf8()
        }
    }

    /// Moves `target` onto a boundary at most `boundary_max_scan` characters
    /// away, forward first, never back to or before `from`.
    fn scan(&self, text: &str, from: usize, target: usize, limit: usize) -> usize {
        let forward = text[target..limit]
            .char_indices()
            .take(self.boundary_max_scan)
            .find(|&(_, c)| self.is_boundary(c))
            .map(|(i, c)| Self::end_at(target + i, c));
        if let Some(end) = forward {
            if end > from {
                return end;
            }
        }
        text[from..target]
            .char_indices()
            .rev()
            .take(self.boundary_max_scan)
            .filter(|&(_, c)| self.is_boundary(c))
            .map(|(i, c)| Self::end_at(from + i, c))
            .find(|&end| end > from)
            .unwrap_or(target)
    }

    /// End of the fragment starting at `from` within `[from, limit)`.
    pub(crate) fn fragment_end(&self, text: &str, from: usize, limit: usize) -> usize {
        let target = advance_chars(text, from, limit, self.fragment_char_size);
        if target >= limit {
            return limit;
        }
        self.scan(text, from, target, limit)
    }

    /// Segments only `[start, end)` of `text`; offsets stay relative to `text`.
    pub fn segment_range<'a>(&'a self, text: &'a str, start: usize, end: usize) -> CharScanningSegmenter<'a> {
        CharScanningSegmenter { factory: self, text, cursor: start, limit: end.min(text.len()) }
    }
}

impl SegmenterFactory for CharScanningSegmenterFactory {
    fn segmenter<'a>(&'a self, source: &'a str) -> Box<dyn Segmenter + 'a> {
        Box::new(self.segment_range(source, 0, source.len()))
    }

    fn extract_no_match_fragment<'a>(&self, source: &'a str, size: usize) -> &'a str {
        if size == 0 {
            return "";
        }
        let target = advance_chars(source, 0, source.len(), size);
        if target >= source.len() {
            return source;
        }
        &source[..self.scan(source, 0, target, source.len())]
    }
}

pub struct CharScanningSegmenter<'a> {
    factory: &'a CharScanningSegmenterFactory,
    text: &'a str,
    cursor: usize,
    limit: usize,
}

impl Iterator for CharScanningSegmenter<'_> {
    type Item = Fragment;

    fn next(&mut self) -> Option<Fragment> {
        if self.cursor >= self.limit {
            return None;
        }
        let rest = &self.text[self.cursor..self.limit];
        self.cursor += rest.len() - rest.trim_start().len();
        if self.cursor >= self.limit {
            return None;
        }
        let start = self.cursor;
        self.cursor = self.factory.fragment_end(self.text, start, self.limit);
        Some(Fragment::new(start, self.cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(factory: &CharScanningSegmenterFactory, text: &'a str) -> Vec<&'a str> {
        factory.segmenter(text).map(|f| &text[f.start..f.end]).collect()
    }

    #[test]
    fn fragments_land_on_word_boundaries() {
        let factory = CharScanningSegmenterFactory::new(8, 5);
        let text = "The quick brown fox jumps over the lazy dog";
        assert_eq!(texts(&factory, text), vec!["The quick", "brown fox", "jumps over", "the lazy", "dog"]);
    }

    #[test]
    fn punctuation_stays_in_the_fragment() {
        let factory = CharScanningSegmenterFactory::new(4, 3);
        assert_eq!(texts(&factory, "Hi, there. Bye"), vec!["Hi,", "there.", "Bye"]);
    }

    #[test]
    fn falls_back_to_fixed_size_without_boundary() {
        let factory = CharScanningSegmenterFactory::new(4, 2);
        assert_eq!(texts(&factory, "abcdefghij"), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn whitespace_only_text_has_no_fragments() {
        let factory = CharScanningSegmenterFactory::new(4, 2);
        assert!(factory.segmenter("   \n ").next().is_none());
        assert!(factory.segmenter("").next().is_none());
    }

    #[test]
    fn custom_boundary_chars() {
        let factory = CharScanningSegmenterFactory::new(3, 4).with_boundary_chars(['-']);
        assert_eq!(texts(&factory, "ab-cdef-gh"), vec!["ab-", "cdef-", "gh"]);
    }

    #[test]
    fn no_match_fragment_is_a_boundary_prefix() {
        let factory = CharScanningSegmenterFactory::new(100, 10);
        let text = "The quick brown fox jumps";
        assert_eq!(factory.extract_no_match_fragment(text, 7), "The quick");
        assert_eq!(factory.extract_no_match_fragment(text, 100), text);
        assert_eq!(factory.extract_no_match_fragment(text, 0), "");
        assert_eq!(factory.extract_no_match_fragment("naïve café", 3), "naïve");
    }
}
