//! Safe extraction of source text for arbitrary offset pairs.
//!
//! Offsets coming from upstream analysis are not trusted: both extracters clamp
//! them to the source and pull them in to the nearest whole character, so the
//! result never starts or ends inside a multi-unit character.

use std::borrow::Cow;

pub trait SourceExtracter {
    /// Length of the source in the extracter's offset unit.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Text of `[start_offset, end_offset)`, or empty when the clamped range is empty.
    fn extract(&self, start_offset: usize, end_offset: usize) -> Cow<'_, str>;
}

/// Extracts from a UTF-8 `&str` using byte offsets.
#[derive(Debug, Clone, Copy)]
pub struct StrSourceExtracter<'a> {
    source: &'a str,
}

impl<'a> StrSourceExtracter<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Same as [`SourceExtracter::extract`] but keeps the source lifetime.
    pub fn slice(&self, start_offset: usize, end_offset: usize) -> &'a str {
        let len = self.source.len();
        let mut start = start_offset;
        let mut end = end_offset.min(len);
        if start >= end {
            return "";
        }
        // A partial character at either edge is dropped rather than split.
        while !self.source.is_char_boundary(start) {
            start += 1;
        }
        while !self.source.is_char_boundary(end) {
            end -= 1;
        }
        if start >= end {
            return "";
        }
        &self.source[start..end]
    }
}

impl SourceExtracter for StrSourceExtracter<'_> {
    fn len(&self) -> usize {
        self.source.len()
    }

    fn extract(&self, start_offset: usize, end_offset: usize) -> Cow<'_, str> {
        Cow::Borrowed(self.slice(start_offset, end_offset))
    }
}

/// Extracts from UTF-16 code units, for hosts whose offsets count UTF-16 units.
#[derive(Debug, Clone)]
pub struct Utf16SourceExtracter {
    units: Vec<u16>,
}

fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

impl Utf16SourceExtracter {
    pub fn new(source: &str) -> Self {
        Self { units: source.encode_utf16().collect() }
    }

    pub fn from_units(units: Vec<u16>) -> Self {
        Self { units }
    }
}

impl SourceExtracter for Utf16SourceExtracter {
    fn len(&self) -> usize {
        self.units.len()
    }

    fn extract(&self, start_offset: usize, end_offset: usize) -> Cow<'_, str> {
        let mut start = start_offset;
        let mut end = end_offset.min(self.units.len());
        if start >= end {
            return Cow::Borrowed("");
        }
        if is_low_surrogate(self.units[start]) {
            start += 1;
        }
        if end < self.units.len() && is_low_surrogate(self.units[end]) {
            end -= 1;
        }
        if start >= end {
            return Cow::Borrowed("");
        }
        Cow::Owned(String::from_utf16_lossy(&self.units[start..end]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range_offsets() {
        let e = StrSourceExtracter::new("hello");
        assert_eq!(e.extract(2, 100), "llo");
        assert_eq!(e.extract(7, 9), "");
        assert_eq!(e.extract(3, 3), "");
        assert_eq!(e.extract(4, 1), "");
    }

    #[test]
    fn never_splits_a_utf8_character() {
        // "é" is two bytes, "😀" four.
        let text = "aé😀b";
        let e = StrSourceExtracter::new(text);
        assert_eq!(e.extract(2, 7), "😀");
        assert_eq!(e.extract(2, 8), "😀b");
        assert_eq!(e.extract(0, 5), "aé");
        assert_eq!(e.extract(4, 6), "");
    }

    #[test]
    fn utf16_drops_half_surrogate_pairs() {
        let e = Utf16SourceExtracter::new("a😀b😀c");
        // units: a, hi, lo, b, hi, lo, c
        assert_eq!(e.len(), 7);
        assert_eq!(e.extract(2, 7), "b😀c");
        assert_eq!(e.extract(0, 5), "a😀b");
        assert_eq!(e.extract(2, 3), "");
        assert_eq!(e.extract(0, 7), "a😀b😀c");
    }
}
