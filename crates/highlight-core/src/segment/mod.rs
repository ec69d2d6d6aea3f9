//! Cutting source text into candidate fragments.
//!
//! Three boundary policies share one factory contract: fixed-size char
//! scanning, sentence boundaries and the whole source. Segmenters are lazy;
//! the chooser pulls fragments only as far as the hits reach.

mod char_scan;
mod locale;
mod sentence;
mod whole;

pub use char_scan::{CharScanningSegmenter, CharScanningSegmenterFactory, DEFAULT_BOUNDARY_CHARS};
pub use locale::Locale;
pub use sentence::{SentenceSegmenter, SentenceSegmenterFactory};
pub use whole::WholeSourceSegmenterFactory;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::Fragment;

/// An ordered, non-overlapping, finite sequence of fragments over one source.
pub trait Segmenter: Iterator<Item = Fragment> {}

impl<I: Iterator<Item = Fragment>> Segmenter for I {}

pub trait SegmenterFactory: fmt::Debug + Send + Sync {
    fn segmenter<'a>(&'a self, source: &'a str) -> Box<dyn Segmenter + 'a>;

    /// Prefix of `source` of roughly `size` characters, used when no snippet was chosen.
    fn extract_no_match_fragment<'a>(&self, source: &'a str, size: usize) -> &'a str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmenterPolicy {
    #[default]
    Scan,
    Sentence,
    WholeSource,
}

impl FromStr for SegmenterPolicy {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "scan" => Ok(Self::Scan),
            "sentence" => Ok(Self::Sentence),
            "none" => Ok(Self::WholeSource),
            other => Err(Error::UnknownFragmenter(other.to_string())),
        }
    }
}

impl fmt::Display for SegmenterPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scan => "scan",
            Self::Sentence => "sentence",
            Self::WholeSource => "none",
        })
    }
}

/// Host-facing segmentation settings. Names are validated when the factory is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// `scan` (the default when absent), `sentence` or `none`.
    pub fragmenter: Option<String>,
    pub fragment_char_size: usize,
    pub boundary_max_scan: usize,
    pub boundary_chars: Option<String>,
    /// Only read by the sentence policy, defaults to `en_US`.
    pub locale: Option<String>,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self { fragmenter: None, fragment_char_size: 100, boundary_max_scan: 20, boundary_chars: None, locale: None }
    }
}

impl SegmenterConfig {
    pub fn policy(&self) -> Result<SegmenterPolicy> {
        self.fragmenter.as_deref().map_or(Ok(SegmenterPolicy::default()), str::parse)
    }

    pub fn build(&self) -> Result<Box<dyn SegmenterFactory>> {
        let policy = self.policy()?;
        debug!(%policy, size = self.fragment_char_size, max_scan = self.boundary_max_scan, "building segmenter factory");
        match policy {
            SegmenterPolicy::Scan => Ok(Box::new(self.char_scanning()?)),
            SegmenterPolicy::Sentence => {
                let locale = match self.locale.as_deref() {
                    Some(s) => s.parse()?,
                    None => Locale::default(),
                };
                Ok(Box::new(SentenceSegmenterFactory::new(locale, self.char_scanning()?)))
            }
            SegmenterPolicy::WholeSource => Ok(Box::new(WholeSourceSegmenterFactory)),
        }
    }

    fn char_scanning(&self) -> Result<CharScanningSegmenterFactory> {
        if self.fragment_char_size == 0 {
            return Err(Error::InvalidConfig("fragment_char_size must be greater than zero".to_string()));
        }
        let factory = CharScanningSegmenterFactory::new(self.fragment_char_size, self.boundary_max_scan);
        Ok(match &self.boundary_chars {
            Some(chars) => factory.with_boundary_chars(chars.chars()),
            None => factory,
        })
    }
}

/// Byte offset reached after stepping `chars` characters forward from `from`, capped at `limit`.
pub(crate) fn advance_chars(text: &str, from: usize, limit: usize, chars: usize) -> usize {
    text[from..limit].char_indices().nth(chars).map_or(limit, |(i, _)| from + i)
}
