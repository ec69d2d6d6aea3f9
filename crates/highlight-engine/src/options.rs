//! Per-field highlighting options.

use serde::{Deserialize, Serialize};

use highlight_core::config::Config;
use highlight_core::error::Result;
use highlight_core::segment::SegmenterConfig;
use highlight_core::types::WeightCombiner;

const DEFAULT_PRE_TAG: &str = "<em>";
const DEFAULT_POST_TAG: &str = "</em>";

/// Options for one highlighted field.
///
/// Deserialized from the `highlight` config table; segmentation keys
/// (`fragmenter`, `fragment_char_size`, `boundary_max_scan`, `boundary_chars`,
/// `locale`) sit in the same table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldOptions {
    pub number_of_fragments: usize,
    /// Size of the prefix returned when nothing matched; `0` disables the fallback.
    pub no_match_size: usize,
    /// Best snippets first instead of document order.
    pub score_ordered: bool,
    pub pre_tags: Vec<String>,
    pub post_tags: Vec<String>,
    #[serde(flatten)]
    pub segmenter: SegmenterConfig,
    /// Fields whose hits are merged into this field's highlighting.
    pub matched_fields: Option<Vec<String>>,
    /// How overlapping hits from redundant analysis paths combine.
    pub overlap_weight: WeightCombiner,
    /// How hit weights add up into a fragment score.
    pub score_combiner: WeightCombiner,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            number_of_fragments: 5,
            no_match_size: 0,
            score_ordered: false,
            pre_tags: vec![DEFAULT_PRE_TAG.to_string()],
            post_tags: vec![DEFAULT_POST_TAG.to_string()],
            segmenter: SegmenterConfig::default(),
            matched_fields: None,
            overlap_weight: WeightCombiner::Max,
            score_combiner: WeightCombiner::Sum,
        }
    }
}

impl FieldOptions {
    /// Reads the `highlight` table, falling back to defaults when it is absent.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.get_or_default("highlight")
    }

    pub fn pre_tag(&self) -> &str {
        self.pre_tags.first().map_or(DEFAULT_PRE_TAG, String::as_str)
    }

    pub fn post_tag(&self) -> &str {
        self.post_tags.first().map_or(DEFAULT_POST_TAG, String::as_str)
    }
}
