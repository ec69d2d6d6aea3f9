//! highlight-core
//!
//! The snippet pipeline: hit enums are merged and de-overlapped, a segmenter
//! cuts the source into fragments, a chooser scores fragments against hits and
//! a formatter marks the chosen snippets up through a source extracter.
#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod error;
pub mod hit;
pub mod segment;
pub mod snippet;
pub mod source;
pub mod traits;
pub mod types;
pub mod weight;

pub use error::{Error, Result};
pub use hit::{HitEnum, HitEnumExt, MergingHitEnum, OverlapMergingHitEnum};
pub use segment::{SegmenterConfig, SegmenterFactory, SegmenterPolicy};
pub use snippet::{ScoreOrderSnippetChooser, SnippetChooser, SnippetFormatter, SourceOrderSnippetChooser};
pub use source::{SourceExtracter, StrSourceExtracter, Utf16SourceExtracter};
pub use types::{Fragment, Hit, Snippet, WeightCombiner};
pub use traits::{FieldLoader, FieldSource, QueryWeigher};
pub use weight::{BasicQueryWeigher, Clause, Occur, QueryFlattener, QueryNode};
