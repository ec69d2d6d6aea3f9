//! highlight-engine
//!
//! The per-field highlighter the host calls once per document field. Wires the
//! core pipeline together from [`FieldOptions`], merges matched fields, falls
//! back to a prefix when nothing matched and cleans up every opened field.

pub mod context;
pub mod highlighter;
pub mod options;

pub use context::HighlightContext;
pub use highlighter::{HighlightedField, Highlighter};
pub use options::FieldOptions;
