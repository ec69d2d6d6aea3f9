//! highlight-text
//!
//! Host adapter over tantivy analyzers: fields are tokenized with the analyzer
//! their schema entry names, and every token whose term the query weighs
//! becomes a hit. Also builds the query tree from a plain query string.
pub mod field;
pub mod query;
pub mod tantivy_utils;

pub use field::{AnalyzedField, AnalyzedFieldLoader, Analysis};
pub use query::QueryBuilder;
pub use tantivy_utils::{STEMMED_FIELD, TEXT_FIELD};
