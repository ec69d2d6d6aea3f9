//! State shared by every highlight call of one search response.

use std::sync::OnceLock;
use tracing::debug;

use highlight_core::weight::{BasicQueryWeigher, QueryFlattener, QueryNode};

/// Owns the response's query and the weigher flattened from it.
///
/// Create one per search response and pass it by reference to every
/// [`crate::Highlighter::highlight`] call; the weigher is built on first use
/// and then read concurrently by any number of callers.
#[derive(Debug)]
pub struct HighlightContext {
    query: QueryNode,
    flattener: QueryFlattener,
    weigher: OnceLock<BasicQueryWeigher>,
}

impl HighlightContext {
    pub fn new(query: QueryNode) -> Self {
        Self::with_flattener(query, QueryFlattener::default())
    }

    pub fn with_flattener(query: QueryNode, flattener: QueryFlattener) -> Self {
        Self { query, flattener, weigher: OnceLock::new() }
    }

    pub fn query(&self) -> &QueryNode {
        &self.query
    }

    pub fn weigher(&self) -> &BasicQueryWeigher {
        self.weigher.get_or_init(|| {
            let weigher = BasicQueryWeigher::new(&self.flattener, &self.query);
            debug!(terms = weigher.len(), "flattened query into weigher");
            weigher
        })
    }
}
