//! Turning a query tree into per-term weights.
//!
//! The host's query is described by the closed [`QueryNode`] set. A
//! [`QueryFlattener`] walks it once and the resulting [`BasicQueryWeigher`] is
//! an immutable term to weight map, safe to share across documents.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

pub use crate::traits::QueryWeigher;

fn one() -> f32 {
    1.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occur {
    Must,
    Should,
    Filter,
    MustNot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    pub occur: Occur,
    pub query: QueryNode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryNode {
    Term {
        term: String,
        #[serde(default = "one")]
        boost: f32,
    },
    Phrase {
        terms: Vec<String>,
        #[serde(default = "one")]
        boost: f32,
    },
    Boolean {
        clauses: Vec<Clause>,
    },
    DisjunctionMax {
        queries: Vec<QueryNode>,
    },
    Boost {
        query: Box<QueryNode>,
        boost: f32,
    },
    MatchAll,
}

impl QueryNode {
    pub fn term(term: impl Into<String>) -> Self {
        Self::Term { term: term.into(), boost: 1.0 }
    }

    pub fn phrase<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Phrase { terms: terms.into_iter().map(Into::into).collect(), boost: 1.0 }
    }

    pub fn boolean(clauses: Vec<Clause>) -> Self {
        Self::Boolean { clauses }
    }

    pub fn dis_max(queries: Vec<QueryNode>) -> Self {
        Self::DisjunctionMax { queries }
    }

    pub fn boosted(self, boost: f32) -> Self {
        Self::Boost { query: Box::new(self), boost }
    }

    pub fn clause(self, occur: Occur) -> Clause {
        Clause { occur, query: self }
    }
}

/// Collects term weights from a query tree.
///
/// Boosts multiply down the tree, `MustNot` branches contribute nothing and a
/// term reached more than once keeps its highest weight. At most `max_terms`
/// distinct terms are collected.
#[derive(Debug, Clone, Copy)]
pub struct QueryFlattener {
    max_terms: usize,
}

impl Default for QueryFlattener {
    fn default() -> Self {
        Self { max_terms: 100 }
    }
}

impl QueryFlattener {
    pub fn new(max_terms: usize) -> Self {
        Self { max_terms }
    }

    pub fn flatten(&self, query: &QueryNode) -> HashMap<String, f32> {
        let mut weights = HashMap::new();
        self.visit(query, 1.0, &mut weights);
        weights
    }

    fn visit(&self, node: &QueryNode, boost: f32, weights: &mut HashMap<String, f32>) {
        match node {
            QueryNode::Term { term, boost: b } => self.add(term, boost * b, weights),
            QueryNode::Phrase { terms, boost: b } => {
                for term in terms {
                    self.add(term, boost * b, weights);
                }
            }
            QueryNode::Boolean { clauses } => {
                for clause in clauses.iter().filter(|c| c.occur != Occur::MustNot) {
                    self.visit(&clause.query, boost, weights);
                }
            }
            QueryNode::DisjunctionMax { queries } => {
                for query in queries {
                    self.visit(query, boost, weights);
                }
            }
            QueryNode::Boost { query, boost: b } => self.visit(query, boost * b, weights),
            QueryNode::MatchAll => {}
        }
    }

    fn add(&self, term: &str, weight: f32, weights: &mut HashMap<String, f32>) {
        let weight = weight.max(0.0);
        if let Some(existing) = weights.get_mut(term) {
            *existing = existing.max(weight);
        } else if weights.len() < self.max_terms {
            weights.insert(term.to_string(), weight);
        } else {
            debug!(term, max_terms = self.max_terms, "term limit reached, ignoring term");
        }
    }
}

/// Term weights looked up from a flattened query. Unknown terms weigh zero.
#[derive(Debug, Clone, Default)]
pub struct BasicQueryWeigher {
    weights: HashMap<String, f32>,
}

impl BasicQueryWeigher {
    pub fn new(flattener: &QueryFlattener, query: &QueryNode) -> Self {
        Self { weights: flattener.flatten(query) }
    }

    pub fn from_weights(weights: HashMap<String, f32>) -> Self {
        Self { weights }
    }

    pub fn terms(&self) -> impl Iterator<Item = (&str, f32)> {
        self.weights.iter().map(|(t, w)| (t.as_str(), *w))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl QueryWeigher for BasicQueryWeigher {
    fn weight(&self, term: &str) -> f32 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boosts_multiply_and_must_not_is_skipped() {
        let query = QueryNode::boolean(vec![
            QueryNode::term("fox").boosted(2.0).clause(Occur::Must),
            QueryNode::phrase(["quick", "brown"]).clause(Occur::Should),
            QueryNode::term("dog").clause(Occur::MustNot),
        ])
        .boosted(1.5);
        let weigher = BasicQueryWeigher::new(&QueryFlattener::default(), &query);
        assert_eq!(weigher.weight("fox"), 3.0);
        assert_eq!(weigher.weight("quick"), 1.5);
        assert_eq!(weigher.weight("brown"), 1.5);
        assert_eq!(weigher.weight("dog"), 0.0);
        assert_eq!(weigher.len(), 3);
    }

    #[test]
    fn repeated_terms_keep_the_highest_weight() {
        let query = QueryNode::dis_max(vec![QueryNode::term("run"), QueryNode::term("run").boosted(4.0), QueryNode::MatchAll]);
        assert_eq!(BasicQueryWeigher::new(&QueryFlattener::default(), &query).weight("run"), 4.0);
    }

    #[test]
    fn negative_boosts_clamp_to_zero() {
        let weigher = BasicQueryWeigher::new(&QueryFlattener::default(), &QueryNode::term("x").boosted(-1.0));
        assert_eq!(weigher.weight("x"), 0.0);
    }

    #[test]
    fn term_limit_caps_distinct_terms() {
        let query = QueryNode::phrase(["a", "b", "c", "d"]);
        assert_eq!(BasicQueryWeigher::new(&QueryFlattener::new(2), &query).len(), 2);
    }
}
