//! A small query-string syntax: bare words, `"quoted phrases"`, a `^boost`
//! suffix on either, and a leading `-` to exclude.
use anyhow::{Context, Result};
use tracing::debug;

use highlight_core::weight::{Clause, Occur, QueryNode};

use crate::field::Analysis;

#[derive(Debug, PartialEq)]
struct Item {
	text: String,
	phrase: bool,
	exclude: bool,
	boost: f32,
}

fn parse_items(query: &str) -> Result<Vec<Item>> {
	let mut items = Vec::new();
	let mut chars = query.chars().peekable();
	while let Some(&c) = chars.peek() {
		if c.is_whitespace() {
			chars.next();
			continue;
		}
		let exclude = chars.next_if_eq(&'-').is_some();
		let phrase = chars.next_if_eq(&'"').is_some();
		let mut text = String::new();
		while let Some(c) = chars.next_if(|&c| if phrase { c != '"' } else { !c.is_whitespace() && c != '^' }) {
			text.push(c);
		}
		if phrase {
			chars.next_if_eq(&'"');
		}
		let mut boost = 1.0;
		if chars.next_if_eq(&'^').is_some() {
			let mut raw = String::new();
			while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
				raw.push(c);
			}
			boost = raw.parse().with_context(|| format!("invalid boost [{raw}] after [{text}]"))?;
		}
		if !text.trim().is_empty() {
			items.push(Item { text, phrase, exclude, boost });
		}
	}
	Ok(items)
}

/// Builds the query tree for a query string, analyzing every word once per field.
///
/// Each word or phrase becomes a disjunction over the fields' analyzed forms,
/// so `running` over a plain and a stemmed field weighs both `running` and
/// `run`. Words every analyzer drops (stop words) disappear.
pub struct QueryBuilder<'a> {
	analysis: &'a Analysis,
	fields: Vec<String>,
}

impl<'a> QueryBuilder<'a> {
	pub fn new<I, S>(analysis: &'a Analysis, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self { analysis, fields: fields.into_iter().map(Into::into).collect() }
	}

	pub fn build(&self, query: &str) -> Result<QueryNode> {
		let mut clauses = Vec::new();
		for item in parse_items(query)? {
			if let Some(clause) = self.clause(&item)? {
				clauses.push(clause);
			}
		}
		debug!(query, clauses = clauses.len(), "built query");
		Ok(QueryNode::boolean(clauses))
	}

	fn clause(&self, item: &Item) -> Result<Option<Clause>> {
		let mut alternatives: Vec<QueryNode> = Vec::new();
		for field in &self.fields {
			let mut terms = self.analysis.terms(field, &item.text)?;
			let node = match terms.len() {
				0 => continue,
				1 if !item.phrase => QueryNode::term(terms.swap_remove(0)),
				_ => QueryNode::phrase(terms),
			};
			if !alternatives.contains(&node) {
				alternatives.push(node);
			}
		}
		let mut node = match alternatives.len() {
			0 => return Ok(None),
			1 => alternatives.swap_remove(0),
			_ => QueryNode::dis_max(alternatives),
		};
		if item.boost != 1.0 {
			node = node.boosted(item.boost);
		}
		let occur = if item.exclude { Occur::MustNot } else { Occur::Should };
		Ok(Some(node.clause(occur)))
	}
}
