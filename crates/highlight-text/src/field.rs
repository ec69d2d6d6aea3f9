use anyhow::{bail, Context, Result};
use tantivy::schema::{FieldType, Schema};
use tantivy::tokenizer::{TextAnalyzer, TokenStream, TokenizerManager};
use tracing::trace;

use highlight_core::hit::{BoxedHitEnum, HitEnumExt};
use highlight_core::traits::{FieldLoader, FieldSource, QueryWeigher};
use highlight_core::types::Hit;

use crate::tantivy_utils::{build_schema, register_tokenizer};

/// A schema plus the analyzers its text fields name.
pub struct Analysis {
	schema: Schema,
	tokenizers: TokenizerManager,
}

impl Default for Analysis {
	fn default() -> Self {
		Self::new(build_schema())
	}
}

impl Analysis {
	/// Uses tantivy's default analyzers plus `text_with_stopwords` and `text_stemmed`.
	pub fn new(schema: Schema) -> Self {
		let tokenizers = TokenizerManager::default();
		register_tokenizer(&tokenizers);
		Self { schema, tokenizers }
	}

	pub fn with_tokenizers(schema: Schema, tokenizers: TokenizerManager) -> Self {
		Self { schema, tokenizers }
	}

	pub fn schema(&self) -> &Schema {
		&self.schema
	}

	pub fn analyzer(&self, field: &str) -> Result<TextAnalyzer> {
		let handle = self.schema.get_field(field)?;
		let FieldType::Str(options) = self.schema.get_field_entry(handle).field_type() else {
			bail!("field [{field}] is not a text field");
		};
		let indexing = options.get_indexing_options().with_context(|| format!("field [{field}] is not indexed"))?;
		self.tokenizers.get(indexing.tokenizer()).with_context(|| format!("no analyzer registered as [{}]", indexing.tokenizer()))
	}

	/// Analyzed terms of `text` as `field` would index them.
	pub fn terms(&self, field: &str, text: &str) -> Result<Vec<String>> {
		let mut analyzer = self.analyzer(field)?;
		let mut stream = analyzer.token_stream(text);
		let mut terms = Vec::new();
		while stream.advance() {
			terms.push(stream.token().text.clone());
		}
		Ok(terms)
	}

	pub fn field<'t>(&self, name: &str, text: Option<&'t str>) -> Result<AnalyzedField<'t>> {
		Ok(AnalyzedField { name: name.to_string(), text, analyzer: self.analyzer(name)? })
	}
}

/// One document field: its value and the analyzer it is tokenized with.
pub struct AnalyzedField<'t> {
	name: String,
	text: Option<&'t str>,
	analyzer: TextAnalyzer,
}

impl FieldSource for AnalyzedField<'_> {
	fn name(&self) -> &str {
		&self.name
	}

	fn text(&self) -> Option<&str> {
		self.text
	}

	fn hits<'s>(&'s self, weigher: &'s dyn QueryWeigher) -> Result<BoxedHitEnum<'s>> {
		let Some(text) = self.text else {
			return Ok(std::iter::empty::<Hit>().boxed());
		};
		let mut analyzer = self.analyzer.clone();
		let mut stream = analyzer.token_stream(text);
		let mut hits = Vec::new();
		let mut tokens = 0usize;
		while stream.advance() {
			tokens += 1;
			let token = stream.token();
			let weight = weigher.weight(&token.text);
			if weight > 0.0 && token.offset_from < token.offset_to {
				hits.push(Hit::new(token.offset_from, token.offset_to, weight).with_term(token.text.as_str()));
			}
		}
		trace!(field = %self.name, tokens, hits = hits.len(), "analyzed field");
		Ok(hits.into_iter().boxed())
	}
}

/// Opens the other analyzed fields of one document. All of them share its text.
pub struct AnalyzedFieldLoader<'t> {
	analysis: &'t Analysis,
	text: &'t str,
}

impl<'t> AnalyzedFieldLoader<'t> {
	pub fn new(analysis: &'t Analysis, text: &'t str) -> Self {
		Self { analysis, text }
	}
}

impl FieldLoader for AnalyzedFieldLoader<'_> {
	fn load(&self, field: &str) -> Result<Box<dyn FieldSource + '_>> {
		Ok(Box::new(self.analysis.field(field, Some(self.text))?))
	}
}
