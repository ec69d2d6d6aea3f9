use tantivy::schema::{IndexRecordOption, Schema, TextFieldIndexing, TextOptions};
use tantivy::tokenizer::{Language, LowerCaser, SimpleTokenizer, Stemmer, StopWordFilter, TextAnalyzer, TokenizerManager};

pub const TEXT_FIELD: &str = "text";
pub const STEMMED_FIELD: &str = "text.stemmed";

pub const STOP_WORDS: &[&str] = &[
	"a","an","and","are","as","at","be","by","for","from","has","he","in","is","it","its","of","on","that","the","to","was","will","with","or","but","not","this","these","they","them","their","there","then","than","so","if","when","where","why","how","what","which","who","whom","whose","can","could","should","would","may","might","must","shall","do","does","did","have","had","having",
];

fn text_options(tokenizer: &str) -> TextOptions {
	let indexing = TextFieldIndexing::default().set_tokenizer(tokenizer).set_index_option(IndexRecordOption::WithFreqsAndPositions);
	TextOptions::default().set_indexing_options(indexing).set_stored()
}

/// The same text analyzed twice: plain words, and stemmed words.
pub fn build_schema() -> Schema {
	let mut schema_builder = Schema::builder();
	let _text_field = schema_builder.add_text_field(TEXT_FIELD, text_options("text_with_stopwords"));
	let _stemmed_field = schema_builder.add_text_field(STEMMED_FIELD, text_options("text_stemmed"));
	schema_builder.build()
}

fn stop_words() -> StopWordFilter {
	StopWordFilter::remove(STOP_WORDS.iter().map(|s| s.to_string()))
}

pub fn register_tokenizer(tokenizers: &TokenizerManager) {
	let plain = TextAnalyzer::builder(SimpleTokenizer::default())
		.filter(LowerCaser)
		.filter(stop_words())
		.build();
	tokenizers.register("text_with_stopwords", plain);
	let stemmed = TextAnalyzer::builder(SimpleTokenizer::default())
		.filter(LowerCaser)
		.filter(stop_words())
		.filter(Stemmer::new(Language::English))
		.build();
	tokenizers.register("text_stemmed", stemmed);
}
