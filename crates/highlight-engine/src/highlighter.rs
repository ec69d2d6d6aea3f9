use serde::Serialize;
use tracing::{debug, debug_span, warn};

use highlight_core::error::{Error, Result};
use highlight_core::hit::{BoxedHitEnum, HitEnumExt, MergingHitEnum};
use highlight_core::segment::SegmenterFactory;
use highlight_core::snippet::{ScoreOrderSnippetChooser, SnippetChooser, SnippetFormatter, SourceOrderSnippetChooser};
use highlight_core::source::StrSourceExtracter;
use highlight_core::traits::{FieldLoader, FieldSource, QueryWeigher};

use crate::context::HighlightContext;
use crate::options::FieldOptions;

/// Marked-up fragments for one field, in the order the chooser returned them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightedField {
    pub field: String,
    pub fragments: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Highlighter;

impl Highlighter {
    /// Highlights `field` with `options`.
    ///
    /// Returns `Ok(None)` when the field has no value, or when nothing matched
    /// and the no-match fallback is disabled. Every field opened for the call
    /// is cleaned up before returning, whether highlighting succeeded or not.
    /// Any failure, cleanup included, comes back as [`Error::Highlight`] naming the field.
    pub fn highlight<'f>(
        &self,
        context: &HighlightContext,
        options: &FieldOptions,
        field: Box<dyn FieldSource + 'f>,
        loader: &'f dyn FieldLoader,
    ) -> Result<Option<HighlightedField>> {
        let name = field.name().to_string();
        let _span = debug_span!("highlight", field = %name).entered();

        let mut execution = Execution { options, default_field: field, extra_fields: Vec::new() };
        let outcome = execution.highlight(context, loader);
        let cleanup = execution.cleanup();
        match (outcome, cleanup) {
            (Ok(highlighted), Ok(())) => Ok(highlighted),
            (Ok(_), Err(e)) => Err(Error::Highlight { field: name, source: e.into() }),
            (Err(source), cleanup) => {
                if let Err(e) = cleanup {
                    warn!(error = %e, "cleanup also failed");
                }
                Err(Error::Highlight { field: name, source })
            }
        }
    }
}

/// One highlight call: the field being highlighted plus any matched fields it opened.
struct Execution<'o, 'f> {
    options: &'o FieldOptions,
    default_field: Box<dyn FieldSource + 'f>,
    extra_fields: Vec<Box<dyn FieldSource + 'f>>,
}

impl<'o, 'f> Execution<'o, 'f> {
    fn highlight(&mut self, context: &HighlightContext, loader: &'f dyn FieldLoader) -> anyhow::Result<Option<HighlightedField>> {
        let factory = self.options.segmenter.build()?;
        if self.default_field.text().is_none() {
            debug!("field has no value");
            return Ok(None);
        }
        let include_default = self.open_matched_fields(loader)?;

        let this = &*self;
        let Some(text) = this.default_field.text() else {
            return Ok(None);
        };
        let snippets = {
            let mut hits = this.build_hit_enum(context.weigher(), include_default)?;
            let mut fragments = factory.segmenter(text);
            this.chooser().choose(&mut fragments, &mut hits, this.options.number_of_fragments)
        };
        debug!(snippets = snippets.len(), "chose snippets");

        if snippets.is_empty() {
            return Ok(this.no_match(text, factory.as_ref()));
        }
        let formatter = SnippetFormatter::new(StrSourceExtracter::new(text), this.options.pre_tag(), this.options.post_tag());
        Ok(Some(HighlightedField {
            field: this.default_field.name().to_string(),
            fragments: snippets.iter().map(|s| formatter.format(s)).collect(),
        }))
    }

    /// Loads the matched fields other than the one being highlighted. Returns
    /// whether the highlighted field's own hits take part.
    fn open_matched_fields(&mut self, loader: &'f dyn FieldLoader) -> anyhow::Result<bool> {
        let options: &'o FieldOptions = self.options;
        let Some(names) = &options.matched_fields else {
            return Ok(true);
        };
        let mut include_default = false;
        for name in names {
            if name == self.default_field.name() {
                include_default = true;
            } else {
                debug!(matched = %name, "opening matched field");
                self.extra_fields.push(loader.load(name)?);
            }
        }
        Ok(include_default)
    }

    /// Hits of every participating field, merged and with overlaps collapsed.
    fn build_hit_enum<'s>(&'s self, weigher: &'s dyn QueryWeigher, include_default: bool) -> anyhow::Result<BoxedHitEnum<'s>> {
        let combiner = self.options.overlap_weight;
        if self.options.matched_fields.is_none() {
            return Ok(self.default_field.hits(weigher)?.merge_overlaps(combiner).boxed());
        }
        let mut sources = Vec::with_capacity(self.extra_fields.len() + 1);
        if include_default {
            sources.push(self.default_field.hits(weigher)?);
        }
        for field in &self.extra_fields {
            sources.push(field.hits(weigher)?);
        }
        Ok(MergingHitEnum::new(sources).merge_overlaps(combiner).boxed())
    }

    fn chooser(&self) -> Box<dyn SnippetChooser> {
        if self.options.score_ordered {
            Box::new(ScoreOrderSnippetChooser::new(self.options.score_combiner))
        } else {
            Box::new(SourceOrderSnippetChooser::new(self.options.score_combiner))
        }
    }

    fn no_match(&self, text: &str, factory: &dyn SegmenterFactory) -> Option<HighlightedField> {
        if self.options.no_match_size == 0 || text.is_empty() {
            return None;
        }
        let fragment = factory.extract_no_match_fragment(text, self.options.no_match_size);
        debug!(len = fragment.len(), "falling back to no-match fragment");
        Some(HighlightedField { field: self.default_field.name().to_string(), fragments: vec![fragment.to_string()] })
    }

    /// Cleans up every opened field. All cleanups run; the last failure is returned.
    fn cleanup(&mut self) -> Result<()> {
        let mut last_failure = None;
        for field in std::iter::once(&mut self.default_field).chain(self.extra_fields.iter_mut()) {
            if let Err(source) = field.cleanup() {
                warn!(field = field.name(), error = %source, "field cleanup failed");
                last_failure = Some(Error::Cleanup { field: field.name().to_string(), source });
            }
        }
        last_failure.map_or(Ok(()), Err)
    }
}
