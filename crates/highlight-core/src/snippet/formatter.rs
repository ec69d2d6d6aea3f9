use crate::source::SourceExtracter;
use crate::types::{Fragment, Snippet};

/// Marks up a snippet's hits with pre/post tags.
///
/// Text is pulled through the extracter piece by piece, between and inside
/// the marked spans, so inserted tags never shift source offsets. Hits are
/// clamped to the fragment and overlapping hits share one marked span.
pub struct SnippetFormatter<E> {
    extracter: E,
    pre_tag: String,
    post_tag: String,
}

impl<E: SourceExtracter> SnippetFormatter<E> {
    pub fn new(extracter: E, pre_tag: impl Into<String>, post_tag: impl Into<String>) -> Self {
        Self { extracter, pre_tag: pre_tag.into(), post_tag: post_tag.into() }
    }

    pub fn format(&self, snippet: &Snippet) -> String {
        let Fragment { start, end } = snippet.fragment;
        let mut spans: Vec<(usize, usize)> = snippet
            .hits
            .iter()
            .map(|h| (h.start_offset.max(start), h.end_offset.min(end)))
            .filter(|(s, e)| s < e)
            .collect();
        spans.sort_unstable();

        let mut out = String::with_capacity(end.saturating_sub(start) + spans.len() * (self.pre_tag.len() + self.post_tag.len()));
        let mut last = start;
        let mut spans = spans.into_iter().peekable();
        while let Some((span_start, mut span_end)) = spans.next() {
            while let Some((_, next_end)) = spans.next_if(|&(s, _)| s < span_end) {
                span_end = span_end.max(next_end);
            }
            let marked = self.extracter.extract(span_start, span_end);
            if marked.is_empty() {
                continue;
            }
            out.push_str(&self.extracter.extract(last, span_start));
            out.push_str(&self.pre_tag);
            out.push_str(&marked);
            out.push_str(&self.post_tag);
            last = span_end;
        }
        out.push_str(&self.extracter.extract(last, end));
        out
    }
}
