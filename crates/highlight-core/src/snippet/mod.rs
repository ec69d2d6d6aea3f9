//! Choosing and marking up snippets.

mod chooser;
mod formatter;

pub use chooser::{ScoreOrderSnippetChooser, SnippetChooser, SourceOrderSnippetChooser};
pub use formatter::SnippetFormatter;
