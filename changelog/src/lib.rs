//! Changelog categorization and chat-markup conversion.
//!
//! All functions here are pure: they take the changelog text and return new
//! owned values without touching files, the network or the environment.

pub mod config;
pub mod formatter;
pub mod markdown;
pub mod parser;
pub mod types;
mod utils;

pub use config::ChangelogConfig;
pub use formatter::{GroupedTextFormatter, SectionFormatter};
pub use markdown::{MarkdownConverter, MarkedText, SlackConverter, Span, Stage};
pub use parser::Parser;
pub use types::CategoryBlock;

/// Splits a changelog into its heading-delimited category blocks
#[must_use]
pub fn categorize(content: &str) -> Vec<CategoryBlock> {
    Parser::new().parse(content)
}

/// Renders category blocks as grouped text (`**Name**:` followed by `- item` lines)
#[must_use]
pub fn render_categories(blocks: &[CategoryBlock], config: &ChangelogConfig) -> String {
    GroupedTextFormatter::new(config).format(blocks)
}

/// Categorizes and renders in one step.
///
/// Returns `None` when the changelog has no category headings, or when
/// nothing is left after rendering, so callers can fall back to the raw text.
#[must_use]
pub fn group_changes(content: &str, config: &ChangelogConfig) -> Option<String> {
    let blocks = categorize(content);
    if blocks.is_empty() {
        return None;
    }

    let rendered = render_categories(&blocks, config);
    (!rendered.is_empty()).then_some(rendered)
}

/// Converts Markdown into Slack chat markup
#[must_use]
pub fn convert(markdown: &str) -> String {
    SlackConverter::new().convert(markdown)
}
