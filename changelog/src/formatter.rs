use crate::config::ChangelogConfig;
use crate::types::CategoryBlock;

pub trait SectionFormatter: Send + Sync {
    fn format(&self, blocks: &[CategoryBlock]) -> String;
}

/// Renders blocks as flat grouped text:
///
/// ```text
/// **Added**:
/// - first item
/// - second item
///
/// **Fixed**:
/// - a bug
/// ```
#[derive(Debug, Clone)]
pub struct GroupedTextFormatter {
    skip_empty: bool,
}

impl GroupedTextFormatter {
    pub fn new(config: &ChangelogConfig) -> Self {
        Self {
            skip_empty: config.skip_empty_categories,
        }
    }

    fn format_block(block: &CategoryBlock) -> String {
        let mut formatted = String::with_capacity(64 + block.items.len() * 32);
        formatted.push_str("**");
        formatted.push_str(&block.name);
        formatted.push_str("**:");
        for item in &block.items {
            formatted.push_str("\n- ");
            formatted.push_str(item);
        }
        formatted
    }
}

impl Default for GroupedTextFormatter {
    fn default() -> Self {
        Self::new(&ChangelogConfig::default())
    }
}

impl SectionFormatter for GroupedTextFormatter {
    fn format(&self, blocks: &[CategoryBlock]) -> String {
        blocks
            .iter()
            .filter(|block| !(self.skip_empty && block.is_empty()))
            .map(Self::format_block)
            .collect::<Vec<_>>()
            .join("\n\n")
            .trim()
            .to_string()
    }
}
