/// Configuration options for categorizing and rendering a changelog
#[derive(Debug, Clone)]
pub struct ChangelogConfig {
    /// Drop blocks that have a heading but no items from the grouped text
    pub skip_empty_categories: bool,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            skip_empty_categories: true,
        }
    }
}
