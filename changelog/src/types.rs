/// A heading-delimited group of bullet items, in source order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryBlock {
    pub name: String,
    pub items: Vec<String>,
}

impl CategoryBlock {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items = items.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
