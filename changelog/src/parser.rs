use crate::types::CategoryBlock;
use crate::utils::{CATEGORY_HEADING_PATTERN, CONTINUATION_PATTERN, LIST_ITEM_PATTERN};

#[derive(Debug, Default)]
struct ParserState {
    blocks: Vec<CategoryBlock>,
    /// Whether the last item may still take continuation lines
    item_open: bool,
}

/// Splits a changelog into heading-delimited category blocks.
///
/// An indented, non-blank line that is not itself a bullet continues the
/// preceding item. A blank line or an unindented line closes the item.
#[derive(Debug, Clone, Default)]
pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Self
    }

    /// Returns the blocks in source order, or an empty vector when the text
    /// has no category headings.
    #[must_use]
    pub fn parse(&self, content: &str) -> Vec<CategoryBlock> {
        let mut state = ParserState::default();

        for line in content.lines() {
            self.parse_line(line, &mut state);
        }

        state.blocks
    }

    fn parse_line(&self, line: &str, state: &mut ParserState) {
        if let Some(captures) = CATEGORY_HEADING_PATTERN.captures(line) {
            self.handle_heading(captures, state);
        } else if state.blocks.is_empty() {
            // Preamble before the first heading
        } else if let Some(captures) = LIST_ITEM_PATTERN.captures(line) {
            self.handle_item_line(captures, state);
        } else if let Some(captures) = CONTINUATION_PATTERN.captures(line) {
            self.handle_continuation(captures, state);
        } else {
            state.item_open = false;
        }
    }

    fn handle_heading(&self, captures: regex::Captures, state: &mut ParserState) {
        if let Some(name) = captures.get(1) {
            state.blocks.push(CategoryBlock::new(name.as_str().trim()));
            state.item_open = false;
        }
    }

    fn handle_item_line(&self, captures: regex::Captures, state: &mut ParserState) {
        if let (Some(block), Some(item)) = (state.blocks.last_mut(), captures.get(1)) {
            block.items.push(item.as_str().trim().to_string());
            state.item_open = true;
        }
    }

    fn handle_continuation(&self, captures: regex::Captures, state: &mut ParserState) {
        if !state.item_open {
            return;
        }

        let last_item = state
            .blocks
            .last_mut()
            .and_then(|block| block.items.last_mut());

        if let (Some(item), Some(text)) = (last_item, captures.get(1)) {
            item.push(' ');
            item.push_str(text.as_str().trim());
        }
    }
}
