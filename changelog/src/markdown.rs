//! Markdown to chat-markup conversion.
//!
//! The conversion is an ordered pipeline of [`Stage`]s over a [`MarkedText`].
//! Every byte of a `MarkedText` is either raw or frozen. A stage rewrites a
//! match only when the delimiters it replaces are all raw, and everything a
//! stage emits in place of a delimiter is frozen. Captured inner text keeps
//! its marking, so nested constructs still convert while output produced by
//! an earlier stage is never matched again.

use std::ops::Range;

use regex::{Captures, Regex};

use crate::utils::{
    ASTERISK_ITALIC_PATTERN, BOLD_PATTERN, HEADING_PATTERN, INLINE_CODE_PATTERN, LINK_PATTERN,
    LIST_MARKER_PATTERN, STRIKETHROUGH_PATTERN, UNDERSCORE_ITALIC_PATTERN,
};

/// Trait for converting Markdown input into a chat-specific format.
pub trait MarkdownConverter: Send + Sync {
    fn convert(&self, markdown: &str) -> String;
}

/// A contiguous run of bytes that share the same marking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    pub text: &'a str,
    pub frozen: bool,
}

/// Text with a raw/frozen marker per byte
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarkedText {
    text: String,
    frozen: Vec<bool>,
}

impl MarkedText {
    /// Wraps source text, all of it raw
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            frozen: vec![false; text.len()],
        }
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
            frozen: Vec::with_capacity(capacity),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }

    /// Splits the text into maximal runs of equal marking
    #[must_use]
    pub fn spans(&self) -> Vec<Span<'_>> {
        let mut spans = Vec::new();
        let mut start = 0;

        for idx in 1..=self.text.len() {
            if idx == self.text.len() || self.frozen[idx] != self.frozen[start] {
                spans.push(Span {
                    text: &self.text[start..idx],
                    frozen: self.frozen[start],
                });
                start = idx;
            }
        }

        spans
    }

    fn is_frozen(&self, idx: usize) -> bool {
        self.frozen.get(idx).copied().unwrap_or(false)
    }

    fn push_frozen(&mut self, literal: &str) {
        self.text.push_str(literal);
        self.frozen.extend(std::iter::repeat_n(true, literal.len()));
    }

    fn push_slice(&mut self, source: &MarkedText, range: Range<usize>) {
        self.text.push_str(&source.text[range.clone()]);
        self.frozen.extend_from_slice(&source.frozen[range]);
    }
}

/// Replacement piece emitted by a stage for one match
enum Piece {
    /// Literal output, frozen against later stages
    Frozen(String),
    /// Copy of a capture group with its marking preserved
    Keep(usize),
}

/// One named rewrite pass of the conversion pipeline.
///
/// Variants are listed in pipeline order; see [`Stage::PIPELINE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// `` `code` `` kept verbatim. Runs first so nothing inside code is rewritten.
    InlineCode,
    /// `## text` line to `*_text_*`. Must run before every emphasis stage.
    Heading,
    /// `[label](url)` to `<url|label>`. Must run before emphasis so the URL is frozen.
    Link,
    /// `-`, `*`, `+` or `N.` marker to `- `. Must run before `AsteriskItalic`.
    ListItem,
    /// `**text**` to `*text*`. Must run before both italic stages.
    Bold,
    /// `~~text~~` to `~text~`.
    Strikethrough,
    /// `__text__` to `_text_`.
    UnderscoreItalic,
    /// `*text*` to `_text_`. Runs last, after bold delimiters are frozen.
    AsteriskItalic,
}

impl Stage {
    pub const PIPELINE: [Stage; 8] = [
        Stage::InlineCode,
        Stage::Heading,
        Stage::Link,
        Stage::ListItem,
        Stage::Bold,
        Stage::Strikethrough,
        Stage::UnderscoreItalic,
        Stage::AsteriskItalic,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::InlineCode => "inline-code",
            Self::Heading => "heading",
            Self::Link => "link",
            Self::ListItem => "list-item",
            Self::Bold => "bold",
            Self::Strikethrough => "strikethrough",
            Self::UnderscoreItalic => "underscore-italic",
            Self::AsteriskItalic => "asterisk-italic",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Self::InlineCode => &INLINE_CODE_PATTERN,
            Self::Heading => &HEADING_PATTERN,
            Self::Link => &LINK_PATTERN,
            Self::ListItem => &LIST_MARKER_PATTERN,
            Self::Bold => &BOLD_PATTERN,
            Self::Strikethrough => &STRIKETHROUGH_PATTERN,
            Self::UnderscoreItalic => &UNDERSCORE_ITALIC_PATTERN,
            Self::AsteriskItalic => &ASTERISK_ITALIC_PATTERN,
        }
    }

    fn rewrite(self, caps: &Captures) -> Vec<Piece> {
        match self {
            Self::InlineCode => vec![Piece::Frozen(caps[0].to_string())],
            Self::Heading => wrap(1, "*_", "_*"),
            Self::Link => vec![
                Piece::Frozen(format!("<{}|", &caps[2])),
                Piece::Keep(1),
                Piece::Frozen(">".to_string()),
            ],
            Self::ListItem => vec![Piece::Keep(1), Piece::Frozen("- ".to_string())],
            Self::Bold => wrap(1, "*", "*"),
            Self::Strikethrough => wrap(1, "~", "~"),
            Self::UnderscoreItalic | Self::AsteriskItalic => wrap(1, "_", "_"),
        }
    }

    /// Runs this stage as a single global pass over `input`
    #[must_use]
    pub fn apply(self, input: &MarkedText) -> MarkedText {
        let text = input.as_str();
        let pattern = self.pattern();
        let mut output = MarkedText::with_capacity(text.len());
        let mut copied_until = 0;
        let mut search_from = 0;

        while search_from <= text.len() {
            let Some(caps) = pattern.captures_at(text, search_from) else {
                break;
            };
            let Some(whole) = caps.get(0) else {
                break;
            };

            let pieces = self.rewrite(&caps);
            let kept: Vec<Range<usize>> = pieces
                .iter()
                .filter_map(|piece| match piece {
                    Piece::Keep(group) => caps.get(*group).map(|m| m.range()),
                    Piece::Frozen(_) => None,
                })
                .collect();

            if whole.is_empty() || !delimiters_are_raw(input, whole.range(), &kept) {
                // Rejected: retry from the next character so overlapping
                // candidates are still found.
                search_from = next_char_boundary(text, whole.start());
                continue;
            }

            output.push_slice(input, copied_until..whole.start());
            for piece in pieces {
                match piece {
                    Piece::Frozen(literal) => output.push_frozen(&literal),
                    Piece::Keep(group) => {
                        if let Some(m) = caps.get(group) {
                            output.push_slice(input, m.range());
                        }
                    }
                }
            }
            copied_until = whole.end();
            search_from = whole.end();
        }

        output.push_slice(input, copied_until..text.len());
        output
    }
}

fn wrap(group: usize, open: &str, close: &str) -> Vec<Piece> {
    vec![
        Piece::Frozen(open.to_string()),
        Piece::Keep(group),
        Piece::Frozen(close.to_string()),
    ]
}

fn delimiters_are_raw(input: &MarkedText, whole: Range<usize>, kept: &[Range<usize>]) -> bool {
    whole
        .filter(|idx| !kept.iter().any(|range| range.contains(idx)))
        .all(|idx| !input.is_frozen(idx))
}

fn next_char_boundary(text: &str, from: usize) -> usize {
    text[from..]
        .chars()
        .next()
        .map_or(text.len() + 1, |c| from + c.len_utf8())
}

/// Converter for the Slack `mrkdwn` dialect
#[derive(Debug, Clone)]
pub struct SlackConverter {
    stages: Vec<Stage>,
}

impl SlackConverter {
    pub fn new() -> Self {
        Self {
            stages: Stage::PIPELINE.to_vec(),
        }
    }

    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Runs the pipeline and returns the marked result
    #[must_use]
    pub fn convert_marked(&self, markdown: &str) -> MarkedText {
        self.stages
            .iter()
            .fold(MarkedText::new(markdown), |text, stage| stage.apply(&text))
    }
}

impl Default for SlackConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownConverter for SlackConverter {
    fn convert(&self, markdown: &str) -> String {
        self.convert_marked(markdown).into_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(input: &str) -> String {
        SlackConverter::new().convert(input)
    }

    #[test]
    fn test_converter_is_object_safe() {
        fn accepts(_: &dyn MarkdownConverter) {}
        accepts(&SlackConverter::default());
    }

    #[test]
    fn test_pipeline_order() {
        let stages = SlackConverter::new().stages().to_vec();
        let position = |stage: Stage| stages.iter().position(|s| *s == stage).unwrap();

        assert_eq!(position(Stage::InlineCode), 0);
        assert!(position(Stage::Heading) < position(Stage::Bold));
        assert!(position(Stage::Heading) < position(Stage::AsteriskItalic));
        assert!(position(Stage::Link) < position(Stage::Bold));
        assert!(position(Stage::ListItem) < position(Stage::AsteriskItalic));
        assert!(position(Stage::Bold) < position(Stage::UnderscoreItalic));
        assert!(position(Stage::Bold) < position(Stage::AsteriskItalic));
    }

    #[test]
    fn test_emphasis() {
        assert_eq!(
            convert("**bold** and __old-italic__ and *new-italic*"),
            "*bold* and _old-italic_ and _new-italic_"
        );
        assert_eq!(convert("~~gone~~"), "~gone~");
    }

    #[test]
    fn test_heading_is_not_reconverted() {
        assert_eq!(convert("## Added\n- Thing"), "*_Added_*\n- Thing");
        assert_eq!(convert("# Release v1.2"), "*_Release v1.2_*");
        assert_eq!(convert("### Fixed ###"), "*_Fixed_*");
    }

    #[test]
    fn test_heading_ending_in_hash() {
        assert_eq!(convert("## What's new in C#"), "*_What's new in C#_*");
        assert_eq!(convert("### Deep ###\n- x"), "*_Deep_*\n- x");
    }

    #[test]
    fn test_heading_keeps_inline_markup_converted() {
        assert_eq!(convert("## **Big** news"), "*_*Big* news_*");
    }

    #[test]
    fn test_link() {
        assert_eq!(
            convert("[see here](https://x.test/y)"),
            "<https://x.test/y|see here>"
        );
    }

    #[test]
    fn test_link_url_is_protected_from_emphasis() {
        assert_eq!(
            convert("[docs](https://x.test/__init__/a*b*c)"),
            "<https://x.test/__init__/a*b*c|docs>"
        );
    }

    #[test]
    fn test_link_url_with_parentheses() {
        assert_eq!(
            convert("[Foo](https://en.wikipedia.org/wiki/Foo_(bar)) page"),
            "<https://en.wikipedia.org/wiki/Foo_(bar)|Foo> page"
        );
        assert_eq!(convert("([x](https://x.test))"), "(<https://x.test|x>)");
    }

    #[test]
    fn test_nested_link_and_bold() {
        assert_eq!(
            convert("**see [docs](https://x.test)**"),
            "*see <https://x.test|docs>*"
        );
        assert_eq!(
            convert("[**loud**](https://x.test)"),
            "<https://x.test|*loud*>"
        );
    }

    #[test]
    fn test_inline_code_is_untouched() {
        assert_eq!(
            convert("use `**kwargs` and `__init__`"),
            "use `**kwargs` and `__init__`"
        );
        assert_eq!(convert("`[a](b)`"), "`[a](b)`");
    }

    #[test]
    fn test_list_items_are_normalized() {
        assert_eq!(
            convert("1. first\n2. second\n* third\n  + nested"),
            "- first\n- second\n- third\n  - nested"
        );
    }

    #[test]
    fn test_star_bullet_with_italic() {
        assert_eq!(convert("* an *important* fix"), "- an _important_ fix");
    }

    #[test]
    fn test_unterminated_markup_passes_through() {
        assert_eq!(convert("**never closed"), "**never closed");
        assert_eq!(convert("~~half"), "~~half");
        assert_eq!(convert("[label](no closing"), "[label](no closing");
        assert_eq!(convert("2 * 3 * 4"), "2 * 3 * 4");
    }

    #[test]
    fn test_passthrough_is_identity() {
        let plain = "Nothing to see here.\nJust text, numbers 1 2 3 and snake_case names.";
        assert_eq!(convert(plain), plain);
        assert_eq!(convert(""), "");
    }

    #[test]
    fn test_crlf_headings() {
        assert_eq!(convert("## Added\r\n- Thing\r\n"), "*_Added_*\r\n- Thing\r\n");
    }

    #[test]
    fn test_spans_mark_converted_delimiters() {
        let marked = SlackConverter::new().convert_marked("**a** b");
        let spans = marked.spans();

        assert_eq!(
            spans,
            vec![
                Span { text: "*", frozen: true },
                Span { text: "a", frozen: false },
                Span { text: "*", frozen: true },
                Span { text: " b", frozen: false },
            ]
        );
    }

    #[test]
    fn test_single_stage_apply() {
        let input = MarkedText::new("[x](u) and [y](v)");
        let output = Stage::Link.apply(&input);
        assert_eq!(output.as_str(), "<u|x> and <v|y>");

        // A second pass finds nothing left to rewrite.
        assert_eq!(Stage::Link.apply(&output), output);
    }

    #[test]
    fn test_multibyte_text() {
        assert_eq!(convert("héllo *wörld* ✨"), "héllo _wörld_ ✨");
    }
}
