use once_cell::sync::Lazy;
use regex::Regex;

// Line patterns used by the categorizer. Applied to one line at a time.

pub static CATEGORY_HEADING_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#{2,6}[ \t]+(.*?\S)(?:[ \t]+#+)?[ \t]*$").expect("Failed to compile category heading regex")
});

pub static LIST_ITEM_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[ \t]*(?:[-*+]|\d+\.)[ \t]+(.*?\S)\s*$").expect("Failed to compile list item regex")
});

pub static CONTINUATION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]+(\S.*?)\s*$").expect("Failed to compile continuation regex"));

// Text patterns used by the dialect converter. Applied to the whole body.

pub static INLINE_CODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`[^`\n]+`").expect("Failed to compile inline code regex"));

pub static HEADING_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?mR)^#{1,6}[ \t]+([^\n]*?\S)(?:[ \t]+#+)?[ \t]*$").expect("Failed to compile heading regex")
});

pub static LINK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([^\]\n]+)\]\(((?:[^()\s]|\([^()\s]*\))+)\)").expect("Failed to compile link regex")
});

pub static LIST_MARKER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?mR)^([ \t]*)(?:[-*+]|\d+\.)[ \t]+").expect("Failed to compile list marker regex")
});

pub static BOLD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^\n]+?)\*\*").expect("Failed to compile bold regex"));

pub static STRIKETHROUGH_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"~~([^\n]+?)~~").expect("Failed to compile strikethrough regex"));

pub static UNDERSCORE_ITALIC_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__([^\n]+?)__").expect("Failed to compile italic regex"));

pub static ASTERISK_ITALIC_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*([^*\s](?:[^*\n]*[^*\s])?)\*").expect("Failed to compile italic regex")
});
