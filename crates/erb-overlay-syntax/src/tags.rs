//! ERB tag geometry and role classification.
//!
//! An `ERB_TAG` token is a single opaque slice of text. This module extracts
//! the local facts the parser and the projection engine need from it: how
//! wide the delimiters are, where the embedded code sits, and which grammar
//! role the tag plays (plain statement, output, comment, construct opener,
//! chain member, terminator).

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Tag names that never take a close tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Returns true for HTML void elements (case-insensitive).
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|v| v.eq_ignore_ascii_case(name))
}

/// The grammar role a single ERB tag plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagRole {
    /// `<%= expr %>`
    Output,
    /// `<%# text %>`
    Comment,
    /// Any execution tag with no structural keyword
    Plain,
    /// `<% yield %>`
    Yield,
    /// `<% if … %>` or `<% unless … %>`
    If,
    /// `<% elsif … %>`
    Elsif,
    /// `<% else %>`
    Else,
    /// `<% case … %>`
    Case,
    /// `<% when … %>` or `<% in … %>`
    When,
    /// `<% for … %>`, `<% while … %>`, `<% until … %>`
    Loop,
    /// `<% begin %>`
    Begin,
    /// `<% rescue … %>`
    Rescue,
    /// `<% ensure %>`
    Ensure,
    /// `<% end %>`
    End,
    /// Code ending in `do` or `do |…|`
    BlockOpener,
}

impl TagRole {
    /// Chain members continue an enclosing construct.
    pub fn is_chain(self) -> bool {
        matches!(
            self,
            TagRole::Elsif | TagRole::Else | TagRole::When | TagRole::Rescue | TagRole::Ensure
        )
    }

    /// Chain members and terminators both belong to an enclosing construct.
    pub fn is_chain_or_end(self) -> bool {
        self.is_chain() || self == TagRole::End
    }
}

/// Delimiter widths of an ERB tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagShape {
    /// Bytes taken by the opener: `<%` plus an optional `=`, `#`, or `-`.
    pub open_len: usize,
    /// Bytes taken by the closer: `%>` or `-%>`.
    pub close_len: usize,
}

/// Measures the delimiters of a complete ERB tag slice.
pub fn shape(text: &str) -> TagShape {
    let bytes = text.as_bytes();
    let open_len = match bytes.get(2) {
        Some(b'=') | Some(b'#') | Some(b'-') => 3,
        _ => 2,
    };
    let close_len = if text.ends_with("-%>") { 3 } else { 2 };
    TagShape {
        open_len,
        close_len,
    }
}

/// Byte range of the embedded code within a tag slice, relative to the tag.
///
/// Includes the surrounding padding whitespace; empty for degenerate tags
/// like `<%%>`.
pub fn code_range(text: &str) -> Range<usize> {
    let TagShape {
        open_len,
        close_len,
    } = shape(text);
    let end = text.len().saturating_sub(close_len);
    if end < open_len {
        open_len..open_len
    } else {
        open_len..end
    }
}

static BLOCK_OPENER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bdo(\s*\|[^|]*\|)?\s*\z").expect("block opener pattern"));

/// Classifies a complete ERB tag slice by its flavor byte and first keyword.
pub fn classify(text: &str) -> TagRole {
    match text.as_bytes().get(2) {
        Some(b'=') => return TagRole::Output,
        Some(b'#') => return TagRole::Comment,
        _ => {}
    }
    let code = text[code_range(text)].trim();
    match code.split_whitespace().next().unwrap_or("") {
        "if" | "unless" => TagRole::If,
        "elsif" => TagRole::Elsif,
        "else" => TagRole::Else,
        "case" => TagRole::Case,
        "when" | "in" => TagRole::When,
        "for" | "while" | "until" => TagRole::Loop,
        "begin" => TagRole::Begin,
        "rescue" => TagRole::Rescue,
        "ensure" => TagRole::Ensure,
        "end" => TagRole::End,
        "yield" => TagRole::Yield,
        _ if BLOCK_OPENER.is_match(code) => TagRole::BlockOpener,
        _ => TagRole::Plain,
    }
}
