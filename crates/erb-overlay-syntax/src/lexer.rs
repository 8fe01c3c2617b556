//! # Lexer - Tokenizing HTML+ERB Source
//!
//! First stage of parsing: breaking template text into tokens with the
//! [Logos] lexer generator.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## The Lossless Guarantee
//!
//! Every byte of the input appears in exactly one token. Nothing is skipped
//! or discarded, which is what makes byte-exact round-tripping possible:
//!
//! ```
//! use erb_overlay_syntax::lexer::lex;
//!
//! let input = "<div><%= user.name %></div>\n";
//! let tokens = lex(input);
//!
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! ## Token Design
//!
//! HTML-side tokens are minimal and context-free: the lexer does not know
//! whether `<` starts an element or is a stray angle bracket - that's the
//! parser's job. ERB tags are the one exception: `<% … %>` is self-delimiting
//! regardless of surrounding markup, so the whole tag is lexed as a single
//! `ERB_TAG` token and split into delimiters and code later (see
//! [`crate::tags`]). This keeps embedded code opaque to the HTML grammar,
//! including inside attribute values.

use logos::Logos;
use std::ops::Range;

use crate::syntax_kind::SyntaxKind;

/// Token kinds produced by the Logos lexer.
///
/// This enum exists separately from [`SyntaxKind`] because Logos needs to
/// derive on it. Each variant maps to a corresponding `SyntaxKind` token.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A complete ERB tag: `<%`, optional flavor byte, code, `%>`.
    #[regex(r"<%([^%]|%[^>])*%>")]
    ErbTag,

    /// An HTML comment with no embedded ERB, consumed whole; opaque to the
    /// engine. A comment containing `<%` does not match and lexes as loose
    /// pieces instead, because ERB evaluates inside HTML comments and the
    /// embedded tag must still surface as `ERB_TAG`.
    #[regex(r"<!--([^-<]|<[^%]|-[^-<]|-<[^%]|--[^><]|--<[^%])*-->")]
    HtmlComment,

    /// A markup declaration such as a doctype; opaque to the engine.
    #[regex(r"<![A-Za-z][^>]*>")]
    Doctype,

    /// `</` opening a close tag
    #[token("</")]
    LtSlash,

    /// `<` opening an open tag
    #[token("<")]
    Lt,

    /// `>` ending a tag
    #[token(">")]
    Gt,

    /// `/>` ending a self-closing tag
    #[token("/>")]
    SlashGt,

    /// `=` between attribute name and value
    #[token("=")]
    Eq,

    /// `"` delimiting an attribute value
    #[token("\"")]
    DQuote,

    /// `'` delimiting an attribute value
    #[token("'")]
    SQuote,

    /// Horizontal whitespace (spaces, tabs)
    #[regex(r"[ \t]+")]
    Whitespace,

    /// Line ending (LF or CRLF)
    #[regex(r"\r?\n")]
    Newline,

    /// A name-shaped run: tag names, attribute names, bare words
    #[regex(r"[A-Za-z][A-Za-z0-9:_-]*")]
    Ident,

    /// Anything else, grouped into runs
    #[regex(r"[^<>=\s\x22'A-Za-z]+")]
    Text,
}

impl TokenKind {
    /// Convert to SyntaxKind.
    pub fn to_syntax_kind(self) -> SyntaxKind {
        match self {
            TokenKind::ErbTag => SyntaxKind::ERB_TAG,
            TokenKind::HtmlComment => SyntaxKind::HTML_COMMENT,
            TokenKind::Doctype => SyntaxKind::DOCTYPE,
            TokenKind::LtSlash => SyntaxKind::LT_SLASH,
            TokenKind::Lt => SyntaxKind::LT,
            TokenKind::Gt => SyntaxKind::GT,
            TokenKind::SlashGt => SyntaxKind::SLASH_GT,
            TokenKind::Eq => SyntaxKind::EQ,
            TokenKind::DQuote => SyntaxKind::DQUOTE,
            TokenKind::SQuote => SyntaxKind::SQUOTE,
            TokenKind::Whitespace => SyntaxKind::WHITESPACE,
            TokenKind::Newline => SyntaxKind::NEWLINE,
            TokenKind::Ident => SyntaxKind::IDENT,
            TokenKind::Text => SyntaxKind::TEXT,
        }
    }
}

/// A lexed token with its kind, text slice, and byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub span: Range<usize>,
}

/// Lex the input into a sequence of tokens.
///
/// Guarantees that all bytes from the input appear in the output tokens.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(input);

    while let Some(result) = lexer.next() {
        let text = lexer.slice();
        let span = lexer.span();
        let kind = match result {
            Ok(token_kind) => token_kind.to_syntax_kind(),
            Err(()) => {
                // Logos error means unrecognized bytes - treat as TEXT
                SyntaxKind::TEXT
            }
        };
        tokens.push(Token { kind, text, span });
    }

    tokens
}
