//! # erb-overlay-syntax
//!
//! A lossless syntax tree for ERB templates using [Rowan] + [Logos],
//! following the [rust-analyzer] architecture model.
//!
//! [Rowan]: https://docs.rs/rowan
//! [Logos]: https://docs.rs/logos
//! [rust-analyzer]: https://rust-analyzer.github.io/book/contributing/syntax.html
//!
//! The tree is a Concrete Syntax Tree: every byte of the template appears in
//! exactly one token, so `tree.text()` reproduces the input unchanged. This
//! is what makes byte-accurate overlay generation possible downstream, since
//! every node carries its exact source span.
//!
//! ## Pipeline
//!
//! ```text
//! Template Text → Lexer → Tokens → Parser → Events → Sink → Rowan Tree
//!                 (Logos)          (Grammar)         (GreenNodeBuilder)
//! ```
//!
//! - [`lexer`] tokenizes with Logos; unrecognized bytes degrade to `TEXT`
//!   tokens rather than being dropped.
//! - [`parser`] walks the tokens and emits events through a marker system;
//!   grammar rules live in [`parser::grammar`]. Structural problems never
//!   abort the parse, they are collected as [`ParseDefect`]s alongside a
//!   best-effort tree.
//! - The sink replays events into a Rowan green tree.
//!
//! ERB tags are lexed as single opaque tokens and classified by [`tags`]
//! into their structural roles (`if`, `case`, loops, block openers, chain
//! members, `end`), which is what drives construct nesting in the grammar.
//!
//! ## Quick Start
//!
//! ```
//! use erb_overlay_syntax::{parse, SyntaxKind};
//!
//! let result = parse("<p><%= name %></p>").unwrap();
//!
//! // The tree preserves all text
//! assert_eq!(result.root.text().to_string(), "<p><%= name %></p>");
//!
//! // Navigate the tree structure
//! assert_eq!(result.root.kind(), SyntaxKind::ROOT);
//! let element = result.root.children().next().unwrap();
//! assert_eq!(element.kind(), SyntaxKind::HTML_ELEMENT);
//! ```

pub mod defect;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod syntax_kind;
pub mod tags;

pub use defect::{DefectKind, ParseDefect, SyntaxError};
pub use parser::{ParseResult, parse};
pub use span::Span;
pub use syntax_kind::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken, TemplateLang};

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    /// Helper to format a syntax tree for snapshot testing.
    fn format_tree(node: &SyntaxNode, indent: usize) -> String {
        let mut result = String::new();
        let prefix = "  ".repeat(indent);

        result.push_str(&format!(
            "{}{:?}@{:?}\n",
            prefix,
            node.kind(),
            node.text_range()
        ));

        for child in node.children_with_tokens() {
            match child {
                rowan::NodeOrToken::Node(n) => {
                    result.push_str(&format_tree(&n, indent + 1));
                }
                rowan::NodeOrToken::Token(t) => {
                    let text = t.text().replace('\n', "\\n");
                    result.push_str(&format!(
                        "{}  {:?}@{:?} {:?}\n",
                        prefix,
                        t.kind(),
                        t.text_range(),
                        text
                    ));
                }
            }
        }

        result
    }

    fn tree(input: &str) -> String {
        let result = parse(input).unwrap();
        assert_eq!(result.root.text().to_string(), input, "lossless tree");
        format_tree(&result.root, 0)
    }

    #[test]
    fn snapshot_output_tag() {
        assert_snapshot!(tree("<%= a %>"), @r#"
        ROOT@0..8
          ERB_OUTPUT@0..8
            ERB_TAG@0..8 "<%= a %>"
        "#);
    }

    #[test]
    fn snapshot_simple_element() {
        assert_snapshot!(tree("<p>hi</p>"), @r#"
        ROOT@0..9
          HTML_ELEMENT@0..9
            HTML_OPEN_TAG@0..3
              LT@0..1 "<"
              IDENT@1..2 "p"
              GT@2..3 ">"
            HTML_TEXT@3..5
              IDENT@3..5 "hi"
            HTML_CLOSE_TAG@5..9
              LT_SLASH@5..7 "</"
              IDENT@7..8 "p"
              GT@8..9 ">"
        "#);
    }

    #[test]
    fn snapshot_if_construct() {
        assert_snapshot!(tree("<% if a %>x<% end %>"), @r#"
        ROOT@0..20
          ERB_IF@0..20
            ERB_TAG@0..10 "<% if a %>"
            HTML_TEXT@10..11
              IDENT@10..11 "x"
            ERB_END@11..20
              ERB_TAG@11..20 "<% end %>"
        "#);
    }

    #[test]
    fn snapshot_if_else_chain() {
        assert_snapshot!(tree("<% if a %>x<% else %>y<% end %>"), @r#"
        ROOT@0..31
          ERB_IF@0..31
            ERB_TAG@0..10 "<% if a %>"
            HTML_TEXT@10..11
              IDENT@10..11 "x"
            ERB_ELSE@11..31
              ERB_TAG@11..21 "<% else %>"
              HTML_TEXT@21..22
                IDENT@21..22 "y"
              ERB_END@22..31
                ERB_TAG@22..31 "<% end %>"
        "#);
    }

    #[test]
    fn snapshot_element_with_erb_body() {
        assert_snapshot!(tree("<div><%= user.name %></div>"), @r#"
        ROOT@0..27
          HTML_ELEMENT@0..27
            HTML_OPEN_TAG@0..5
              LT@0..1 "<"
              IDENT@1..4 "div"
              GT@4..5 ">"
            ERB_OUTPUT@5..21
              ERB_TAG@5..21 "<%= user.name %>"
            HTML_CLOSE_TAG@21..27
              LT_SLASH@21..23 "</"
              IDENT@23..26 "div"
              GT@26..27 ">"
        "#);
    }

    #[test]
    fn parse_preserves_multiline_template() {
        let input = "<ul>\n  <% items.each do |item| %>\n  <li><%= item %></li>\n  <% end %>\n</ul>\n";
        let result = parse(input).unwrap();
        assert_eq!(result.root.text().to_string(), input);
        assert!(result.defects.is_empty());
    }

    #[test]
    fn defects_do_not_prevent_a_full_tree() {
        let input = "<div><% if a %></span>";
        let result = parse(input).unwrap();
        assert_eq!(result.root.text().to_string(), input);
        assert!(!result.defects.is_empty());
    }
}
