//! HTML grammar rules: elements, tags, and text runs.

use crate::defect::DefectKind;
use crate::parser::Parser;
use crate::span::Span;
use crate::syntax_kind::SyntaxKind;
use crate::tags::{self, TagRole};

use super::{Ctx, at_chain_boundary, node};

/// Parse an element: open tag, body, and (for non-void elements) the
/// matching close tag. Recovery rules:
///
/// - a close tag matching an ancestor ends this element early (unclosed);
/// - a close tag matching nothing becomes a standalone `HTML_CLOSE_TAG`
///   child and the body continues;
/// - an ERB chain/terminator tag always belongs to an enclosing construct,
///   so it ends this element early (unclosed).
pub(crate) fn element(p: &mut Parser<'_, '_>, ctx: &mut Ctx) {
    let open_start = p.current_span().start;
    let m = p.start();
    let (name, self_closing) = open_tag(p);
    let open_span = Span::new(open_start, p.last_end());

    if self_closing || tags::is_void_element(&name) {
        m.complete(p, SyntaxKind::HTML_ELEMENT);
        return;
    }

    ctx.open_elements.push(name.clone());
    let mut closed = false;

    loop {
        if p.at_end() {
            break;
        }
        if p.at(SyntaxKind::LT_SLASH) && p.nth(1) == SyntaxKind::IDENT {
            let close_name = p.nth_text(1);
            if close_name.eq_ignore_ascii_case(&name) {
                close_tag(p);
                closed = true;
                break;
            }
            let matches_ancestor = ctx
                .open_elements
                .iter()
                .rev()
                .skip(1)
                .any(|open| open.eq_ignore_ascii_case(close_name));
            if matches_ancestor {
                break;
            }
            stray_close_tag(p);
            continue;
        }
        if at_chain_boundary(p) {
            break;
        }
        node(p, ctx);
    }

    ctx.open_elements.pop();
    if !closed {
        p.defect(DefectKind::UnclosedElement { name }, open_span);
    }
    m.complete(p, SyntaxKind::HTML_ELEMENT);
}

/// Parse an open tag from `<` through `>` or `/>`. ERB tags in attribute
/// position become leaf ERB nodes inside the open tag; quoted values are
/// scanned so a `>` inside quotes does not end the tag.
fn open_tag(p: &mut Parser<'_, '_>) -> (String, bool) {
    let m = p.start();
    p.bump(); // `<`
    let name = p.current_text().to_string();
    p.bump(); // tag name

    let mut self_closing = false;
    loop {
        if p.at_end() {
            break;
        }
        match p.current() {
            SyntaxKind::GT => {
                p.bump();
                break;
            }
            SyntaxKind::SLASH_GT => {
                p.bump();
                self_closing = true;
                break;
            }
            SyntaxKind::DQUOTE | SyntaxKind::SQUOTE => quoted_value(p),
            SyntaxKind::ERB_TAG => attr_erb(p),
            // The next tag opened before this one closed; bail out.
            SyntaxKind::LT | SyntaxKind::LT_SLASH => break,
            _ => p.bump(),
        }
    }

    m.complete(p, SyntaxKind::HTML_OPEN_TAG);
    (name, self_closing)
}

/// Consume a quoted attribute value, keeping any embedded ERB as nodes.
fn quoted_value(p: &mut Parser<'_, '_>) {
    let quote = p.current();
    p.bump();
    loop {
        if p.at_end() || p.at(quote) {
            break;
        }
        if p.at(SyntaxKind::ERB_TAG) {
            attr_erb(p);
        } else {
            p.bump();
        }
    }
    p.eat(quote);
}

/// An ERB tag in attribute position. Constructs cannot span an attribute,
/// so structural roles degrade to plain content here.
fn attr_erb(p: &mut Parser<'_, '_>) {
    let kind = match tags::classify(p.current_text()) {
        TagRole::Output => SyntaxKind::ERB_OUTPUT,
        TagRole::Comment => SyntaxKind::ERB_COMMENT,
        _ => SyntaxKind::ERB_CONTENT,
    };
    super::erb::leaf(p, kind);
}

/// Parse a close tag from `</` through `>`.
fn close_tag(p: &mut Parser<'_, '_>) {
    let m = p.start();
    p.bump(); // `</`
    p.bump(); // tag name
    loop {
        match p.current() {
            SyntaxKind::GT => {
                p.bump();
                break;
            }
            SyntaxKind::EOF | SyntaxKind::LT | SyntaxKind::LT_SLASH | SyntaxKind::ERB_TAG => break,
            _ => {
                if p.at_end() {
                    break;
                }
                p.bump();
            }
        }
    }
    m.complete(p, SyntaxKind::HTML_CLOSE_TAG);
}

/// A close tag with no matching open element: report it and keep it as a
/// standalone opaque node.
pub(crate) fn stray_close_tag(p: &mut Parser<'_, '_>) {
    let span = p.current_span();
    let name = p.nth_text(1).to_string();
    p.defect(DefectKind::StrayCloseTag { name }, span);
    close_tag(p);
}

/// Gather a maximal run of non-tag tokens into one `HTML_TEXT` node.
pub(crate) fn text_run(p: &mut Parser<'_, '_>) {
    let m = p.start();
    let mut progressed = false;

    loop {
        if p.at_end() {
            break;
        }
        match p.current() {
            SyntaxKind::ERB_TAG => break,
            SyntaxKind::LT if p.nth(1) == SyntaxKind::IDENT => break,
            SyntaxKind::LT_SLASH if p.nth(1) == SyntaxKind::IDENT => break,
            _ => {
                p.bump();
                progressed = true;
            }
        }
    }

    if progressed {
        m.complete(p, SyntaxKind::HTML_TEXT);
    } else {
        m.abandon(p);
    }
}
