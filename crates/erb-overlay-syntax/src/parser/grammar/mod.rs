//! # Grammar Rules
//!
//! Each function takes `&mut Parser` plus a [`Ctx`] carrying the open
//! element stack, and builds structure through markers. Rules are lenient:
//! invalid input still produces a tree that preserves every byte, with
//! structural problems recorded as defects.
//!
//! Dispatch sketch:
//!
//! - An `ERB_TAG` token becomes an ERB node; tags with structural keywords
//!   (`if`, `case`, loops, `begin`, trailing `do`) open compound constructs
//!   that nest their chain members ([`erb`]).
//! - `<` followed by a name opens an HTML element ([`html`]).
//! - Everything else is gathered into `HTML_TEXT` runs.
//!
//! Chain tags (`elsif`, `else`, `when`, `rescue`, `ensure`, `end`) are never
//! consumed here: the innermost enclosing construct intercepts them before
//! calling [`node`], so reaching one in [`node`] means it is stray.

pub(crate) mod erb;
pub(crate) mod html;

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;
use crate::tags;

/// Shared grammar state: the stack of currently open element names, used to
/// decide whether a mismatched close tag belongs to an ancestor.
#[derive(Default)]
pub(crate) struct Ctx {
    pub(crate) open_elements: Vec<String>,
}

/// Parse the root document.
pub(crate) fn root(p: &mut Parser<'_, '_>) {
    let mut ctx = Ctx::default();
    let m = p.start();

    while !p.at_end() {
        node(p, &mut ctx);
    }

    m.complete(p, SyntaxKind::ROOT);
}

/// Parse exactly one document node.
pub(crate) fn node(p: &mut Parser<'_, '_>, ctx: &mut Ctx) {
    match p.current() {
        SyntaxKind::ERB_TAG => erb::erb_node(p, ctx),
        SyntaxKind::LT if p.nth(1) == SyntaxKind::IDENT => html::element(p, ctx),
        SyntaxKind::LT_SLASH if p.nth(1) == SyntaxKind::IDENT => html::stray_close_tag(p),
        _ => html::text_run(p),
    }
}

/// True when the current token is an ERB chain member or terminator, which
/// always belongs to an enclosing construct.
pub(crate) fn at_chain_boundary(p: &Parser<'_, '_>) -> bool {
    p.at(SyntaxKind::ERB_TAG) && tags::classify(p.current_text()).is_chain_or_end()
}
