//! Tail-expression analysis.
//!
//! Ruby branches are expressions: the last statement of an `if` arm, `when`
//! arm, or `rescue` body is the arm's value. Projecting every output tag as
//! an assignment would therefore turn a used value into an unused one and
//! trip "useless assignment" diagnostics. This pass finds, per
//! value-returning context, the one statement whose value propagates, so the
//! projection can leave that expression bare.
//!
//! Loop and iterator-block bodies are evaluated for effect only and open no
//! value-returning context, and neither does the document root.

use std::collections::HashSet;

use erb_overlay_syntax::SyntaxNode;

use crate::tree::{self, NodeKind};

/// Node identities (byte span starts) marked as a context's return value.
///
/// Built once per conversion by [`analyze`]; read-only afterwards.
#[derive(Debug, Default)]
pub struct TailSet {
    set: HashSet<usize>,
}

impl TailSet {
    pub fn contains(&self, node: &SyntaxNode) -> bool {
        self.set.contains(&tree::span(node).start)
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

/// Outcome of one reverse scan.
enum Scan {
    /// The tail, identified by its span start.
    Found(usize),
    /// A statement that consumes the tail position without being one, e.g.
    /// a compound construct or renderable markup. Earlier siblings are
    /// never candidates.
    Stop,
    /// Nothing but transparent nodes seen.
    Nothing,
}

/// Walk the tree once and mark the tail of every value-returning context.
pub fn analyze(root: &SyntaxNode) -> TailSet {
    let mut set = HashSet::new();
    visit(root, &mut set);
    TailSet { set }
}

fn visit(node: &SyntaxNode, set: &mut HashSet<usize>) {
    if tree::kind(node).is_value_returning() {
        let stmts: Vec<_> = tree::statements(node).collect();
        if let Scan::Found(offset) = scan(stmts.iter().rev().cloned()) {
            set.insert(offset);
        }
    }
    for child in node.children() {
        visit(&child, set);
    }
}

/// Scan statements in reverse for the context's value.
///
/// Comments, whitespace-only text, and opaque nodes are transparent. A
/// markup element with no renderable content is transparent too, except its
/// body may itself hold the tail, so it is scanned in reverse first.
fn scan(stmts: impl Iterator<Item = SyntaxNode>) -> Scan {
    for stmt in stmts {
        match tree::kind(&stmt) {
            NodeKind::Output | NodeKind::Content => {
                return Scan::Found(tree::span(&stmt).start);
            }
            NodeKind::Comment | NodeKind::Opaque => {}
            NodeKind::Text => {
                if !stmt.text().to_string().trim().is_empty() {
                    return Scan::Stop;
                }
            }
            NodeKind::Element => {
                if renderable(&stmt) {
                    return Scan::Stop;
                }
                let body: Vec<_> = tree::body(&stmt).collect();
                match scan(body.iter().rev().cloned()) {
                    Scan::Found(offset) => return Scan::Found(offset),
                    Scan::Stop => return Scan::Stop,
                    Scan::Nothing => {}
                }
            }
            _ => return Scan::Stop,
        }
    }
    Scan::Nothing
}

/// True when the element itself would render as literal code: it directly
/// contains non-whitespace text or a nested element.
fn renderable(element: &SyntaxNode) -> bool {
    tree::body(element).any(|child| match tree::kind(&child) {
        NodeKind::Element => true,
        NodeKind::Text => !child.text().to_string().trim().is_empty(),
        _ => false,
    })
}
