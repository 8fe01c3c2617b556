//! The projection pass.
//!
//! The output buffer starts as a blanked copy of the source (every byte a
//! filler space except line terminators) and is then selectively overwritten
//! in place, one node at a time in document order. Nothing is ever inserted
//! or deleted, which is what guarantees that every emitted byte sits at its
//! original offset and analyzer diagnostics map straight back to the
//! template.

mod comments;

use erb_overlay_syntax::{Span, SyntaxKind, SyntaxNode, tags};

use crate::blocks::BlockSet;
use crate::position::PositionIndex;
use crate::registry::{MappingEntry, Registry};
use crate::tail::TailSet;
use crate::tree::{self, NodeKind};

/// Byte written over every blanked position.
pub(crate) const FILLER: u8 = b' ';

/// Statement separator written after each emitted code run.
const SEPARATOR: u8 = b';';

/// Replaces the `<%=` delimiter of a non-tail output tag, turning the bare
/// expression into an assignment so it cannot trip unused-value rules.
const OUTPUT_MARKER: &[u8; 3] = b"_ =";

/// Placeholder emitted for a run of markup text.
const TEXT_PLACEHOLDER: &[u8; 2] = b"_;";

/// What to emit for markup nodes.
#[derive(Debug, Clone, Copy)]
pub struct ProjectOptions {
    /// Master toggle. Off: every markup byte stays filler and only embedded
    /// code is projected.
    pub render_markup: bool,
    /// Render qualifying elements as Ruby blocks instead of bare
    /// statements. Effective only when `render_markup` is on.
    pub markup_blocks: bool,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            render_markup: false,
            markup_blocks: true,
        }
    }
}

pub(crate) struct Projector<'a> {
    source: &'a [u8],
    buf: Vec<u8>,
    registry: Registry,
    tails: &'a TailSet,
    blocks: &'a BlockSet,
    index: &'a PositionIndex,
    options: ProjectOptions,
    /// Rotating 0-9 suffix keeping structurally identical sibling blocks
    /// distinct for duplicate-branch rules.
    block_counter: u8,
    /// (start line, end line) of every non-comment ERB tag, for comment
    /// suppression.
    code_lines: Vec<(usize, usize)>,
}

/// Run the projection pass and return the finalized buffer plus registry.
pub(crate) fn project(
    root: &SyntaxNode,
    source: &str,
    index: &PositionIndex,
    tails: &TailSet,
    blocks: &BlockSet,
    options: ProjectOptions,
) -> (Vec<u8>, Registry) {
    let mut projector = Projector {
        source: source.as_bytes(),
        buf: blank(source.as_bytes()),
        registry: Registry::default(),
        tails,
        blocks,
        index,
        options,
        block_counter: 0,
        code_lines: code_lines(root, index),
    };
    for child in root.children() {
        projector.node(&child);
    }
    (projector.buf, projector.registry)
}

/// Copy the source with every byte replaced by filler except terminators.
fn blank(source: &[u8]) -> Vec<u8> {
    source
        .iter()
        .map(|&b| if b == b'\n' || b == b'\r' { b } else { FILLER })
        .collect()
}

/// Line extents of every ERB tag token that is not a comment.
fn code_lines(root: &SyntaxNode, index: &PositionIndex) -> Vec<(usize, usize)> {
    root.descendants_with_tokens()
        .filter_map(|el| el.into_token())
        .filter(|t| {
            t.kind() == SyntaxKind::ERB_TAG && tags::classify(t.text()) != tags::TagRole::Comment
        })
        .map(|t| {
            let span = Span::of(t.text_range());
            (index.line_of(span.start), index.line_of(span.end - 1))
        })
        .collect()
}

impl Projector<'_> {
    fn node(&mut self, node: &SyntaxNode) {
        match tree::kind(node) {
            NodeKind::Content | NodeKind::Yield | NodeKind::End => self.code_leaf(node),
            NodeKind::Output => self.output(node),
            NodeKind::Comment => self.comment(node),
            NodeKind::Element => self.element(node),
            NodeKind::Text => self.text(node),
            kind if kind.is_compound() => {
                self.code_leaf(node);
                for child in node.children() {
                    self.node(&child);
                }
            }
            // Opaque: span stays blanked, children still projected.
            _ => {
                for child in node.children() {
                    self.node(&child);
                }
            }
        }
    }

    /// Copy the node's code verbatim and terminate it with a separator.
    fn code_leaf(&mut self, node: &SyntaxNode) {
        let Some(geo) = tree::tag_geometry(node) else {
            return;
        };
        self.buf[geo.code.start..geo.code.end]
            .copy_from_slice(&self.source[geo.code.start..geo.code.end]);
        if let Some(last) = self.last_non_ws(geo.code) {
            self.write(last + 1, &[SEPARATOR]);
        }
    }

    fn output(&mut self, node: &SyntaxNode) {
        self.code_leaf(node);
        if self.tails.contains(node) {
            return;
        }
        let Some(geo) = tree::tag_geometry(node) else {
            return;
        };
        let marker = Span::new(geo.tag.start, geo.tag.start + OUTPUT_MARKER.len());
        self.write(marker.start, OUTPUT_MARKER);
        self.record(marker.start, marker);
    }

    fn comment(&mut self, node: &SyntaxNode) {
        let Some(geo) = tree::tag_geometry(node) else {
            return;
        };
        self.project_comment(geo.tag);
    }

    fn element(&mut self, node: &SyntaxNode) {
        if !self.options.render_markup {
            if tree::contains_erb(node) {
                self.descend(node);
            }
            return;
        }

        let as_block = self.options.markup_blocks && self.blocks.contains(node);
        let Some(name) = tree::tag_name(node) else {
            self.descend(node);
            return;
        };

        if let Some(open) = tree::open_tag(node) {
            let span = tree::span(&open);
            let mut emitted = name.clone().into_bytes();
            if as_block {
                emitted.extend_from_slice(b" { ");
            } else {
                emitted.push(SEPARATOR);
            }
            self.write(span.start, &emitted);
            self.record(span.start, span);
        }

        if as_block || tree::contains_erb(node) {
            self.descend(node);
        }

        if as_block
            && let Some(close) = tree::close_tag(node)
        {
            let span = tree::span(&close);
            let mut emitted = name.into_bytes();
            emitted.push(b'0' + self.block_counter);
            emitted.push(SEPARATOR);
            emitted.push(b'}');
            emitted.push(SEPARATOR);
            self.block_counter = (self.block_counter + 1) % 10;
            self.write(span.start, &emitted);
            self.record(span.start, span);
        }
    }

    fn text(&mut self, node: &SyntaxNode) {
        if !self.options.render_markup {
            return;
        }
        let span = tree::span(node);
        let bytes = &self.source[span.start..span.end];
        let Some(first) = bytes.iter().position(|b| !b.is_ascii_whitespace()) else {
            return;
        };
        // position() on a non-empty match means rposition() matches too
        let last = bytes
            .iter()
            .rposition(|b| !b.is_ascii_whitespace())
            .unwrap_or(first);
        let start = span.start + first;
        if span.end - start < 3 {
            return;
        }
        self.write(start, TEXT_PLACEHOLDER);
        self.record(start, Span::new(start, span.start + last + 1));
    }

    fn descend(&mut self, node: &SyntaxNode) {
        for child in node.children() {
            self.node(&child);
        }
    }

    /// Offset of the last non-whitespace byte in a source span.
    fn last_non_ws(&self, span: Span) -> Option<usize> {
        self.source[span.start..span.end]
            .iter()
            .rposition(|b| !b.is_ascii_whitespace())
            .map(|i| span.start + i)
    }

    /// Overwrite buffer bytes starting at `offset`, stopping at the buffer
    /// end or the first line terminator. Emissions may be wider than what
    /// they replace (the rotating block close), so every write clamps
    /// instead of trusting its caller's geometry.
    fn write(&mut self, offset: usize, bytes: &[u8]) {
        for (i, &b) in bytes.iter().enumerate() {
            let pos = offset + i;
            if pos >= self.buf.len() || self.buf[pos] == b'\n' || self.buf[pos] == b'\r' {
                break;
            }
            self.buf[pos] = b;
        }
    }

    /// Record a markup-to-code substitution. Eligible for literal
    /// restoration only when the replaced span is pure single-byte text.
    fn record(&mut self, offset: usize, original: Span) {
        let eligible = self.source[original.start..original.end].is_ascii();
        self.registry.insert(offset, MappingEntry {
            span: original,
            eligible,
        });
    }
}
