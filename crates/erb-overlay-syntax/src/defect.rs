//! Structural defects and the one fatal parse error.
//!
//! Markup well-formedness problems (unclosed elements, stray close tags,
//! chain tags without an opener) never abort parsing: the parser records a
//! [`ParseDefect`] and keeps producing a best-effort tree, because embedded
//! code can be perfectly well-formed even when the markup around it is not.

use std::fmt;

use crate::span::Span;

/// A non-fatal structural problem discovered while parsing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ParseDefect {
    pub kind: DefectKind,
    pub span: Span,
}

/// What kind of structural problem was found.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub enum DefectKind {
    /// An element's open tag never found its matching close tag.
    UnclosedElement { name: String },
    /// A close tag with no matching open element.
    StrayCloseTag { name: String },
    /// A chain tag (`elsif`, `else`, `when`, `rescue`, `ensure`, `end`)
    /// outside any matching construct.
    StrayChainTag,
    /// A construct opener whose `end` tag never arrived.
    UnterminatedConstruct,
}

impl fmt::Display for ParseDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DefectKind::UnclosedElement { name } => {
                write!(f, "unclosed element <{name}> at {}..{}", self.span.start, self.span.end)
            }
            DefectKind::StrayCloseTag { name } => {
                write!(f, "stray close tag </{name}> at {}..{}", self.span.start, self.span.end)
            }
            DefectKind::StrayChainTag => {
                write!(f, "chain tag without opener at {}..{}", self.span.start, self.span.end)
            }
            DefectKind::UnterminatedConstruct => {
                write!(f, "construct without end at {}..{}", self.span.start, self.span.end)
            }
        }
    }
}

/// The fatal parse error. Everything else degrades into [`ParseDefect`]s.
#[derive(Debug, thiserror::Error)]
pub enum SyntaxError {
    /// Rowan stores text offsets as `u32`; longer sources cannot be
    /// represented in the tree at all, so no partial result is possible.
    #[error("source is {len} bytes, which exceeds the {max} byte syntax tree limit")]
    SourceTooLong { len: usize, max: usize },
}
