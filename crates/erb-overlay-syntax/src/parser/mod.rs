//! # Parser - Event-Based Tree Construction
//!
//! Transforms a token stream into a lossless syntax tree using the
//! event-based architecture from rust-analyzer: grammar rules emit a flat
//! list of [`Event`]s, and the [`Sink`] replays them into a rowan green
//! tree. The rust-analyzer contributor docs cover the general model; the
//! short version:
//!
//! - `parser.start()` yields a [`Marker`] that MUST be completed or
//!   abandoned. Dropping one is a bug and panics.
//! - Grammar rules are lenient: any input produces a tree holding every
//!   input byte, and structural problems are recorded as [`ParseDefect`]s
//!   instead of aborting.
//!
//! The public entry point is [`parse`]:
//!
//! ```
//! use erb_overlay_syntax::{parse, SyntaxKind};
//!
//! let result = parse("<p><%= a %></p>").unwrap();
//! assert_eq!(result.root.kind(), SyntaxKind::ROOT);
//! assert_eq!(result.root.text().to_string(), "<p><%= a %></p>");
//! ```

pub mod event;
pub mod sink;

mod grammar;

use crate::defect::{DefectKind, ParseDefect, SyntaxError};
use crate::lexer::{Token, lex};
use crate::span::Span;
use crate::syntax_kind::{SyntaxKind, SyntaxNode};
use event::Event;
use sink::Sink;

/// A parsed tree plus the structural defects found along the way.
#[derive(Debug)]
pub struct ParseResult {
    pub root: SyntaxNode,
    pub defects: Vec<ParseDefect>,
}

/// The parser state machine.
///
/// Holds the token stream, current position, accumulated events, and
/// accumulated defects. Grammar functions receive `&mut Parser` and use its
/// methods to inspect tokens (`current`, `nth`, `at`, `at_end`), consume
/// them (`bump`, `eat`), and build structure (`start` → [`Marker`]).
pub struct Parser<'t, 'input> {
    tokens: &'t [Token<'input>],
    pos: usize,
    events: Vec<Event>,
    defects: Vec<ParseDefect>,
}

impl<'t, 'input> Parser<'t, 'input> {
    pub fn new(tokens: &'t [Token<'input>]) -> Self {
        Self {
            tokens,
            pos: 0,
            events: Vec::new(),
            defects: Vec::new(),
        }
    }

    /// Parse the tokens and return the tree plus defects.
    pub fn parse(mut self) -> ParseResult {
        grammar::root(&mut self);
        let Parser {
            tokens,
            events,
            defects,
            ..
        } = self;
        let root = Sink::new(tokens, events).finish();
        ParseResult { root, defects }
    }

    /// Start a new node and return a marker.
    pub(crate) fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        Marker {
            pos,
            completed: false,
        }
    }

    /// Current token kind, or EOF if past end.
    pub(crate) fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Look ahead n tokens.
    pub(crate) fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    /// Check if at end of input.
    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Check if current token is of given kind.
    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// Consume the current token if it matches.
    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume the current token unconditionally.
    pub(crate) fn bump(&mut self) {
        if !self.at_end() {
            let kind = self.current();
            self.events.push(Event::Token { kind });
            self.pos += 1;
        }
    }

    /// Get the text of the current token.
    pub(crate) fn current_text(&self) -> &'input str {
        self.nth_text(0)
    }

    /// Get the text of the token n ahead.
    pub(crate) fn nth_text(&self, n: usize) -> &'input str {
        self.tokens.get(self.pos + n).map(|t| t.text).unwrap_or("")
    }

    /// Byte span of the current token; empty span at EOF.
    pub(crate) fn current_span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .map(|t| Span::new(t.span.start, t.span.end))
            .unwrap_or_else(|| {
                let end = self.tokens.last().map(|t| t.span.end).unwrap_or(0);
                Span::new(end, end)
            })
    }

    /// End offset of the most recently consumed token.
    pub(crate) fn last_end(&self) -> usize {
        if self.pos == 0 {
            return 0;
        }
        self.tokens
            .get(self.pos - 1)
            .map(|t| t.span.end)
            .unwrap_or(0)
    }

    /// Record a structural defect without interrupting the parse.
    pub(crate) fn defect(&mut self, kind: DefectKind, span: Span) {
        self.defects.push(ParseDefect { kind, span });
    }
}

/// A marker for a node being constructed.
///
/// Every marker must be either completed with [`Marker::complete`] or
/// abandoned with [`Marker::abandon`]. Dropping one without doing either
/// panics, which catches malformed grammar rules at test time instead of
/// producing corrupt trees.
#[must_use = "Markers must be completed or abandoned, dropping them is a bug"]
pub(crate) struct Marker {
    /// Position in the events vector where our Placeholder lives.
    pos: usize,
    completed: bool,
}

impl Marker {
    /// Complete this marker, creating a node of the given kind.
    pub(crate) fn complete(mut self, p: &mut Parser<'_, '_>, kind: SyntaxKind) {
        self.completed = true;
        let event_at_pos = &mut p.events[self.pos];
        assert!(matches!(event_at_pos, Event::Placeholder));
        *event_at_pos = Event::Start { kind };
        p.events.push(Event::Finish);
    }

    /// Abandon this marker without creating a node.
    ///
    /// The placeholder is popped when nothing was emitted after it, and left
    /// inert (ignored by the sink) otherwise.
    pub(crate) fn abandon(mut self, p: &mut Parser<'_, '_>) {
        self.completed = true;
        if self.pos == p.events.len() - 1 {
            match p.events.pop() {
                Some(Event::Placeholder) => {}
                _ => unreachable!(),
            }
        }
    }
}

impl Drop for Marker {
    fn drop(&mut self) {
        if !self.completed && !std::thread::panicking() {
            panic!("Marker must be either completed or abandoned");
        }
    }
}

/// Parse template source into a lossless syntax tree.
///
/// Markup defects never fail the parse; the single fatal case is a source
/// longer than rowan's `u32` offset space.
pub fn parse(source: &str) -> Result<ParseResult, SyntaxError> {
    let max = u32::MAX as usize;
    if source.len() > max {
        return Err(SyntaxError::SourceTooLong {
            len: source.len(),
            max,
        });
    }
    let tokens = lex(source);
    Ok(Parser::new(&tokens).parse())
}
