//! Parser events: the flat intermediate form between grammar and tree.
//!
//! Grammar rules never touch rowan directly. They emit a flat sequence of
//! events describing the tree, and the [`Sink`](super::sink::Sink) replays
//! the sequence against a `GreenNodeBuilder`. The indirection keeps grammar
//! code free of tree-builder state and makes speculative parsing cheap: an
//! abandoned node is just an inert placeholder in the event list.

use crate::syntax_kind::SyntaxKind;

/// An event emitted by the parser during tree construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Begin a new composite node of the given kind.
    Start { kind: SyntaxKind },

    /// Add one lexed token to the current node.
    Token { kind: SyntaxKind },

    /// Finish the current node. Paired with a preceding `Start`.
    Finish,

    /// Reserved by `parser.start()`; replaced by `Start` on completion or
    /// left inert on abandonment. The sink ignores placeholders.
    Placeholder,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_plain_values() {
        let event = Event::Start {
            kind: SyntaxKind::ROOT,
        };
        assert_eq!(
            event,
            Event::Start {
                kind: SyntaxKind::ROOT
            }
        );
        assert_ne!(event, Event::Finish);
    }
}
