//! Position-mapping registry.
//!
//! Every substitution of original markup with placeholder code records where
//! the placeholder landed and which original bytes it stands for. A
//! downstream restoration step walks the analyzer's tree and splices the
//! original text back into any node whose displayed start matches an entry,
//! when the entry is eligible.

use std::collections::BTreeMap;

use erb_overlay_syntax::Span;
use serde::Serialize;

/// One placeholder substitution: the original byte range it replaced and
/// whether literal restoration is allowed.
///
/// Restoration is ineligible when the original span contains multi-byte
/// characters: splicing those bytes back would shift downstream column
/// accounting, so the placeholder stands permanently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MappingEntry {
    pub span: Span,
    pub eligible: bool,
}

/// Ordered map from emitted byte offset to the substitution made there.
///
/// Later writes at the same key overwrite the earlier entry: whatever a
/// projection pass last emitted at an offset is what the registry
/// describes.
#[derive(Debug, Default, Serialize)]
pub struct Registry {
    entries: BTreeMap<usize, MappingEntry>,
}

impl Registry {
    pub fn insert(&mut self, offset: usize, entry: MappingEntry) {
        self.entries.insert(offset, entry);
    }

    pub fn get(&self, offset: usize) -> Option<&MappingEntry> {
        self.entries.get(&offset)
    }

    /// Entries in ascending offset order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &MappingEntry)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn iteration_is_offset_ordered() {
        let mut registry = Registry::default();
        registry.insert(
            10,
            MappingEntry {
                span: Span::new(10, 14),
                eligible: true,
            },
        );
        registry.insert(
            2,
            MappingEntry {
                span: Span::new(2, 5),
                eligible: false,
            },
        );
        let offsets: Vec<_> = registry.iter().map(|(k, _)| k).collect();
        assert_eq!(offsets, vec![2, 10]);
    }

    #[test]
    fn later_insert_overwrites() {
        let mut registry = Registry::default();
        let first = MappingEntry {
            span: Span::new(0, 4),
            eligible: true,
        };
        let second = MappingEntry {
            span: Span::new(0, 8),
            eligible: false,
        };
        registry.insert(0, first);
        registry.insert(0, second);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(0), Some(&second));
    }
}
