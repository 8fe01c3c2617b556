//! Byte spans into the template source.

/// A byte range `[start, end)` into the source text.
///
/// All tree consumers work with spans rather than copied text, so slicing the
/// source with any span reproduces the exact original bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Converts a rowan text range into a plain byte span.
    pub fn of(range: rowan::TextRange) -> Self {
        Self {
            start: u32::from(range.start()) as usize,
            end: u32::from(range.end()) as usize,
        }
    }

    /// Returns the length in bytes; zero when the span is inverted.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Returns true if `offset` lies within the span.
    #[must_use]
    pub fn contains(self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_and_empty() {
        assert_eq!(Span::new(3, 7).len(), 4);
        assert!(!Span::new(3, 7).is_empty());
        assert!(Span::new(7, 7).is_empty());
        assert!(Span::new(9, 7).is_empty());
    }

    #[test]
    fn contains_is_half_open() {
        let s = Span::new(2, 5);
        assert!(!s.contains(1));
        assert!(s.contains(2));
        assert!(s.contains(4));
        assert!(!s.contains(5));
    }
}
