//! Byte-offset to line/column conversion over one source buffer.

use erb_overlay_syntax::Span;

/// A resolved source location.
///
/// Lines are 1-indexed and columns are 0-indexed byte offsets within the
/// line, matching how analyzer diagnostics address template positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// Line-start offset table for one source buffer.
///
/// Built once per conversion and read-only afterwards. `\n` ends a line;
/// `\r\n` sequences therefore leave the `\r` on the line they terminate.
#[derive(Debug)]
pub struct PositionIndex {
    /// Byte offset of the first byte of each line. `line_starts[0] == 0`.
    line_starts: Vec<usize>,
    len: usize,
}

impl PositionIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self {
            line_starts,
            len: source.len(),
        }
    }

    /// Resolve a byte offset to its line and column. Offsets past the end
    /// resolve to the end of the last line.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.len);
        let line = self.line_of(offset);
        Position {
            line,
            column: offset - self.line_starts[line - 1],
        }
    }

    /// 1-indexed line containing the byte offset.
    pub fn line_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(i) => i + 1,
            Err(i) => i,
        }
    }

    /// Byte offset of the first byte of a 1-indexed line.
    pub fn line_start(&self, line: usize) -> usize {
        self.line_starts[line - 1]
    }

    /// Byte span of a 1-indexed line, terminator included.
    pub fn line_span(&self, line: usize) -> Span {
        let start = self.line_starts[line - 1];
        let end = self
            .line_starts
            .get(line)
            .copied()
            .unwrap_or(self.len);
        Span::new(start, end)
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
