//! Comment projection.
//!
//! An ERB comment becomes a Ruby line comment: a `#` at the marker's
//! original position. Ruby comments run to end of line, so a multi-line
//! comment needs a marker on every line it spans, and a comment sharing its
//! line with code that continues past it cannot be projected at all.

use erb_overlay_syntax::Span;

use super::{FILLER, Projector};

/// Column offset of the `#` inside `<%#`.
const MARKER_OFFSET: usize = 2;

impl Projector<'_> {
    /// Project one comment tag, or leave it blanked when a marker would
    /// swallow code on a shared line.
    pub(super) fn project_comment(&mut self, tag: Span) {
        let start_line = self.index.line_of(tag.start);
        let end_line = self.index.line_of(tag.end - 1);
        if self.comment_suppressed(start_line, end_line) {
            return;
        }

        let marker_at = tag.start + MARKER_OFFSET;
        self.write(marker_at, b"#");
        let column = self.index.position(marker_at).column;

        for line in start_line + 1..=end_line {
            self.realign_line(line, column);
        }
    }

    /// A comment is suppressed when a non-comment code tag starts on one of
    /// its lines and ends on or after its last line: the marker would
    /// comment that code out.
    fn comment_suppressed(&self, start_line: usize, end_line: usize) -> bool {
        self.code_lines.iter().any(|&(code_start, code_end)| {
            code_start >= start_line && code_start <= end_line && code_end >= end_line
        })
    }

    /// Put a continuation-line marker at the comment's column when the
    /// line's leading filler run reaches it, else at the line's first byte.
    /// Lines holding only a terminator get no marker, the terminator wins.
    fn realign_line(&mut self, line: usize, column: usize) {
        let span = self.index.line_span(line);
        let mut end = span.end;
        while end > span.start && matches!(self.buf[end - 1], b'\n' | b'\r') {
            end -= 1;
        }
        if end == span.start {
            return;
        }

        let filler_run = self.buf[span.start..end]
            .iter()
            .take_while(|&&b| b == FILLER)
            .count();

        if filler_run >= column + 1 {
            self.buf[span.start + column] = b'#';
        } else {
            self.buf[span.start] = b'#';
        }
    }
}
