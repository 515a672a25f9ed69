//! Source location utilities for converting byte offsets to line/column positions
//!
//! Spans are stored as byte offsets; diagnostics and lookups that face a human
//! convert them through [`SourceLocation`]. Columns are byte columns.

use super::span::{Position, Span};

/// Provides fast conversion between byte offsets and line/column positions
#[derive(Debug, Clone)]
pub struct SourceLocation {
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
    len: usize,
}

impl SourceLocation {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];

        for (byte_pos, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(byte_pos + 1);
            }
        }

        Self {
            line_starts,
            len: source.len(),
        }
    }

    /// Convert a byte offset to a line/column position
    pub fn byte_to_position(&self, byte_offset: usize) -> Position {
        let line = self
            .line_starts
            .binary_search(&byte_offset)
            .unwrap_or_else(|i| i - 1);

        let column = byte_offset - self.line_starts[line];

        Position::new(line, column)
    }

    /// Convert a line/column position back to a byte offset.
    ///
    /// Returns `None` when the line does not exist or the column runs past the
    /// end of the source.
    pub fn position_to_byte(&self, position: Position) -> Option<usize> {
        let start = self.line_start(position.line)?;
        let offset = start + position.column;
        let line_end = self
            .line_start(position.line + 1)
            .unwrap_or(self.len + 1);
        (offset < line_end && offset <= self.len).then_some(offset)
    }

    /// Start and end positions of a span
    pub fn span_to_positions(&self, span: Span) -> (Position, Position) {
        (
            self.byte_to_position(span.start),
            self.byte_to_position(span.end),
        )
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }
}
