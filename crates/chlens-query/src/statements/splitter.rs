//! Buffer to statement segmentation

use super::scanner::{ScannerState, Transition};
use serde::Serialize;

/// One semicolon-delimited statement and its source span.
///
/// Positions are 1-based. The span starts at the first non-whitespace
/// character and ends on the character just before the terminating semicolon,
/// which is never part of it. A statement cut off by the end of the buffer
/// ends on its last non-whitespace character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statement {
    /// Trimmed statement text, without the delimiter
    pub text: String,
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl Statement {
    /// Start position as `(line, column)`
    pub fn start(&self) -> (u32, u32) {
        (self.start_line, self.start_column)
    }

    /// End position as `(line, column)`
    pub fn end(&self) -> (u32, u32) {
        (self.end_line, self.end_column)
    }

    /// True if the cursor lies within the span, both ends inclusive
    pub fn contains(&self, line: u32, column: u32) -> bool {
        let cursor = (line, column);
        self.start() <= cursor && cursor <= self.end()
    }
}

/// Text and span bookkeeping for the statement being scanned
#[derive(Debug, Default)]
struct Pending {
    text: String,
    start: Option<(u32, u32)>,
    /// Last non-whitespace position
    last: (u32, u32),
    /// Last position consumed, whitespace included
    consumed: (u32, u32),
}

impl Pending {
    fn push(&mut self, ch: char, position: (u32, u32)) {
        self.text.push(ch);
        if !ch.is_whitespace() {
            if self.start.is_none() {
                self.start = Some(position);
            }
            self.last = position;
        }
        self.consumed = position;
    }

    /// Closes the statement on a semicolon
    fn close(&mut self) -> Option<Statement> {
        let end = self.consumed;
        self.take(end)
    }

    /// Closes whatever remains at the end of the buffer
    fn finish(&mut self) -> Option<Statement> {
        let end = self.last;
        self.take(end)
    }

    fn take(&mut self, end: (u32, u32)) -> Option<Statement> {
        let pending = std::mem::take(self);
        let start = pending.start?;
        let text = pending.text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Statement {
            text: text.to_string(),
            start_line: start.0,
            start_column: start.1,
            end_line: end.0,
            end_column: end.1,
        })
    }
}

/// Splits a buffer into statements in source order.
///
/// The scan is total: unterminated quotes or comments simply run to the end
/// of the buffer, and whatever remains becomes the final statement. Empty or
/// whitespace-only input yields no statements.
pub fn split(buffer: &str) -> Vec<Statement> {
    let chars: Vec<char> = buffer.chars().collect();
    let mut state = ScannerState::default();
    let mut pending = Pending::default();
    let mut statements = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        let next = chars.get(i + 1).copied();

        match state.classify(ch, next) {
            Transition::Delimiter => {
                if let Some(statement) = pending.close() {
                    tracing::trace!(
                        line = statement.start_line,
                        column = statement.start_column,
                        "statement closed"
                    );
                    statements.push(statement);
                }
                state.advance(ch);
                i += 1;
            }
            Transition::Consume(width) => {
                for &c in &chars[i..(i + width).min(chars.len())] {
                    pending.push(c, state.position());
                    state.advance(c);
                }
                i += width;
            }
        }
    }

    if let Some(statement) = pending.finish() {
        statements.push(statement);
    }

    if !state.is_idle() {
        tracing::debug!(?state, "buffer ended inside a literal or comment");
    }
    tracing::debug!(
        statements = statements.len(),
        chars = chars.len(),
        "split buffer"
    );

    statements
}

/// Splits a buffer and returns only the statement texts
pub fn split_statements(buffer: &str) -> Vec<String> {
    split(buffer).into_iter().map(|s| s.text).collect()
}
