//! Cursor to statement resolution

use super::splitter::{Statement, split};

/// Finds the index of the statement a cursor belongs to.
///
/// A cursor inside a span resolves to that statement. A cursor in the gap
/// between statements (blank lines, the delimiter itself) resolves to the
/// nearest statement before it, or to the first statement when it sits
/// before all of them. Returns `None` only when there are no statements.
pub fn find_statement_at(statements: &[Statement], line: u32, column: u32) -> Option<usize> {
    if let Some(idx) = statements.iter().position(|s| s.contains(line, column)) {
        return Some(idx);
    }

    let cursor = (line, column);
    statements
        .iter()
        .rposition(|s| s.end() < cursor)
        .or_else(|| (!statements.is_empty()).then_some(0))
}

/// Splits `buffer` and returns the statement under the cursor
pub fn statement_at(buffer: &str, line: u32, column: u32) -> Option<Statement> {
    let mut statements = split(buffer);
    let idx = find_statement_at(&statements, line, column)?;
    Some(statements.swap_remove(idx))
}
