//! Statement segmentation module
//!
//! Splits an editor buffer into individually addressable statements. The
//! scanner ignores semicolons inside string literals, quoted identifiers and
//! comments, and records 1-based line/column spans for every statement.
//!
//! # Example
//!
//! ```
//! use chlens_query::statements::{find_statement_at, split};
//!
//! let statements = split("SELECT ';' ;\n\nSELECT 2;");
//! assert_eq!(statements.len(), 2);
//! assert_eq!(statements[0].text, "SELECT ';'");
//!
//! // A cursor on the blank line resolves to the statement above it
//! assert_eq!(find_statement_at(&statements, 2, 1), Some(0));
//! ```

mod cursor;
mod scanner;
mod splitter;

pub use cursor::{find_statement_at, statement_at};
pub use scanner::{ScannerState, Transition};
pub use splitter::{Statement, split, split_statements};
