//! Payload classification
//!
//! An EXPLAIN response is classified exactly once, before any structural
//! parsing, so the builders never branch on row shape.

use chlens_core::{QueryResult, Row, Value};
use serde_json::Value as JsonValue;

/// The shape of an EXPLAIN response
#[derive(Debug, Clone, PartialEq)]
pub enum PlanPayload {
    /// No rows came back
    Empty,
    /// The plan field of the first row holds a structured value
    Json(JsonValue),
    /// Plan text, one row per line
    Text(String),
}

impl PlanPayload {
    /// Classifies a query result.
    ///
    /// Precedence:
    /// 1. no rows → `Empty`
    /// 2. first row has `plan_field` holding a non-string value → `Json`
    /// 3. first row has `plan_field` holding a string → `Text` of every row's `plan_field`
    /// 4. otherwise → `Text` of every row's first column
    pub fn classify(result: &QueryResult, plan_field: &str) -> Self {
        let Some(first) = result.rows.first() else {
            return Self::Empty;
        };

        match first.get_by_name(plan_field) {
            Some(value) if value.is_structured() => Self::Json(value.to_json()),
            Some(_) => Self::Text(join_lines(&result.rows, |row| row.get_by_name(plan_field))),
            None => Self::Text(join_lines(&result.rows, |row| row.get(0))),
        }
    }

    /// Short label for logging
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Json(_) => "json",
            Self::Text(_) => "text",
        }
    }
}

fn join_lines<'a>(rows: &'a [Row], cell: impl Fn(&'a Row) -> Option<&'a Value>) -> String {
    rows.iter()
        .map(|row| cell(row).map(|v| v.as_text().into_owned()).unwrap_or_default())
        .collect::<Vec<_>>()
        .join("\n")
}
