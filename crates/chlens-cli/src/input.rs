//! Reading command input from files or stdin

use anyhow::{Context, Result};
use chlens_core::{QueryResult, Value};
use std::io::Read;
use std::path::Path;

/// Column name used when wrapping raw input into a result
const PLAN_COLUMN: &str = "explain";

/// Reads the whole file, or stdin when no path is given
pub fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

/// Turns EXPLAIN output captured from a client into a query result.
///
/// - a JSON array of objects is read as rows (`JSONEachRow`-style dumps)
/// - any other JSON document becomes a single structured plan cell
/// - anything else is plan text, one row per line
pub fn explain_rows(source: &str) -> Result<QueryResult> {
    match serde_json::from_str::<serde_json::Value>(source) {
        Ok(serde_json::Value::Array(items)) if items.iter().all(|i| i.is_object()) && !items.is_empty() => {
            QueryResult::from_json_rows(serde_json::Value::Array(items))
                .context("Failed to decode result rows")
        }
        Ok(document) if document.is_object() || document.is_array() => Ok(QueryResult::from_rows(
            &[PLAN_COLUMN],
            vec![vec![Value::Json(document)]],
        )),
        _ => Ok(QueryResult::from_rows(
            &[PLAN_COLUMN],
            source
                .lines()
                .map(|line| vec![Value::String(line.to_string())])
                .collect(),
        )),
    }
}

/// Parses a `LINE:COL` cursor argument
pub fn parse_cursor(value: &str) -> std::result::Result<(u32, u32), String> {
    let (line, column) = value
        .split_once(':')
        .ok_or_else(|| format!("expected LINE:COL, got `{}`", value))?;
    let line = line
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid line `{}`: {}", line, e))?;
    let column = column
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid column `{}`: {}", column, e))?;
    if line == 0 || column == 0 {
        return Err("line and column are 1-based".to_string());
    }
    Ok((line, column))
}
