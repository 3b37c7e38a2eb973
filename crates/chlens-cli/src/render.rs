//! Human-readable output for statements and plan trees

use chlens_analyzer::{ExplainResult, PlanNode};
use chlens_query::Statement;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use std::fmt::{self, Write};

/// Longest statement preview shown in the table
const PREVIEW_CHARS: usize = 60;

/// Renders statements as a table with their spans
pub fn statements_table(statements: &[Statement]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Start", "End", "Statement"]);

    for (idx, statement) in statements.iter().enumerate() {
        table.add_row(vec![
            (idx + 1).to_string(),
            format!("{}:{}", statement.start_line, statement.start_column),
            format!("{}:{}", statement.end_line, statement.end_column),
            preview(&statement.text),
        ]);
    }

    table.to_string()
}

fn preview(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= PREVIEW_CHARS {
        flat
    } else {
        let cut: String = flat.chars().take(PREVIEW_CHARS - 1).collect();
        format!("{}…", cut)
    }
}

/// Renders a plan tree with box-drawing guides
pub fn plan_tree(result: &ExplainResult) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{} [{}]", result.tree.name, result.kind)?;
    let count = result.tree.children.len();
    for (idx, child) in result.tree.children.iter().enumerate() {
        write_node(&mut out, child, "", idx + 1 == count)?;
    }
    Ok(out)
}

fn write_node(out: &mut impl Write, node: &PlanNode, prefix: &str, last: bool) -> fmt::Result {
    let branch = if last { "└── " } else { "├── " };
    write!(out, "{}{}{}", prefix, branch, node.name)?;
    if node.node_type != node.name {
        write!(out, " <{}>", node.node_type)?;
    }
    if let Some(metrics) = node.metrics {
        let mut parts = Vec::new();
        if let Some(rows) = metrics.rows {
            parts.push(format!("rows={}", rows));
        }
        if let Some(bytes) = metrics.bytes {
            parts.push(format!("bytes={}", bytes));
        }
        if let Some(time) = metrics.time {
            parts.push(format!("time={}s", time));
        }
        if let Some(cpu_time) = metrics.cpu_time {
            parts.push(format!("cpu_time={}s", cpu_time));
        }
        write!(out, " ({})", parts.join(", "))?;
    }
    writeln!(out)?;

    let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
    let count = node.children.len();
    for (idx, child) in node.children.iter().enumerate() {
        write_node(out, child, &child_prefix, idx + 1 == count)?;
    }
    Ok(())
}
