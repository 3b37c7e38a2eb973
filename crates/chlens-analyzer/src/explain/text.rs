//! Indented plan text
//!
//! Folds operator-per-line EXPLAIN text into a tree. The indentation width
//! differs between plan dialects, so the unit is taken from the first
//! indented line instead of being assumed.

use super::kind::PlanKind;
use super::plan::{Metrics, NodeIds, PlanNode};
use regex::Regex;
use std::sync::LazyLock;

/// Type given to lines wrapped entirely in parentheses
pub const STEP_TYPE: &str = "Step";

static METRIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(rows|bytes|time|cpu_time)\s*=\s*([0-9]+(?:\.[0-9]+)?)").expect("valid regex")
});

/// Name, type and metrics extracted from one plan line
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub name: String,
    pub node_type: String,
    pub metrics: Option<Metrics>,
}

/// Extracts name, type and metrics from a trimmed plan line.
///
/// - `(Expression)` → name `Expression`, type `Step`
/// - `Expression (Projection)` → name `Projection`, type `Expression`
/// - `MergeTreeSelect 0 → 1` → the whole line is the name, the first word the type
pub fn parse_text_line(line: &str) -> TextLine {
    let metrics = harvest_metrics(line);

    if line.starts_with('(') && closes_at_end(line) {
        return TextLine {
            name: line[1..line.len() - 1].trim().to_string(),
            node_type: STEP_TYPE.to_string(),
            metrics,
        };
    }

    if let Some(open) = line.find('(') {
        let prefix = line[..open].trim();
        let group = &line[open..];
        if !prefix.is_empty() && !prefix.contains(')') && closes_at_end(group) {
            let inner = group[1..group.len() - 1].trim();
            let name = if inner.is_empty() { prefix } else { inner };
            return TextLine {
                name: name.to_string(),
                node_type: prefix.to_string(),
                metrics,
            };
        }
    }

    TextLine {
        name: line.to_string(),
        node_type: line.split_whitespace().next().unwrap_or_default().to_string(),
        metrics,
    }
}

/// True when `text` starts with `(` and that parenthesis closes on the last
/// character
fn closes_at_end(text: &str) -> bool {
    let mut depth = 0usize;
    for (idx, ch) in text.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return idx + ch.len_utf8() == text.len();
                }
            }
            _ if depth == 0 => return false,
            _ => {}
        }
    }
    false
}

fn harvest_metrics(line: &str) -> Option<Metrics> {
    let mut metrics = Metrics::default();
    for caps in METRIC_RE.captures_iter(line) {
        let value = &caps[2];
        match &caps[1] {
            "rows" => metrics.rows = metrics.rows.or_else(|| value.parse().ok()),
            "bytes" => metrics.bytes = metrics.bytes.or_else(|| value.parse().ok()),
            "time" => metrics.time = metrics.time.or_else(|| value.parse().ok()),
            "cpu_time" => metrics.cpu_time = metrics.cpu_time.or_else(|| value.parse().ok()),
            _ => {}
        }
    }
    metrics.non_empty()
}

/// Number of leading whitespace characters
fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Indentation unit: the leading whitespace of the first indented line, or
/// `default_width` when no line is indented.
///
/// This is a heuristic. Text that mixes tabs and spaces has no single right
/// answer; every whitespace character counts as one column.
pub fn detect_indent_unit<'a>(lines: impl IntoIterator<Item = &'a str>, default_width: usize) -> usize {
    lines
        .into_iter()
        .map(leading_whitespace)
        .find(|&width| width > 0)
        .unwrap_or(default_width)
        .max(1)
}

/// True when `line` is a banner restating the plan kind
fn is_header(line: &str, kind: PlanKind) -> bool {
    let lowered = line.trim().to_lowercase();
    lowered.starts_with(kind.marker()) || lowered.starts_with("explain")
}

/// Folds plan text into children of `root`.
///
/// Blank lines are dropped and a leading banner line is skipped. Each line
/// becomes a child of the nearest preceding line with a smaller level, so
/// indentation jumps of several levels attach to the closest shallower
/// ancestor.
pub fn build_text_tree(
    text: &str,
    kind: PlanKind,
    default_indent_width: usize,
    root: PlanNode,
    ids: &mut NodeIds,
) -> PlanNode {
    let mut lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.first().is_some_and(|first| is_header(first, kind)) {
        lines.remove(0);
    }

    let unit = detect_indent_unit(lines.iter().copied(), default_indent_width);
    tracing::trace!(lines = lines.len(), unit, "folding plan text");

    let mut stack: Vec<(isize, PlanNode)> = vec![(-1, root)];
    for line in lines {
        let level = (leading_whitespace(line) / unit) as isize;
        let parsed = parse_text_line(line.trim());
        let node = PlanNode::new(ids.next_id(), parsed.name, parsed.node_type)
            .with_metrics(parsed.metrics);

        attach_down_to(&mut stack, level);
        stack.push((level, node));
    }

    attach_down_to(&mut stack, -1);
    // Only the root entry is left
    stack.swap_remove(0).1
}

/// Pops every entry at `level` or deeper, attaching each to the entry below
/// it. The bottom (root) entry is never popped.
fn attach_down_to(stack: &mut Vec<(isize, PlanNode)>, level: isize) {
    while stack.len() > 1 && stack.last().is_some_and(|(top, _)| *top >= level) {
        if let Some((_, child)) = stack.pop() {
            if let Some((_, parent)) = stack.last_mut() {
                parent.children.push(child);
            }
        }
    }
}

#[cfg(test)]
mod tests;
