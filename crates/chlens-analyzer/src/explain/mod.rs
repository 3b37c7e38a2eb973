//! EXPLAIN Output Parser Module
//!
//! Normalizes the result of an EXPLAIN query into one tree of [`PlanNode`]s,
//! whatever shape the server returned:
//! - a JSON document in the plan column (`EXPLAIN json = 1`)
//! - operator-per-line text with dialect-specific indentation
//! - any other row shape, read from its first column
//!
//! Parsing is total. Unrecognized payloads degrade to a flatter tree rather
//! than an error, and the raw text is always kept for display.
//!
//! # Example
//!
//! ```
//! use chlens_analyzer::explain::parse;
//! use chlens_core::{QueryResult, Value};
//!
//! let result = QueryResult::from_rows(
//!     &["explain"],
//!     vec![
//!         vec![Value::String("Expression (Projection)".into())],
//!         vec![Value::String("  ReadFromMergeTree (default.events)".into())],
//!     ],
//! );
//!
//! let explain = parse("plan", &result);
//! let projection = &explain.tree.children[0];
//! assert_eq!(projection.name, "Projection");
//! assert_eq!(projection.node_type, "Expression");
//! assert_eq!(projection.children[0].name, "default.events");
//! ```

pub mod json;
pub mod kind;
pub mod payload;
pub mod plan;
pub mod text;

pub use json::{build_json_node, unwrap_envelope};
pub use kind::PlanKind;
pub use payload::PlanPayload;
pub use plan::{ExplainResult, Metrics, NodeIds, PlanNode, PlanNodeIterator};
pub use text::{TextLine, build_text_tree, detect_indent_unit, parse_text_line};

use chlens_core::{ExplainSettings, QueryResult};

/// Parses EXPLAIN responses according to a set of [`ExplainSettings`]
#[derive(Debug, Clone, Default)]
pub struct PlanParser {
    settings: ExplainSettings,
}

impl PlanParser {
    pub fn new(settings: ExplainSettings) -> Self {
        Self { settings }
    }

    /// Parses a query result. `plan_kind_hint` names the requested kind and
    /// falls back to [`PlanKind::Plan`] when unrecognized.
    pub fn parse(&self, plan_kind_hint: &str, result: &QueryResult) -> ExplainResult {
        let kind = PlanKind::from_hint(plan_kind_hint);
        let payload = PlanPayload::classify(result, &self.settings.payload_field);
        self.parse_payload(kind, payload)
    }

    /// Builds the tree for an already classified payload
    pub fn parse_payload(&self, kind: PlanKind, payload: PlanPayload) -> ExplainResult {
        let mode = payload.mode();
        let mut ids = NodeIds::new();

        let result = match payload {
            PlanPayload::Empty => ExplainResult {
                kind,
                tree: PlanNode::root(self.settings.empty_result_label.as_str()),
                raw_text: String::new(),
                raw_json: None,
            },
            PlanPayload::Json(document) => {
                let node = build_json_node(unwrap_envelope(&document), None, &mut ids);
                ExplainResult {
                    kind,
                    tree: PlanNode::root(kind.display_name()).with_child(node),
                    raw_text: serde_json::to_string_pretty(&document).unwrap_or_default(),
                    raw_json: Some(document),
                }
            }
            PlanPayload::Text(text) => {
                let tree = build_text_tree(
                    &text,
                    kind,
                    self.settings.default_indent_width,
                    PlanNode::root(kind.display_name()),
                    &mut ids,
                );
                ExplainResult {
                    kind,
                    tree,
                    raw_text: text,
                    raw_json: None,
                }
            }
        };

        tracing::debug!(
            kind = %kind,
            mode,
            nodes = ids.issued(),
            "parsed explain output"
        );
        result
    }
}

/// Parses a query result with the default settings
pub fn parse(plan_kind_hint: &str, result: &QueryResult) -> ExplainResult {
    PlanParser::default().parse(plan_kind_hint, result)
}

#[cfg(test)]
mod tests;
