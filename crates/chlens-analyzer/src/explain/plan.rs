//! Plan Tree Model - Normalized nodes produced by every EXPLAIN dialect
//!
//! Both the JSON walker and the indentation folder produce the same
//! [`PlanNode`] shape so a single view can render either.

use super::kind::PlanKind;
use serde::Serialize;
use serde_json::{Map, Value};

/// Id of the synthetic root node
pub const ROOT_ID: &str = "root";

/// Type assigned to the synthetic root node
pub const ROOT_TYPE: &str = "Root";

/// Result of parsing one EXPLAIN response
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainResult {
    /// Plan kind the response was parsed as
    pub kind: PlanKind,
    /// Normalized tree; the root is always synthetic
    pub tree: PlanNode,
    /// Plan text as received (pretty-printed JSON for JSON payloads)
    pub raw_text: String,
    /// JSON document as received, for JSON payloads
    pub raw_json: Option<Value>,
}

/// One node of the normalized plan tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanNode {
    /// `root` for the synthetic root, `node-N` in pre-order otherwise
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub children: Vec<PlanNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
    /// Source object for nodes built from JSON objects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_data: Option<Value>,
}

impl PlanNode {
    /// Creates a childless node
    pub fn new(id: impl Into<String>, name: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            node_type: node_type.into(),
            children: Vec::new(),
            metrics: None,
            raw_data: None,
        }
    }

    /// Creates the synthetic root node
    pub fn root(name: impl Into<String>) -> Self {
        Self::new(ROOT_ID, name, ROOT_TYPE)
    }

    /// Sets the metrics
    pub fn with_metrics(mut self, metrics: Option<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Adds a child node
    pub fn with_child(mut self, child: PlanNode) -> Self {
        self.children.push(child);
        self
    }

    /// Returns the total number of nodes in this subtree (including self)
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }

    /// Returns the maximum depth of this subtree
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(|c| c.depth()).max().unwrap_or(0)
    }

    /// Returns true if this is a leaf node (no children)
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns an iterator over this subtree in pre-order
    pub fn iter(&self) -> PlanNodeIterator<'_> {
        PlanNodeIterator { stack: vec![self] }
    }

    /// Finds a node by id within this subtree
    pub fn find(&self, id: &str) -> Option<&PlanNode> {
        self.iter().find(|n| n.id == id)
    }
}

/// Performance figures attached to a node. A field is present only when the
/// source supplied it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Metrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,
    /// Seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
    /// Seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_time: Option<f64>,
}

impl Metrics {
    /// True when no figure is present
    pub fn is_empty(&self) -> bool {
        self.rows.is_none() && self.bytes.is_none() && self.time.is_none() && self.cpu_time.is_none()
    }

    /// Returns `None` for an empty record
    pub fn non_empty(self) -> Option<Self> {
        (!self.is_empty()).then_some(self)
    }

    /// Harvests `rows`, `bytes`, `time` and `cpu_time` from a JSON object.
    ///
    /// Numbers and numeric strings are accepted (64-bit integers are often
    /// quoted in JSON output).
    pub fn from_object(object: &Map<String, Value>) -> Option<Self> {
        Metrics {
            rows: object.get("rows").and_then(json_u64),
            bytes: object.get("bytes").and_then(json_u64),
            time: object.get("time").and_then(json_f64),
            cpu_time: object.get("cpu_time").and_then(json_f64),
        }
        .non_empty()
    }
}

fn json_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn json_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Hands out `node-1`, `node-2`, ... within one parse call.
///
/// Builders take an id before building a node's children, which makes the
/// numbering pre-order.
#[derive(Debug, Default)]
pub struct NodeIds {
    issued: usize,
}

impl NodeIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next id
    pub fn next_id(&mut self) -> String {
        self.issued += 1;
        format!("node-{}", self.issued)
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> usize {
        self.issued
    }
}

/// Iterator for traversing plan nodes depth-first
pub struct PlanNodeIterator<'a> {
    stack: Vec<&'a PlanNode>,
}

impl<'a> Iterator for PlanNodeIterator<'a> {
    type Item = &'a PlanNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push children in reverse order so we visit them in order
        for child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some(node)
    }
}
