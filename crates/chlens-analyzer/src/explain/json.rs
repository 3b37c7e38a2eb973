//! JSON plan documents
//!
//! Walks a JSON plan recursively. Objects contribute a name, a type,
//! metrics and children; arrays become synthetic `Pipeline` nodes; strings
//! and other scalars become leaves.

use super::plan::{Metrics, NodeIds, PlanNode};
use serde_json::{Map, Value};

/// Type used when neither the node nor any ancestor supplies one
pub const DEFAULT_NODE_TYPE: &str = "Expression";

/// Name and type of the synthetic node built for a JSON array
pub const PIPELINE: &str = "Pipeline";

/// Keys supplying a node's name, in priority order
const NAME_KEYS: &[&str] = &["name", "type", "description", "Node Type", "Description"];

/// Keys supplying a node's type, in priority order
const TYPE_KEYS: &[&str] = &["type", "kind", "Node Type"];

/// Keys holding child nodes; only the first one holding an array is used
const CHILD_KEYS: &[&str] = &["children", "inputs", "plans", "Plans"];

/// Builds the node for `value` and its whole subtree.
///
/// `parent_type` is the type inherited by nodes that do not declare their
/// own. Ids are drawn from `ids` before children are built.
pub fn build_json_node(value: &Value, parent_type: Option<&str>, ids: &mut NodeIds) -> PlanNode {
    let inherited = parent_type.unwrap_or(DEFAULT_NODE_TYPE);

    match value {
        Value::String(s) => PlanNode::new(ids.next_id(), s.as_str(), inherited),
        Value::Array(items) => {
            let mut node = PlanNode::new(ids.next_id(), PIPELINE, PIPELINE);
            node.children = items
                .iter()
                .map(|item| build_json_node(item, Some(PIPELINE), ids))
                .collect();
            node
        }
        Value::Object(object) => build_object_node(object, inherited, ids),
        scalar => PlanNode::new(ids.next_id(), scalar.to_string(), inherited),
    }
}

fn build_object_node(object: &Map<String, Value>, inherited: &str, ids: &mut NodeIds) -> PlanNode {
    let id = ids.next_id();
    let name = first_text(object, NAME_KEYS).unwrap_or_else(|| "Unknown".to_string());
    let node_type = first_text(object, TYPE_KEYS).unwrap_or_else(|| inherited.to_string());

    let children = CHILD_KEYS
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_array))
        .map(|items| {
            items
                .iter()
                .map(|item| build_json_node(item, Some(&node_type), ids))
                .collect()
        })
        .unwrap_or_default();

    PlanNode {
        id,
        name,
        node_type,
        children,
        metrics: Metrics::from_object(object),
        raw_data: Some(Value::Object(object.clone())),
    }
}

/// Text of the first key holding a non-empty string, number or boolean
fn first_text(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match object.get(*key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Strips the `[{"Plan": {...}}]` envelope emitted by `EXPLAIN json = 1`.
///
/// A one-element array holding a single-key `Plan` object, or such an object
/// on its own, is replaced by the inner plan. Anything else is returned as is.
pub fn unwrap_envelope(value: &Value) -> &Value {
    let candidate = match value {
        Value::Array(items) if items.len() == 1 => &items[0],
        other => other,
    };
    match candidate {
        Value::Object(object) if object.len() == 1 => object.get("Plan").unwrap_or(value),
        _ => value,
    }
}
