//! Tests for EXPLAIN response parsing

use super::*;
use chlens_core::Value;
use pretty_assertions::assert_eq;
use serde_json::json;

fn text_result(lines: &[&str]) -> QueryResult {
    QueryResult::from_rows(
        &["explain"],
        lines.iter().map(|l| vec![Value::String(l.to_string())]).collect(),
    )
}

#[test]
fn test_empty_payload() {
    let result = parse("plan", &QueryResult::empty());
    assert_eq!(result.tree.id, "root");
    assert_eq!(result.tree.name, "Empty Result");
    assert!(result.tree.is_leaf());
    assert_eq!(result.raw_text, "");
    assert_eq!(result.raw_json, None);
}

#[test]
fn test_json_payload() {
    let document = json!({"name": "Agg", "rows": 10, "children": [{"name": "Scan"}]});
    let result = parse(
        "plan",
        &QueryResult::from_rows(&["explain"], vec![vec![Value::Json(document.clone())]]),
    );

    assert_eq!(result.tree.id, "root");
    assert_eq!(result.tree.children.len(), 1);
    let agg = &result.tree.children[0];
    assert_eq!(agg.id, "node-1");
    assert_eq!(agg.name, "Agg");
    assert_eq!(agg.metrics.and_then(|m| m.rows), Some(10));
    assert_eq!(agg.children.len(), 1);
    assert_eq!(agg.children[0].name, "Scan");
    assert_eq!(result.raw_json, Some(document.clone()));
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&result.raw_text).expect("raw text is JSON"),
        document
    );
}

#[test]
fn test_json_payload_envelope() {
    let document = json!([{
        "Plan": {
            "Node Type": "Expression",
            "Description": "(Projection + Before ORDER BY)",
            "Plans": [{"Node Type": "ReadFromMergeTree", "Description": "default.events"}]
        }
    }]);
    let result = parse(
        "plan",
        &QueryResult::from_rows(&["explain"], vec![vec![Value::Json(document)]]),
    );

    let expression = &result.tree.children[0];
    assert_eq!(expression.node_type, "Expression");
    assert_eq!(expression.children[0].node_type, "ReadFromMergeTree");
    assert_eq!(result.tree.node_count(), 3);
}

#[test]
fn test_text_payload() {
    let result = parse("plan", &text_result(&["A", "  B", "  C", "D"]));

    assert_eq!(result.kind, PlanKind::Plan);
    assert_eq!(result.tree.name, "Plan");
    assert_eq!(result.raw_text, "A\n  B\n  C\nD");
    assert_eq!(result.raw_json, None);
    let a = &result.tree.children[0];
    assert_eq!(a.name, "A");
    assert_eq!(a.children.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(), vec!["B", "C"]);
    assert_eq!(result.tree.children[1].name, "D");
}

#[test]
fn test_generic_rows_are_read_as_text() {
    let result = parse(
        "ast",
        &QueryResult::from_rows(
            &["node"],
            vec![
                vec![Value::String("SelectWithUnionQuery (children 1)".into())],
                vec![Value::String(" ExpressionList (children 1)".into())],
            ],
        ),
    );

    assert_eq!(result.kind, PlanKind::Ast);
    assert_eq!(result.tree.name, "AST");
    let select = &result.tree.children[0];
    assert_eq!(select.name, "children 1");
    assert_eq!(select.node_type, "SelectWithUnionQuery");
    assert_eq!(select.children[0].node_type, "ExpressionList");
}

#[test]
fn test_unknown_hint_defaults_to_plan() {
    let result = parse("not-a-kind", &text_result(&["Expression (Projection)"]));
    assert_eq!(result.kind, PlanKind::Plan);
    assert_eq!(result.tree.children[0].name, "Projection");
}

#[test]
fn test_settings_are_honoured() {
    let parser = PlanParser::new(ExplainSettings {
        payload_field: "plan".to_string(),
        default_indent_width: 4,
        empty_result_label: "Nothing".to_string(),
    });

    assert_eq!(parser.parse("plan", &QueryResult::empty()).tree.name, "Nothing");

    let result = parser.parse(
        "plan",
        &QueryResult::from_rows(&["plan"], vec![vec![Value::Json(json!({"name": "X"}))]]),
    );
    assert_eq!(result.tree.children[0].name, "X");
}

#[test]
fn test_unstructured_text_still_yields_a_tree() {
    let result = parse("syntax", &text_result(&["SELECT 1", "FROM system.one"]));
    assert_eq!(result.tree.node_count(), 3);
    assert_eq!(result.tree.children[0].node_type, "SELECT");
}

#[test]
fn test_result_serialization() {
    let result = parse("pipeline", &text_result(&["(Expression)"]));
    let value = serde_json::to_value(&result).expect("serializes");
    assert_eq!(value["kind"], "pipeline");
    assert_eq!(value["rawText"], "(Expression)");
    assert_eq!(value["rawJson"], serde_json::Value::Null);
    assert_eq!(value["tree"]["children"][0]["type"], "Step");
}
