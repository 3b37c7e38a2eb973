//! Tests for plan kind detection

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_from_hint_accepts_every_marker() {
    for kind in PlanKind::ALL {
        assert_eq!(PlanKind::from_hint(kind.marker()), kind);
        assert_eq!(PlanKind::from_hint(&kind.marker().to_uppercase()), kind);
    }
}

#[test]
fn test_from_hint_underscore_spelling() {
    assert_eq!(PlanKind::from_hint("table_override"), PlanKind::TableOverride);
    assert_eq!(PlanKind::from_hint("QUERY_TREE"), PlanKind::QueryTree);
    assert_eq!(PlanKind::from_hint("  query   tree "), PlanKind::QueryTree);
}

#[test]
fn test_from_hint_defaults_to_plan() {
    assert_eq!(PlanKind::from_hint(""), PlanKind::Plan);
    assert_eq!(PlanKind::from_hint("analyze"), PlanKind::Plan);
}

#[test]
fn test_detect_explicit_kinds() {
    assert_eq!(PlanKind::detect("EXPLAIN AST SELECT 1"), PlanKind::Ast);
    assert_eq!(PlanKind::detect("EXPLAIN SYNTAX SELECT 1"), PlanKind::Syntax);
    assert_eq!(PlanKind::detect("EXPLAIN ESTIMATE SELECT * FROM t"), PlanKind::Estimate);
    assert_eq!(PlanKind::detect("  explain\n  pipeline header = 1 select 1"), PlanKind::Pipeline);
    assert_eq!(
        PlanKind::detect("EXPLAIN TABLE OVERRIDE mysql('h', 'db', 't', 'u', 'p') PARTITION BY x"),
        PlanKind::TableOverride
    );
    assert_eq!(PlanKind::detect("EXPLAIN QUERY TREE SELECT 1"), PlanKind::QueryTree);
}

#[test]
fn test_detect_plan_and_indexes() {
    assert_eq!(PlanKind::detect("EXPLAIN SELECT 1"), PlanKind::Plan);
    assert_eq!(PlanKind::detect("EXPLAIN PLAN actions = 1 SELECT 1"), PlanKind::Plan);
    assert_eq!(PlanKind::detect("EXPLAIN PLAN indexes = 1 SELECT * FROM t"), PlanKind::Indexes);
    assert_eq!(
        PlanKind::detect("EXPLAIN actions=1, indexes=1 SELECT * FROM t"),
        PlanKind::Indexes
    );
}

#[test]
fn test_detect_non_explain_queries() {
    assert_eq!(PlanKind::detect("SELECT 1"), PlanKind::Plan);
    assert_eq!(PlanKind::detect("EXPLAINED"), PlanKind::Plan);
    assert_eq!(PlanKind::detect(""), PlanKind::Plan);
}

#[test]
fn test_display_names() {
    assert_eq!(PlanKind::Ast.to_string(), "AST");
    assert_eq!(PlanKind::TableOverride.to_string(), "Table Override");
    assert_eq!(PlanKind::default(), PlanKind::Plan);
}
