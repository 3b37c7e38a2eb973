//! Tests for the indentation folder and line patterns

use super::*;
use pretty_assertions::assert_eq;

fn fold(text: &str, kind: PlanKind) -> PlanNode {
    build_text_tree(text, kind, 2, PlanNode::root(kind.display_name()), &mut NodeIds::new())
}

fn names(node: &PlanNode) -> Vec<&str> {
    node.children.iter().map(|c| c.name.as_str()).collect()
}

mod line_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wrapped_line_is_step() {
        let line = parse_text_line("(Expression)");
        assert_eq!(line.name, "Expression");
        assert_eq!(line.node_type, STEP_TYPE);
        assert_eq!(line.metrics, None);
    }

    #[test]
    fn test_prefix_with_parenthetical() {
        let line = parse_text_line("Expression (Projection)");
        assert_eq!(line.name, "Projection");
        assert_eq!(line.node_type, "Expression");
    }

    #[test]
    fn test_trailing_text_after_group_uses_whole_line() {
        let line = parse_text_line("ReadFromMergeTree (default.t) rows=10");
        assert_eq!(line.name, "ReadFromMergeTree (default.t) rows=10");
        assert_eq!(line.node_type, "ReadFromMergeTree");
        assert_eq!(line.metrics.and_then(|m| m.rows), Some(10));
    }

    #[test]
    fn test_nested_parenthetical_keeps_inner_group() {
        let line = parse_text_line("Expression ((Projection + Before ORDER BY))");
        assert_eq!(line.name, "(Projection + Before ORDER BY)");
        assert_eq!(line.node_type, "Expression");
    }

    #[test]
    fn test_empty_parenthetical_falls_back_to_prefix() {
        let line = parse_text_line("Limit ()");
        assert_eq!(line.name, "Limit");
        assert_eq!(line.node_type, "Limit");
    }

    #[test]
    fn test_plain_line_uses_first_word_as_type() {
        let line = parse_text_line("MergeTreeSelect(pool: ReadPool) 0 → 1");
        assert_eq!(line.name, "MergeTreeSelect(pool: ReadPool) 0 → 1");
        assert_eq!(line.node_type, "MergeTreeSelect(pool:");

        let line = parse_text_line("ExpressionTransform × 4");
        assert_eq!(line.name, "ExpressionTransform × 4");
        assert_eq!(line.node_type, "ExpressionTransform");
    }

    #[test]
    fn test_two_groups_are_not_a_wrapped_line() {
        let line = parse_text_line("(A) (B)");
        assert_eq!(line.name, "(A) (B)");
        assert_eq!(line.node_type, "(A)");
    }

    #[test]
    fn test_metrics_annotations() {
        let line = parse_text_line("ReadFromMergeTree (events) rows=1200 bytes=4096 time=0.5");
        let metrics = line.metrics.expect("metrics");
        assert_eq!(metrics.rows, Some(1200));
        assert_eq!(metrics.bytes, Some(4096));
        assert_eq!(metrics.time, Some(0.5));
        assert_eq!(metrics.cpu_time, None);

        let line = parse_text_line("Aggregating cpu_time = 1.25");
        let metrics = line.metrics.expect("metrics");
        assert_eq!(metrics.cpu_time, Some(1.25));
        assert_eq!(metrics.time, None);
    }
}

mod indent_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_indent_unit_from_first_indented_line() {
        assert_eq!(detect_indent_unit(["A", "    B", "  C"], 2), 4);
        assert_eq!(detect_indent_unit(["A", "\tB"], 2), 1);
    }

    #[test]
    fn test_indent_unit_default() {
        assert_eq!(detect_indent_unit(["A", "B"], 2), 2);
        assert_eq!(detect_indent_unit(Vec::<&str>::new(), 3), 3);
        assert_eq!(detect_indent_unit(["A"], 0), 1);
    }
}

mod fold_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_indentation_fold() {
        let tree = fold("A\n  B\n  C\nD", PlanKind::Plan);
        assert_eq!(names(&tree), vec!["A", "D"]);
        assert_eq!(names(&tree.children[0]), vec!["B", "C"]);
        assert!(tree.children[1].is_leaf());
    }

    #[test]
    fn test_fold_assigns_pre_order_ids() {
        let tree = fold("A\n  B\n    C\n  D\nE", PlanKind::Plan);
        let ids: Vec<&str> = tree.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["root", "node-1", "node-2", "node-3", "node-4", "node-5"]);
    }

    #[test]
    fn test_fold_with_four_space_unit() {
        let tree = fold("A\n    B\n        C\n    D", PlanKind::Plan);
        let a = &tree.children[0];
        assert_eq!(names(a), vec!["B", "D"]);
        assert_eq!(names(&a.children[0]), vec!["C"]);
    }

    #[test]
    fn test_fold_tolerates_level_jumps() {
        let tree = fold("A\n  B\n        C\n  D", PlanKind::Plan);
        let a = &tree.children[0];
        assert_eq!(names(a), vec!["B", "D"]);
        assert_eq!(names(&a.children[0]), vec!["C"]);
    }

    #[test]
    fn test_fold_skips_blank_lines() {
        let tree = fold("\nA\n\n   \n  B\n", PlanKind::Plan);
        assert_eq!(names(&tree), vec!["A"]);
        assert_eq!(names(&tree.children[0]), vec!["B"]);
    }

    #[test]
    fn test_fold_strips_kind_banner() {
        let tree = fold("PIPELINE\n(Expression)\nExpressionTransform", PlanKind::Pipeline);
        assert_eq!(names(&tree), vec!["Expression", "ExpressionTransform"]);
        assert_eq!(tree.children[0].node_type, STEP_TYPE);
    }

    #[test]
    fn test_fold_strips_explain_banner_only_once() {
        let tree = fold("explain\nexplain\nA", PlanKind::Ast);
        assert_eq!(names(&tree), vec!["explain", "A"]);
    }

    #[test]
    fn test_fold_strips_first_line_starting_with_kind_marker() {
        let tree = fold("AST\nSelectWithUnionQuery\n  ExpressionList\nAstLiteral", PlanKind::Ast);
        assert_eq!(names(&tree), vec!["SelectWithUnionQuery", "AstLiteral"]);
        assert_eq!(names(&tree.children[0]), vec!["ExpressionList"]);

        let tree = fold("ASTSelectQuery\nTablesInSelectQuery", PlanKind::Ast);
        assert_eq!(names(&tree), vec!["TablesInSelectQuery"]);
    }

    #[test]
    fn test_fold_strips_explain_first_line_for_any_kind() {
        let tree = fold("EXPLAIN header = 1\nExpression (Projection)", PlanKind::Plan);
        assert_eq!(names(&tree), vec!["Projection"]);
    }

    #[test]
    fn test_fold_keeps_first_line_of_another_kind() {
        let tree = fold("Expression\n  ReadFromStorage", PlanKind::Ast);
        assert_eq!(names(&tree), vec!["Expression"]);
    }

    #[test]
    fn test_fold_pipeline_output() {
        let text = "(Expression)\nExpressionTransform\n  (ReadFromMergeTree)\n  MergeTreeInOrder 0 → 1";
        let tree = fold(text, PlanKind::Pipeline);
        assert_eq!(names(&tree), vec!["Expression", "ExpressionTransform"]);
        assert_eq!(
            names(&tree.children[1]),
            vec!["ReadFromMergeTree", "MergeTreeInOrder 0 → 1"]
        );
    }

    #[test]
    fn test_fold_empty_text_keeps_root() {
        let tree = fold("", PlanKind::Plan);
        assert_eq!(tree.id, "root");
        assert_eq!(tree.name, "Plan");
        assert!(tree.is_leaf());
    }

    #[test]
    fn test_indented_first_line_is_still_a_root_child() {
        let tree = fold("  A\n  B", PlanKind::Plan);
        assert_eq!(names(&tree), vec!["A", "B"]);
    }
}
