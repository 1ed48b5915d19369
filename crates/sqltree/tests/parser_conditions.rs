//! Tests for WHERE/HAVING/ON conditions.

mod common;
use common::*;

use sqltree::NodeKind;

#[test]
fn single_expression() {
    let condition = parser("a.b > 45").parse_condition(0).unwrap();
    assert_eq!(condition.kind(), NodeKind::Condition);
    assert_eq!(condition.child_kinds(), vec![NodeKind::Expression]);
    assert_eq!(span(&condition), (0, 4));
}

#[test]
fn connective_with_parenthesized_term() {
    let condition = parser("a.b > 45 AND (5 != 3)").parse_condition(0).unwrap();
    assert_eq!(
        condition.child_kinds(),
        vec![NodeKind::Expression, NodeKind::Operator, NodeKind::Expression]
    );
    assert_eq!(condition.children()[1].text(), "AND");
    assert_eq!(span(&condition.children()[2]), (7, 9));
    assert_eq!(span(&condition), (0, 10));
}

#[test]
fn nested_sub_conditions() {
    let condition = parser("a.b > 45 AND ((5 != 3 OR b = c) OR v.bobo <> jojo)")
        .parse_condition(0)
        .unwrap();
    assert_eq!(
        condition.child_kinds(),
        vec![NodeKind::Expression, NodeKind::Operator, NodeKind::Condition]
    );
    assert_eq!(span(&condition), (0, 22));

    let outer = &condition.children()[2];
    assert_eq!(span(outer), (7, 21));
    assert_eq!(
        outer.child_kinds(),
        vec![NodeKind::Condition, NodeKind::Operator, NodeKind::Expression]
    );
    assert_eq!(outer.children()[1].text(), "OR");

    let inner = &outer.children()[0];
    assert_eq!(span(inner), (8, 14));
    assert_eq!(inner.children().len(), 3);
    assert_well_formed(&condition);
}

#[test]
fn parenthesized_expression_term() {
    let condition = parser("(a + b) * 2 > c AND d = 1").parse_condition(0).unwrap();
    assert_eq!(
        condition.child_kinds(),
        vec![NodeKind::Expression, NodeKind::Operator, NodeKind::Expression]
    );
    let first = &condition.children()[0];
    assert_eq!(first.children()[0].kind(), NodeKind::Parenthesis);
    assert_eq!(first.end_index(), 8);
}

#[test]
fn whole_condition_in_parentheses() {
    let condition = parser("(a = 1)").parse_condition(0).unwrap();
    assert_eq!(condition.child_kinds(), vec![NodeKind::Expression]);
    assert_eq!(span(&condition.children()[0]), (1, 3));
    assert_eq!(span(&condition), (0, 4));
}

#[test]
fn and_or_chain() {
    let condition = parser("a = 1 OR b = 2 AND c = 3").parse_condition(0).unwrap();
    let connectives: Vec<_> = condition
        .children_of(NodeKind::Operator)
        .map(|op| op.text())
        .collect();
    assert_eq!(connectives, vec!["OR", "AND"]);
    assert_eq!(condition.children_of(NodeKind::Expression).count(), 3);
}

#[test]
fn dangling_connective() {
    let err = parser("a.b > 45 AND").parse_condition(0).unwrap_err();
    assert!(err.to_string().contains("incomplete condition"));

    let err = parser("a.b > 45 AND (a.b = 5 AND)")
        .parse_condition(0)
        .unwrap_err();
    assert!(err.to_string().contains("incomplete condition"));
}

#[test]
fn sub_condition_must_fill_parentheses() {
    assert!(parser("a.b > 45 AND (a.b = 5 AND b > 4, k.f)")
        .parse_condition(0)
        .is_err());
}

#[test]
fn condition_at_keyword() {
    assert!(parser("WHERE a.g").parse_condition(0).is_err());
}

#[test]
fn where_with_negated_and_in_operators() {
    let condition = clause(
        "SELECT a FROM t WHERE a NOT IN (1, 2) AND b NOT LIKE 'x%' OR c IN (:p, ?)",
        NodeKind::Where,
    );
    let condition = &condition.children()[0];
    assert_eq!(condition.children().len(), 5);
    assert_well_formed(condition);
}

#[test]
fn between_is_flat() {
    let condition = clause("SELECT a FROM t WHERE a BETWEEN 1 AND 10", NodeKind::Where);
    assert_eq!(
        condition.children()[0].child_kinds(),
        vec![NodeKind::Expression, NodeKind::Operator, NodeKind::Expression]
    );
}
