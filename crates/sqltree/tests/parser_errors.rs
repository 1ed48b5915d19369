//! Tests for parser error cases.

mod common;
use common::*;

use sqltree::{parse_with_options, ParseError, ParseOptions, Parser};

#[test]
fn error_empty_input() {
    assert_eq!(parse_err(""), ParseError::EmptyInput);
    assert_eq!(parse_err("  \n\t "), ParseError::EmptyInput);
}

#[test]
fn error_incomplete_select() {
    assert!(parse_err("SELECT").is_syntax());
}

#[test]
fn error_missing_select() {
    let err = parse_err("FROM t");
    assert!(err.to_string().contains("expected 'SELECT'"));
}

#[test]
fn error_unexpected_keyword() {
    assert!(parse_err("DROP TABLE users").is_syntax());
}

#[test]
fn error_unclosed_paren() {
    let err = parse_err("SELECT (1 + 2 FROM t");
    assert!(err.to_string().contains("unmatched parenthesis"));
    assert_eq!(err.position(), Some((1, 8)));
}

#[test]
fn error_incomplete_where() {
    assert!(parse_err("SELECT a FROM t WHERE").is_syntax());
    assert!(parse_err("SELECT a FROM t WHERE a = 1 OR").is_syntax());
}

#[test]
fn error_incomplete_order_by() {
    assert!(parse_err("SELECT a FROM t ORDER BY").is_syntax());
    assert!(parse_err("SELECT a FROM t ORDER BY a,").is_syntax());
}

#[test]
fn error_position_on_later_line() {
    let err = parse_err("SELECT a,\n  FROM t");
    assert_eq!(err.position(), Some((2, 3)));
    assert_eq!(
        err.to_string(),
        "Syntax error at line 2, column 3: expected an operand, found 'FROM'"
    );
}

#[test]
fn error_second_statement() {
    assert!(parse_err("SELECT a FROM t; SELECT b FROM u").is_syntax());
}

#[test]
fn error_malformed_number_is_lexical() {
    let err = parse_err("SELECT 1R2D2 FROM t");
    assert!(err.is_lex());
    assert_eq!(err.position(), Some((1, 8)));
    assert!(err.to_string().starts_with("Lexical error: malformed number"));
}

#[test]
fn error_unrecognized_character() {
    let err = parse_err("SELECT a FROM t WHERE a # 1");
    assert!(err.is_lex());
}

#[test]
fn error_unterminated_string() {
    assert!(parse_err("SELECT a FROM t WHERE a = 'open").is_lex());
}

#[test]
fn lexical_errors_surface_at_construction() {
    assert!(Parser::new("SELECT 12abc FROM t").unwrap_err().is_lex());
}

#[test]
fn depth_limit_from_options() {
    let options = ParseOptions::new().with_max_depth(2);
    let err = parse_with_options("SELECT ((((a)))) FROM t", &options).unwrap_err();
    assert!(matches!(
        err,
        ParseError::DepthLimitExceeded { limit: 2, .. }
    ));
    assert!(err.is_syntax());

    assert!(parse_with_options("SELECT ((a)) FROM t", &options).is_ok());
    parse("SELECT ((((a)))) FROM t");
}

#[test]
fn depth_limit_on_subqueries() {
    let options = ParseOptions::new().with_max_depth(1);
    let sql = "SELECT a FROM (SELECT b FROM (SELECT c FROM t))";
    let err = parse_with_options(sql, &options).unwrap_err();
    assert!(matches!(err, ParseError::DepthLimitExceeded { .. }));
}

#[test]
fn deep_nesting_fails_cleanly() {
    let depth = 1000;
    let sql = format!("SELECT {}a{} FROM t", "(".repeat(depth), ")".repeat(depth));
    let err = parse_err(&sql);
    assert!(matches!(err, ParseError::DepthLimitExceeded { .. }));
}

#[test]
fn options_from_json() {
    let options: ParseOptions = serde_json::from_str(r#"{"max_depth": 1}"#).unwrap();
    assert!(parse_with_options("SELECT SUM((a)) FROM t", &options).is_err());
    assert!(parse_with_options("SELECT SUM(a) FROM t", &options).is_ok());
}
