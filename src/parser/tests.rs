//! Unit tests for the parser module.

use pretty_assertions::assert_eq;

use super::{lookups::BindingPower, parser::parse};
use crate::{
    ast::{
        ast::{Node, NodeKind, NodeType},
        printer::pretty_print,
    },
    errors::errors::ErrorCategory,
    lexer::lexer::tokenize,
    Span,
};

fn parse_source(source: &str) -> Node {
    let tokens = tokenize(source.to_string()).unwrap();
    parse(tokens, source).unwrap()
}

fn root_items(node: &Node) -> &Vec<Node> {
    match &node.kind {
        NodeKind::Root(items) => items,
        other => panic!("expected root, got {:?}", other),
    }
}

#[test]
fn test_binding_power_order() {
    assert!(BindingPower::Lowest < BindingPower::Statement);
    assert!(BindingPower::Statement < BindingPower::Assignment);
    assert!(BindingPower::Assignment < BindingPower::ConditionalTerm);
    assert!(BindingPower::ConditionalTerm < BindingPower::ConditionalFactor);
    assert!(BindingPower::ConditionalFactor < BindingPower::Additive);
    assert!(BindingPower::Additive < BindingPower::Multiplicative);
    assert!(BindingPower::Multiplicative < BindingPower::Highest);
    assert_eq!(BindingPower::Highest.next(), BindingPower::Highest);
}

#[test]
fn test_parse_empty_source() {
    let root = parse_source("");
    assert!(root_items(&root).is_empty());
    assert_eq!(root.span, Span::new(0, 0));
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let root = parse_source("1 + 2 * 3");
    assert_eq!(pretty_print(&root), "(1 + (2 * 3))");

    let root = parse_source("1 * 2 + 3");
    assert_eq!(pretty_print(&root), "((1 * 2) + 3)");
}

#[test]
fn test_binary_operators_are_left_associative() {
    assert_eq!(pretty_print(&parse_source("a - b - c")), "((a - b) - c)");
    assert_eq!(pretty_print(&parse_source("a / b * c")), "((a / b) * c)");
}

#[test]
fn test_assignment_is_right_associative() {
    assert_eq!(pretty_print(&parse_source("a = b = c")), "(a = (b = c))");
    assert_eq!(pretty_print(&parse_source("a = b + 1")), "(a = (b + 1))");
}

#[test]
fn test_comparison_and_logical_precedence() {
    assert_eq!(
        pretty_print(&parse_source("a < b && c == d")),
        "((a < b) && (c == d))"
    );
}

#[test]
fn test_prefix_and_grouping() {
    assert_eq!(pretty_print(&parse_source("-a * b")), "(-a * b)");
    assert_eq!(pretty_print(&parse_source("-(a * b)")), "-(a * b)");
    assert_eq!(pretty_print(&parse_source("!x")), "!x");
}

#[test]
fn test_infix_span_covers_operands() {
    let root = parse_source("ab + cd");
    let expr = &root_items(&root)[0];
    assert_eq!(expr.span, Span::new(0, 7));
}

#[test]
fn test_grouping_span_covers_parentheses() {
    let root = parse_source("(a + b) * c");
    let product = &root_items(&root)[0];
    assert_eq!(product.span, Span::new(0, 11));

    match &product.kind {
        NodeKind::InfixOp { left, .. } => assert_eq!(left.span, Span::new(0, 7)),
        other => panic!("expected infix operation, got {:?}", other),
    }
}

#[test]
fn test_statement_wraps_expression() {
    let root = parse_source("a + b;");
    let items = root_items(&root);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].get_node_type(), NodeType::Statement);
    assert_eq!(items[0].span, Span::new(0, 6));
}

#[test]
fn test_parse_function_definition() {
    let source = "fn add(a: i32, b: i32) -> i32 { a + b }";
    let root = parse_source(source);
    let items = root_items(&root);

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].span, Span::new(0, source.len()));

    match &items[0].kind {
        NodeKind::FunctionDef {
            name,
            params,
            return_type,
            body,
        } => {
            assert_eq!(name.identifier(), Some("add"));
            assert_eq!(params.len(), 2);
            assert_eq!(params[0].name.identifier(), Some("a"));
            assert_eq!(params[1].type_expr.identifier(), Some("i32"));
            assert_eq!(return_type.identifier(), Some("i32"));

            let body = body.as_ref().unwrap();
            match &body.kind {
                NodeKind::Block {
                    statements,
                    trailing,
                } => {
                    assert!(statements.is_empty());
                    assert_eq!(
                        trailing.as_ref().unwrap().get_node_type(),
                        NodeType::InfixOp
                    );
                }
                other => panic!("expected block, got {:?}", other),
            }
        }
        other => panic!("expected function definition, got {:?}", other),
    }
}

#[test]
fn test_parse_forward_declaration() {
    let root = parse_source("fn f(x: int) -> int;");
    let items = root_items(&root);

    assert_eq!(
        items[0].node_types(),
        vec![
            NodeType::Statement,
            NodeType::FunctionDef,
            NodeType::Literal,
            NodeType::Literal,
            NodeType::Literal,
        ]
    );
}

#[test]
fn test_parse_variable_definition() {
    let root = parse_source("let x: i32 = 1 + 2;");
    let items = root_items(&root);

    match &items[0].kind {
        NodeKind::Statement(inner) => match &inner.kind {
            NodeKind::VariableDef {
                name,
                type_expr,
                initializer,
            } => {
                assert_eq!(name.identifier(), Some("x"));
                assert_eq!(name.span, Span::new(4, 5));
                assert_eq!(type_expr.identifier(), Some("i32"));
                assert_eq!(
                    initializer.as_ref().unwrap().get_node_type(),
                    NodeType::InfixOp
                );
                assert_eq!(inner.span, Span::new(0, 18));
            }
            other => panic!("expected variable definition, got {:?}", other),
        },
        other => panic!("expected statement, got {:?}", other),
    }
}

#[test]
fn test_block_trailing_expression() {
    let root = parse_source("{ a; b }");
    match &root_items(&root)[0].kind {
        NodeKind::Block {
            statements,
            trailing,
        } => {
            assert_eq!(statements.len(), 1);
            assert_eq!(trailing.as_ref().unwrap().identifier(), Some("b"));
        }
        other => panic!("expected block, got {:?}", other),
    }

    let root = parse_source("{ a; }");
    match &root_items(&root)[0].kind {
        NodeKind::Block { trailing, .. } => assert!(trailing.is_none()),
        other => panic!("expected block, got {:?}", other),
    }
}

#[test]
fn test_block_item_ends_at_close_curly() {
    let root = parse_source("{ let a: i32 = 1; }\n(2 + 3);");
    let items = root_items(&root);

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].get_node_type(), NodeType::Block);
    assert_eq!(items[1].get_node_type(), NodeType::Statement);

    let root = parse_source("fn f() -> i32 { 1 }\n(f)(1);");
    assert_eq!(root_items(&root).len(), 2);

    // a trailing `;` still closes the item
    let root = parse_source("{ a };");
    assert_eq!(root_items(&root)[0].get_node_type(), NodeType::Statement);

    // inside parentheses a block is an ordinary operand
    let root = parse_source("({ 1 } + 2)");
    assert_eq!(root_items(&root)[0].get_node_type(), NodeType::InfixOp);
}

#[test]
fn test_parse_call_arguments() {
    let root = parse_source("f(1, g(2), x = 3)");
    match &root_items(&root)[0].kind {
        NodeKind::FunctionCall { callee, arguments } => {
            assert_eq!(callee.identifier(), Some("f"));
            assert_eq!(arguments.len(), 3);
            assert_eq!(arguments[1].get_node_type(), NodeType::FunctionCall);
            assert_eq!(arguments[2].get_node_type(), NodeType::InfixOp);
        }
        other => panic!("expected call, got {:?}", other),
    }
}

#[test]
fn test_missing_close_curly_reports_at_eof() {
    let source = "{ a; b";
    let tokens = tokenize(source.to_string()).unwrap();
    let error = parse(tokens, source).unwrap_err();

    assert_eq!(error.category(), ErrorCategory::Syntax);
    assert_eq!(error.get_span(), Span::point(source.len()));
}

#[test]
fn test_missing_prefix_rule() {
    let source = "a + ;";
    let tokens = tokenize(source.to_string()).unwrap();
    let error = parse(tokens, source).unwrap_err();

    assert_eq!(error.get_error_name(), "NoPrefixRule");
    assert_eq!(error.get_span(), Span::new(4, 5));
}

#[test]
fn test_let_requires_type() {
    let source = "let x = 1;";
    let tokens = tokenize(source.to_string()).unwrap();
    let error = parse(tokens, source).unwrap_err();

    assert_eq!(error.category(), ErrorCategory::Syntax);
    assert_eq!(error.get_span(), Span::new(6, 7));
}

#[test]
fn test_printed_tree_parses_to_same_structure() {
    let source = "fn f(a: i32, b: float) -> float { let c: float = a * -b; f(c, (a = 2)); c }\n\
                  let g: int = 1 + 2 * 3 - 4;\n\
                  { }";
    let root = parse_source(source);
    let printed = pretty_print(&root);
    let reparsed = parse_source(&printed);

    assert_eq!(root.node_types(), reparsed.node_types());
    assert_eq!(printed, pretty_print(&reparsed));
}
