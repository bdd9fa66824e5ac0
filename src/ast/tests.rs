//! Unit tests for the syntax tree, its traversal and the printer.

use pretty_assertions::assert_eq;

use super::{
    ast::{Node, NodeType},
    printer::{pretty_print, pretty_print_typed},
    visitor::Visitor,
};
use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::type_checker::{type_check, InferenceMode},
    Span,
};

fn parse_source(source: &str) -> Node {
    let tokens = tokenize(source.to_string()).unwrap();
    parse(tokens, source).unwrap()
}

/// Records every node it reaches through the catch-all hook.
#[derive(Default)]
struct Recorder {
    visited: Vec<NodeType>,
}

impl Visitor for Recorder {
    fn visit_node(&mut self, node: &mut Node) -> Result<(), Error> {
        self.visited.push(node.get_node_type());
        node.traverse_inner(self)
    }
}

/// Counts calls without descending into them.
#[derive(Default)]
struct CallCounter {
    calls: usize,
}

impl Visitor for CallCounter {
    fn visit_function_call(&mut self, _node: &mut Node) -> Result<(), Error> {
        self.calls += 1;
        Ok(())
    }
}

/// Fails on the first identifier named `bad`.
struct Rejecter;

impl Visitor for Rejecter {
    fn visit_literal(&mut self, node: &mut Node) -> Result<(), Error> {
        if node.identifier() == Some("bad") {
            return Err(Error::new(
                ErrorImpl::UnknownIdentifier {
                    name: "bad".to_string(),
                },
                node.span,
            ));
        }
        Ok(())
    }
}

#[test]
fn test_traversal_order_matches_node_types() {
    let mut root = parse_source("fn f(a: i32) -> i32 { let b: i32 = a; b }\nf(1 + 2);");

    let mut recorder = Recorder::default();
    root.dispatch(&mut recorder).unwrap();

    assert_eq!(recorder.visited, root.node_types());
    assert_eq!(
        &recorder.visited[..4],
        &[
            NodeType::Root,
            NodeType::FunctionDef,
            NodeType::Literal,
            NodeType::Literal
        ]
    );
    // the return type comes after the body
    assert_eq!(recorder.visited[recorder.visited.len() - 7], NodeType::Literal);
}

#[test]
fn test_overridden_handler_stops_descent() {
    let mut root = parse_source("f(g(1), h(2));\nx;");

    let mut counter = CallCounter::default();
    root.dispatch(&mut counter).unwrap();

    assert_eq!(counter.calls, 1);
}

#[test]
fn test_visitor_error_aborts_traversal() {
    let mut root = parse_source("ok + bad;");

    let error = root.dispatch(&mut Rejecter).unwrap_err();
    assert_eq!(error.get_span(), Span::new(5, 8));
}

#[test]
fn test_find_and_children() {
    let root = parse_source("let v: int = w * 2;");

    let w = root.find(&|node| node.identifier() == Some("w")).unwrap();
    assert_eq!(w.span, Span::new(13, 14));
    assert_eq!(root.children().len(), 1);
    assert!(root.find(&|node| node.identifier() == Some("missing")).is_none());
}

#[test]
fn test_pretty_print_block_layout() {
    let root = parse_source("fn f(a: i32) -> i32 { let b: i32 = a + 1; b }");

    assert_eq!(
        pretty_print(&root),
        "fn f(a: i32) -> i32 {\n    let b: i32 = (a + 1);\n    b\n}"
    );
}

#[test]
fn test_pretty_print_literals() {
    let root = parse_source("g(\"hi\", 2.0, 3)");
    assert_eq!(pretty_print(&root), "g(\"hi\", 2.0, 3)");

    let root = parse_source("{}");
    assert_eq!(pretty_print(&root), "{ }");

    // escapes survive printing
    let source = "g(\"a\\\\nb\\t\")";
    assert_eq!(pretty_print(&parse_source(source)), source);
}

#[test]
fn test_pretty_print_typed() {
    let mut root = parse_source("fn f(a: i32) -> i32 { a }\nf(1);");
    let context = type_check(&mut root, InferenceMode::Nominal).unwrap();

    assert_eq!(
        pretty_print_typed(&root, &context),
        "fn f(a@i32: i32@i32) -> i32@i32 {\n    a@i32\n}\nf@fn(i32) -> i32(1@i32)@i32;"
    );
}
