//! Tests for the analysis pipeline.

use pretty_assertions::assert_eq;

use super::{
    context::Context,
    materialize::MaterializePass,
    type_checker::{type_check, InferenceMode},
};
use crate::{
    ast::ast::{Node, NodeKind, NodeType},
    errors::errors::{Error, ErrorCategory, ErrorImpl, Side},
    lexer::{lexer::tokenize, tokens::TokenKind},
    parser::parser::parse,
    Span,
};

fn check_with(source: &str, mode: InferenceMode) -> Result<(Node, Context), Error> {
    let tokens = tokenize(source.to_string())?;
    let mut root = parse(tokens, source)?;
    let context = type_check(&mut root, mode)?;
    Ok((root, context))
}

fn check(source: &str) -> Result<(Node, Context), Error> {
    check_with(source, InferenceMode::Nominal)
}

fn type_name(context: &Context, node: &Node) -> String {
    context.display_type(node.data.ty.expect("node should be typed"))
}

fn first_of(root: &Node, node_type: NodeType) -> &Node {
    root.find(&|node| node.get_node_type() == node_type)
        .expect("node of that type")
}

fn first_operator(root: &Node, kind: TokenKind) -> &Node {
    root.find(&|node| {
        matches!(&node.kind, NodeKind::InfixOp { operator, .. } if operator.kind == kind)
    })
    .expect("operator")
}

#[test]
fn test_literal_promotion() {
    let (root, context) = check("1 + 2.0").unwrap();
    let sum = first_of(&root, NodeType::InfixOp);

    assert_eq!(type_name(&context, sum), "float");

    // both operands are rewritten to the promoted type
    if let NodeKind::InfixOp { left, right, .. } = &sum.kind {
        assert_eq!(type_name(&context, left), "float");
        assert_eq!(type_name(&context, right), "float");
    }
}

#[test]
fn test_sized_arithmetic_keeps_width() {
    let (root, context) = check("fn f(a: i32, b: i32) -> i32 { a + b }").unwrap();
    let sum = first_of(&root, NodeType::InfixOp);
    assert_eq!(type_name(&context, sum), "i32");

    let (root, context) = check("fn g(a: i32, b: f32) -> f32 { a * b }").unwrap();
    assert_eq!(type_name(&context, first_of(&root, NodeType::InfixOp)), "f32");
}

#[test]
fn test_string_operand_is_rejected() {
    let error = check("let s: string = \"a\";\ns + 1").unwrap_err();

    assert_eq!(error.category(), ErrorCategory::Type);
    assert!(matches!(
        error.get_internal(),
        ErrorImpl::NonNumericOperand {
            side: Side::Left,
            ..
        }
    ));
    assert_eq!(error.get_span(), Span::new(21, 22));
    assert_eq!(error.get_related_span(), Some(Span::new(21, 26)));
}

#[test]
fn test_parenthesized_operand_span() {
    let error = check("let s: string = \"a\";\n(s) + 1").unwrap_err();

    assert_eq!(error.get_span(), Span::new(21, 24));
    assert_eq!(error.get_related_span(), Some(Span::new(21, 28)));
}

#[test]
fn test_prefix_operand_must_be_numeric() {
    let error = check("-\"text\"").unwrap_err();
    assert_eq!(error.get_error_name(), "NonNumericOperand");
    assert_eq!(error.get_span(), Span::new(1, 7));

    let (root, context) = check("let a: i64 = 3; -a").unwrap();
    assert_eq!(type_name(&context, first_of(&root, NodeType::PrefixOp)), "i64");
}

#[test]
fn test_comparison_and_logic_yield_int() {
    let (root, context) = check("1.0 < 2.0 && 3 > 4").unwrap();

    assert_eq!(type_name(&context, first_operator(&root, TokenKind::And)), "int");
    assert_eq!(type_name(&context, first_operator(&root, TokenKind::Less)), "int");
}

#[test]
fn test_call_arity_mismatch() {
    let error = check("fn f(a: i32, b: i32) -> i32 { a + b }\nf(1);").unwrap_err();

    assert_eq!(error.category(), ErrorCategory::Type);
    assert!(matches!(
        error.get_internal(),
        ErrorImpl::ArityMismatch {
            expected: 2,
            received: 1
        }
    ));
    assert_eq!(error.get_span(), Span::new(38, 42));
    assert_eq!(error.get_related_span(), Some(Span::new(3, 4)));
}

#[test]
fn test_call_argument_mismatch_names_parameter() {
    let error = check("fn f(a: i32, b: i32) -> i32 { a + b }\nf(1, \"x\");").unwrap_err();

    match error.get_internal() {
        ErrorImpl::ArgumentMismatch {
            index,
            expected,
            received,
        } => {
            assert_eq!(*index, 2);
            assert_eq!(expected, "i32");
            assert_eq!(received, "string");
        }
        other => panic!("expected argument mismatch, got {:?}", other),
    }
    assert_eq!(error.get_span(), Span::new(43, 46));
    assert_eq!(error.get_related_span(), Some(Span::new(13, 14)));
}

#[test]
fn test_call_arguments_widen_to_parameters() {
    let (root, context) = check("fn f(a: i64, b: f64) -> f64 { b }\nf(1, 2)").unwrap();
    let call = first_of(&root, NodeType::FunctionCall);

    assert_eq!(type_name(&context, call), "f64");
    if let NodeKind::FunctionCall { arguments, .. } = &call.kind {
        assert_eq!(type_name(&context, &arguments[0]), "i64");
        assert_eq!(type_name(&context, &arguments[1]), "f64");
    }
}

#[test]
fn test_call_before_definition() {
    let (root, context) = check("f(1);\nfn f(a: int) -> int { a }").unwrap();
    assert_eq!(type_name(&context, first_of(&root, NodeType::FunctionCall)), "int");
}

#[test]
fn test_recursive_call() {
    assert!(check("fn count(n: int) -> int { count(n - 1) }").is_ok());
}

#[test]
fn test_not_callable() {
    let error = check("let x: int = 1;\nx(2);").unwrap_err();
    assert_eq!(error.get_error_name(), "NotCallable");
    assert_eq!(error.get_span(), Span::new(16, 17));
}

#[test]
fn test_block_variable_not_visible_after_block() {
    let error = check("{ let y: int = 1; }\ny;").unwrap_err();

    assert_eq!(error.category(), ErrorCategory::Name);
    assert_eq!(error.get_error_name(), "UnknownIdentifier");
    assert_eq!(error.get_span(), Span::new(20, 21));
}

#[test]
fn test_parameter_visible_only_in_body() {
    assert!(check("fn f(a: int) -> int { a }").is_ok());

    let error = check("fn f(a: int) -> int { a }\na;").unwrap_err();
    assert_eq!(error.get_error_name(), "UnknownIdentifier");
    assert_eq!(error.get_span(), Span::new(26, 27));
}

#[test]
fn test_initializer_cannot_see_its_own_name() {
    let error = check("let x: i32 = x;").unwrap_err();
    assert_eq!(error.get_error_name(), "UnknownIdentifier");
    assert_eq!(error.get_span(), Span::new(13, 14));
}

#[test]
fn test_shadowing_in_inner_block() {
    let (root, context) = check("let x: int = 1;\n{ let x: string = \"a\"; x }").unwrap();
    assert_eq!(type_name(&context, first_of(&root, NodeType::Block)), "string");
}

#[test]
fn test_redeclaration_in_same_scope() {
    let error = check("let x: int = 1;\nlet x: int = 2;").unwrap_err();

    assert_eq!(error.category(), ErrorCategory::Name);
    assert_eq!(error.get_error_name(), "AlreadyDeclared");
    assert_eq!(error.get_span(), Span::new(20, 21));
    assert_eq!(error.get_related_span(), Some(Span::new(4, 5)));
}

#[test]
fn test_definition_after_forward_declaration() {
    let source = "fn f(a: i32) -> i32\nfn f(a: i32) -> i32 { a }\nf(1, 2);";
    let error = check(source).unwrap_err();

    // the call is checked against the definition
    assert_eq!(error.get_error_name(), "ArityMismatch");
    assert_eq!(error.get_related_span(), Some(Span::new(23, 24)));

    let (root, context) = check("fn f(a: i32) -> i32\nfn f(a: i32) -> i32 { a }\nf(1);").unwrap();
    assert_eq!(type_name(&context, first_of(&root, NodeType::FunctionCall)), "i32");

    assert!(check("fn g() -> int { 1 }\nfn g() -> int").is_ok());
}

#[test]
fn test_conflicting_function_declarations() {
    let error = check("fn f(a: i32) -> i32\nfn f(a: f32) -> i32 { 1 }").unwrap_err();
    assert_eq!(error.get_error_name(), "AlreadyDeclared");
    assert_eq!(error.get_span(), Span::new(23, 24));
    assert_eq!(error.get_related_span(), Some(Span::new(3, 4)));

    let error = check("fn f() -> int { 1 }\nfn f() -> int { 2 }").unwrap_err();
    assert_eq!(error.get_error_name(), "AlreadyDeclared");

    let error = check("let f: int = 1;\nfn f() -> int").unwrap_err();
    assert_eq!(error.get_error_name(), "AlreadyDeclared");
}

#[test]
fn test_body_shares_parameter_scope() {
    let error = check("fn f(a: i32) -> i32 { let a: string = \"s\"; 1 }").unwrap_err();

    assert_eq!(error.get_error_name(), "AlreadyDeclared");
    assert_eq!(error.get_span(), Span::new(26, 27));
    assert_eq!(error.get_related_span(), Some(Span::new(5, 6)));

    // a nested block may still shadow a parameter
    assert!(check("fn f(a: i32) -> i32 { { let a: string = \"s\"; }; a }").is_ok());
}

#[test]
fn test_parenthesized_item_after_block() {
    let (root, context) = check("{ let a: i32 = 1; }\n(2 + 3);").unwrap();
    assert_eq!(type_name(&context, first_of(&root, NodeType::InfixOp)), "int");
}

#[test]
fn test_duplicate_parameter() {
    let error = check("fn f(a: int, a: int) -> int { a }").unwrap_err();
    assert_eq!(error.get_error_name(), "AlreadyDeclared");
}

#[test]
fn test_revisiting_declarations_is_accepted() {
    let (mut root, mut context) = check("let x: int = 1;\nfn f(a: int) -> int { a + x }").unwrap();

    MaterializePass::new(&mut context, InferenceMode::Nominal)
        .run(&mut root)
        .unwrap();
}

#[test]
fn test_unknown_type() {
    let error = check("let x: u8 = 1;").unwrap_err();
    assert_eq!(error.get_error_name(), "UnknownType");
    assert_eq!(error.get_span(), Span::new(7, 9));
}

#[test]
fn test_let_widens_initializer() {
    let (root, context) = check("let x: i32 = 1 + 2;").unwrap();
    let sum = first_of(&root, NodeType::InfixOp);
    assert_eq!(type_name(&context, sum), "i32");

    let error = check("let x: i32 = 1.5;").unwrap_err();
    assert_eq!(error.get_error_name(), "NoCommonAncestor");
    assert_eq!(error.get_span(), Span::new(13, 16));
    assert_eq!(error.get_related_span(), Some(Span::new(4, 5)));
}

#[test]
fn test_assignment_requires_identical_types() {
    assert!(check("let x: i32 = 1;\nlet y: i32 = 2;\nx = y;").is_ok());

    let error = check("let x: i32 = 1;\nlet y: i64 = 2;\nx = y;").unwrap_err();
    assert_eq!(error.get_error_name(), "AssignmentMismatch");
}

#[test]
fn test_body_must_match_return_type() {
    let error = check("fn f() -> i32 { \"s\" }").unwrap_err();
    assert_eq!(error.get_error_name(), "ReturnTypeMismatch");
    assert_eq!(error.get_related_span(), Some(Span::new(10, 13)));

    assert!(check("fn g() -> void { 1; }").is_ok());
    assert!(check("fn h() -> f64 { 1 }").is_ok());
}

#[test]
fn test_every_expression_is_typed() {
    let (root, _) = check("fn f(a: i32) -> i32 { let b: i32 = a * 2; b }\nf(3);").unwrap();

    let untyped = root.find(&|node| node.data.ty.is_none() || node.data.scope.is_none());
    assert_eq!(untyped, None);
}

#[test]
fn test_unification_resolves_every_symbol() {
    let source = "let x: i32 = 1;\nlet y: float = x;\n{ let z: i32 = 1.5; z }";

    // nominal typing rejects the narrowing initializer
    assert!(check(source).is_err());

    let (root, context) = check_with(source, InferenceMode::Unification).unwrap();

    for scope in context.scopes() {
        for symbol in scope.symbols() {
            assert!(
                !context.get_type(symbol.ty).is_variable(),
                "`{}` left unresolved",
                symbol.name
            );
        }
    }

    let root_scope = context.root_scope();
    let (_, x) = context.lookup(root_scope, "x").unwrap();
    assert_eq!(context.display_type(x.ty), "i32");
    let (_, y) = context.lookup(root_scope, "y").unwrap();
    assert_eq!(context.display_type(y.ty), "float");

    // the block's trailing `z` settled on the promotion of i32 and float
    assert_eq!(type_name(&context, first_of(&root, NodeType::Block)), "float");
    assert!(root
        .find(&|node| node
            .data
            .ty
            .is_some_and(|ty| context.get_type(ty).is_variable()))
        .is_none());
}
