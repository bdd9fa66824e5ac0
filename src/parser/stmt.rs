use crate::{
    ast::ast::{Node, NodeKind, Param},
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{
        expr::{parse_expr, parse_item},
        lookups::BindingPower,
    },
};

use super::{parser::Parser, types::parse_type};

/// `{ item* }`. A bare expression right before `}` becomes the block's
/// trailing value.
pub fn parse_block_expr(parser: &mut Parser) -> Result<Node, Error> {
    let open = parser.expect(TokenKind::OpenCurly)?;

    let mut statements = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if !parser.has_tokens() {
            return Err(parser.unexpected("}"));
        }

        statements.push(parse_item(parser)?);
    }

    let close = parser.expect(TokenKind::CloseCurly)?;

    let trailing = match statements.last() {
        Some(last) if last.is_expression() => statements.pop().map(Box::new),
        _ => None,
    };

    Ok(Node::new(
        NodeKind::Block {
            statements,
            trailing,
        },
        open.span.extend_end(close.span),
    ))
}

/// `fn name(param: type, ...) -> type [block]`. Without a block the
/// definition is a forward declaration.
pub fn parse_fn_def_expr(parser: &mut Parser) -> Result<Node, Error> {
    let fn_token = parser.expect(TokenKind::Fn)?;

    let name = parser.expect_error(TokenKind::Identifier, "expected function name")?;

    parser.expect(TokenKind::OpenParen)?;

    let mut params = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseParen {
        let param_name = parser.expect_error(TokenKind::Identifier, "expected parameter name")?;
        parser.expect(TokenKind::Colon)?;
        let type_expr = parse_type(parser)?;

        params.push(Param {
            name: Node::literal(param_name),
            type_expr,
        });

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    parser.expect(TokenKind::Arrow)?;
    let return_type = parse_type(parser)?;

    let body = if parser.current_token_kind() == TokenKind::OpenCurly {
        Some(parse_block_expr(parser)?)
    } else {
        None
    };

    let end = body.as_ref().map_or(return_type.span, |body| body.span);

    Ok(Node::new(
        NodeKind::FunctionDef {
            name,
            params,
            return_type: Box::new(return_type),
            body: body.map(Box::new),
        },
        fn_token.span.extend_end(end),
    ))
}

/// `let name: type [= expr]`.
pub fn parse_var_def_expr(parser: &mut Parser) -> Result<Node, Error> {
    let let_token = parser.expect(TokenKind::Let)?;

    let name = parser.expect_error(
        TokenKind::Identifier,
        "expected identifier during variable declaration",
    )?;

    parser.expect_error(TokenKind::Colon, "expected `:` and a type after variable name")?;
    let type_expr = parse_type(parser)?;

    let initializer = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Assignment)?)
    } else {
        None
    };

    let end = initializer.as_ref().map_or(type_expr.span, |init| init.span);

    Ok(Node::new(
        NodeKind::VariableDef {
            name: Box::new(Node::literal(name)),
            type_expr: Box::new(type_expr),
            initializer: initializer.map(Box::new),
        },
        let_token.span.extend_end(end),
    ))
}
