use crate::{
    ast::ast::{Node, NodeKind, NodeType},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

/// Precedence climbing over the NUD/LED tables.
///
/// Runs the NUD for the current token, then keeps folding LEDs into the left
/// operand until the next token has no LED or binds weaker than `min_bp`.
pub fn parse_expr(parser: &mut Parser, min_bp: BindingPower) -> Result<Node, Error> {
    let left = parse_nud(parser)?;
    parse_led_loop(parser, left, min_bp)
}

/// One item of a block or of the whole program.
///
/// A block or function definition ends the item at its closing token, so
/// only a `;` may follow it; `{ .. }\n(x)` is two items rather than a call.
pub fn parse_item(parser: &mut Parser) -> Result<Node, Error> {
    let left = parse_nud(parser)?;

    let ends_at_close = matches!(left.get_node_type(), NodeType::Block | NodeType::FunctionDef);
    if ends_at_close && parser.current_token_kind() != TokenKind::Semicolon {
        return Ok(left);
    }

    parse_led_loop(parser, left, BindingPower::Lowest)
}

fn parse_nud(parser: &mut Parser) -> Result<Node, Error> {
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud(token_kind) else {
        let token = parser.current_token();
        return Err(Error::new(
            ErrorImpl::NoPrefixRule {
                token: token.lexeme(),
            },
            token.span,
        ));
    };

    nud(parser)
}

fn parse_led_loop(parser: &mut Parser, mut left: Node, min_bp: BindingPower) -> Result<Node, Error> {
    while let Some((led, bp)) = parser.get_led(parser.current_token_kind()) {
        if bp < min_bp {
            break;
        }

        left = led(parser, left, bp)?;

        // a statement ends at its `;`
        if left.get_node_type() == NodeType::Statement {
            break;
        }
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Node, Error> {
    match parser.current_token_kind() {
        TokenKind::Identifier | TokenKind::Integer | TokenKind::Float | TokenKind::String => {
            Ok(Node::literal(parser.advance()))
        }
        _ => Err(parser.unexpected("literal")),
    }
}

pub fn parse_binary_expr(parser: &mut Parser, left: Node, bp: BindingPower) -> Result<Node, Error> {
    let operator = parser.advance();
    let right = parse_expr(parser, bp.next())?;
    let span = left.span.extend_end(right.span);

    Ok(Node::new(
        NodeKind::InfixOp {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    ))
}

/// `=` is right associative, so the right side is parsed at its own power.
pub fn parse_assignment_expr(parser: &mut Parser, left: Node, bp: BindingPower) -> Result<Node, Error> {
    let operator = parser.advance();
    let right = parse_expr(parser, bp)?;
    let span = left.span.extend_end(right.span);

    Ok(Node::new(
        NodeKind::InfixOp {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    ))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Node, Error> {
    let operator = parser.advance();
    // prefix operators bind tighter than any infix operator
    let operand = parse_expr(parser, BindingPower::Highest)?;
    let span = operator.span.extend_end(operand.span);

    Ok(Node::new(
        NodeKind::PrefixOp {
            operator,
            operand: Box::new(operand),
        },
        span,
    ))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Node, Error> {
    let open = parser.advance();
    let mut expr = parse_expr(parser, BindingPower::Lowest)?;
    let close = parser.expect_error(TokenKind::CloseParen, "expected `)` to close parenthesized expression")?;

    // the parentheses belong to the operand they wrap
    expr.span = open.span.extend_end(close.span);
    Ok(expr)
}

pub fn parse_call_expr(parser: &mut Parser, left: Node, _bp: BindingPower) -> Result<Node, Error> {
    parser.advance();

    let mut arguments = vec![];

    while parser.current_token_kind() != TokenKind::CloseParen {
        if !parser.has_tokens() {
            return Err(parser.unexpected(")"));
        }

        arguments.push(parse_expr(parser, BindingPower::Assignment)?);

        match parser.current_token_kind() {
            TokenKind::Comma => {
                parser.advance();
            }
            TokenKind::CloseParen => {}
            _ => return Err(parser.unexpected(", or )")),
        }
    }

    let close = parser.expect(TokenKind::CloseParen)?;
    let span = left.span.extend_end(close.span);

    Ok(Node::new(
        NodeKind::FunctionCall {
            callee: Box::new(left),
            arguments,
        },
        span,
    ))
}

pub fn parse_statement_expr(parser: &mut Parser, left: Node, _bp: BindingPower) -> Result<Node, Error> {
    let semicolon = parser.advance();
    let span = left.span.extend_end(semicolon.span);

    Ok(Node::new(NodeKind::Statement(Box::new(left)), span))
}
