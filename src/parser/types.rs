//! Type expression parsing.
//!
//! Type expressions have their own NUD table so that a type name is never
//! read as a value. Only named types exist, parsed as identifier literals
//! that the checker later resolves against the scope's type names.

use std::collections::HashMap;

use crate::{
    ast::ast::Node,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<Node, Error>;

/// Type alias for type NUD lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::Identifier, parse_symbol_type);
}

pub fn parse_symbol_type(parser: &mut Parser) -> Result<Node, Error> {
    let token = parser.expect(TokenKind::Identifier)?;
    Ok(Node::literal(token))
}

pub fn parse_type(parser: &mut Parser) -> Result<Node, Error> {
    let Some(nud) = parser.get_type_nud(parser.current_token_kind()) else {
        let token = parser.current_token();
        return Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: token.lexeme(),
                message: String::from("expected a type"),
            },
            token.span,
        ));
    };

    nud(parser)
}
