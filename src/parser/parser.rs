//! Parser state and entry point.
//!
//! The Parser struct holds the token cursor and the rule tables:
//! - NUD (null denotation) handlers for tokens that start an expression
//! - LED (left denotation) handlers for tokens that follow a left operand
//! - Binding powers for the LED handlers
//! - Type NUD handlers for type expressions
//!
//! Tables are filled by `create_token_lookups` and
//! `create_token_type_lookups`, so a grammar form is added by registering one
//! more handler.

use std::collections::HashMap;

use crate::{
    ast::ast::{Node, NodeKind},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Span,
};

use super::{
    expr::parse_item,
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
    },
    types::{create_token_type_lookups, TypeNUDHandler, TypeNUDLookup},
};

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// The list of tokens to parse
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Returned for every read past the end of `tokens`
    eof: Token,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix/postfix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for infix binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Lookup table for type null denotation handlers
    type_nud_lookup: TypeNUDLookup,
}

impl Parser {
    /// Creates a parser over `tokens` with empty rule tables.
    ///
    /// `source_len` positions the synthetic EOF token returned once the
    /// cursor runs past the last token.
    pub fn new(tokens: Vec<Token>, source_len: usize) -> Self {
        Parser {
            tokens,
            pos: 0,
            eof: Token::eof(source_len),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            type_nud_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Consumes a token of `expected_kind` or fails with `message` describing
    /// what was expected.
    pub fn expect_error(&mut self, expected_kind: TokenKind, message: &str) -> Result<Token, Error> {
        let token = self.current_token();
        if token.kind != expected_kind {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: token.lexeme(),
                    message: message.to_string(),
                },
                token.span,
            ));
        }

        Ok(self.advance())
    }

    /// Consumes a token of `expected_kind`.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        let token = self.current_token();
        if token.kind != expected_kind {
            return Err(self.unexpected(expected_kind.symbol()));
        }

        Ok(self.advance())
    }

    /// Error for the current token when `expected` was required.
    pub fn unexpected(&self, expected: &str) -> Error {
        let token = self.current_token();
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: token.lexeme(),
                expected: expected.to_string(),
            },
            token.span,
        )
    }

    /// Returns true while the cursor has not reached EOF.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    pub fn get_nud(&self, kind: TokenKind) -> Option<NUDHandler> {
        self.nud_lookup.get(&kind).copied()
    }

    /// LED handler and binding power registered for `kind`.
    pub fn get_led(&self, kind: TokenKind) -> Option<(LEDHandler, BindingPower)> {
        let handler = self.led_lookup.get(&kind)?;
        let binding_power = self.binding_power_lookup.get(&kind)?;
        Some((*handler, *binding_power))
    }

    pub fn get_type_nud(&self, kind: TokenKind) -> Option<TypeNUDHandler> {
        self.type_nud_lookup.get(&kind).copied()
    }

    /// Registers a left denotation (infix/postfix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a type null denotation handler.
    pub fn type_nud(&mut self, kind: TokenKind, nud_fn: TypeNUDHandler) {
        self.type_nud_lookup.insert(kind, nud_fn);
    }
}

/// Parses a token stream into a `Root` node.
///
/// Items are parsed with `parse_item` until EOF. The root spans
/// the whole source. The first structural error aborts the parse.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: Vec<Token>, source: &str) -> Result<Node, Error> {
    let mut parser = Parser::new(tokens, source.len());
    create_token_lookups(&mut parser);
    create_token_type_lookups(&mut parser);

    let mut items = vec![];

    while parser.has_tokens() {
        items.push(parse_item(&mut parser)?);
    }

    tracing::debug!(items = items.len(), "parsed");
    Ok(Node::new(NodeKind::Root(items), Span::new(0, source.len())))
}
