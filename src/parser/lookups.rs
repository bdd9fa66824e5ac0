use std::collections::HashMap;

use crate::{ast::ast::Node, errors::errors::Error, lexer::tokens::TokenKind};

use super::{expr::*, parser::Parser, stmt::*};

/// Binding powers, weakest first. An infix rule applies while its binding
/// power is not below the minimum the caller asked for.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum BindingPower {
    Lowest,
    Statement,
    Assignment,
    ConditionalTerm,
    ConditionalFactor,
    Additive,
    Multiplicative,
    Highest,
}

impl BindingPower {
    /// The next stronger binding power. Parsing a right operand at this level
    /// makes an operator left associative.
    pub fn next(self) -> BindingPower {
        match self {
            BindingPower::Lowest => BindingPower::Statement,
            BindingPower::Statement => BindingPower::Assignment,
            BindingPower::Assignment => BindingPower::ConditionalTerm,
            BindingPower::ConditionalTerm => BindingPower::ConditionalFactor,
            BindingPower::ConditionalFactor => BindingPower::Additive,
            BindingPower::Additive => BindingPower::Multiplicative,
            BindingPower::Multiplicative => BindingPower::Highest,
            BindingPower::Highest => BindingPower::Highest,
        }
    }
}

pub type NUDHandler = fn(&mut Parser) -> Result<Node, Error>;
pub type LEDHandler = fn(&mut Parser, Node, BindingPower) -> Result<Node, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Statement postfix
    parser.led(TokenKind::Semicolon, BindingPower::Statement, parse_statement_expr);

    parser.led(TokenKind::Assignment, BindingPower::Assignment, parse_assignment_expr);

    // Conditional terms
    parser.led(TokenKind::And, BindingPower::ConditionalTerm, parse_binary_expr);
    parser.led(TokenKind::Or, BindingPower::ConditionalTerm, parse_binary_expr);

    // Conditional factors
    parser.led(TokenKind::Less, BindingPower::ConditionalFactor, parse_binary_expr);
    parser.led(TokenKind::LessEquals, BindingPower::ConditionalFactor, parse_binary_expr);
    parser.led(TokenKind::Greater, BindingPower::ConditionalFactor, parse_binary_expr);
    parser.led(TokenKind::GreaterEquals, BindingPower::ConditionalFactor, parse_binary_expr);
    parser.led(TokenKind::Equals, BindingPower::ConditionalFactor, parse_binary_expr);
    parser.led(TokenKind::NotEquals, BindingPower::ConditionalFactor, parse_binary_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Dash, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);

    parser.led(TokenKind::OpenParen, BindingPower::Highest, parse_call_expr);

    // Literals and symbols
    parser.nud(TokenKind::Identifier, parse_primary_expr);
    parser.nud(TokenKind::Integer, parse_primary_expr);
    parser.nud(TokenKind::Float, parse_primary_expr);
    parser.nud(TokenKind::String, parse_primary_expr);
    parser.nud(TokenKind::Dash, parse_prefix_expr);
    parser.nud(TokenKind::Not, parse_prefix_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);

    // Definitions and blocks
    parser.nud(TokenKind::OpenCurly, parse_block_expr);
    parser.nud(TokenKind::Fn, parse_fn_def_expr);
    parser.nud(TokenKind::Let, parse_var_def_expr);
}

// Lookup tables inside parser struct, so it's easier
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
