use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("let", TokenKind::Let);
        map.insert("fn", TokenKind::Fn);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Identifier,
    Integer,
    Float,
    String,

    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,

    Semicolon,
    Colon,
    Comma,
    Arrow,

    Plus,
    Dash,
    Slash,
    Star,

    // Reserved
    Let,
    Fn,
}

impl TokenKind {
    /// Source spelling of punctuation and keywords, used when printing.
    pub fn symbol(&self) -> &'static str {
        match self {
            TokenKind::EOF => "<eof>",
            TokenKind::Identifier => "<identifier>",
            TokenKind::Integer => "<integer>",
            TokenKind::Float => "<float>",
            TokenKind::String => "<string>",
            TokenKind::OpenCurly => "{",
            TokenKind::CloseCurly => "}",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::Assignment => "=",
            TokenKind::Equals => "==",
            TokenKind::Not => "!",
            TokenKind::NotEquals => "!=",
            TokenKind::Less => "<",
            TokenKind::LessEquals => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEquals => ">=",
            TokenKind::Or => "||",
            TokenKind::And => "&&",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Arrow => "->",
            TokenKind::Plus => "+",
            TokenKind::Dash => "-",
            TokenKind::Slash => "/",
            TokenKind::Star => "*",
            TokenKind::Let => "let",
            TokenKind::Fn => "fn",
        }
    }

    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            TokenKind::Plus | TokenKind::Dash | TokenKind::Star | TokenKind::Slash
        )
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            TokenKind::Less
                | TokenKind::LessEquals
                | TokenKind::Greater
                | TokenKind::GreaterEquals
                | TokenKind::Equals
                | TokenKind::NotEquals
        )
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, TokenKind::And | TokenKind::Or)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Literal payload attached to identifier and literal tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Str(String),
    Int(i64),
    Float(f64),
}

impl Display for TokenValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenValue::Str(value) => write!(f, "{}", value),
            TokenValue::Int(value) => write!(f, "{}", value),
            // keep a decimal point so the printed literal lexes as a float again
            TokenValue::Float(value) if value.fract() == 0.0 && value.is_finite() => {
                write!(f, "{:.1}", value)
            }
            TokenValue::Float(value) => write!(f, "{}", value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Option<TokenValue>,
    pub span: Span,
}

impl Token {
    pub fn eof(pos: usize) -> Self {
        Token {
            kind: TokenKind::EOF,
            value: None,
            span: Span::point(pos),
        }
    }

    /// Identifier name, if this is an identifier token.
    pub fn identifier(&self) -> Option<&str> {
        match (&self.kind, &self.value) {
            (TokenKind::Identifier, Some(TokenValue::Str(name))) => Some(name),
            _ => None,
        }
    }

    /// Text of the token as it would appear in source.
    pub fn lexeme(&self) -> String {
        match (&self.kind, &self.value) {
            (TokenKind::String, Some(TokenValue::Str(value))) => format!("\"{}\"", escape(value)),
            (_, Some(value)) => value.to_string(),
            (kind, None) => kind.symbol().to_string(),
        }
    }
}

/// Inverse of the escapes the lexer decodes inside string literals.
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            '\0' => escaped.push_str("\\0"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}({}) @ {}", self.kind, value, self.span),
            None => write!(f, "{} @ {}", self.kind, self.span),
        }
    }
}
