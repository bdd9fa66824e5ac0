use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, TokenValue, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex) -> Result<(), Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

/// Regex-table scanner. Patterns are tried in order and the first one
/// matching at the current position wins, so longer operators are listed
/// before their prefixes.
pub struct Lexer {
    patterns: Vec<RegexPattern>,
    tokens: Vec<Token>,
    source: String,
    pos: usize,
}

impl Lexer {
    pub fn new(source: String) -> Result<Lexer, regex::Error> {
        Ok(Lexer {
            pos: 0,
            tokens: vec![],
            patterns: vec![
                RegexPattern { regex: Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*")?, handler: symbol_handler },
                RegexPattern { regex: Regex::new("^[0-9]+\\.[0-9]+")?, handler: float_handler },
                RegexPattern { regex: Regex::new("^[0-9]+")?, handler: integer_handler },
                RegexPattern { regex: Regex::new("^\\s+")?, handler: skip_handler },
                RegexPattern { regex: Regex::new("^\"[^\"]*\"")?, handler: string_handler },
                RegexPattern { regex: Regex::new("^//[^\n]*")?, handler: skip_handler },
                RegexPattern { regex: Regex::new("^\\{")?, handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
                RegexPattern { regex: Regex::new("^\\}")?, handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
                RegexPattern { regex: Regex::new("^\\(")?, handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
                RegexPattern { regex: Regex::new("^\\)")?, handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
                RegexPattern { regex: Regex::new("^==")?, handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
                RegexPattern { regex: Regex::new("^!=")?, handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
                RegexPattern { regex: Regex::new("^!")?, handler: MK_DEFAULT_HANDLER!(TokenKind::Not, "!") },
                RegexPattern { regex: Regex::new("^=")?, handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
                RegexPattern { regex: Regex::new("^<=")?, handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=") },
                RegexPattern { regex: Regex::new("^<")?, handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
                RegexPattern { regex: Regex::new("^>=")?, handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=") },
                RegexPattern { regex: Regex::new("^>")?, handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
                RegexPattern { regex: Regex::new("^\\|\\|")?, handler: MK_DEFAULT_HANDLER!(TokenKind::Or, "||") },
                RegexPattern { regex: Regex::new("^&&")?, handler: MK_DEFAULT_HANDLER!(TokenKind::And, "&&") },
                RegexPattern { regex: Regex::new("^;")?, handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
                RegexPattern { regex: Regex::new("^:")?, handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
                RegexPattern { regex: Regex::new("^,")?, handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
                RegexPattern { regex: Regex::new("^->")?, handler: MK_DEFAULT_HANDLER!(TokenKind::Arrow, "->") },
                RegexPattern { regex: Regex::new("^\\+")?, handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
                RegexPattern { regex: Regex::new("^-")?, handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
                RegexPattern { regex: Regex::new("^/")?, handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
                RegexPattern { regex: Regex::new("^\\*")?, handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
            ],
            source,
        })
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Length of the match of `regex` at the current position.
    fn matched(&self, regex: &Regex) -> usize {
        regex.find(self.remainder()).map(|m| m.end()).unwrap_or(0)
    }
}

fn integer_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let start = lexer.pos;
    let len = lexer.matched(regex);
    let text = &lexer.remainder()[..len];
    let span = Span::new(start, start + len);

    let value = text.parse::<i64>().map_err(|_| {
        Error::new(ErrorImpl::NumberParseError { token: text.to_string() }, span)
    })?;

    lexer.push(MK_TOKEN!(TokenKind::Integer, Some(TokenValue::Int(value)), span));
    lexer.advance_n(len);
    Ok(())
}

fn float_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let start = lexer.pos;
    let len = lexer.matched(regex);
    let text = &lexer.remainder()[..len];
    let span = Span::new(start, start + len);

    let value = text.parse::<f64>().map_err(|_| {
        Error::new(ErrorImpl::NumberParseError { token: text.to_string() }, span)
    })?;

    lexer.push(MK_TOKEN!(TokenKind::Float, Some(TokenValue::Float(value)), span));
    lexer.advance_n(len);
    Ok(())
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let len = lexer.matched(regex);
    lexer.advance_n(len);
    Ok(())
}

fn string_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let start = lexer.pos;
    let len = lexer.matched(regex);
    let raw = &lexer.remainder()[1..len - 1];

    let mut result = String::new();
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        match chars.peek() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('\\') => result.push('\\'),
            Some('0') => result.push('\0'),
            // unknown escape, keep the backslash and let the next char through
            _ => {
                result.push(ch);
                continue;
            }
        }
        chars.next();
    }

    lexer.push(MK_TOKEN!(
        TokenKind::String,
        Some(TokenValue::Str(result)),
        Span::new(start, start + len)
    ));
    lexer.advance_n(len);
    Ok(())
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let start = lexer.pos;
    let len = lexer.matched(regex);
    let value = &lexer.remainder()[..len];
    let span = Span::new(start, start + len);

    let token = if let Some(kind) = RESERVED_LOOKUP.get(value) {
        MK_TOKEN!(*kind, None, span)
    } else {
        MK_TOKEN!(TokenKind::Identifier, Some(TokenValue::Str(value.to_string())), span)
    };

    lexer.push(token);
    lexer.advance_n(len);
    Ok(())
}

/// Scans `source` into tokens, terminated by an EOF token at `source.len()`.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn tokenize(source: String) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source).map_err(|err| {
        Error::new(ErrorImpl::UnrecognisedToken { token: err.to_string() }, Span::point(0))
    })?;
    let patterns = std::mem::take(&mut lex.patterns);

    while !lex.at_eof() {
        let pattern = patterns.iter().find(|pattern| pattern.regex.is_match(lex.remainder()));

        match pattern {
            Some(pattern) => (pattern.handler)(&mut lex, &pattern.regex)?,
            None => {
                let ch = lex.at().unwrap_or_default();
                return Err(Error::new(
                    ErrorImpl::UnrecognisedToken { token: ch.to_string() },
                    Span::new(lex.pos, lex.pos + ch.len_utf8()),
                ));
            }
        }
    }

    let end = lex.pos;
    lex.push(Token::eof(end));
    tracing::debug!(count = lex.tokens.len(), "tokenized");
    Ok(lex.tokens)
}
