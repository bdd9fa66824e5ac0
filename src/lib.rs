#![allow(clippy::module_inception)]

use std::fmt::Display;

use crate::{
    ast::ast::Node,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::{
        context::Context,
        type_checker::{type_check, InferenceMode},
    },
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod options;
pub mod parser;
pub mod type_checker;

extern crate regex;

/// Byte range into the immutable source text.
///
/// Ranges are produced left to right, so `start <= end` always holds and
/// `extend_end` only ever grows a range towards later text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {} is after end {}", start, end);
        Span { start, end }
    }

    /// Zero-width span at `pos`, used for the synthetic EOF token.
    pub fn point(pos: usize) -> Self {
        Span { start: pos, end: pos }
    }

    /// Returns a span covering `self` through the end of `other`.
    ///
    /// `other` must not start before `self` ends.
    pub fn extend_end(&self, other: Span) -> Span {
        debug_assert!(
            self.end <= other.start,
            "cannot extend {} with earlier span {}",
            self,
            other
        );
        Span {
            start: self.start,
            end: other.end,
        }
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Maps a byte offset to `(line number, line text, column)`.
///
/// Line numbers are 1-based, columns 0-based. An offset at or past the end of
/// the source maps to the end of the last line, which is where EOF errors point.
pub fn get_line_at_position(source: &str, position: usize) -> (usize, String, usize) {
    let mut start = 0;
    let mut line_number = 1;
    let mut last = (1, String::new(), 0);

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&position) {
            return (line_number, line.to_string(), position - start);
        }

        last = (line_number, line.to_string(), line.trim_end_matches('\n').len());
        start = end;
        line_number += 1;
    }

    if source.ends_with('\n') {
        (line_number, String::new(), 0)
    } else {
        last
    }
}

/// Renders an error as a caret diagnostic.
///
/// ```text
/// Error: UnexpectedToken (Unexpected token: `}`, expected `)`)
/// -> main.lang
///    |
/// 20 | let a: i32 = f(1};
///    | ----------------^
/// ```
pub fn format_error(error: &Error, file: &str, source: &str) -> String {
    let mut out = String::new();
    let span = error.get_span();
    let (line, line_text, line_pos) = get_line_at_position(source, span.start);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    out.push_str(&format!("-> {}\n", file));
    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    if let Some(related) = error.get_related_span() {
        let (related_line, _, related_col) = get_line_at_position(source, related.start);
        out.push_str(&format!(
            "{:>padding$} note: see {}:{}:{}\n",
            "=",
            file,
            related_line,
            related_col + 1
        ));
    }

    out
}

/// Tokenizes, parses and type checks `source`, returning the annotated
/// tree with its context.
pub fn analyze(source: &str, mode: InferenceMode) -> Result<(Node, Context), Error> {
    let tokens = tokenize(source.to_string())?;
    let mut root = parse(tokens, source)?;
    let context = type_check(&mut root, mode)?;
    Ok((root, context))
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += c.len_utf8();
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
