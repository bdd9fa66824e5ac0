//! Lexical analysis module.
//!
//! Converts source text into the token stream consumed by the parser:
//!
//! - Tokenization using an ordered table of regex patterns
//! - Keywords through a reserved-word lookup
//! - Integer, float and string literals with typed payloads
//! - Whitespace and `//` comments are skipped

pub mod lexer;
pub mod tokens;
