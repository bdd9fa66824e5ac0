//! Parser module for building the syntax tree.
//!
//! A Pratt parser: every construct, including blocks, definitions and
//! statements, is an expression built from NUD (null denotation) and LED
//! (left denotation) handlers ordered by binding power. A trailing `;` is a
//! postfix operator that wraps its operand in a statement node.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
