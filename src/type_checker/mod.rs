//! Semantic analysis.
//!
//! Runs an ordered pipeline of full-tree passes over the parsed tree:
//!
//! - `ScopePass` builds the scope tree and stamps every node with its scope
//! - `SignaturePass` declares functions ahead of their bodies
//! - `MaterializePass` declares the remaining symbols and types every expression
//! - `ArithmeticPass`, `AssignmentPass` and `CallPass` check compatibility and
//!   widen annotations along the numeric promotion lattice
//!
//! Scopes, symbols and types live in the `Context` arena returned by
//! `type_check`.

pub mod checks;
pub mod context;
pub mod materialize;
pub mod scope_pass;
pub mod signature;
pub mod type_checker;
pub mod types;
pub mod unify;

#[cfg(test)]
mod tests;
