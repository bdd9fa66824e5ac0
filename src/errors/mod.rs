//! Error types and error handling for the front-end.
//!
//! Every error is fatal: it is raised where it is detected, carried up
//! through `Result`, and reported once by the driver. This module defines:
//!
//! - The `Error` value with its offending span and optional related span
//! - `ErrorImpl`, the concrete error variants
//! - `ErrorCategory`, grouping variants into lexical/syntax/name/type errors
//! - Names and suggestion tips used by the diagnostic renderer

pub mod errors;
