use std::fmt::Display;

use thiserror::Error;

use crate::Span;

/// Which phase of the front-end rejected the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lexical,
    Syntax,
    Name,
    Type,
}

impl Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Lexical => write!(f, "LexicalError"),
            ErrorCategory::Syntax => write!(f, "SyntaxError"),
            ErrorCategory::Name => write!(f, "NameError"),
            ErrorCategory::Type => write!(f, "TypeError"),
        }
    }
}

/// Which operand of a binary expression an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// A fatal front-end error.
///
/// `span` is the offending range. `related` is the other half of the story
/// when there is one: the earlier declaration for a redeclaration, the
/// enclosing expression for a bad operand, the parameter for a bad argument.
#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    span: Span,
    related: Option<Span>,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, span: Span) -> Self {
        Error {
            internal_error: error_impl,
            span,
            related: None,
        }
    }

    pub fn with_related(error_impl: ErrorImpl, span: Span, related: Span) -> Self {
        Error {
            internal_error: error_impl,
            span,
            related: Some(related),
        }
    }

    pub fn get_span(&self) -> Span {
        self.span
    }

    pub fn get_related_span(&self) -> Option<Span> {
        self.related
    }

    pub fn get_internal(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn category(&self) -> ErrorCategory {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } | ErrorImpl::NumberParseError { .. } => {
                ErrorCategory::Lexical
            }
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::NoPrefixRule { .. } => ErrorCategory::Syntax,
            ErrorImpl::UnknownIdentifier { .. }
            | ErrorImpl::UnknownType { .. }
            | ErrorImpl::AlreadyDeclared { .. } => ErrorCategory::Name,
            ErrorImpl::NonNumericOperand { .. }
            | ErrorImpl::NoCommonAncestor { .. }
            | ErrorImpl::ArityMismatch { .. }
            | ErrorImpl::ArgumentMismatch { .. }
            | ErrorImpl::AssignmentMismatch { .. }
            | ErrorImpl::NotCallable { .. }
            | ErrorImpl::ReturnTypeMismatch { .. } => ErrorCategory::Type,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NoPrefixRule { .. } => "NoPrefixRule",
            ErrorImpl::UnknownIdentifier { .. } => "UnknownIdentifier",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::AlreadyDeclared { .. } => "AlreadyDeclared",
            ErrorImpl::NonNumericOperand { .. } => "NonNumericOperand",
            ErrorImpl::NoCommonAncestor { .. } => "NoCommonAncestor",
            ErrorImpl::ArityMismatch { .. } => "ArityMismatch",
            ErrorImpl::ArgumentMismatch { .. } => "ArgumentMismatch",
            ErrorImpl::AssignmentMismatch { .. } => "AssignmentMismatch",
            ErrorImpl::NotCallable { .. } => "NotCallable",
            ErrorImpl::ReturnTypeMismatch { .. } => "ReturnTypeMismatch",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::UnexpectedToken { token, expected } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, expected `{}`",
                token, expected
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NoPrefixRule { token } => ErrorTip::Suggestion(format!(
                "`{}` cannot start an expression",
                token
            )),
            ErrorImpl::UnknownIdentifier { name } => {
                ErrorTip::Suggestion(format!("Identifier `{}` not declared", name))
            }
            ErrorImpl::UnknownType { name } => {
                ErrorTip::Suggestion(format!("Unknown type `{}` found", name))
            }
            ErrorImpl::AlreadyDeclared { name } => ErrorTip::Suggestion(format!(
                "`{}` already declared in this scope",
                name
            )),
            ErrorImpl::NonNumericOperand { side, found } => ErrorTip::Suggestion(format!(
                "The {} operand has type `{}`, arithmetic needs a number",
                side, found
            )),
            ErrorImpl::NoCommonAncestor { expected, received } => ErrorTip::Suggestion(format!(
                "Cannot widen `{}` to `{}`",
                received, expected
            )),
            ErrorImpl::ArityMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Expected {} arguments, received {}",
                expected, received
            )),
            ErrorImpl::ArgumentMismatch {
                index,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "Parameter {} expects `{}`, received `{}`",
                index, expected, received
            )),
            ErrorImpl::AssignmentMismatch { left, right } => ErrorTip::Suggestion(format!(
                "Cannot assign `{}` to `{}`",
                right, left
            )),
            ErrorImpl::NotCallable { found } => {
                ErrorTip::Suggestion(format!("Type `{}` is not a function", found))
            }
            ErrorImpl::ReturnTypeMismatch { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Function returns `{}`, body evaluates to `{}`",
                    expected, received
                ))
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} at {}", self.category(), self.internal_error, self.span)?;
        if let Some(related) = self.related {
            write!(f, " (see {})", related)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("unexpected token {token:?}, expected {expected}")]
    UnexpectedToken { token: String, expected: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("unable to find prefix rule for token {token:?}")]
    NoPrefixRule { token: String },
    #[error("unknown identifier {name:?}")]
    UnknownIdentifier { name: String },
    #[error("unknown type {name:?}")]
    UnknownType { name: String },
    #[error("{name:?} already declared in this scope")]
    AlreadyDeclared { name: String },
    #[error("{side} operand of arithmetic has non-numeric type {found}")]
    NonNumericOperand { side: Side, found: String },
    #[error("no common ancestor: expected {expected}, received {received}")]
    NoCommonAncestor { expected: String, received: String },
    #[error("wrong number of arguments: expected {expected}, received {received}")]
    ArityMismatch { expected: usize, received: usize },
    #[error("argument {index} does not match: expected {expected}, received {received}")]
    ArgumentMismatch {
        index: usize,
        expected: String,
        received: String,
    },
    #[error("assignment types do not match: {left} = {right}")]
    AssignmentMismatch { left: String, right: String },
    #[error("type {found} is not callable")]
    NotCallable { found: String },
    #[error("return type does not match: expected {expected}, received {received}")]
    ReturnTypeMismatch { expected: String, received: String },
}
