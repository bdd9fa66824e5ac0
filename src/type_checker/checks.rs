//! Compatibility passes run after materialization.
//!
//! Each pass walks the whole tree once, checks one family of rules and
//! rewrites the annotations the rule widens.

use crate::{
    ast::{
        ast::{Node, NodeKind},
        visitor::Visitor,
    },
    errors::errors::{Error, ErrorImpl, Side},
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    context::{Context, SymbolKind, TypeId},
    signature::scope_of,
    type_checker::InferenceMode,
    types::Type,
};

fn type_of(context: &mut Context, node: &Node) -> TypeId {
    match node.data.ty {
        Some(ty) => ty,
        None => context.void(),
    }
}

fn non_numeric(context: &Context, side: Side, ty: TypeId, operand: Span, expression: Span) -> Error {
    Error::with_related(
        ErrorImpl::NonNumericOperand {
            side,
            found: context.display_type(ty),
        },
        operand,
        expression,
    )
}

/// Arithmetic operands must be numeric. The expression and both operands
/// take the promotion of the two operand types.
pub struct ArithmeticPass<'a> {
    pub context: &'a mut Context,
}

impl ArithmeticPass<'_> {
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&mut self, root: &mut Node) -> Result<(), Error> {
        root.dispatch(self)
    }
}

impl Visitor for ArithmeticPass<'_> {
    fn visit_infix_op(&mut self, node: &mut Node) -> Result<(), Error> {
        node.traverse_inner(self)?;

        let expression = node.span;
        let NodeKind::InfixOp {
            operator,
            left,
            right,
        } = &mut node.kind
        else {
            return Ok(());
        };

        if !operator.kind.is_arithmetic() {
            return Ok(());
        }

        let left_ty = type_of(self.context, left);
        let right_ty = type_of(self.context, right);

        if !self.context.is_numeric(left_ty) {
            return Err(non_numeric(self.context, Side::Left, left_ty, left.span, expression));
        }
        if !self.context.is_numeric(right_ty) {
            return Err(non_numeric(self.context, Side::Right, right_ty, right.span, expression));
        }

        let Some(promoted) = self.context.promote(left_ty, right_ty) else {
            return Ok(());
        };

        if left_ty != right_ty {
            tracing::trace!(
                left = %self.context.display_type(left_ty),
                right = %self.context.display_type(right_ty),
                promoted = %self.context.display_type(promoted),
                "promoted operands"
            );
        }

        left.data.ty = Some(promoted);
        right.data.ty = Some(promoted);
        node.data.ty = Some(promoted);
        Ok(())
    }

    fn visit_prefix_op(&mut self, node: &mut Node) -> Result<(), Error> {
        node.traverse_inner(self)?;

        let expression = node.span;
        let NodeKind::PrefixOp { operator, operand } = &node.kind else {
            return Ok(());
        };

        let operand_ty = type_of(self.context, operand);
        if !self.context.is_numeric(operand_ty) {
            return Err(non_numeric(self.context, Side::Right, operand_ty, operand.span, expression));
        }

        if operator.kind == TokenKind::Dash {
            node.data.ty = Some(operand_ty);
        }
        Ok(())
    }

    fn visit_block(&mut self, node: &mut Node) -> Result<(), Error> {
        node.traverse_inner(self)?;

        if let NodeKind::Block {
            trailing: Some(trailing),
            ..
        } = &node.kind
        {
            node.data.ty = trailing.data.ty;
        }
        Ok(())
    }
}

/// `=` needs identical types on both sides; a `let` initializer must widen
/// to the declared type; a function body must widen to the return type.
pub struct AssignmentPass<'a> {
    pub context: &'a mut Context,
    pub mode: InferenceMode,
}

impl AssignmentPass<'_> {
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&mut self, root: &mut Node) -> Result<(), Error> {
        root.dispatch(self)
    }
}

impl Visitor for AssignmentPass<'_> {
    fn visit_infix_op(&mut self, node: &mut Node) -> Result<(), Error> {
        node.traverse_inner(self)?;

        let NodeKind::InfixOp {
            operator,
            left,
            right,
        } = &node.kind
        else {
            return Ok(());
        };

        if operator.kind != TokenKind::Assignment {
            return Ok(());
        }

        let left_ty = type_of(self.context, left);
        let right_ty = type_of(self.context, right);

        if left_ty != right_ty {
            return Err(Error::with_related(
                ErrorImpl::AssignmentMismatch {
                    left: self.context.display_type(left_ty),
                    right: self.context.display_type(right_ty),
                },
                right.span,
                left.span,
            ));
        }
        Ok(())
    }

    fn visit_variable_def(&mut self, node: &mut Node) -> Result<(), Error> {
        node.traverse_inner(self)?;

        // unification already settled the variable on a common type
        if self.mode == InferenceMode::Unification {
            return Ok(());
        }

        let NodeKind::VariableDef {
            name,
            type_expr,
            initializer: Some(initializer),
        } = &mut node.kind
        else {
            return Ok(());
        };

        let declared = type_of(self.context, type_expr);
        let init_ty = type_of(self.context, initializer);

        if !self.context.coerces(init_ty, declared) {
            return Err(Error::with_related(
                ErrorImpl::NoCommonAncestor {
                    expected: self.context.display_type(declared),
                    received: self.context.display_type(init_ty),
                },
                initializer.span,
                name.span,
            ));
        }

        initializer.data.ty = Some(declared);
        Ok(())
    }

    fn visit_function_def(&mut self, node: &mut Node) -> Result<(), Error> {
        node.traverse_inner(self)?;

        let NodeKind::FunctionDef {
            return_type,
            body: Some(body),
            ..
        } = &node.kind
        else {
            return Ok(());
        };

        let expected = type_of(self.context, return_type);
        if *self.context.get_type(expected) == Type::Void {
            return Ok(());
        }

        let received = type_of(self.context, body);
        if !self.context.coerces(received, expected) {
            return Err(Error::with_related(
                ErrorImpl::ReturnTypeMismatch {
                    expected: self.context.display_type(expected),
                    received: self.context.display_type(received),
                },
                body.span,
                return_type.span,
            ));
        }
        Ok(())
    }
}

/// Call sites: argument count must match and every argument must widen to
/// its parameter's type.
pub struct CallPass<'a> {
    pub context: &'a mut Context,
}

impl CallPass<'_> {
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&mut self, root: &mut Node) -> Result<(), Error> {
        root.dispatch(self)
    }

    /// Declaration spans of the callee's parameters and of the callee
    /// itself, when the callee names a declared function.
    fn declaration_spans(&self, callee: &Node) -> Option<(Span, Vec<Span>)> {
        let name = callee.identifier()?;
        let (_, symbol) = self.context.lookup(scope_of(self.context, callee), name)?;
        match &symbol.kind {
            SymbolKind::Function { params, .. } => Some((symbol.span, params.clone())),
            _ => None,
        }
    }
}

impl Visitor for CallPass<'_> {
    fn visit_function_call(&mut self, node: &mut Node) -> Result<(), Error> {
        node.traverse_inner(self)?;

        let call_span = node.span;
        let NodeKind::FunctionCall { callee, arguments } = &mut node.kind else {
            return Ok(());
        };

        let callee_ty = type_of(self.context, callee);
        let Type::Function { params, .. } = self.context.get_type(callee_ty).clone() else {
            return Ok(());
        };

        let (callee_span, param_spans) = self
            .declaration_spans(callee)
            .unwrap_or_else(|| (callee.span, vec![]));

        if arguments.len() != params.len() {
            return Err(Error::with_related(
                ErrorImpl::ArityMismatch {
                    expected: params.len(),
                    received: arguments.len(),
                },
                call_span,
                callee_span,
            ));
        }

        for (index, (argument, param_ty)) in arguments.iter_mut().zip(params).enumerate() {
            let argument_ty = type_of(self.context, argument);

            if !self.context.coerces(argument_ty, param_ty) {
                let related = param_spans.get(index).copied().unwrap_or(callee_span);
                return Err(Error::with_related(
                    ErrorImpl::ArgumentMismatch {
                        index: index + 1,
                        expected: self.context.display_type(param_ty),
                        received: self.context.display_type(argument_ty),
                    },
                    argument.span,
                    related,
                ));
            }

            argument.data.ty = Some(param_ty);
        }
        Ok(())
    }
}
