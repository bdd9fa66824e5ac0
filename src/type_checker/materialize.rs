use crate::{
    ast::{
        ast::{Node, NodeKind},
        visitor::Visitor,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    context::{Context, Symbol, SymbolKind, TypeId},
    signature::{function_symbol, resolve_type_expr, scope_of},
    type_checker::InferenceMode,
    types::Type,
};

/// Gives every expression its first type and declares variables,
/// parameters and functions.
///
/// Declaration names and type expressions are annotated by their owning
/// definition and never visited as expressions.
pub struct MaterializePass<'a> {
    pub context: &'a mut Context,
    pub mode: InferenceMode,
}

impl<'a> MaterializePass<'a> {
    pub fn new(context: &'a mut Context, mode: InferenceMode) -> Self {
        MaterializePass { context, mode }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(mode = ?self.mode))]
    pub fn run(&mut self, root: &mut Node) -> Result<(), Error> {
        root.dispatch(self)
    }

    fn type_of(&mut self, node: &Node) -> TypeId {
        match node.data.ty {
            Some(ty) => ty,
            None => self.context.void(),
        }
    }

    /// Type of a `let` symbol. Nominal mode uses the declared type; the
    /// unification mode binds a fresh variable to both the declared and the
    /// initializer's type.
    fn variable_type(
        &mut self,
        declared: TypeId,
        type_span: Span,
        initializer: Option<&Node>,
    ) -> Result<TypeId, Error> {
        match self.mode {
            InferenceMode::Nominal => Ok(declared),
            InferenceMode::Unification => {
                let var = self.context.fresh_type_variable();
                self.context.unify(var, declared, type_span)?;
                if let Some(initializer) = initializer {
                    // resolved first, so only this binding widens
                    let init_ty = self.type_of(initializer);
                    let init_ty = self.context.resolve(init_ty);
                    self.context.unify(var, init_ty, initializer.span)?;
                }
                Ok(var)
            }
        }
    }
}

impl Visitor for MaterializePass<'_> {
    fn visit_literal(&mut self, node: &mut Node) -> Result<(), Error> {
        let NodeKind::Literal(token) = &node.kind else {
            return Ok(());
        };

        let ty = match token.kind {
            TokenKind::Integer => self.context.abstract_int(),
            TokenKind::Float => self.context.abstract_float(),
            TokenKind::String => self.context.string(),
            TokenKind::Identifier => {
                let name = token.identifier().unwrap_or_default();
                let scope = scope_of(self.context, node);
                self.context.resolve_symbol(scope, name, node.span)?.ty
            }
            _ => return Ok(()),
        };

        node.data.ty = Some(ty);
        Ok(())
    }

    fn visit_prefix_op(&mut self, node: &mut Node) -> Result<(), Error> {
        node.traverse_inner(self)?;

        let NodeKind::PrefixOp { operator, operand } = &node.kind else {
            return Ok(());
        };

        let ty = match operator.kind {
            TokenKind::Not => self.context.abstract_int(),
            _ => self.type_of(operand),
        };
        node.data.ty = Some(ty);
        Ok(())
    }

    fn visit_infix_op(&mut self, node: &mut Node) -> Result<(), Error> {
        node.traverse_inner(self)?;

        let NodeKind::InfixOp { operator, left, .. } = &node.kind else {
            return Ok(());
        };

        let ty = if operator.kind.is_comparison() || operator.kind.is_logical() {
            self.context.abstract_int()
        } else {
            // arithmetic is provisional until promotion; `=` keeps the target's type
            self.type_of(left)
        };
        node.data.ty = Some(ty);
        Ok(())
    }

    fn visit_statement(&mut self, node: &mut Node) -> Result<(), Error> {
        node.traverse_inner(self)?;
        node.data.ty = Some(self.context.void());
        Ok(())
    }

    fn visit_block(&mut self, node: &mut Node) -> Result<(), Error> {
        node.traverse_inner(self)?;

        let ty = match &node.kind {
            NodeKind::Block {
                trailing: Some(trailing),
                ..
            } => self.type_of(trailing),
            _ => self.context.void(),
        };
        node.data.ty = Some(ty);
        Ok(())
    }

    fn visit_function_def(&mut self, node: &mut Node) -> Result<(), Error> {
        let Some(symbol) = function_symbol(self.context, node)? else {
            return Ok(());
        };
        let scope = scope_of(self.context, node);
        let fn_ty = symbol.ty;

        // declared before the body so the body may call itself
        self.context.declare(scope, symbol)?;

        let NodeKind::FunctionDef {
            params,
            return_type,
            body,
            ..
        } = &mut node.kind
        else {
            return Ok(());
        };

        let Type::Function {
            params: param_types,
            return_type: ret,
        } = self.context.get_type(fn_ty).clone()
        else {
            return Ok(());
        };

        for (param, ty) in params.iter_mut().zip(param_types) {
            let param_scope = scope_of(self.context, &param.name);
            self.context.declare(
                param_scope,
                Symbol {
                    name: param.name.identifier().unwrap_or_default().to_string(),
                    ty,
                    span: param.name.span,
                    kind: SymbolKind::Parameter,
                },
            )?;
            param.name.data.ty = Some(ty);
            param.type_expr.data.ty = Some(ty);
        }

        return_type.data.ty = Some(ret);

        if let Some(body) = body {
            body.dispatch(self)?;
        }

        node.data.ty = Some(self.context.void());
        Ok(())
    }

    fn visit_function_call(&mut self, node: &mut Node) -> Result<(), Error> {
        node.traverse_inner(self)?;

        let NodeKind::FunctionCall { callee, .. } = &node.kind else {
            return Ok(());
        };

        let callee_ty = self.type_of(callee);
        let resolved = self.context.resolve(callee_ty);

        match self.context.get_type(resolved) {
            Type::Function { return_type, .. } => {
                node.data.ty = Some(*return_type);
                Ok(())
            }
            _ => Err(Error::new(
                ErrorImpl::NotCallable {
                    found: self.context.display_type(resolved),
                },
                callee.span,
            )),
        }
    }

    fn visit_variable_def(&mut self, node: &mut Node) -> Result<(), Error> {
        let scope = scope_of(self.context, node);

        let NodeKind::VariableDef {
            name,
            type_expr,
            initializer,
        } = &mut node.kind
        else {
            return Ok(());
        };

        let declared = resolve_type_expr(self.context, type_expr)?;

        // typed before the name exists, so `let x: i32 = x` looks outward
        if let Some(initializer) = initializer {
            initializer.dispatch(self)?;
        }

        let ty = self.variable_type(declared, type_expr.span, initializer.as_deref())?;

        self.context.declare(
            scope,
            Symbol {
                name: name.identifier().unwrap_or_default().to_string(),
                ty,
                span: name.span,
                kind: SymbolKind::Variable,
            },
        )?;

        name.data.ty = Some(ty);
        type_expr.data.ty = Some(declared);
        node.data.ty = Some(self.context.void());
        Ok(())
    }

    fn visit_root(&mut self, node: &mut Node) -> Result<(), Error> {
        node.traverse_inner(self)?;
        node.data.ty = Some(self.context.void());
        Ok(())
    }
}
