use crate::{
    ast::{
        ast::{Node, NodeKind, Param},
        visitor::Visitor,
    },
    errors::errors::Error,
};

use super::context::{Context, ScopeId, Symbol, SymbolKind, TypeId};

/// Scope a node was stamped with, falling back to the root for nodes the
/// scope pass never reached.
pub(crate) fn scope_of(context: &Context, node: &Node) -> ScopeId {
    node.data.scope.unwrap_or_else(|| context.root_scope())
}

/// Resolves a type expression against the type names visible from it.
pub(crate) fn resolve_type_expr(context: &Context, type_expr: &Node) -> Result<TypeId, Error> {
    let name = type_expr.identifier().unwrap_or_default();
    context.resolve_type_name(scope_of(context, type_expr), name, type_expr.span)
}

/// Builds the function type of a definition and the symbol naming it.
pub(crate) fn function_symbol(context: &mut Context, node: &Node) -> Result<Option<Symbol>, Error> {
    let NodeKind::FunctionDef {
        name,
        params,
        return_type,
        body,
    } = &node.kind
    else {
        return Ok(None);
    };

    let param_types = params
        .iter()
        .map(|Param { type_expr, .. }| resolve_type_expr(context, type_expr))
        .collect::<Result<Vec<TypeId>, Error>>()?;
    let return_type = resolve_type_expr(context, return_type)?;

    Ok(Some(Symbol {
        name: name.identifier().unwrap_or_default().to_string(),
        ty: context.function(param_types, return_type),
        span: name.span,
        kind: SymbolKind::Function {
            params: params.iter().map(|param| param.name.span).collect(),
            has_body: body.is_some(),
        },
    }))
}

/// Declares every function in its enclosing scope before any body is typed,
/// so a call may appear before the definition it refers to.
pub struct SignaturePass<'a> {
    pub context: &'a mut Context,
}

impl SignaturePass<'_> {
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&mut self, root: &mut Node) -> Result<(), Error> {
        root.dispatch(self)
    }
}

impl Visitor for SignaturePass<'_> {
    fn visit_function_def(&mut self, node: &mut Node) -> Result<(), Error> {
        if let Some(symbol) = function_symbol(self.context, node)? {
            let scope = scope_of(self.context, node);
            self.context.declare(scope, symbol)?;
        }

        // nested definitions are hoisted within their own block
        node.traverse_inner(self)
    }
}
