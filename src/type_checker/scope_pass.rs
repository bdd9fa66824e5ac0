use std::mem;

use crate::{
    ast::{
        ast::{Node, NodeKind},
        visitor::Visitor,
    },
    errors::errors::Error,
};

use super::context::{Context, ScopeId};

/// Builds the scope tree and stamps every node with the scope it lives in.
///
/// A block gets a fresh child scope for its items. A function definition
/// gets one child scope holding its parameters and the items of its body; the
/// definition node and its return type stay in the enclosing scope.
pub struct ScopePass<'a> {
    context: &'a mut Context,
    current: ScopeId,
}

impl<'a> ScopePass<'a> {
    pub fn new(context: &'a mut Context) -> Self {
        let current = context.root_scope();
        ScopePass { context, current }
    }

    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&mut self, root: &mut Node) -> Result<(), Error> {
        root.dispatch(self)?;
        tracing::debug!(scopes = self.context.scope_count(), "scope tree built");
        Ok(())
    }

    fn enter(&mut self) -> ScopeId {
        let child = self.context.create_child_scope(self.current);
        mem::replace(&mut self.current, child)
    }
}

impl Visitor for ScopePass<'_> {
    fn visit_node(&mut self, node: &mut Node) -> Result<(), Error> {
        node.data.scope = Some(self.current);
        node.traverse_inner(self)
    }

    fn visit_block(&mut self, node: &mut Node) -> Result<(), Error> {
        node.data.scope = Some(self.current);

        let enclosing = self.enter();
        let result = node.traverse_inner(self);
        self.current = enclosing;

        result
    }

    fn visit_function_def(&mut self, node: &mut Node) -> Result<(), Error> {
        node.data.scope = Some(self.current);

        let NodeKind::FunctionDef {
            params,
            return_type,
            body,
            ..
        } = &mut node.kind
        else {
            return node.traverse_inner(self);
        };

        let enclosing = self.enter();
        for param in params.iter_mut() {
            param.name.dispatch(self)?;
            param.type_expr.dispatch(self)?;
        }
        if let Some(body) = body {
            // the body's items share the parameters' scope
            body.data.scope = Some(self.current);
            body.traverse_inner(self)?;
        }
        self.current = enclosing;

        return_type.dispatch(self)
    }
}
