//! Unification-variable inference, the alternative to the nominal pipeline.
//!
//! In this mode materialization gives every `let` a fresh type variable and
//! unifies it with the declared type and the initializer's type, so the
//! variable settles on their common ancestor. `SubstitutionPass` then replaces
//! each variable on the tree and in the scopes by following its substitution
//! chain to a concrete type.

use crate::{
    ast::{ast::Node, visitor::Visitor},
    errors::errors::{Error, ErrorImpl},
    Span,
};

use super::{
    context::{Context, TypeId, TypeVarId},
    types::Type,
};

/// Arena of type variables. Each slot holds the variable's substitution
/// target once it has been bound.
#[derive(Debug, Default)]
pub struct TypeVariables {
    substitutions: Vec<Option<TypeId>>,
}

impl TypeVariables {
    pub fn len(&self) -> usize {
        self.substitutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.substitutions.is_empty()
    }
}

impl Context {
    pub fn fresh_type_variable(&mut self) -> TypeId {
        let var = TypeVarId(self.type_variables.substitutions.len());
        self.type_variables.substitutions.push(None);
        self.intern(Type::Variable(var))
    }

    /// Follows substitution links from `ty` until reaching a concrete type
    /// or an unbound variable.
    pub fn resolve(&self, ty: TypeId) -> TypeId {
        let mut current = ty;
        while let Type::Variable(var) = self.get_type(current) {
            match self.type_variables.substitutions[var.0] {
                Some(next) => current = next,
                None => break,
            }
        }
        current
    }

    /// The variable whose binding ends the substitution chain from `ty`.
    fn last_variable(&self, ty: TypeId) -> Option<TypeVarId> {
        let mut last = None;
        let mut current = ty;
        while let Type::Variable(var) = self.get_type(current) {
            last = Some(*var);
            match self.type_variables.substitutions[var.0] {
                Some(next) => current = next,
                None => break,
            }
        }
        last
    }

    /// Makes `a` and `b` the same type, binding variables as needed.
    ///
    /// Two different concrete numeric types unify to their promotion, and
    /// any variable bound to the lower one is rebound to the promotion. Any
    /// other pair of different concrete types is an error at `span`.
    pub fn unify(&mut self, a: TypeId, b: TypeId, span: Span) -> Result<TypeId, Error> {
        let (head_a, head_b) = (a, b);
        let a = self.resolve(a);
        let b = self.resolve(b);

        if a == b {
            return Ok(a);
        }

        match (self.get_type(a).clone(), self.get_type(b).clone()) {
            (Type::Variable(var), _) => {
                self.type_variables.substitutions[var.0] = Some(b);
                Ok(b)
            }
            (_, Type::Variable(var)) => {
                self.type_variables.substitutions[var.0] = Some(a);
                Ok(a)
            }
            _ => {
                let promoted = self.promote(a, b).ok_or_else(|| {
                    Error::new(
                        ErrorImpl::NoCommonAncestor {
                            expected: self.display_type(a),
                            received: self.display_type(b),
                        },
                        span,
                    )
                })?;

                for head in [head_a, head_b] {
                    if let Some(var) = self.last_variable(head) {
                        self.type_variables.substitutions[var.0] = Some(promoted);
                    }
                }

                tracing::trace!(ty = %self.display_type(promoted), "unified by promotion");
                Ok(promoted)
            }
        }
    }
}

/// Replaces every type variable on the tree with what it resolves to.
pub struct SubstitutionPass<'a> {
    pub context: &'a mut Context,
}

impl SubstitutionPass<'_> {
    pub fn run(&mut self, root: &mut Node) -> Result<(), Error> {
        self.context.resolve_symbol_types();
        root.dispatch(self)?;

        let unresolved = self
            .context
            .scopes()
            .iter()
            .flat_map(|scope| scope.symbols())
            .filter(|symbol| self.context.get_type(symbol.ty).is_variable())
            .count();
        tracing::debug!(unresolved, "substituted symbol types");
        Ok(())
    }
}

impl Visitor for SubstitutionPass<'_> {
    fn visit_node(&mut self, node: &mut Node) -> Result<(), Error> {
        if let Some(ty) = node.data.ty {
            node.data.ty = Some(self.context.resolve(ty));
        }
        node.traverse_inner(self)
    }
}
