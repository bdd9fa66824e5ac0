use crate::{ast::ast::Node, errors::errors::Error};

use super::{
    checks::{ArithmeticPass, AssignmentPass, CallPass},
    context::Context,
    materialize::MaterializePass,
    scope_pass::ScopePass,
    signature::SignaturePass,
    unify::SubstitutionPass,
};

/// How `let` bindings get their types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InferenceMode {
    /// A variable has exactly its declared type; the initializer must widen to it.
    #[default]
    Nominal,
    /// A variable is a type variable unified with its declared type and its
    /// initializer's type.
    Unification,
}

/// Runs the analysis pipeline over `root` and returns the populated context.
///
/// Passes run one after another over the whole tree and the first error
/// aborts. On success every expression node carries a type and every node
/// carries its scope.
#[tracing::instrument(level = "debug", skip_all, fields(mode = ?mode))]
pub fn type_check(root: &mut Node, mode: InferenceMode) -> Result<Context, Error> {
    let mut context = Context::new();

    ScopePass::new(&mut context).run(root)?;
    SignaturePass {
        context: &mut context,
    }
    .run(root)?;
    MaterializePass::new(&mut context, mode).run(root)?;

    if mode == InferenceMode::Unification {
        SubstitutionPass {
            context: &mut context,
        }
        .run(root)?;
        tracing::debug!(
            variables = context.type_variables.len(),
            "substituted type variables"
        );
    }

    ArithmeticPass {
        context: &mut context,
    }
    .run(root)?;
    AssignmentPass {
        context: &mut context,
        mode,
    }
    .run(root)?;
    CallPass {
        context: &mut context,
    }
    .run(root)?;

    tracing::debug!(scopes = context.scope_count(), "type check finished");
    Ok(context)
}
