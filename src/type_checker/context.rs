//! Compilation-wide semantic context.
//!
//! The context owns every scope, the interned type table and the type
//! variable arena. Nodes and scopes refer into it through the `ScopeId`,
//! `TypeId` and `TypeVarId` indices, which stay valid for the whole
//! compilation because nothing is ever removed.

use std::collections::HashMap;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Span,
};

use super::{
    types::{builtin_types, Type},
    unify::TypeVariables,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeVarId(pub(crate) usize);

#[derive(Debug, Clone, PartialEq)]
pub enum SymbolKind {
    Variable,
    Parameter,
    /// A function, with the declaration span of each parameter.
    Function { params: Vec<Span>, has_body: bool },
}

impl SymbolKind {
    /// Whether a function symbol comes with a body; `None` for anything else.
    pub fn function_body(&self) -> Option<bool> {
        match self {
            SymbolKind::Function { has_body, .. } => Some(*has_body),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub ty: TypeId,
    /// Span of the declaring name.
    pub span: Span,
    pub kind: SymbolKind,
}

#[derive(Debug, Default)]
pub struct Scope {
    parent: Option<ScopeId>,
    symbols: HashMap<String, Symbol>,
    type_names: HashMap<String, TypeId>,
}

impl Scope {
    /// Symbols declared at this level only.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }
}

#[derive(Debug)]
pub struct Context {
    scopes: Vec<Scope>,
    types: Vec<Type>,
    interned: HashMap<Type, TypeId>,
    pub type_variables: TypeVariables,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Creates a context whose root scope knows the built-in type names.
    pub fn new() -> Self {
        let mut context = Context {
            scopes: vec![Scope::default()],
            types: vec![],
            interned: HashMap::new(),
            type_variables: TypeVariables::default(),
        };

        let root = context.root_scope();
        for (name, ty) in builtin_types() {
            let id = context.intern(ty);
            context.scopes[root.0].type_names.insert(name.to_string(), id);
        }

        context
    }

    pub fn root_scope(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn create_child_scope(&mut self, parent: ScopeId) -> ScopeId {
        self.scopes.push(Scope {
            parent: Some(parent),
            ..Scope::default()
        });
        ScopeId(self.scopes.len() - 1)
    }

    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    pub fn intern(&mut self, ty: Type) -> TypeId {
        if let Some(id) = self.interned.get(&ty) {
            return *id;
        }

        let id = TypeId(self.types.len());
        self.types.push(ty.clone());
        self.interned.insert(ty, id);
        id
    }

    pub fn get_type(&self, id: TypeId) -> &Type {
        &self.types[id.0]
    }

    pub fn void(&mut self) -> TypeId {
        self.intern(Type::Void)
    }

    pub fn string(&mut self) -> TypeId {
        self.intern(Type::String)
    }

    pub fn abstract_int(&mut self) -> TypeId {
        self.intern(Type::AbstractInt)
    }

    pub fn abstract_float(&mut self) -> TypeId {
        self.intern(Type::AbstractFloat)
    }

    pub fn function(&mut self, params: Vec<TypeId>, return_type: TypeId) -> TypeId {
        self.intern(Type::Function {
            params,
            return_type,
        })
    }

    pub fn is_numeric(&self, id: TypeId) -> bool {
        self.get_type(id).is_numeric()
    }

    /// The higher of two numeric types in the promotion lattice.
    pub fn promote(&self, a: TypeId, b: TypeId) -> Option<TypeId> {
        let rank_a = self.get_type(a).numeric_rank()?;
        let rank_b = self.get_type(b).numeric_rank()?;
        Some(if rank_a >= rank_b { a } else { b })
    }

    /// Whether a value of type `from` may be used where `to` is expected,
    /// widening along the lattice if needed.
    pub fn coerces(&self, from: TypeId, to: TypeId) -> bool {
        from == to || self.promote(from, to) == Some(to)
    }

    /// Declares `symbol` in `scope`.
    ///
    /// Declaring the same name again from the same span is a no-op, so a pass
    /// may revisit a declaration. A function declared without a body may be
    /// declared again with the same type, and a definition then replaces it.
    /// Any other second declaration at this level is an error pointing at
    /// both sites.
    pub fn declare(&mut self, scope: ScopeId, symbol: Symbol) -> Result<(), Error> {
        let symbols = &mut self.scopes[scope.0].symbols;

        if let Some(existing) = symbols.get(&symbol.name) {
            if existing.span == symbol.span {
                return Ok(());
            }

            let bodies = (existing.kind.function_body(), symbol.kind.function_body());
            if let (Some(existing_body), Some(new_body)) = bodies {
                if existing.ty == symbol.ty && !(existing_body && new_body) {
                    if new_body {
                        tracing::debug!(name = %symbol.name, scope = scope.0, "defined declared function");
                        symbols.insert(symbol.name.clone(), symbol);
                    }
                    return Ok(());
                }
            }

            return Err(Error::with_related(
                ErrorImpl::AlreadyDeclared { name: symbol.name },
                symbol.span,
                existing.span,
            ));
        }

        tracing::debug!(name = %symbol.name, scope = scope.0, "declared symbol");
        symbols.insert(symbol.name.clone(), symbol);
        Ok(())
    }

    /// Replaces the type of an already declared symbol.
    pub fn set_symbol_type(&mut self, scope: ScopeId, name: &str, ty: TypeId) {
        if let Some(symbol) = self.scopes[scope.0].symbols.get_mut(name) {
            symbol.ty = ty;
        }
    }

    /// Rewrites every symbol's type to what its type variable resolves to.
    pub fn resolve_symbol_types(&mut self) {
        for index in 0..self.scopes.len() {
            let resolved: Vec<(String, TypeId)> = self.scopes[index]
                .symbols
                .values()
                .map(|symbol| (symbol.name.clone(), self.resolve(symbol.ty)))
                .collect();

            for (name, ty) in resolved {
                self.set_symbol_type(ScopeId(index), &name, ty);
            }
        }
    }

    /// Finds `name` in `scope` or the closest enclosing scope declaring it,
    /// returning the symbol and the scope it lives in.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<(ScopeId, &Symbol)> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = &self.scopes[id.0];
            if let Some(symbol) = scope.symbols.get(name) {
                return Some((id, symbol));
            }
            current = scope.parent;
        }
        None
    }

    pub fn lookup_type_name(&self, scope: ScopeId, name: &str) -> Option<TypeId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = &self.scopes[id.0];
            if let Some(ty) = scope.type_names.get(name) {
                return Some(*ty);
            }
            current = scope.parent;
        }
        None
    }

    pub fn resolve_symbol(&self, scope: ScopeId, name: &str, span: Span) -> Result<&Symbol, Error> {
        self.lookup(scope, name)
            .map(|(_, symbol)| symbol)
            .ok_or_else(|| {
                Error::new(
                    ErrorImpl::UnknownIdentifier {
                        name: name.to_string(),
                    },
                    span,
                )
            })
    }

    pub fn resolve_type_name(&self, scope: ScopeId, name: &str, span: Span) -> Result<TypeId, Error> {
        self.lookup_type_name(scope, name).ok_or_else(|| {
            Error::new(
                ErrorImpl::UnknownType {
                    name: name.to_string(),
                },
                span,
            )
        })
    }

    /// Source-like spelling of a type, e.g. `i32`, `fn(i32, string) -> void`.
    pub fn display_type(&self, id: TypeId) -> String {
        match self.get_type(id) {
            Type::Void => "void".to_string(),
            Type::String => "string".to_string(),
            Type::AbstractInt => "int".to_string(),
            Type::SizedInt(width) => format!("i{}", width),
            Type::AbstractFloat => "float".to_string(),
            Type::SizedFloat(width) => format!("f{}", width),
            Type::Function {
                params,
                return_type,
            } => {
                let params = params
                    .iter()
                    .map(|param| self.display_type(*param))
                    .collect::<Vec<String>>()
                    .join(", ");
                format!("fn({}) -> {}", params, self.display_type(*return_type))
            }
            Type::Variable(var) => format!("t{}", var.0),
        }
    }
}
