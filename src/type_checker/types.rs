//! Type representation and the numeric promotion lattice.

use super::context::{TypeId, TypeVarId};

/// A semantic type. Stored once in the context's type table and referred to
/// by `TypeId`, so two equal types always have the same id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Void,
    String,
    /// Integer whose width is not decided yet, the type of integer literals.
    AbstractInt,
    SizedInt(u8),
    /// Float whose width is not decided yet, the type of float literals.
    AbstractFloat,
    SizedFloat(u8),
    Function {
        params: Vec<TypeId>,
        return_type: TypeId,
    },
    /// Placeholder used by unification inference.
    Variable(TypeVarId),
}

impl Type {
    /// Position in the promotion lattice, `None` for non-numeric types.
    ///
    /// The lattice is a chain: abstract int < sized ints by width < abstract
    /// float < sized floats by width. Floats dominate ints and, within a kind,
    /// sized dominates abstract.
    pub fn numeric_rank(&self) -> Option<(u8, u8, u8)> {
        match self {
            Type::AbstractInt => Some((0, 0, 0)),
            Type::SizedInt(width) => Some((0, 1, *width)),
            Type::AbstractFloat => Some((1, 0, 0)),
            Type::SizedFloat(width) => Some((1, 1, *width)),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric_rank().is_some()
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Type::Variable(_))
    }
}

/// Built-in type names seeded into the root scope.
pub fn builtin_types() -> Vec<(&'static str, Type)> {
    vec![
        ("void", Type::Void),
        ("string", Type::String),
        ("int", Type::AbstractInt),
        ("float", Type::AbstractFloat),
        ("i8", Type::SizedInt(8)),
        ("i16", Type::SizedInt(16)),
        ("i32", Type::SizedInt(32)),
        ("i64", Type::SizedInt(64)),
        ("f32", Type::SizedFloat(32)),
        ("f64", Type::SizedFloat(64)),
    ]
}

#[cfg(test)]
mod tests {
    use super::Type;

    #[test]
    fn test_lattice_order() {
        let chain = [
            Type::AbstractInt,
            Type::SizedInt(8),
            Type::SizedInt(32),
            Type::SizedInt(64),
            Type::AbstractFloat,
            Type::SizedFloat(32),
            Type::SizedFloat(64),
        ];

        for pair in chain.windows(2) {
            assert!(pair[0].numeric_rank() < pair[1].numeric_rank());
        }
    }

    #[test]
    fn test_non_numeric() {
        assert!(!Type::String.is_numeric());
        assert!(!Type::Void.is_numeric());
        assert!(Type::SizedFloat(32).is_numeric());
    }
}
