//! The structural type model (spec §3 "Structural type").
//!
//! Unlike a full Hindley-Milner type graph, Nova's inference never needs
//! union-find-backed type variables: generic unification (§4.6) is a
//! single bottom-up substitution pass, not iterative constraint solving.
//! So `Type` is a plain recursive enum rather than an arena of `TypeId`s —
//! the recursion depth is bounded by how deeply a program nests generic
//! arguments, which `nova_stack::ensure_sufficient_stack` guards.

use nova_ir::Name;

/// Variance of a type argument at a use site, or of a type parameter at
/// its declaration site. Re-exported from `nova_ir` since the AST and the
/// structural type model share one variance lattice.
pub use nova_ir::ast::common::Variance;

/// A type argument supplied at a use site: `Box<out Int>`, `Box<*>`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct TypeArgument {
    pub variance: Variance,
    /// `None` together with `is_wildcard` models the Kotlin-style `*`
    /// projection, which accepts anything.
    pub ty: Option<Type>,
    pub is_wildcard: bool,
}

impl TypeArgument {
    pub fn invariant(ty: Type) -> Self {
        TypeArgument { variance: Variance::Invariant, ty: Some(ty), is_wildcard: false }
    }

    pub fn wildcard() -> Self {
        TypeArgument { variance: Variance::Invariant, ty: None, is_wildcard: true }
    }
}

/// A structural type, per spec §3.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Type {
    /// One of `Int/Long/Float/Double/Boolean/Char/String/Byte/Short`.
    Primitive { name: Name, nullable: bool },
    /// A nominal class type, including `Any` and `Number` (spec invariant:
    /// represented as `Class("Any"/"Number", [], _)` with special
    /// subtyping rules — see [`crate::assignability`]).
    Class { name: Name, type_args: Vec<TypeArgument>, nullable: bool },
    /// A reference to a declared type parameter, carrying its resolved
    /// upper bound (defaults to `Any` when none is written).
    TypeParameter { name: Name, upper_bound: Box<Type>, nullable: bool },
    /// A function type, with an optional extension receiver.
    Function { receiver: Option<Box<Type>>, params: Vec<Type>, ret: Box<Type>, nullable: bool },
    /// `Unit`, Nova's void-like singleton. Never nullable.
    Unit,
    /// The bottom type. Non-nullable `Nothing` is a subtype of every
    /// type; `Nothing?` is the type of the `null` literal.
    Nothing { nullable: bool },
    /// "Unknown / bail-out" — compatible with everything, suppresses
    /// downstream diagnostics (spec §3 invariant).
    Error,
}

impl Type {
    pub fn primitive(name: Name, nullable: bool) -> Self {
        Type::Primitive { name, nullable }
    }

    pub fn class(name: Name, type_args: Vec<TypeArgument>, nullable: bool) -> Self {
        Type::Class { name, type_args, nullable }
    }

    pub fn raw_class(name: Name, nullable: bool) -> Self {
        Type::Class { name, type_args: Vec::new(), nullable }
    }

    pub fn nullable(&self) -> bool {
        match self {
            Type::Primitive { nullable, .. }
            | Type::Class { nullable, .. }
            | Type::TypeParameter { nullable, .. }
            | Type::Function { nullable, .. }
            | Type::Nothing { nullable } => *nullable,
            Type::Unit | Type::Error => false,
        }
    }

    /// Return `self` with nullability forced to `nullable`.
    #[must_use]
    pub fn with_nullable(&self, nullable: bool) -> Type {
        match self.clone() {
            Type::Primitive { name, .. } => Type::Primitive { name, nullable },
            Type::Class { name, type_args, .. } => Type::Class { name, type_args, nullable },
            Type::TypeParameter { name, upper_bound, .. } => {
                Type::TypeParameter { name, upper_bound, nullable }
            }
            Type::Function { receiver, params, ret, .. } => {
                Type::Function { receiver, params, ret, nullable }
            }
            Type::Nothing { .. } => Type::Nothing { nullable },
            unit_or_error => unit_or_error,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Type::Error)
    }

    pub fn is_nothing(&self) -> bool {
        matches!(self, Type::Nothing { .. })
    }

    /// The bare class/primitive name, ignoring type arguments and
    /// nullability, used for name-based comparisons (`Any`, `Number`,
    /// numeric widening, built-in method table lookups).
    pub fn canonical_name(&self, interner: &nova_ir::StringInterner) -> Option<&'static str> {
        match self {
            Type::Primitive { name, .. } | Type::Class { name, .. } => Some(interner.resolve(*name)),
            Type::TypeParameter { name, .. } => Some(interner.resolve(*name)),
            _ => None,
        }
    }
}
