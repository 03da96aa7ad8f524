//! Shared AST building blocks: modifiers, visibility, annotations,
//! parameters, and generics.

use crate::ast::ty::TypeRef;
use crate::name::Name;
use crate::span::Span;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Protected,
    Internal,
}

/// Declaration-site variance of a type parameter, or use-site variance of
/// a type argument.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum Variance {
    #[default]
    Invariant,
    In,
    Out,
}

#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Modifiers {
    pub visibility: Visibility,
    pub open: bool,
    pub abstract_: bool,
    pub sealed: bool,
    pub final_: bool,
    pub operator: bool,
    pub inline: bool,
    pub suspend: bool,
    pub override_: bool,
    pub const_: bool,
    pub companion: bool,
    pub vararg: bool,
    pub reified: bool,
    pub crossinline: bool,
    pub static_: bool,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Annotation {
    pub name: Name,
    pub span: Span,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct TypeParameter {
    pub name: Name,
    pub variance: Variance,
    pub upper_bound: Option<TypeRef>,
    pub is_reified: bool,
    pub span: Span,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct TypeArgument {
    pub variance: Variance,
    pub ty: Option<TypeRef>,
    pub is_wildcard: bool,
}

/// A function/constructor/lambda parameter. Primary-constructor
/// parameters additionally carry `is_property`/`mutable` when declared
/// with a `val`/`var` qualifier (spec §4.4 step 5).
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Parameter {
    pub name: Name,
    pub ty: Option<TypeRef>,
    pub default: Option<crate::ast::expr::ExprId>,
    pub is_vararg: bool,
    pub is_property: bool,
    pub mutable: bool,
    pub span: Span,
    pub name_span: Span,
}
