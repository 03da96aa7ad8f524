//! Type-reference AST nodes (spec §3 "Type references").
//!
//! `TypeRef` is the *syntactic* form written in source; `nova_types`
//! resolves it into the *structural* type model.

use crate::ast::common::TypeArgument;
use crate::name::Name;
use crate::span::Span;

/// A possibly-qualified name, e.g. `foo.Bar`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct QualifiedName {
    pub segments: Vec<Name>,
    pub span: Span,
}

impl QualifiedName {
    pub fn simple(name: Name, span: Span) -> Self {
        QualifiedName { segments: vec![name], span }
    }

    /// The final segment, e.g. `Bar` in `foo.Bar`.
    pub fn last(&self) -> Name {
        *self.segments.last().expect("QualifiedName always has >=1 segment")
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum TypeRefKind {
    Simple(QualifiedName),
    Nullable(Box<TypeRef>),
    Generic(QualifiedName, Vec<TypeArgument>),
    Function {
        receiver: Option<Box<TypeRef>>,
        params: Vec<TypeRef>,
        return_ty: Option<Box<TypeRef>>,
        is_suspend: bool,
    },
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct TypeRef {
    pub kind: TypeRefKind,
    pub span: Span,
}

impl TypeRef {
    pub fn simple(name: QualifiedName, span: Span) -> Self {
        TypeRef { kind: TypeRefKind::Simple(name), span }
    }

    pub fn nullable(inner: TypeRef, span: Span) -> Self {
        TypeRef { kind: TypeRefKind::Nullable(Box::new(inner)), span }
    }
}
