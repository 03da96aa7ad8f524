//! Declaration AST nodes (spec §3 "Declarations").

use crate::arena::Idx;
use crate::ast::common::{Annotation, Modifiers, Parameter, TypeParameter};
use crate::ast::expr::ExprId;
use crate::ast::stmt::StmtId;
use crate::ast::ty::{QualifiedName, TypeRef};
use crate::name::Name;
use crate::span::Span;

pub type DeclId = Idx<Decl>;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ClassKind {
    Class,
    Interface,
    Object,
    Enum,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct EnumEntry {
    pub name: Name,
    pub args: Vec<ExprId>,
    pub span: Span,
    pub name_span: Span,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct DestructuringBinding {
    pub name: Name,
    pub ty: Option<TypeRef>,
    pub span: Span,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum DeclKind {
    /// `class`/`interface`/`object`/`enum`, unified: the spec's
    /// `ClassDecl`, `InterfaceDecl`, `ObjectDecl`, and `EnumDecl` are one
    /// shape distinguished by `kind`, per §4.4 ("Interfaces, objects, and
    /// enums follow the same template with kind-specific tweaks").
    Class {
        kind: ClassKind,
        name: Name,
        name_span: Span,
        type_params: Vec<TypeParameter>,
        primary_ctor: Vec<Parameter>,
        super_class: Option<TypeRef>,
        super_ctor_args: Vec<ExprId>,
        interfaces: Vec<TypeRef>,
        enum_entries: Vec<EnumEntry>,
        members: Vec<DeclId>,
    },
    Fun {
        name: Name,
        name_span: Span,
        type_params: Vec<TypeParameter>,
        receiver_ty: Option<TypeRef>,
        params: Vec<Parameter>,
        return_ty: Option<TypeRef>,
        body: Option<StmtId>,
        expr_body: Option<ExprId>,
    },
    Property {
        name: Name,
        name_span: Span,
        ty: Option<TypeRef>,
        mutable: bool,
        initializer: Option<ExprId>,
        getter: Option<DeclId>,
        setter: Option<DeclId>,
        receiver_ty: Option<TypeRef>,
    },
    Constructor {
        params: Vec<Parameter>,
        delegates_to_super: bool,
        delegate_args: Vec<ExprId>,
        body: Option<StmtId>,
    },
    InitBlock(StmtId),
    TypeAlias {
        name: Name,
        name_span: Span,
        type_params: Vec<TypeParameter>,
        target: TypeRef,
    },
    Destructuring {
        bindings: Vec<DestructuringBinding>,
        mutable: bool,
        initializer: ExprId,
    },
    Import {
        path: QualifiedName,
        alias: Option<Name>,
        is_wildcard: bool,
    },
    Package(QualifiedName),
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Decl {
    pub kind: DeclKind,
    pub annotations: Vec<Annotation>,
    pub modifiers: Modifiers,
    pub span: Span,
}

impl Decl {
    /// The name used for redefinition checks and symbol binding, if any
    /// (package/import/init-block/destructuring declarations have none).
    pub fn name(&self) -> Option<Name> {
        match &self.kind {
            DeclKind::Class { name, .. }
            | DeclKind::Fun { name, .. }
            | DeclKind::Property { name, .. }
            | DeclKind::TypeAlias { name, .. } => Some(*name),
            DeclKind::Constructor { .. }
            | DeclKind::InitBlock(_)
            | DeclKind::Destructuring { .. }
            | DeclKind::Import { .. }
            | DeclKind::Package(_) => None,
        }
    }

    pub fn name_span(&self) -> Span {
        match &self.kind {
            DeclKind::Class { name_span, .. }
            | DeclKind::Fun { name_span, .. }
            | DeclKind::Property { name_span, .. }
            | DeclKind::TypeAlias { name_span, .. } => *name_span,
            _ => self.span,
        }
    }
}
