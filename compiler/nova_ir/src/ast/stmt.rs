//! Statement AST nodes (spec §3 "Statements").

use crate::arena::Idx;
use crate::ast::decl::DeclId;
use crate::ast::expr::ExprId;
use crate::ast::ty::TypeRef;
use crate::name::Name;
use crate::span::Span;

pub type StmtId = Idx<Stmt>;

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ForBinding {
    pub name: Name,
    pub ty: Option<TypeRef>,
    pub span: Span,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum StmtKind {
    Block(Vec<StmtId>),
    Expression(ExprId),
    Declaration(DeclId),
    If {
        condition: ExprId,
        then_branch: StmtId,
        else_branch: Option<StmtId>,
    },
    When {
        subject: Option<ExprId>,
        branches: Vec<(Vec<ExprId>, StmtId)>,
    },
    For {
        binding: ForBinding,
        iterable: ExprId,
        body: StmtId,
    },
    While {
        condition: ExprId,
        body: StmtId,
    },
    DoWhile {
        body: StmtId,
        condition: ExprId,
    },
    Try {
        body: StmtId,
        catches: Vec<crate::ast::expr::CatchClause>,
        finally: Option<StmtId>,
    },
    Return(Option<ExprId>),
    Break(Option<Name>),
    Continue(Option<Name>),
    Throw(ExprId),
    /// `guard <cond> else { <body> }` — early-exit statement.
    Guard {
        condition: ExprId,
        else_body: StmtId,
    },
    /// `use x = expr` — scoped resource statement whose binding is
    /// released at the end of the enclosing block.
    Use {
        name: Name,
        value: ExprId,
        name_span: Span,
    },
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}
