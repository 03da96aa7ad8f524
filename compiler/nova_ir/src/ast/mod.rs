//! The Nova abstract syntax tree.
//!
//! Five node families (spec §3): top-level [`Program`], [`decl::Decl`],
//! [`stmt::Stmt`], [`expr::Expr`], and [`ty::TypeRef`]. Expressions,
//! statements, and declarations are arena-allocated and referenced by
//! [`crate::arena::Idx`] so that every node has a stable identity
//! independent of its structural content (see `nova_ir::arena`).

pub mod common;
pub mod decl;
pub mod expr;
pub mod stmt;
pub mod ty;

use crate::arena::Arena;
use crate::span::Span;
pub use common::{Annotation, Modifiers, Parameter, TypeArgument, TypeParameter, Variance, Visibility};
pub use decl::{ClassKind, Decl, DeclId, DeclKind, DestructuringBinding, EnumEntry};
pub use expr::{
    BinaryOp, CatchClause, CollectionKind, Expr, ExprId, ExprKind, JumpKind, LambdaParam,
    LiteralKind, MapEntryExpr, PostfixOp, StringPart, TypeCastKind, TypeCheckKind, UnaryOp,
    WhenBranch,
};
pub use stmt::{ForBinding, Stmt, StmtId, StmtKind};
pub use ty::{QualifiedName, TypeRef, TypeRefKind};

/// All arena-allocated node storage for one parsed file.
#[derive(Default)]
pub struct AstArenas {
    pub exprs: Arena<Expr>,
    pub stmts: Arena<Stmt>,
    pub decls: Arena<Decl>,
}

impl AstArenas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc_expr(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.exprs.alloc(Expr { kind, span })
    }

    pub fn alloc_stmt(&mut self, kind: StmtKind, span: Span) -> StmtId {
        self.stmts.alloc(Stmt { kind, span })
    }

    pub fn alloc_decl(&mut self, decl: Decl) -> DeclId {
        self.decls.alloc(decl)
    }
}

/// The root node produced by the parser (spec §3 "Program/top-level").
#[derive(Clone, Debug, Default)]
pub struct Program {
    pub package: Option<QualifiedName>,
    pub imports: Vec<DeclId>,
    pub declarations: Vec<DeclId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;
    use crate::visitor::Visitor;
    use pretty_assertions::assert_eq;

    struct CountLiterals(u32);
    impl Visitor for CountLiterals {
        fn visit_expr(&mut self, arenas: &AstArenas, id: ExprId) {
            if matches!(arenas.exprs[id].kind, ExprKind::Literal(_)) {
                self.0 += 1;
            }
            crate::visitor::walk_expr(self, arenas, id);
        }
    }

    #[test]
    fn arena_identity_is_stable_across_equal_literals() {
        let mut arenas = AstArenas::new();
        let a = arenas.alloc_expr(ExprKind::Literal(LiteralKind::Int(1)), Span::UNKNOWN);
        let b = arenas.alloc_expr(ExprKind::Literal(LiteralKind::Int(1)), Span::UNKNOWN);
        assert_ne!(a, b, "structurally-equal literals must not collapse to one identity");
    }

    #[test]
    fn visitor_walks_binary_children() {
        let mut arenas = AstArenas::new();
        let one = arenas.alloc_expr(ExprKind::Literal(LiteralKind::Int(1)), Span::UNKNOWN);
        let two = arenas.alloc_expr(ExprKind::Literal(LiteralKind::Int(2)), Span::UNKNOWN);
        let sum = arenas.alloc_expr(
            ExprKind::Binary { op: BinaryOp::Add, left: one, right: two },
            Span::UNKNOWN,
        );
        let mut counter = CountLiterals(0);
        counter.visit_expr(&arenas, sum);
        assert_eq!(counter.0, 2);
    }
}
