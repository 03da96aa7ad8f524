//! AST traversal.
//!
//! Per spec §9 design notes, the "visitor capability" over the closed
//! node-variant set is implemented as exhaustive `match` dispatch (checked
//! at compile time) rather than a dynamic-dispatch visitor interface. The
//! [`Visitor`] trait below gives callers one override point per node
//! family; `walk_*` performs the actual recursion and is what every
//! override should delegate to for the parts of a node it does not
//! special-case.

use crate::ast::{AstArenas, Decl, DeclId, DeclKind, Expr, ExprId, ExprKind, Stmt, StmtId, StmtKind};

pub trait Visitor {
    fn visit_expr(&mut self, arenas: &AstArenas, id: ExprId) {
        walk_expr(self, arenas, id);
    }
    fn visit_stmt(&mut self, arenas: &AstArenas, id: StmtId) {
        walk_stmt(self, arenas, id);
    }
    fn visit_decl(&mut self, arenas: &AstArenas, id: DeclId) {
        walk_decl(self, arenas, id);
    }
}

pub fn walk_expr<V: Visitor + ?Sized>(v: &mut V, arenas: &AstArenas, id: ExprId) {
    let Expr { kind, .. } = &arenas.exprs[id];
    match kind {
        ExprKind::Literal(_)
        | ExprKind::Identifier(_)
        | ExprKind::This
        | ExprKind::Super
        | ExprKind::ScopeShorthand { .. }
        | ExprKind::Placeholder
        | ExprKind::Error => {}
        ExprKind::Call { callee, args, trailing_lambda, .. } => {
            v.visit_expr(arenas, *callee);
            for a in args {
                v.visit_expr(arenas, *a);
            }
            if let Some(lam) = trailing_lambda {
                v.visit_expr(arenas, *lam);
            }
        }
        ExprKind::Member { receiver, .. } => v.visit_expr(arenas, *receiver),
        ExprKind::Assign { target, value, .. } => {
            v.visit_expr(arenas, *target);
            v.visit_expr(arenas, *value);
        }
        ExprKind::Binary { left, right, .. } => {
            v.visit_expr(arenas, *left);
            v.visit_expr(arenas, *right);
        }
        ExprKind::Unary { operand, .. }
        | ExprKind::Postfix { operand, .. }
        | ExprKind::Await { operand }
        | ExprKind::Spread { operand }
        | ExprKind::NotNull { operand }
        | ExprKind::ErrorPropagation { operand } => v.visit_expr(arenas, *operand),
        ExprKind::Index { receiver, index } | ExprKind::SafeIndex { receiver, index } => {
            v.visit_expr(arenas, *receiver);
            v.visit_expr(arenas, *index);
        }
        ExprKind::Slice { receiver, from, to } => {
            v.visit_expr(arenas, *receiver);
            if let Some(f) = from {
                v.visit_expr(arenas, *f);
            }
            if let Some(t) = to {
                v.visit_expr(arenas, *t);
            }
        }
        ExprKind::Lambda { body, .. } => v.visit_stmt(arenas, *body),
        ExprKind::If { condition, then_branch, else_branch, .. } => {
            v.visit_expr(arenas, *condition);
            v.visit_expr(arenas, *then_branch);
            if let Some(e) = else_branch {
                v.visit_expr(arenas, *e);
            }
        }
        ExprKind::When { subject, branches } => {
            if let Some(s) = subject {
                v.visit_expr(arenas, *s);
            }
            for b in branches {
                for c in &b.conditions {
                    v.visit_expr(arenas, *c);
                }
                v.visit_expr(arenas, b.body);
            }
        }
        ExprKind::Try { body, catches, finally } => {
            v.visit_stmt(arenas, *body);
            for c in catches {
                v.visit_stmt(arenas, c.body);
            }
            if let Some(f) = finally {
                v.visit_stmt(arenas, *f);
            }
        }
        ExprKind::Collection { elements, map_entries, .. } => {
            for e in elements {
                v.visit_expr(arenas, *e);
            }
            for entry in map_entries {
                v.visit_expr(arenas, entry.key);
                v.visit_expr(arenas, entry.value);
            }
        }
        ExprKind::Range { from, to, step, .. } => {
            v.visit_expr(arenas, *from);
            v.visit_expr(arenas, *to);
            if let Some(s) = step {
                v.visit_expr(arenas, *s);
            }
        }
        ExprKind::StringInterpolation(parts) => {
            for p in parts {
                if let Some(e) = p.expr {
                    v.visit_expr(arenas, e);
                }
            }
        }
        ExprKind::TypeCheck { operand, .. } | ExprKind::TypeCast { operand, .. } => {
            v.visit_expr(arenas, *operand);
        }
        ExprKind::Pipeline { left, right } | ExprKind::Elvis { left, right } => {
            v.visit_expr(arenas, *left);
            v.visit_expr(arenas, *right);
        }
        ExprKind::MethodRef { receiver, .. } => {
            if let Some(r) = receiver {
                v.visit_expr(arenas, *r);
            }
        }
        ExprKind::ObjectLiteral { members, .. } => {
            for m in members {
                v.visit_decl(arenas, *m);
            }
        }
        ExprKind::SafeCall { receiver, .. } => v.visit_expr(arenas, *receiver),
        ExprKind::Jump { value, .. } => {
            if let Some(val) = value {
                v.visit_expr(arenas, *val);
            }
        }
        ExprKind::Conditional { condition, then_value, else_value } => {
            v.visit_expr(arenas, *condition);
            v.visit_expr(arenas, *then_value);
            v.visit_expr(arenas, *else_value);
        }
    }
}

pub fn walk_stmt<V: Visitor + ?Sized>(v: &mut V, arenas: &AstArenas, id: StmtId) {
    let Stmt { kind, .. } = &arenas.stmts[id];
    match kind {
        StmtKind::Block(stmts) => {
            for s in stmts {
                v.visit_stmt(arenas, *s);
            }
        }
        StmtKind::Expression(e) => v.visit_expr(arenas, *e),
        StmtKind::Declaration(d) => v.visit_decl(arenas, *d),
        StmtKind::If { condition, then_branch, else_branch } => {
            v.visit_expr(arenas, *condition);
            v.visit_stmt(arenas, *then_branch);
            if let Some(e) = else_branch {
                v.visit_stmt(arenas, *e);
            }
        }
        StmtKind::When { subject, branches } => {
            if let Some(s) = subject {
                v.visit_expr(arenas, *s);
            }
            for (conds, body) in branches {
                for c in conds {
                    v.visit_expr(arenas, *c);
                }
                v.visit_stmt(arenas, *body);
            }
        }
        StmtKind::For { iterable, body, .. } => {
            v.visit_expr(arenas, *iterable);
            v.visit_stmt(arenas, *body);
        }
        StmtKind::While { condition, body } => {
            v.visit_expr(arenas, *condition);
            v.visit_stmt(arenas, *body);
        }
        StmtKind::DoWhile { body, condition } => {
            v.visit_stmt(arenas, *body);
            v.visit_expr(arenas, *condition);
        }
        StmtKind::Try { body, catches, finally } => {
            v.visit_stmt(arenas, *body);
            for c in catches {
                v.visit_stmt(arenas, c.body);
            }
            if let Some(f) = finally {
                v.visit_stmt(arenas, *f);
            }
        }
        StmtKind::Return(Some(e)) => v.visit_expr(arenas, *e),
        StmtKind::Return(None) => {}
        StmtKind::Break(_) | StmtKind::Continue(_) => {}
        StmtKind::Throw(e) => v.visit_expr(arenas, *e),
        StmtKind::Guard { condition, else_body } => {
            v.visit_expr(arenas, *condition);
            v.visit_stmt(arenas, *else_body);
        }
        StmtKind::Use { value, .. } => v.visit_expr(arenas, *value),
    }
}

pub fn walk_decl<V: Visitor + ?Sized>(v: &mut V, arenas: &AstArenas, id: DeclId) {
    let Decl { kind, .. } = &arenas.decls[id];
    match kind {
        DeclKind::Class { members, enum_entries, super_ctor_args, .. } => {
            for a in super_ctor_args {
                v.visit_expr(arenas, *a);
            }
            for entry in enum_entries {
                for a in &entry.args {
                    v.visit_expr(arenas, *a);
                }
            }
            for m in members {
                v.visit_decl(arenas, *m);
            }
        }
        DeclKind::Fun { body, expr_body, .. } => {
            if let Some(b) = body {
                v.visit_stmt(arenas, *b);
            }
            if let Some(e) = expr_body {
                v.visit_expr(arenas, *e);
            }
        }
        DeclKind::Property { initializer, getter, setter, .. } => {
            if let Some(i) = initializer {
                v.visit_expr(arenas, *i);
            }
            if let Some(g) = getter {
                v.visit_decl(arenas, *g);
            }
            if let Some(s) = setter {
                v.visit_decl(arenas, *s);
            }
        }
        DeclKind::Constructor { delegate_args, body, .. } => {
            for a in delegate_args {
                v.visit_expr(arenas, *a);
            }
            if let Some(b) = body {
                v.visit_stmt(arenas, *b);
            }
        }
        DeclKind::InitBlock(body) => v.visit_stmt(arenas, *body),
        DeclKind::Destructuring { initializer, .. } => v.visit_expr(arenas, *initializer),
        DeclKind::TypeAlias { .. } | DeclKind::Import { .. } | DeclKind::Package(_) => {}
    }
}
