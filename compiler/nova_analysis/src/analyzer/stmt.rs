//! Statement processing (spec §4.4 "Scope-introducing constructs"):
//! dispatches each statement kind, pushing a fresh [`crate::scope::ScopeKind::Block`]
//! wherever new bindings could come into existence.

use nova_ir::ast::{StmtId, StmtKind};
use nova_types::{is_assignable, Type};

use crate::scope::ScopeKind;
use crate::symbol::{Symbol, SymbolKind};

use super::SemanticAnalyzer;

impl SemanticAnalyzer<'_> {
    pub(crate) fn process_stmt(&mut self, id: StmtId) {
        let span = self.arenas.stmts[id].span;
        match &self.arenas.stmts[id].kind {
            StmtKind::Block(stmts) => {
                let stmts = stmts.clone();
                self.with_scope(ScopeKind::Block, Some(id.into()), None, |this| {
                    this.register_range(this.current_scope, span);
                    for s in &stmts {
                        this.process_stmt(*s);
                    }
                });
            }
            StmtKind::Expression(e) => {
                let e = *e;
                self.infer_expr(e);
            }
            StmtKind::Declaration(d) => {
                let d = *d;
                self.process_decl(d);
            }
            StmtKind::If { condition, then_branch, else_branch } => {
                let (condition, then_branch, else_branch) = (*condition, *then_branch, *else_branch);
                self.infer_expr(condition);
                self.process_branch(then_branch);
                if let Some(e) = else_branch {
                    self.process_branch(e);
                }
            }
            StmtKind::When { subject, branches } => {
                let (subject, branches) = (*subject, branches.clone());
                if let Some(s) = subject {
                    self.infer_expr(s);
                }
                for (conditions, body) in &branches {
                    for c in conditions {
                        self.infer_expr(*c);
                    }
                    self.process_branch(*body);
                }
            }
            StmtKind::For { binding, iterable, body } => {
                let (binding, iterable, body) = (binding.clone(), *iterable, *body);
                let iterable_ty = self.infer_expr(iterable);
                let element_ty = self.resolver.resolve(binding.ty.as_ref()).unwrap_or_else(|| self.element_type_of(&iterable_ty));
                self.with_scope(ScopeKind::Block, Some(id.into()), None, |this| {
                    this.register_range(this.current_scope, span);
                    let mut sym = Symbol::new(binding.name, SymbolKind::Variable, binding.span);
                    sym.structural_type = Some(element_ty);
                    this.define_in_current_scope(sym);
                    this.process_stmt(body);
                });
            }
            StmtKind::While { condition, body } => {
                let (condition, body) = (*condition, *body);
                self.infer_expr(condition);
                self.process_branch(body);
            }
            StmtKind::DoWhile { body, condition } => {
                let (body, condition) = (*body, *condition);
                self.process_branch(body);
                self.infer_expr(condition);
            }
            StmtKind::Try { body, catches, finally } => {
                let (body, catches, finally) = (*body, catches.clone(), *finally);
                self.process_branch(body);
                for catch in &catches {
                    self.with_scope(ScopeKind::Block, None, None, |this| {
                        this.register_range(this.current_scope, catch.span);
                        let ty = this.resolver.resolve(catch.param_ty.as_ref()).unwrap_or_else(|| this.any_type());
                        let mut sym = Symbol::new(catch.param_name, SymbolKind::Parameter, catch.span);
                        sym.structural_type = Some(ty);
                        this.define_in_current_scope(sym);
                        this.process_stmt(catch.body);
                    });
                }
                if let Some(f) = finally {
                    self.process_branch(f);
                }
            }
            StmtKind::Return(expr) => {
                let ret_ty = expr.map(|e| self.infer_expr(e));
                if let Some(Some(declared)) = self.function_return_stack.last().cloned() {
                    let actual = ret_ty.unwrap_or(Type::Unit);
                    if !is_assignable(&declared, &actual, self.interner, &self.super_types) {
                        self.diagnostics.warning("return value type is not assignable to the declared return type".to_string(), span);
                    }
                }
            }
            StmtKind::Break(_) | StmtKind::Continue(_) => {}
            StmtKind::Throw(e) => {
                let e = *e;
                self.infer_expr(e);
            }
            StmtKind::Guard { condition, else_body } => {
                let (condition, else_body) = (*condition, *else_body);
                self.infer_expr(condition);
                self.process_branch(else_body);
            }
            StmtKind::Use { name, value, name_span } => {
                let (name, value, name_span) = (*name, *value, *name_span);
                let ty = self.infer_expr(value);
                let mut sym = Symbol::new(name, SymbolKind::Variable, name_span);
                sym.structural_type = Some(ty);
                self.define_in_current_scope(sym);
            }
        }
    }

    /// Process a branch/loop body under its own scope, unless it's
    /// already a `Block` (which creates one itself in `process_stmt`).
    fn process_branch(&mut self, id: StmtId) {
        if matches!(self.arenas.stmts[id].kind, StmtKind::Block(_)) {
            self.process_stmt(id);
            return;
        }
        let span = self.arenas.stmts[id].span;
        self.with_scope(ScopeKind::Block, None, None, |this| {
            this.register_range(this.current_scope, span);
            this.process_stmt(id);
        });
    }

    /// The element type of a `for` loop's iterable: its sole type
    /// argument when generic, `Any` otherwise (spec §4.5 "For loops").
    fn element_type_of(&self, iterable_ty: &Type) -> Type {
        match iterable_ty {
            Type::Class { type_args, .. } if type_args.len() == 1 => {
                type_args[0].ty.clone().unwrap_or_else(|| self.any_type())
            }
            _ => self.any_type(),
        }
    }
}
