//! Semantic checks beyond scope/type construction (spec §4.9): `const
//! val` compile-time-constant validation, `val` reassignment, and
//! call-site argument count/type checks.

use nova_ir::ast::{BinaryOp, ExprId, ExprKind, LiteralKind, UnaryOp};
use nova_ir::{Name, Span};
use nova_types::is_assignable;

use crate::symbol::{ParamInfo, SymbolKind};

use super::SemanticAnalyzer;

impl SemanticAnalyzer<'_> {
    /// A `const val` initializer must be a compile-time constant: a
    /// non-null literal, a reference to another `const val`, unary `+`/`-`
    /// applied to one, or `+`/`-`/`*`/`/`/`%` of two (spec.md:252).
    pub(crate) fn check_const_initializer(&mut self, name: Name, declared_at: Span, initializer: Option<ExprId>) {
        let ok = match initializer {
            Some(expr) => self.is_compile_time_constant(expr),
            None => false,
        };
        if !ok {
            let text = self.interner.resolve(name);
            self.diagnostics.error(format!("'{text}' is declared 'const' but its initializer is not a compile-time constant"), declared_at);
        }
    }

    pub(crate) fn is_compile_time_constant(&self, expr: ExprId) -> bool {
        match &self.arenas.exprs[expr].kind {
            ExprKind::Literal(LiteralKind::Null) => false,
            ExprKind::Literal(_) => true,
            ExprKind::Identifier(name) => match self.symbols.resolve_in(self.current_scope, *name) {
                Some(symbol) => symbol.kind == SymbolKind::Property && symbol.is_const,
                None => false,
            },
            ExprKind::Unary { op: UnaryOp::Neg | UnaryOp::Pos, operand } => self.is_compile_time_constant(*operand),
            ExprKind::Binary { op: BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod, left, right } => {
                self.is_compile_time_constant(*left) && self.is_compile_time_constant(*right)
            }
            _ => false,
        }
    }

    /// Reassigning through a non-`mutable` binding is an error (spec
    /// §4.9 "val reassignment").
    pub(crate) fn check_assignment_target(&mut self, target: ExprId, span: Span) {
        let name = match &self.arenas.exprs[target].kind {
            ExprKind::Identifier(name) => *name,
            _ => return,
        };
        let Some(symbol) = self.symbols.resolve_in(self.current_scope, name) else {
            return;
        };
        if !symbol.mutable && matches!(symbol.kind, SymbolKind::Variable | SymbolKind::Property | SymbolKind::Parameter) {
            let text = self.interner.resolve(name);
            self.diagnostics.error(format!("val '{text}' cannot be reassigned"), span);
        }
    }

    /// Checks a call's argument count and, where both sides have a known
    /// type, assignability (spec §4.5 "Argument count and type checks",
    /// §4.9). `literal_null`/`always_nothing` corner cases are handled by
    /// `is_assignable` itself via `Nothing?`.
    pub(crate) fn check_call_arguments(&mut self, params: &[ParamInfo], args: &[ExprId], call_span: Span) {
        let required = params.iter().filter(|p| !p.has_default && !p.is_vararg).count();
        let has_vararg = params.iter().any(|p| p.is_vararg);
        if args.len() < required || (!has_vararg && args.len() > params.len()) {
            self.diagnostics.error(format!("expected {} argument(s), found {}", required, args.len()), call_span);
            return;
        }
        for (param, &arg) in params.iter().zip(args.iter()) {
            let Some(expected) = &param.ty else { continue };
            let actual = self.expr_types.get(&arg).cloned().unwrap_or(nova_types::Type::Error);
            if !is_assignable(expected, &actual, self.interner, &self.super_types) {
                let arg_span = self.arenas.exprs[arg].span;
                self.diagnostics.warning("argument type is not assignable to the parameter type".to_string(), arg_span);
            }
        }
    }
}
