//! Expression type inference (spec §4.5): a post-order walk — every
//! child expression is inferred and recorded before its parent's own
//! type is computed, so a parent can always read its children's types
//! straight out of `expr_types`.

use nova_ir::ast::{BinaryOp, ExprId, ExprKind, LambdaParam, LiteralKind, PostfixOp, StmtKind, TypeCastKind, UnaryOp};
use nova_ir::visitor::walk_expr;
use nova_ir::Name;
use nova_types::{common_supertype, constructor_type_args, substitute, unify, Bindings, Type, TypeArgument};

use crate::scope::ScopeKind;
use crate::symbol::{Symbol, SymbolKind};

use super::SemanticAnalyzer;

impl SemanticAnalyzer<'_> {
    pub(crate) fn infer_expr(&mut self, id: ExprId) -> Type {
        let ty = match &self.arenas.exprs[id].kind {
            ExprKind::Lambda { params, implicit_it, body } => {
                let (params, implicit_it, body) = (params.clone(), *implicit_it, *body);
                self.infer_lambda(id, params, implicit_it, body)
            }
            ExprKind::If { condition, binding, then_branch, else_branch } => {
                let (condition, binding, then_branch, else_branch) = (*condition, *binding, *then_branch, *else_branch);
                self.infer_if(condition, binding, then_branch, else_branch)
            }
            ExprKind::Try { body, catches, finally } => {
                let (body, catches, finally) = (*body, catches.clone(), *finally);
                self.infer_try_expr(body, &catches, finally)
            }
            _ => {
                let arenas = self.arenas;
                walk_expr(self, arenas, id);
                self.compute_expr_type(id)
            }
        };
        self.expr_types.insert(id, ty.clone());
        ty
    }

    fn infer_lambda(&mut self, id: ExprId, params: Vec<LambdaParam>, implicit_it: bool, body: nova_ir::ast::StmtId) -> Type {
        let span = self.arenas.exprs[id].span;
        let param_types: Vec<Type> = if implicit_it {
            vec![self.any_type()]
        } else {
            params.iter().map(|p| self.resolver.resolve(p.ty.as_ref()).unwrap_or_else(|| self.any_type())).collect()
        };
        let (_, ret) = self.with_scope(ScopeKind::Lambda, Some(id.into()), None, |this| {
            this.register_range(this.current_scope, span);
            if implicit_it {
                let it_name = this.interner.intern("it");
                let mut sym = Symbol::new(it_name, SymbolKind::Parameter, span);
                sym.structural_type = Some(this.any_type());
                this.define_in_current_scope(sym);
            } else {
                for (p, ty) in params.iter().zip(param_types.iter()) {
                    let mut sym = Symbol::new(p.name, SymbolKind::Parameter, p.span);
                    sym.structural_type = Some(ty.clone());
                    this.define_in_current_scope(sym);
                }
            }
            this.process_stmt(body);
            this.last_block_value(body)
        });
        Type::Function { receiver: None, params: param_types, ret: Box::new(ret), nullable: false }
    }

    /// A lambda body's value is its last expression statement, the way a
    /// block-bodied lambda's final expression becomes its result.
    fn last_block_value(&self, body: nova_ir::ast::StmtId) -> Type {
        if let StmtKind::Block(stmts) = &self.arenas.stmts[body].kind {
            if let Some(&last) = stmts.last() {
                if let StmtKind::Expression(e) = &self.arenas.stmts[last].kind {
                    return self.expr_types.get(e).cloned().unwrap_or(Type::Unit);
                }
            }
        }
        Type::Unit
    }

    fn infer_if(&mut self, condition: ExprId, binding: Option<Name>, then_branch: ExprId, else_branch: Option<ExprId>) -> Type {
        self.infer_expr(condition);
        let cond_span = self.arenas.exprs[condition].span;
        let (_, then_ty) = self.with_scope(ScopeKind::Block, None, None, |this| {
            if let Some(name) = binding {
                let mut sym = Symbol::new(name, SymbolKind::Variable, cond_span);
                sym.structural_type = Some(this.any_type());
                this.define_in_current_scope(sym);
            }
            this.infer_expr(then_branch)
        });
        match else_branch {
            Some(else_id) => {
                let else_ty = self.infer_expr(else_id);
                common_supertype(&then_ty, &else_ty, self.interner, &self.super_types)
            }
            None => Type::Unit,
        }
    }

    /// The catch parameters of a `try` used in expression position need
    /// their own scopes just like the statement form (stmt.rs); the
    /// generic structural walk only visits their bodies, it doesn't bind
    /// anything.
    fn infer_try_expr(&mut self, body: nova_ir::ast::StmtId, catches: &[nova_ir::ast::CatchClause], finally: Option<nova_ir::ast::StmtId>) -> Type {
        self.process_stmt(body);
        for catch in catches {
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
            self.process_stmt(f);
        }
        Type::Unit
    }

    fn primitive(&self, name: &str, nullable: bool) -> Type {
        Type::primitive(self.interner.intern(name), nullable)
    }

    fn child_type(&self, id: ExprId) -> Type {
        self.expr_types.get(&id).cloned().unwrap_or(Type::Error)
    }

    fn is_string(&self, ty: &Type) -> bool {
        ty.canonical_name(self.interner) == Some("String")
    }

    fn compute_expr_type(&mut self, id: ExprId) -> Type {
        match self.arenas.exprs[id].kind.clone() {
            ExprKind::Literal(kind) => match kind {
                LiteralKind::Int(_) => self.primitive("Int", false),
                LiteralKind::Long(_) => self.primitive("Long", false),
                LiteralKind::Float(_) => self.primitive("Float", false),
                LiteralKind::Double(_) => self.primitive("Double", false),
                LiteralKind::Bool(_) => self.primitive("Boolean", false),
                LiteralKind::Char(_) => self.primitive("Char", false),
                LiteralKind::Null => Type::Nothing { nullable: true },
            },
            ExprKind::Identifier(name) => match self.symbols.resolve_in(self.current_scope, name) {
                Some(symbol) => self.symbol_type(symbol),
                None => {
                    let text = self.interner.resolve(name);
                    let span = self.arenas.exprs[id].span;
                    self.diagnostics.error(format!("unresolved reference: '{text}'"), span);
                    Type::Error
                }
            },
            ExprKind::This => self.receiver_type_in_scope(),
            ExprKind::Super => self.super_type_in_scope(),
            ExprKind::Call { callee, args, trailing_lambda, .. } => self.infer_call(id, callee, &args, trailing_lambda),
            ExprKind::Member { receiver, name, .. } => self.infer_member(receiver, name),
            ExprKind::Assign { target, value, .. } => {
                let span = self.arenas.exprs[id].span;
                self.check_assignment_target(target, span);
                Type::Unit
            }
            ExprKind::Binary { op, left, right } => self.infer_binary(op, left, right),
            ExprKind::Unary { op, operand } => match op {
                UnaryOp::Not => self.primitive("Boolean", false),
                _ => self.child_type(operand),
            },
            ExprKind::Postfix { op: PostfixOp::PostInc | PostfixOp::PostDec, operand } => self.child_type(operand),
            ExprKind::Index { receiver, .. } => self.element_type_of(&self.child_type(receiver)),
            ExprKind::Slice { receiver, .. } => self.child_type(receiver),
            ExprKind::When { branches, .. } => {
                branches.iter().fold(Type::Nothing { nullable: false }, |acc, branch| {
                    common_supertype(&acc, &self.child_type(branch.body), self.interner, &self.super_types)
                })
            }
            ExprKind::Await { operand } => self.element_type_of(&self.child_type(operand)),
            ExprKind::Collection { kind, elements, map_entries } => self.infer_collection(kind, &elements, &map_entries),
            ExprKind::Range { from, to, .. } => {
                let merged = common_supertype(&self.child_type(from), &self.child_type(to), self.interner, &self.super_types);
                Type::class(self.interner.intern("Range"), vec![TypeArgument::invariant(merged)], false)
            }
            ExprKind::StringInterpolation(_) => self.primitive("String", false),
            ExprKind::TypeCheck { .. } => self.primitive("Boolean", false),
            ExprKind::TypeCast { kind, ty, .. } => {
                let resolved = self.resolver.resolve(Some(&ty)).unwrap_or(Type::Error);
                match kind {
                    TypeCastKind::As => resolved,
                    TypeCastKind::AsSafe => resolved.with_nullable(true),
                }
            }
            ExprKind::Spread { operand } => self.child_type(operand),
            ExprKind::Pipeline { right, .. } => match self.child_type(right) {
                Type::Function { ret, .. } => *ret,
                _ => self.any_type(),
            },
            ExprKind::MethodRef { receiver, method_name } => self.infer_method_ref(receiver, method_name),
            ExprKind::ObjectLiteral { super_type, .. } => super_type
                .as_ref()
                .and_then(|t| self.resolver.resolve(Some(t)))
                .unwrap_or_else(|| self.any_type()),
            ExprKind::Elvis { left, right } => {
                let left_ty = self.child_type(left).with_nullable(false);
                let right_ty = self.child_type(right);
                let combined = common_supertype(&left_ty, &right_ty, self.interner, &self.super_types);
                combined.with_nullable(right_ty.nullable())
            }
            ExprKind::SafeCall { receiver, name, .. } => self.infer_member(receiver, name).with_nullable(true),
            ExprKind::SafeIndex { receiver, .. } => self.element_type_of(&self.child_type(receiver)).with_nullable(true),
            ExprKind::NotNull { operand } => self.child_type(operand).with_nullable(false),
            ExprKind::ErrorPropagation { operand } => self.element_type_of(&self.child_type(operand)),
            ExprKind::ScopeShorthand { name } => match self.symbols.resolve_in(self.symbols.global(), name) {
                Some(symbol) => self.symbol_type(symbol),
                None => Type::Error,
            },
            ExprKind::Jump { value, .. } => {
                let _ = value.map(|v| self.child_type(v));
                Type::Nothing { nullable: false }
            }
            ExprKind::Placeholder => Type::Error,
            ExprKind::Conditional { then_value, else_value, .. } => {
                common_supertype(&self.child_type(then_value), &self.child_type(else_value), self.interner, &self.super_types)
            }
            ExprKind::Error => Type::Error,
            // Lambda/If/Try set up their own scopes before recursing into
            // children, so `infer_expr` dispatches to them directly and
            // never reaches this function for these three variants.
            ExprKind::Lambda { .. } | ExprKind::If { .. } | ExprKind::Try { .. } => unreachable!(),
        }
    }

    fn infer_binary(&mut self, op: BinaryOp, left: nova_ir::ast::ExprId, right: nova_ir::ast::ExprId) -> Type {
        let (left_ty, right_ty) = (self.child_type(left), self.child_type(right));
        match op {
            BinaryOp::Add if self.is_string(&left_ty) || self.is_string(&right_ty) => self.primitive("String", false),
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
                common_supertype(&left_ty, &right_ty, self.interner, &self.super_types)
            }
            BinaryOp::Eq | BinaryOp::NotEq | BinaryOp::RefEq | BinaryOp::RefNotEq | BinaryOp::Lt | BinaryOp::Gt | BinaryOp::LtEq | BinaryOp::GtEq | BinaryOp::And | BinaryOp::Or | BinaryOp::In | BinaryOp::NotIn => {
                self.primitive("Boolean", false)
            }
            BinaryOp::RangeInclusive | BinaryOp::RangeExclusive => {
                let merged = common_supertype(&left_ty, &right_ty, self.interner, &self.super_types);
                Type::class(self.interner.intern("Range"), vec![TypeArgument::invariant(merged)], false)
            }
            BinaryOp::To => Type::class(self.interner.intern("Pair"), vec![TypeArgument::invariant(left_ty), TypeArgument::invariant(right_ty)], false),
            BinaryOp::Pipeline => match right_ty {
                Type::Function { ret, .. } => *ret,
                _ => self.any_type(),
            },
        }
    }

    fn infer_collection(&mut self, kind: nova_ir::ast::CollectionKind, elements: &[nova_ir::ast::ExprId], map_entries: &[nova_ir::ast::MapEntryExpr]) -> Type {
        use nova_ir::ast::CollectionKind;
        match kind {
            CollectionKind::List | CollectionKind::Set => {
                let elem = elements.iter().fold(Type::Nothing { nullable: false }, |acc, &e| common_supertype(&acc, &self.child_type(e), self.interner, &self.super_types));
                let base = if matches!(kind, CollectionKind::List) { "List" } else { "Set" };
                Type::class(self.interner.intern(base), vec![TypeArgument::invariant(elem)], false)
            }
            CollectionKind::Map => {
                let (key, value) = map_entries.iter().fold((Type::Nothing { nullable: false }, Type::Nothing { nullable: false }), |(ka, va), entry| {
                    (
                        common_supertype(&ka, &self.child_type(entry.key), self.interner, &self.super_types),
                        common_supertype(&va, &self.child_type(entry.value), self.interner, &self.super_types),
                    )
                });
                Type::class(self.interner.intern("Map"), vec![TypeArgument::invariant(key), TypeArgument::invariant(value)], false)
            }
        }
    }

    /// Recognized collection factory calls (spec §4.5 point 3): the
    /// element/key/value types are the least common supertype of the
    /// argument expressions, not looked up through any declared signature,
    /// since these names have no single fixed generic signature to unify
    /// against.
    fn infer_collection_factory_call(&mut self, name_text: &str, args: &[ExprId]) -> Option<Type> {
        let list_like = match name_text {
            "listOf" => Some("List"),
            "mutableListOf" => Some("MutableList"),
            "arrayOf" => Some("Array"),
            "setOf" => Some("Set"),
            "mutableSetOf" => Some("MutableSet"),
            _ => None,
        };
        if let Some(base) = list_like {
            let elem = args.iter().fold(Type::Nothing { nullable: false }, |acc, &a| common_supertype(&acc, &self.child_type(a), self.interner, &self.super_types));
            return Some(Type::class(self.interner.intern(base), vec![TypeArgument::invariant(elem)], false));
        }
        if matches!(name_text, "mapOf" | "mutableMapOf") {
            let (key, value) = args.iter().fold((Type::Nothing { nullable: false }, Type::Nothing { nullable: false }), |(ka, va), &a| {
                let (k_ty, v_ty) = match &self.arenas.exprs[a].kind {
                    ExprKind::Binary { op: BinaryOp::To, left, right } => (self.child_type(*left), self.child_type(*right)),
                    _ => (self.any_type(), self.any_type()),
                };
                (common_supertype(&ka, &k_ty, self.interner, &self.super_types), common_supertype(&va, &v_ty, self.interner, &self.super_types))
            });
            let base = if name_text == "mapOf" { "Map" } else { "MutableMap" };
            return Some(Type::class(self.interner.intern(base), vec![TypeArgument::invariant(key), TypeArgument::invariant(value)], false));
        }
        if name_text == "Pair" && args.len() == 2 {
            let (a_ty, b_ty) = (self.child_type(args[0]), self.child_type(args[1]));
            return Some(Type::class(self.interner.intern("Pair"), vec![TypeArgument::invariant(a_ty), TypeArgument::invariant(b_ty)], false));
        }
        None
    }

    /// `self`'s structural type: the nearest enclosing [`ScopeKind::Class`]
    /// scope's owner type name.
    fn receiver_type_in_scope(&self) -> Type {
        match self.enclosing_class_name() {
            Some(name) => Type::raw_class(name, false),
            None => Type::Error,
        }
    }

    fn super_type_in_scope(&self) -> Type {
        match self.enclosing_class_name().and_then(|name| self.super_types.super_class(name)) {
            Some(name) => Type::raw_class(name, false),
            None => self.any_type(),
        }
    }

    fn enclosing_class_name(&self) -> Option<Name> {
        let mut current = Some(self.current_scope);
        while let Some(id) = current {
            let scope = self.symbols.scope(id);
            if scope.kind == ScopeKind::Class {
                return scope.owner_type_name;
            }
            current = scope.parent;
        }
        None
    }

    /// The element type of an indexable/awaitable/unwrappable single-type-argument
    /// container, `Any` for anything else (spec §4.5).
    fn element_type_of(&self, ty: &Type) -> Type {
        match ty {
            Type::Class { name, type_args, .. } if matches!(self.interner.resolve(*name), "Map" | "MutableMap") && type_args.len() == 2 => {
                type_args[1].ty.clone().unwrap_or_else(|| self.any_type())
            }
            Type::Class { type_args, .. } if type_args.len() == 1 => type_args[0].ty.clone().unwrap_or_else(|| self.any_type()),
            _ => self.any_type(),
        }
    }

    fn infer_member(&mut self, receiver: nova_ir::ast::ExprId, name: Name) -> Type {
        let receiver_ty = self.child_type(receiver);
        let Some(class_name) = self.class_name_of(&receiver_ty) else {
            return self.any_type();
        };
        if let Some(member) = self.class_symbols.get(&class_name).and_then(|c| c.members.get(&name)).cloned() {
            return self.symbol_type(&member);
        }
        if let Some(method) = self.registry.methods_for_type(class_name).iter().find(|m| m.name == name) {
            return Type::raw_class(method.return_type_name, false);
        }
        let span = self.arenas.exprs[receiver].span;
        let text = self.interner.resolve(name);
        self.diagnostics.error(format!("unresolved member '{text}'"), span);
        Type::Error
    }

    fn infer_method_ref(&mut self, receiver: Option<nova_ir::ast::ExprId>, method_name: Name) -> Type {
        let Some(receiver) = receiver else {
            return match self.symbols.resolve_in(self.current_scope, method_name) {
                Some(symbol) => self.symbol_type(symbol),
                None => Type::Error,
            };
        };
        let receiver_ty = self.child_type(receiver);
        let Some(class_name) = self.class_name_of(&receiver_ty) else {
            return Type::Error;
        };
        match self.class_symbols.get(&class_name).and_then(|c| c.members.get(&method_name)).cloned() {
            Some(member) => self.symbol_type(&member),
            None => Type::Error,
        }
    }

    fn class_name_of(&self, ty: &Type) -> Option<Name> {
        ty.canonical_name(self.interner).map(|text| self.interner.intern(text))
    }

    fn infer_call(&mut self, call_id: ExprId, callee: nova_ir::ast::ExprId, args: &[nova_ir::ast::ExprId], _trailing_lambda: Option<nova_ir::ast::ExprId>) -> Type {
        match self.arenas.exprs[callee].kind.clone() {
            ExprKind::Identifier(name) => {
                let text = self.interner.resolve(name);
                if let Some(ty) = self.infer_collection_factory_call(text, args) {
                    return ty;
                }
                match self.symbols.resolve_in(self.current_scope, name).cloned() {
                    Some(symbol) if symbol.is_class_like() => self.infer_constructor_call(call_id, name, &symbol, args),
                    Some(symbol) => self.infer_function_call(call_id, name, &symbol, args),
                    None => {
                        let span = self.arenas.exprs[callee].span;
                        self.diagnostics.error(format!("unresolved reference: '{text}'"), span);
                        Type::Error
                    }
                }
            }
            ExprKind::Member { receiver, name, .. } => self.infer_method_call(call_id, receiver, name, args),
            _ => match self.child_type(callee) {
                Type::Function { params, ret, .. } => {
                    if args.len() != params.len() {
                        let span = self.arenas.exprs[call_id].span;
                        self.diagnostics.error(format!("expected {} argument(s), found {}", params.len(), args.len()), span);
                    }
                    *ret
                }
                _ => Type::Error,
            },
        }
    }

    fn infer_function_call(&mut self, call_id: ExprId, name: Name, symbol: &Symbol, args: &[nova_ir::ast::ExprId]) -> Type {
        let Some(params) = symbol.parameters.clone() else {
            return self.function_return_type(symbol);
        };
        let ret = self.function_return_type(symbol);
        let type_param_names = self.resolver.declaration(name).map(|d| d.type_param_names.clone()).unwrap_or_default();
        let span = self.arenas.exprs[call_id].span;
        if type_param_names.is_empty() {
            self.check_call_arguments(&params, args, span);
            return ret;
        }
        let mut bindings = Bindings::new();
        for (param, &arg) in params.iter().zip(args.iter()) {
            if let Some(formal) = &param.ty {
                let actual = self.child_type(arg);
                unify(formal, &actual, &type_param_names, &mut bindings, self.interner, &self.super_types);
            }
        }
        self.check_call_arguments(&params, args, span);
        substitute(&ret, &bindings)
    }

    fn infer_constructor_call(&mut self, call_id: ExprId, name: Name, symbol: &Symbol, args: &[nova_ir::ast::ExprId]) -> Type {
        let params = symbol.parameters.clone().unwrap_or_default();
        let type_param_names = self.resolver.declaration(name).map(|d| d.type_param_names.clone()).unwrap_or_default();
        let span = self.arenas.exprs[call_id].span;
        self.check_call_arguments(&params, args, span);
        if type_param_names.is_empty() {
            return Type::raw_class(name, false);
        }
        let mut bindings = Bindings::new();
        for (param, &arg) in params.iter().zip(args.iter()) {
            if let Some(formal) = &param.ty {
                let actual = self.child_type(arg);
                unify(formal, &actual, &type_param_names, &mut bindings, self.interner, &self.super_types);
            }
        }
        let type_args = constructor_type_args(&type_param_names, &bindings, self.interner);
        Type::class(name, type_args, false)
    }

    fn infer_method_call(&mut self, call_id: ExprId, receiver: nova_ir::ast::ExprId, name: Name, args: &[nova_ir::ast::ExprId]) -> Type {
        let receiver_ty = self.child_type(receiver);
        let Some(class_name) = self.class_name_of(&receiver_ty) else {
            return self.any_type();
        };
        if let Some(method) = self.class_symbols.get(&class_name).and_then(|c| c.members.get(&name)).cloned() {
            return self.infer_function_call(call_id, name, &method, args);
        }
        if let Some(method) = self.registry.methods_for_type(class_name).iter().find(|m| m.name == name).cloned() {
            return Type::raw_class(method.return_type_name, false);
        }
        let span = self.arenas.exprs[receiver].span;
        let text = self.interner.resolve(name);
        self.diagnostics.error(format!("unresolved member '{text}'"), span);
        Type::Error
    }

    fn function_return_type(&self, symbol: &Symbol) -> Type {
        match &symbol.structural_type {
            Some(Type::Function { ret, .. }) => (**ret).clone(),
            Some(other) => other.clone(),
            None => Type::Unit,
        }
    }
}
