//! Declaration processing (spec §4.4): symbol-table construction for
//! classes/interfaces/objects/enums, functions, properties, constructors,
//! type aliases, destructuring, and imports.

use nova_ir::ast::{ClassKind, DeclId, DeclKind, Parameter};
use nova_types::{check_class_variance, check_member_variance, is_assignable, Type};

use crate::scope::ScopeKind;
use crate::symbol::{ParamInfo, Symbol, SymbolKind};

use super::SemanticAnalyzer;

impl SemanticAnalyzer<'_> {
    pub(crate) fn process_decl(&mut self, id: DeclId) -> Option<Symbol> {
        match &self.arenas.decls[id].kind {
            DeclKind::Class { .. } => self.process_class(id),
            DeclKind::Fun { .. } => self.process_fun(id),
            DeclKind::Property { .. } => self.process_property(id),
            DeclKind::Constructor { .. } => self.process_constructor(id),
            DeclKind::InitBlock(_) => self.process_init_block(id),
            DeclKind::TypeAlias { .. } => self.process_typealias(id),
            DeclKind::Destructuring { .. } => self.process_destructuring(id),
            DeclKind::Import { .. } => self.process_import(id),
            DeclKind::Package(_) => None,
        }
    }

    fn build_param_infos(&mut self, params: &[Parameter]) -> Vec<ParamInfo> {
        params
            .iter()
            .map(|p| ParamInfo {
                name: p.name,
                ty: self.resolver.resolve(p.ty.as_ref()),
                has_default: p.default.is_some(),
                is_vararg: p.is_vararg,
            })
            .collect()
    }

    /// Spec §4.4 class processing order: register generics and
    /// super-types, process the primary constructor and members under a
    /// fresh class scope, run variance checks, then define the finished
    /// symbol in the enclosing scope exactly once. Building the symbol as
    /// an owned local across all steps (rather than mutating it in place
    /// inside the scope arena) sidesteps re-borrowing a `Vec`-stored
    /// symbol mid-construction; nothing observable depends on the class
    /// symbol being present in scope before its own body is processed,
    /// since member/self-type references resolve through raw type names,
    /// not through a scope lookup of the class itself.
    fn process_class(&mut self, id: DeclId) -> Option<Symbol> {
        let decl_span = self.arenas.decls[id].span;
        let (kind, name, name_span, type_params, primary_ctor, super_class, interfaces, enum_entries, members) = match &self.arenas.decls[id].kind {
            DeclKind::Class { kind, name, name_span, type_params, primary_ctor, super_class, interfaces, enum_entries, members, .. } => {
                (*kind, *name, *name_span, type_params.clone(), primary_ctor.clone(), super_class.clone(), interfaces.clone(), enum_entries.clone(), members.clone())
            }
            _ => unreachable!("process_class called on a non-class declaration"),
        };

        self.resolver.enter_type_params(&type_params);
        self.resolver.register_type_declaration(name, &type_params);

        let symbol_kind = match kind {
            ClassKind::Class => SymbolKind::Class,
            ClassKind::Interface => SymbolKind::Interface,
            ClassKind::Object => SymbolKind::Object,
            ClassKind::Enum => SymbolKind::Enum,
        };
        let mut symbol = Symbol::new(name, symbol_kind, name_span);
        symbol.declaration_node = Some(id);
        symbol.structural_type = Some(Type::raw_class(name, false));
        symbol.parameters = Some(self.build_param_infos(&primary_ctor));

        let super_name = super_class.as_ref().and_then(|t| self.simple_type_name(t));
        let interface_names: Vec<_> = interfaces.iter().filter_map(|t| self.simple_type_name(t)).collect();
        symbol.super_class_name = super_name;
        symbol.interface_names = interface_names.clone();
        self.super_types.register(name, super_name, interface_names);

        self.with_scope(ScopeKind::Class, Some(id.into()), Some(name), |this| {
            this.register_range(this.current_scope, decl_span);

            for param in &primary_ctor {
                let ty = this.resolver.resolve(param.ty.as_ref());
                if param.is_property {
                    let mut member = Symbol::new(param.name, SymbolKind::Property, param.span);
                    member.mutable = param.mutable;
                    member.structural_type = ty;
                    member.declaration_node = Some(id);
                    symbol.members.insert(param.name, member.clone());
                    this.define_in_current_scope(member);
                } else {
                    let mut p = Symbol::new(param.name, SymbolKind::Parameter, param.span);
                    p.structural_type = ty;
                    this.define_in_current_scope(p);
                }
            }

            for &member_id in &members {
                if let Some(member_symbol) = this.process_decl(member_id) {
                    symbol.members.insert(member_symbol.name, member_symbol);
                }
            }

            for entry in &enum_entries {
                let mut entry_symbol = Symbol::new(entry.name, SymbolKind::EnumEntry, entry.name_span);
                entry_symbol.structural_type = Some(Type::raw_class(name, false));
                for &arg in &entry.args {
                    this.infer_expr(arg);
                }
                symbol.members.insert(entry.name, entry_symbol.clone());
                this.define_in_current_scope(entry_symbol);
            }
        });

        check_class_variance(&self.arenas.decls[id], &self.resolver, &mut self.diagnostics);
        for type_param in &type_params {
            if type_param.variance == nova_ir::ast::Variance::Invariant {
                continue;
            }
            for &member_id in &members {
                check_member_variance(&self.arenas.decls[member_id], type_param.name, type_param.variance, &self.resolver, &mut self.diagnostics);
            }
        }

        self.resolver.exit_type_params();
        self.class_symbols.insert(name, symbol.clone());
        self.define_in_current_scope(symbol.clone());
        Some(symbol)
    }

    fn process_fun(&mut self, id: DeclId) -> Option<Symbol> {
        let decl_span = self.arenas.decls[id].span;
        let (name, name_span, type_params, receiver_ty, params, return_ty, body, expr_body) = match &self.arenas.decls[id].kind {
            DeclKind::Fun { name, name_span, type_params, receiver_ty, params, return_ty, body, expr_body } => {
                (*name, *name_span, type_params.clone(), receiver_ty.clone(), params.clone(), return_ty.clone(), *body, *expr_body)
            }
            _ => unreachable!("process_fun called on a non-fun declaration"),
        };

        self.resolver.enter_type_params(&type_params);
        self.resolver.register_type_declaration(name, &type_params);

        let receiver_type = self.resolver.resolve(receiver_ty.as_ref());
        let param_infos = self.build_param_infos(&params);
        let declared_ret = self.resolver.resolve(return_ty.as_ref());

        let mut symbol = Symbol::new(name, SymbolKind::Function, name_span);
        symbol.declaration_node = Some(id);
        symbol.parameters = Some(param_infos.clone());
        symbol.structural_type = Some(Type::Function {
            receiver: receiver_type.clone().map(Box::new),
            params: param_infos.iter().map(|p| p.ty.clone().unwrap_or(Type::Error)).collect(),
            ret: Box::new(declared_ret.clone().unwrap_or(Type::Unit)),
            nullable: false,
        });
        let defined_scope = self.current_scope;
        self.define_in_current_scope(symbol.clone());

        self.function_return_stack.push(declared_ret.clone());
        let (_, inferred_ret) = self.with_scope(ScopeKind::Function, Some(id.into()), None, |this| {
            this.register_range(this.current_scope, decl_span);
            for p in &param_infos {
                let mut psym = Symbol::new(p.name, SymbolKind::Parameter, decl_span);
                psym.structural_type = p.ty.clone();
                this.define_in_current_scope(psym);
            }
            if let Some(b) = body {
                this.process_stmt(b);
            }
            expr_body.map(|e| this.infer_expr(e))
        });
        self.function_return_stack.pop();

        if let (Some(declared), Some(inferred), Some(e)) = (declared_ret.as_ref(), inferred_ret.as_ref(), expr_body) {
            if !is_assignable(declared, inferred, self.interner, &self.super_types) {
                let span = self.arenas.exprs[e].span;
                self.diagnostics.warning("expression body type is not assignable to the declared return type".to_string(), span);
            }
        }

        let final_ret = declared_ret.unwrap_or_else(|| inferred_ret.unwrap_or(Type::Unit));
        symbol.structural_type = Some(Type::Function {
            receiver: receiver_type.map(Box::new),
            params: param_infos.iter().map(|p| p.ty.clone().unwrap_or(Type::Error)).collect(),
            ret: Box::new(final_ret),
            nullable: false,
        });
        if let Some(existing) = self.symbols.scope_mut(defined_scope).lookup_local_mut(name) {
            *existing = symbol.clone();
        }
        self.resolver.exit_type_params();
        Some(symbol)
    }

    fn process_property(&mut self, id: DeclId) -> Option<Symbol> {
        let decl_span = self.arenas.decls[id].span;
        let is_const = self.arenas.decls[id].modifiers.const_;
        let (name, name_span, ty, mutable, initializer, getter, setter) = match &self.arenas.decls[id].kind {
            DeclKind::Property { name, name_span, ty, mutable, initializer, getter, setter, .. } => {
                (*name, *name_span, ty.clone(), *mutable, *initializer, *getter, *setter)
            }
            _ => unreachable!("process_property called on a non-property declaration"),
        };

        let declared_ty = self.resolver.resolve(ty.as_ref());
        let inferred_ty = initializer.map(|e| self.infer_expr(e));
        let final_ty = declared_ty.or(inferred_ty).unwrap_or(Type::Error);

        if is_const {
            self.check_const_initializer(name, decl_span, initializer);
        }

        let mut symbol = Symbol::new(name, SymbolKind::Property, name_span);
        symbol.mutable = mutable;
        symbol.is_const = is_const;
        symbol.declaration_node = Some(id);
        symbol.structural_type = Some(final_ty);
        self.define_in_current_scope(symbol.clone());

        if let (Some(declared), Some(inferred)) = (declared_ty.as_ref(), inferred_ty.as_ref()) {
            if !is_assignable(declared, inferred, self.interner, &self.super_types) {
                let span = initializer.map(|e| self.arenas.exprs[e].span).unwrap_or(name_span);
                self.diagnostics.warning("initializer type is not assignable to the declared property type".to_string(), span);
            }
        }

        if let Some(g) = getter {
            self.process_decl(g);
        }
        if let Some(s) = setter {
            self.process_decl(s);
        }
        Some(symbol)
    }

    fn process_constructor(&mut self, id: DeclId) -> Option<Symbol> {
        let decl_span = self.arenas.decls[id].span;
        let (params, delegate_args, body) = match &self.arenas.decls[id].kind {
            DeclKind::Constructor { params, delegate_args, body, .. } => (params.clone(), delegate_args.clone(), *body),
            _ => unreachable!("process_constructor called on a non-constructor declaration"),
        };
        let param_infos = self.build_param_infos(&params);
        self.with_scope(ScopeKind::Function, Some(id.into()), None, |this| {
            this.register_range(this.current_scope, decl_span);
            for p in &param_infos {
                let mut psym = Symbol::new(p.name, SymbolKind::Parameter, decl_span);
                psym.structural_type = p.ty.clone();
                this.define_in_current_scope(psym);
            }
            for &arg in &delegate_args {
                this.infer_expr(arg);
            }
            if let Some(b) = body {
                this.process_stmt(b);
            }
        });
        None
    }

    fn process_typealias(&mut self, id: DeclId) -> Option<Symbol> {
        let (name, name_span, type_params, target) = match &self.arenas.decls[id].kind {
            DeclKind::TypeAlias { name, name_span, type_params, target } => (*name, *name_span, type_params.clone(), target.clone()),
            _ => unreachable!("process_typealias called on a non-typealias declaration"),
        };
        self.resolver.enter_type_params(&type_params);
        let resolved = self.resolver.resolve(Some(&target));
        self.resolver.exit_type_params();

        let mut symbol = Symbol::new(name, SymbolKind::TypeAlias, name_span);
        symbol.declaration_node = Some(id);
        symbol.structural_type = resolved;
        self.define_in_current_scope(symbol.clone());
        Some(symbol)
    }

    fn process_destructuring(&mut self, id: DeclId) -> Option<Symbol> {
        let (bindings, mutable, initializer) = match &self.arenas.decls[id].kind {
            DeclKind::Destructuring { bindings, mutable, initializer } => (bindings.clone(), *mutable, *initializer),
            _ => unreachable!("process_destructuring called on a non-destructuring declaration"),
        };
        self.infer_expr(initializer);
        for binding in &bindings {
            let ty = self.resolver.resolve(binding.ty.as_ref()).unwrap_or_else(|| self.any_type());
            let mut sym = Symbol::new(binding.name, SymbolKind::Variable, binding.span);
            sym.mutable = mutable;
            sym.structural_type = Some(ty);
            self.define_in_current_scope(sym);
        }
        None
    }

    fn process_import(&mut self, id: DeclId) -> Option<Symbol> {
        let decl_span = self.arenas.decls[id].span;
        let (path, alias, is_wildcard) = match &self.arenas.decls[id].kind {
            DeclKind::Import { path, alias, is_wildcard } => (path.clone(), *alias, *is_wildcard),
            _ => unreachable!("process_import called on a non-import declaration"),
        };
        if is_wildcard {
            return None;
        }
        let name = alias.unwrap_or_else(|| path.last());
        let mut sym = Symbol::new(name, SymbolKind::Import, decl_span);
        sym.declaration_node = Some(id);
        self.define_in_current_scope(sym.clone());
        Some(sym)
    }

    fn process_init_block(&mut self, id: DeclId) -> Option<Symbol> {
        let body = match &self.arenas.decls[id].kind {
            DeclKind::InitBlock(body) => *body,
            _ => unreachable!("process_init_block called on a non-init-block declaration"),
        };
        self.process_stmt(body);
        None
    }
}
