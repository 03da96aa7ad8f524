//! Type resolver (spec §4.3): maps `TypeRef` AST nodes to structural
//! types under a stack of type-parameter scopes.

use crate::ty::{Type, TypeArgument};
use nova_ir::ast::{TypeRef, TypeRefKind};
use nova_ir::{Name, StringInterner};
use rustc_hash::FxHashMap;

const PRIMITIVE_NAMES: &[&str] =
    &["Int", "Long", "Float", "Double", "Boolean", "Char", "String", "Byte", "Short"];

#[derive(Clone, Debug)]
struct TypeParamEntry {
    name: Name,
    upper_bound: Box<Type>,
    variance: nova_ir::ast::Variance,
}

/// Declaration-level generics info cached for generic unification (§4.6):
/// a class or function's type-parameter names, in declaration order.
#[derive(Clone, Debug, Default)]
pub struct TypeDeclaration {
    pub type_param_names: Vec<Name>,
}

/// Resolves `TypeRef` syntax into the structural [`Type`] model under a
/// push/pop stack of type-parameter scopes (one per enclosing class or
/// function), per spec §4.3.
pub struct TypeResolver<'a> {
    interner: &'a StringInterner,
    scopes: Vec<Vec<TypeParamEntry>>,
    declarations: FxHashMap<Name, TypeDeclaration>,
}

impl<'a> TypeResolver<'a> {
    pub fn new(interner: &'a StringInterner) -> Self {
        TypeResolver { interner, scopes: Vec::new(), declarations: FxHashMap::default() }
    }

    /// Push a new type-parameter scope, resolving each parameter's upper
    /// bound against whatever scopes are already on the stack (so a
    /// bound can refer to an outer type parameter).
    pub fn enter_type_params(&mut self, params: &[nova_ir::ast::TypeParameter]) {
        let any = self.any_type();
        let entries = params
            .iter()
            .map(|p| {
                let upper_bound = match &p.upper_bound {
                    Some(bound_ref) => Box::new(self.resolve(Some(bound_ref)).unwrap_or_else(|| any.clone())),
                    None => Box::new(any.clone()),
                };
                TypeParamEntry { name: p.name, upper_bound, variance: p.variance }
            })
            .collect();
        self.scopes.push(entries);
    }

    pub fn exit_type_params(&mut self) {
        self.scopes.pop();
    }

    /// Cache a class/function's type-parameter names for later generic
    /// unification (§4.6).
    pub fn register_type_declaration(&mut self, name: Name, params: &[nova_ir::ast::TypeParameter]) {
        let type_param_names = params.iter().map(|p| p.name).collect();
        self.declarations.insert(name, TypeDeclaration { type_param_names });
    }

    pub fn declaration(&self, name: Name) -> Option<&TypeDeclaration> {
        self.declarations.get(&name)
    }

    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    fn lookup_type_param(&self, name: Name) -> Option<&TypeParamEntry> {
        self.scopes.iter().rev().flatten().find(|entry| entry.name == name)
    }

    pub fn variance_of(&self, name: Name) -> Option<nova_ir::ast::Variance> {
        self.lookup_type_param(name).map(|e| e.variance)
    }

    fn any_type(&self) -> Type {
        Type::raw_class(self.interner.intern("Any"), false)
    }

    /// `resolve(None)` returns "no type" (spec §4.3 contract).
    pub fn resolve(&mut self, type_ref: Option<&TypeRef>) -> Option<Type> {
        let type_ref = type_ref?;
        Some(nova_stack::ensure_sufficient_stack(|| self.resolve_kind(&type_ref.kind)))
    }

    fn resolve_kind(&mut self, kind: &TypeRefKind) -> Type {
        match kind {
            TypeRefKind::Simple(qualified) => self.resolve_simple(qualified.last()),
            TypeRefKind::Nullable(inner) => {
                let resolved = self.resolve_kind(&inner.kind);
                resolved.with_nullable(true)
            }
            TypeRefKind::Generic(qualified, args) => {
                let resolved_args = args.iter().map(|a| self.resolve_type_argument(a)).collect();
                Type::class(qualified.last(), resolved_args, false)
            }
            TypeRefKind::Function { receiver, params, return_ty, is_suspend: _ } => {
                let receiver = receiver.as_ref().map(|r| Box::new(self.resolve_kind(&r.kind)));
                let params = params.iter().map(|p| self.resolve_kind(&p.kind)).collect();
                let ret = match return_ty {
                    Some(r) => Box::new(self.resolve_kind(&r.kind)),
                    None => Box::new(Type::Unit),
                };
                Type::Function { receiver, params, ret, nullable: false }
            }
        }
    }

    fn resolve_type_argument(&mut self, arg: &nova_ir::ast::TypeArgument) -> TypeArgument {
        if arg.is_wildcard {
            return TypeArgument::wildcard();
        }
        let resolved = arg.ty.as_ref().map(|t| self.resolve_kind(&t.kind));
        TypeArgument { variance: arg.variance, ty: resolved, is_wildcard: false }
    }

    fn resolve_simple(&mut self, name: Name) -> Type {
        if let Some(entry) = self.lookup_type_param(name) {
            return Type::TypeParameter { name, upper_bound: entry.upper_bound.clone(), nullable: false };
        }
        let text = self.interner.resolve(name);
        if PRIMITIVE_NAMES.contains(&text) {
            return Type::primitive(name, false);
        }
        match text {
            "Unit" => Type::Unit,
            "Nothing" => Type::Nothing { nullable: false },
            _ => Type::raw_class(name, false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nova_ir::ast::QualifiedName;
    use nova_ir::Span;

    fn simple(interner: &StringInterner, text: &str) -> TypeRef {
        TypeRef::simple(QualifiedName::simple(interner.intern(text), Span::UNKNOWN), Span::UNKNOWN)
    }

    #[test]
    fn resolves_primitive() {
        let interner = StringInterner::new();
        let mut resolver = TypeResolver::new(&interner);
        let ty = resolver.resolve(Some(&simple(&interner, "Int"))).unwrap();
        assert_eq!(ty, Type::primitive(interner.intern("Int"), false));
    }

    #[test]
    fn resolves_nullable_wrapper() {
        let interner = StringInterner::new();
        let mut resolver = TypeResolver::new(&interner);
        let inner = simple(&interner, "String");
        let nullable = TypeRef::nullable(inner, Span::UNKNOWN);
        let ty = resolver.resolve(Some(&nullable)).unwrap();
        assert!(ty.nullable());
    }

    #[test]
    fn none_input_resolves_to_none() {
        let interner = StringInterner::new();
        let mut resolver = TypeResolver::new(&interner);
        assert!(resolver.resolve(None).is_none());
    }

    #[test]
    fn type_parameter_resolves_within_its_scope() {
        let interner = StringInterner::new();
        let mut resolver = TypeResolver::new(&interner);
        let t_name = interner.intern("T");
        let params = vec![nova_ir::ast::TypeParameter {
            name: t_name,
            variance: nova_ir::ast::Variance::Invariant,
            upper_bound: None,
            is_reified: false,
            span: Span::UNKNOWN,
        }];
        resolver.enter_type_params(&params);
        let ty = resolver.resolve(Some(&simple(&interner, "T"))).unwrap();
        assert!(matches!(ty, Type::TypeParameter { .. }));
        resolver.exit_type_params();
        let ty = resolver.resolve(Some(&simple(&interner, "T"))).unwrap();
        assert!(matches!(ty, Type::Class { .. }), "T falls back to a raw class name once out of scope");
    }
}
