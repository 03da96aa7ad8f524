//! Type unifier (spec §4.6): common-supertype (lub) computation and
//! generic parameter binding from call/constructor arguments.

use crate::registry::SuperTypeRegistry;
use crate::ty::{Type, TypeArgument};
use crate::widening;
use nova_ir::{Name, StringInterner};
use rustc_hash::FxHashMap;

/// Least common supertype of two types, per spec §4.6. Commutative up to
/// structural equality (spec §8).
#[tracing::instrument(level = "trace", skip(interner, registry))]
pub fn common_supertype(a: &Type, b: &Type, interner: &StringInterner, registry: &SuperTypeRegistry) -> Type {
    nova_stack::ensure_sufficient_stack(|| common_supertype_inner(a, b, interner, registry))
}

fn common_supertype_inner(a: &Type, b: &Type, interner: &StringInterner, registry: &SuperTypeRegistry) -> Type {
    let combined_nullable = a.nullable() || b.nullable();

    if a == b {
        return a.with_nullable(combined_nullable);
    }
    if a.is_error() {
        return b.clone();
    }
    if b.is_error() {
        return a.clone();
    }
    if a.is_nothing() {
        return b.with_nullable(combined_nullable);
    }
    if b.is_nothing() {
        return a.with_nullable(combined_nullable);
    }

    if let (Some(na), Some(nb)) = (primitive_name(a, interner), primitive_name(b, interner)) {
        if let Some(promoted) = widening::promote(na, nb) {
            return Type::primitive(interner.intern(promoted), combined_nullable);
        }
    }

    if let (
        Type::Class { name: na, type_args: aa, .. },
        Type::Class { name: nb, type_args: ab, .. },
    ) = (a, b)
    {
        if na == nb {
            if aa.len() == ab.len() && !aa.is_empty() {
                let merged = aa
                    .iter()
                    .zip(ab.iter())
                    .map(|(x, y)| merge_type_argument(x, y, interner, registry))
                    .collect();
                return Type::class(*na, merged, combined_nullable);
            }
            // Raw on either side: prefer the non-raw shape, or raw if both.
            let args = if aa.is_empty() { ab.clone() } else { aa.clone() };
            return Type::class(*na, args, combined_nullable);
        }
        if registry.is_subtype(*na, *nb) {
            return b.with_nullable(combined_nullable);
        }
        if registry.is_subtype(*nb, *na) {
            return a.with_nullable(combined_nullable);
        }
    }

    Type::raw_class(interner.intern("Any"), combined_nullable)
}

fn merge_type_argument(
    a: &TypeArgument,
    b: &TypeArgument,
    interner: &StringInterner,
    registry: &SuperTypeRegistry,
) -> TypeArgument {
    match (&a.ty, &b.ty) {
        (Some(ta), Some(tb)) => TypeArgument::invariant(common_supertype(ta, tb, interner, registry)),
        _ => TypeArgument::wildcard(),
    }
}

fn primitive_name<'a>(ty: &Type, interner: &'a StringInterner) -> Option<&'a str> {
    match ty {
        Type::Primitive { name, .. } => Some(interner.resolve(*name)),
        _ => None,
    }
}

/// Generic return-type / constructor-type inference (spec §4.6): binds
/// each formal position that is exactly a type parameter to the matching
/// actual argument's type, widening repeated bindings to their common
/// supertype.
#[derive(Default)]
pub struct Bindings {
    map: FxHashMap<Name, Type>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: Name) -> Option<&Type> {
        self.map.get(&name)
    }

    fn bind(&mut self, name: Name, actual: &Type, interner: &StringInterner, registry: &SuperTypeRegistry) {
        match self.map.remove(&name) {
            Some(existing) => {
                self.map.insert(name, common_supertype(&existing, actual, interner, registry));
            }
            None => {
                self.map.insert(name, actual.clone());
            }
        }
    }
}

/// Walk a `(formal, actual)` pair, recording bindings for any
/// type-parameter positions encountered (spec §4.6 steps 1-3).
pub fn unify(
    formal: &Type,
    actual: &Type,
    type_params: &[Name],
    bindings: &mut Bindings,
    interner: &StringInterner,
    registry: &SuperTypeRegistry,
) {
    nova_stack::ensure_sufficient_stack(|| unify_inner(formal, actual, type_params, bindings, interner, registry));
}

fn unify_inner(
    formal: &Type,
    actual: &Type,
    type_params: &[Name],
    bindings: &mut Bindings,
    interner: &StringInterner,
    registry: &SuperTypeRegistry,
) {
    match formal {
        Type::TypeParameter { name, .. } if type_params.contains(name) => {
            bindings.bind(*name, actual, interner, registry);
        }
        Type::Class { name: fname, type_args: fargs, .. } => {
            if let Type::Class { name: aname, type_args: aargs, .. } = actual {
                if fname == aname {
                    for (fa, aa) in fargs.iter().zip(aargs.iter()) {
                        if let (Some(ft), Some(at)) = (&fa.ty, &aa.ty) {
                            unify_inner(ft, at, type_params, bindings, interner, registry);
                        }
                    }
                }
            }
        }
        Type::Function { params: fparams, ret: fret, .. } => {
            if let Type::Function { params: aparams, ret: aret, .. } = actual {
                for (fp, ap) in fparams.iter().zip(aparams.iter()) {
                    unify_inner(fp, ap, type_params, bindings, interner, registry);
                }
                unify_inner(fret, aret, type_params, bindings, interner, registry);
            }
        }
        _ => {}
    }
}

/// Substitute recorded bindings into a declared type, leaving unbound
/// type parameters as-is (spec §4.6 step 4).
pub fn substitute(ty: &Type, bindings: &Bindings) -> Type {
    match ty {
        Type::TypeParameter { name, .. } => bindings.get(*name).cloned().unwrap_or_else(|| ty.clone()),
        Type::Class { name, type_args, nullable } => Type::Class {
            name: *name,
            type_args: type_args
                .iter()
                .map(|a| TypeArgument {
                    variance: a.variance,
                    ty: a.ty.as_ref().map(|t| substitute(t, bindings)),
                    is_wildcard: a.is_wildcard,
                })
                .collect(),
            nullable: *nullable,
        },
        Type::Function { receiver, params, ret, nullable } => Type::Function {
            receiver: receiver.as_ref().map(|r| Box::new(substitute(r, bindings))),
            params: params.iter().map(|p| substitute(p, bindings)).collect(),
            ret: Box::new(substitute(ret, bindings)),
            nullable: *nullable,
        },
        other => other.clone(),
    }
}

/// Generic constructor inference (spec §4.6 "Generic constructor
/// inference"): type arguments assembled in declaration order, unbound
/// parameters default to `Any`.
pub fn constructor_type_args(type_params: &[Name], bindings: &Bindings, interner: &StringInterner) -> Vec<TypeArgument> {
    type_params
        .iter()
        .map(|p| {
            let ty = bindings.get(*p).cloned().unwrap_or_else(|| Type::raw_class(interner.intern("Any"), false));
            TypeArgument::invariant(ty)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lub_of_equal_numeric_primitives_widens() {
        let interner = StringInterner::new();
        let registry = SuperTypeRegistry::new();
        let int_ty = Type::primitive(interner.intern("Int"), false);
        let long_ty = Type::primitive(interner.intern("Long"), false);
        let lub = common_supertype(&int_ty, &long_ty, &interner, &registry);
        assert_eq!(lub, Type::primitive(interner.intern("Long"), false));
    }

    #[test]
    fn lub_is_commutative() {
        let interner = StringInterner::new();
        let registry = SuperTypeRegistry::new();
        let a = Type::primitive(interner.intern("Int"), false);
        let b = Type::primitive(interner.intern("Double"), false);
        assert_eq!(
            common_supertype(&a, &b, &interner, &registry),
            common_supertype(&b, &a, &interner, &registry)
        );
    }

    #[test]
    fn lub_falls_back_to_any_for_unrelated_classes() {
        let interner = StringInterner::new();
        let registry = SuperTypeRegistry::new();
        let a = Type::raw_class(interner.intern("Dog"), false);
        let b = Type::raw_class(interner.intern("Car"), false);
        let lub = common_supertype(&a, &b, &interner, &registry);
        assert_eq!(lub, Type::raw_class(interner.intern("Any"), false));
    }

    #[test]
    fn unify_binds_identity_function_type_parameter() {
        let interner = StringInterner::new();
        let registry = SuperTypeRegistry::new();
        let t = interner.intern("T");
        let formal = Type::TypeParameter { name: t, upper_bound: Box::new(Type::raw_class(interner.intern("Any"), false)), nullable: false };
        let actual = Type::primitive(interner.intern("Int"), false);
        let mut bindings = Bindings::new();
        unify(&formal, &actual, &[t], &mut bindings, &interner, &registry);
        let substituted = substitute(&formal, &bindings);
        assert_eq!(substituted, actual);
    }
}
