//! Assignability checking (spec §4.7): `isAssignable(target, source) →
//! Boolean`, honoring nullability, numeric widening, and variance.

use crate::registry::SuperTypeRegistry;
use crate::ty::{Type, TypeArgument};
use crate::widening;
use nova_ir::ast::Variance;
use nova_ir::StringInterner;

/// `isAssignable(target, source, registry)`, per spec §4.7. Reflexive:
/// `is_assignable(t, t, ..)` is always `true` (spec §8).
pub fn is_assignable(target: &Type, source: &Type, interner: &StringInterner, registry: &SuperTypeRegistry) -> bool {
    nova_stack::ensure_sufficient_stack(|| is_assignable_inner(target, source, interner, registry))
}

fn is_assignable_inner(target: &Type, source: &Type, interner: &StringInterner, registry: &SuperTypeRegistry) -> bool {
    if target.is_error() || source.is_error() {
        return true;
    }

    if source.is_nothing() {
        return !source.nullable() || target.nullable();
    }

    if is_any(target, interner) {
        return !(!target.nullable() && source.nullable());
    }

    if source.nullable() && !target.nullable() {
        return false;
    }

    match (target, source) {
        (Type::Primitive { name: tn, .. }, Type::Primitive { name: sn, .. }) => {
            let (tn, sn) = (interner.resolve(*tn), interner.resolve(*sn));
            tn == sn || widening::widens_to(sn, tn)
        }
        (Type::Primitive { name: tn, .. }, Type::Class { name: sn, type_args, .. }) => {
            type_args.is_empty() && interner.resolve(*tn) == interner.resolve(*sn)
        }
        (Type::Class { name: tn, type_args, .. }, Type::Primitive { name: sn, .. }) => {
            type_args.is_empty() && interner.resolve(*tn) == interner.resolve(*sn)
        }
        (Type::Class { name: tn, type_args: ta, .. }, Type::Class { name: sn, type_args: sa, .. }) => {
            let (tn_text, sn_text) = (interner.resolve(*tn), interner.resolve(*sn));
            if tn_text == sn_text {
                return type_args_assignable(ta, sa, interner, registry);
            }
            if tn_text == "Number" && widening::is_numeric(sn_text) {
                return true;
            }
            registry.is_subtype(*sn, *tn)
        }
        (Type::TypeParameter { upper_bound, .. }, _) => {
            is_assignable_inner(upper_bound, source, interner, registry)
        }
        (_, Type::TypeParameter { upper_bound, .. }) => {
            is_assignable_inner(target, upper_bound, interner, registry)
        }
        (
            Type::Function { params: tp, ret: tr, .. },
            Type::Function { params: sp, ret: sr, .. },
        ) => {
            tp.len() == sp.len()
                && tp.iter().zip(sp.iter()).all(|(t, s)| is_assignable_inner(s, t, interner, registry))
                && is_assignable_inner(tr, sr, interner, registry)
        }
        (Type::Unit, Type::Unit) => true,
        _ => false,
    }
}

fn is_any(ty: &Type, interner: &StringInterner) -> bool {
    matches!(ty, Type::Class { name, type_args, .. } if type_args.is_empty() && interner.resolve(*name) == "Any")
}

/// Type-argument list of differing arity is tolerated (spec §4.7).
fn type_args_assignable(
    target_args: &[TypeArgument],
    source_args: &[TypeArgument],
    interner: &StringInterner,
    registry: &SuperTypeRegistry,
) -> bool {
    if target_args.len() != source_args.len() {
        return true;
    }
    target_args.iter().zip(source_args.iter()).all(|(t, s)| {
        if t.is_wildcard || s.is_wildcard {
            return true;
        }
        match (&t.ty, &s.ty) {
            (Some(tt), Some(st)) => match t.variance {
                Variance::Out => is_assignable_inner(tt, st, interner, registry),
                Variance::In => is_assignable_inner(st, tt, interner, registry),
                Variance::Invariant => {
                    is_assignable_inner(tt, st, interner, registry) && is_assignable_inner(st, tt, interner, registry)
                }
            },
            _ => true,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflexive() {
        let interner = StringInterner::new();
        let registry = SuperTypeRegistry::new();
        let int_ty = Type::primitive(interner.intern("Int"), false);
        assert!(is_assignable(&int_ty, &int_ty, &interner, &registry));
    }

    #[test]
    fn numeric_widening_chain() {
        let interner = StringInterner::new();
        let registry = SuperTypeRegistry::new();
        let int_ty = Type::primitive(interner.intern("Int"), false);
        let double_ty = Type::primitive(interner.intern("Double"), false);
        assert!(is_assignable(&double_ty, &int_ty, &interner, &registry));
        assert!(!is_assignable(&int_ty, &double_ty, &interner, &registry));
    }

    #[test]
    fn nullable_source_rejected_by_nonnull_target() {
        let interner = StringInterner::new();
        let registry = SuperTypeRegistry::new();
        let string_ty = Type::primitive(interner.intern("String"), false);
        let nullable_string = Type::primitive(interner.intern("String"), true);
        assert!(!is_assignable(&string_ty, &nullable_string, &interner, &registry));
        assert!(is_assignable(&nullable_string, &string_ty, &interner, &registry));
    }

    #[test]
    fn null_literal_only_assignable_to_nullable_target() {
        let interner = StringInterner::new();
        let registry = SuperTypeRegistry::new();
        let nothing_nullable = Type::Nothing { nullable: true };
        let string_ty = Type::primitive(interner.intern("String"), false);
        let nullable_string = Type::primitive(interner.intern("String"), true);
        assert!(!is_assignable(&string_ty, &nothing_nullable, &interner, &registry));
        assert!(is_assignable(&nullable_string, &nothing_nullable, &interner, &registry));
    }

    #[test]
    fn covariant_out_type_argument() {
        let interner = StringInterner::new();
        let registry = SuperTypeRegistry::new();
        let box_name = interner.intern("Box");
        let int_arg = TypeArgument { variance: Variance::Out, ty: Some(Type::primitive(interner.intern("Int"), false)), is_wildcard: false };
        let any_arg = TypeArgument { variance: Variance::Out, ty: Some(Type::raw_class(interner.intern("Any"), false)), is_wildcard: false };
        let box_int = Type::class(box_name, vec![int_arg], false);
        let box_any = Type::class(box_name, vec![any_arg], false);
        assert!(is_assignable(&box_any, &box_int, &interner, &registry));
    }

    #[test]
    fn invariant_type_argument_rejects_widening() {
        let interner = StringInterner::new();
        let registry = SuperTypeRegistry::new();
        let inv_name = interner.intern("Inv");
        let int_arg = TypeArgument::invariant(Type::primitive(interner.intern("Int"), false));
        let any_arg = TypeArgument::invariant(Type::raw_class(interner.intern("Any"), false));
        let inv_int = Type::class(inv_name, vec![int_arg], false);
        let inv_any = Type::class(inv_name, vec![any_arg], false);
        assert!(!is_assignable(&inv_any, &inv_int, &interner, &registry));
    }
}
