//! Super-type registry (spec §3 "Super-type registry") and the read-only
//! `TypeRegistry` collaborator interface (spec §4.10).

use nova_ir::Name;
use rustc_hash::FxHashMap;

/// `className → (superClassName?, interfaceNames)`, built during
/// declaration processing (spec §4.4 step 3). Supports transitive
/// subtype queries and is cycle-safe: a malformed `class A : B` / `class
/// B : A` cannot loop `is_subtype` forever.
#[derive(Default)]
pub struct SuperTypeRegistry {
    relations: FxHashMap<Name, ClassRelation>,
}

#[derive(Clone, Debug, Default)]
struct ClassRelation {
    super_class: Option<Name>,
    interfaces: Vec<Name>,
}

impl SuperTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, class_name: Name, super_class: Option<Name>, interfaces: Vec<Name>) {
        self.relations.insert(class_name, ClassRelation { super_class, interfaces });
    }

    pub fn super_class(&self, class_name: Name) -> Option<Name> {
        self.relations.get(&class_name).and_then(|r| r.super_class)
    }

    pub fn interfaces(&self, class_name: Name) -> &[Name] {
        self.relations.get(&class_name).map_or(&[], |r| r.interfaces.as_slice())
    }

    /// `sub` is a reflexive-transitive subtype of `sup` by walking the
    /// superclass chain and interface set. Visited-set guards against a
    /// malformed cyclic hierarchy.
    pub fn is_subtype(&self, sub: Name, sup: Name) -> bool {
        if sub == sup {
            return true;
        }
        let mut visited = std::collections::HashSet::new();
        self.is_subtype_rec(sub, sup, &mut visited)
    }

    fn is_subtype_rec(&self, sub: Name, sup: Name, visited: &mut std::collections::HashSet<Name>) -> bool {
        if !visited.insert(sub) {
            return false;
        }
        if sub == sup {
            return true;
        }
        let Some(relation) = self.relations.get(&sub) else {
            return false;
        };
        if relation.interfaces.iter().any(|i| *i == sup) {
            return true;
        }
        if let Some(parent) = relation.super_class {
            if self.is_subtype_rec(parent, sup, visited) {
                return true;
            }
        }
        relation.interfaces.iter().any(|i| self.is_subtype_rec(*i, sup, visited))
    }
}

/// One built-in method signature, as returned by [`TypeRegistry::methods_for_type`].
#[derive(Clone, Debug)]
pub struct BuiltinMethod {
    pub name: Name,
    pub return_type_name: Name,
    pub param_type_names: Vec<Name>,
    pub is_static: bool,
}

/// One built-in free function or constant, as returned by
/// [`TypeRegistry::builtin_functions`] / [`TypeRegistry::builtin_constants`].
#[derive(Clone, Debug)]
pub struct BuiltinFunction {
    pub name: Name,
    pub return_type_name: Name,
}

#[derive(Clone, Debug)]
pub struct BuiltinConstant {
    pub name: Name,
    pub type_name: Name,
}

/// Stdlib and reflection registration live outside the core (spec §1
/// Non-goals); the analyzer only *consumes* this read-only interface,
/// populated by the collaborator at process start and never mutated
/// during analysis (spec §5).
pub trait TypeRegistry: Send + Sync {
    fn builtin_functions(&self) -> &[BuiltinFunction];
    fn builtin_constants(&self) -> &[BuiltinConstant];
    fn methods_for_type(&self, type_name: Name) -> &[BuiltinMethod];
}

/// An empty registry, useful for analyzing code with no stdlib attached
/// (tests, or a host that hasn't wired its reflection layer yet).
#[derive(Default)]
pub struct EmptyTypeRegistry;

impl TypeRegistry for EmptyTypeRegistry {
    fn builtin_functions(&self) -> &[BuiltinFunction] {
        &[]
    }

    fn builtin_constants(&self) -> &[BuiltinConstant] {
        &[]
    }

    fn methods_for_type(&self, _type_name: Name) -> &[BuiltinMethod] {
        &[]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nova_ir::StringInterner;

    #[test]
    fn transitive_subtype_through_superclass_chain() {
        let interner = StringInterner::new();
        let (a, b, c) = (interner.intern("A"), interner.intern("B"), interner.intern("C"));
        let mut registry = SuperTypeRegistry::new();
        registry.register(a, Some(b), vec![]);
        registry.register(b, Some(c), vec![]);
        assert!(registry.is_subtype(a, c));
        assert!(!registry.is_subtype(c, a));
    }

    #[test]
    fn subtype_through_interface() {
        let interner = StringInterner::new();
        let (dog, animal) = (interner.intern("Dog"), interner.intern("Animal"));
        let mut registry = SuperTypeRegistry::new();
        registry.register(dog, None, vec![animal]);
        assert!(registry.is_subtype(dog, animal));
    }

    #[test]
    fn cyclic_hierarchy_does_not_hang() {
        let interner = StringInterner::new();
        let (a, b) = (interner.intern("A"), interner.intern("B"));
        let mut registry = SuperTypeRegistry::new();
        registry.register(a, Some(b), vec![]);
        registry.register(b, Some(a), vec![]);
        assert!(!registry.is_subtype(a, interner.intern("Unrelated")));
    }
}
