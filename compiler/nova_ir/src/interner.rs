//! String interner backing [`Name`].
//!
//! One compilation unit owns one interner. Interning leaks the backing
//! bytes once (`Box::leak`) so that [`Name::raw`] can be resolved back to
//! a `&'static str` without a lifetime tied to the interner, mirroring the
//! teacher's sharded interner design at a scale proportionate to a single
//! file's identifier count.

use crate::name::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

struct Inner {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

/// Interns source identifiers and literal text into compact [`Name`]s.
pub struct StringInterner {
    inner: RwLock<Inner>,
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl StringInterner {
    pub fn new() -> Self {
        let empty: &'static str = "";
        let mut map = FxHashMap::default();
        map.insert(empty, 0);
        StringInterner {
            inner: RwLock::new(Inner { map, strings: vec![empty] }),
        }
    }

    pub fn intern(&self, s: &str) -> Name {
        if let Some(&idx) = self.inner.read().map.get(s) {
            return Name::from_raw(idx);
        }
        let mut inner = self.inner.write();
        if let Some(&idx) = inner.map.get(s) {
            return Name::from_raw(idx);
        }
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let idx = u32::try_from(inner.strings.len()).unwrap_or_else(|_| {
            panic!("interner overflowed u32::MAX entries")
        });
        inner.strings.push(leaked);
        inner.map.insert(leaked, idx);
        Name::from_raw(idx)
    }

    pub fn resolve(&self, name: Name) -> &'static str {
        self.inner.read().strings[name.raw() as usize]
    }

    pub fn len(&self) -> usize {
        self.inner.read().strings.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn interns_and_resolves() {
        let interner = StringInterner::new();
        let a = interner.intern("foo");
        let b = interner.intern("foo");
        let c = interner.intern("bar");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(interner.resolve(a), "foo");
        assert_eq!(interner.resolve(c), "bar");
    }

    #[test]
    fn empty_string_preinterned() {
        let interner = StringInterner::new();
        assert_eq!(interner.intern(""), Name::EMPTY);
    }
}
