//! String-to-type fallback (spec §9 design note: "Reimplementations
//! should commit to the structural form as the source of truth and parse
//! names only as a fallback inside `resolveNovaTypeFromName` — one
//! place"). A symbol whose declared type was only ever recorded as text
//! (`"List<Int>"`, `"String?"`) is parsed back into a [`Type`] here,
//! memoized so repeated lookups of the same name string are O(1).
//!
//! The cache is `parking_lot::RwLock`-backed rather than a plain
//! `RefCell` so an `AnalysisResult` built around it stays safely
//! shareable read-only across threads once analysis finishes (spec §5).

use crate::ty::{Type, TypeArgument};
use nova_ir::StringInterner;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

const PRIMITIVE_NAMES: &[&str] =
    &["Int", "Long", "Float", "Double", "Boolean", "Char", "String", "Byte", "Short"];

#[derive(Default)]
pub struct TypeNameCache {
    cache: RwLock<FxHashMap<String, Type>>,
}

impl TypeNameCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a type-name string such as `"List<Int>"` or `"String?"` into
    /// a structural [`Type`], memoizing the result.
    pub fn resolve(&self, text: &str, interner: &StringInterner) -> Type {
        if let Some(cached) = self.cache.read().get(text) {
            return cached.clone();
        }
        let parsed = parse_type_name(text, interner);
        self.cache.write().insert(text.to_string(), parsed.clone());
        parsed
    }
}

fn parse_type_name(text: &str, interner: &StringInterner) -> Type {
    let (body, nullable) = match text.strip_suffix('?') {
        Some(rest) => (rest, true),
        None => (text, false),
    };

    if let Some(open) = body.find('<') {
        let base = &body[..open];
        let close = body.rfind('>').unwrap_or(body.len());
        let inner = &body[open + 1..close];
        let args = split_top_level(inner)
            .into_iter()
            .map(|arg| TypeArgument::invariant(parse_type_name(arg.trim(), interner)))
            .collect();
        return Type::class(interner.intern(base), args, nullable);
    }

    if PRIMITIVE_NAMES.contains(&body) {
        return Type::primitive(interner.intern(body), nullable);
    }
    match body {
        "Unit" => Type::Unit,
        "Nothing" => Type::Nothing { nullable },
        "" => Type::Error,
        _ => Type::raw_class(interner.intern(body), nullable),
    }
}

/// Split `"Int, List<String>"` into `["Int", "List<String>"]`, respecting
/// nested angle brackets.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if start < text.len() {
        parts.push(&text[start..]);
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_name() {
        let interner = StringInterner::new();
        let cache = TypeNameCache::new();
        let ty = cache.resolve("Int", &interner);
        assert_eq!(ty, Type::primitive(interner.intern("Int"), false));
    }

    #[test]
    fn parses_nullable_suffix() {
        let interner = StringInterner::new();
        let cache = TypeNameCache::new();
        let ty = cache.resolve("String?", &interner);
        assert!(ty.nullable());
    }

    #[test]
    fn parses_generic_name() {
        let interner = StringInterner::new();
        let cache = TypeNameCache::new();
        let ty = cache.resolve("List<Int>", &interner);
        match ty {
            Type::Class { name, type_args, .. } => {
                assert_eq!(interner.resolve(name), "List");
                assert_eq!(type_args.len(), 1);
            }
            other => panic!("expected Class, got {other:?}"),
        }
    }

    #[test]
    fn caches_repeated_lookups() {
        let interner = StringInterner::new();
        let cache = TypeNameCache::new();
        let a = cache.resolve("List<Int>", &interner);
        let b = cache.resolve("List<Int>", &interner);
        assert_eq!(a, b);
    }
}
