//! Nova IR — core data structures shared by every stage of the front end.
//!
//! - [`Span`] for source locations.
//! - [`Name`] / [`StringInterner`] for interned identifiers.
//! - [`Arena`] / [`Idx`] for flat, identity-stable AST storage.
//! - [`Token`] / [`TokenKind`] for lexer output.
//! - [`ast`] for the closed set of declaration/statement/expression/type-ref
//!   node variants.
//!
//! # Design philosophy
//!
//! Every node lives in an [`Arena`] and is referenced by [`Idx`], never by
//! raw pointer or `Box`. This gives every expression a stable identity
//! independent of structural equality, which is required so that
//! `exprTypeMap` (an identity map from expression to inferred type) never
//! conflates two syntactically-equal literals that occur at different
//! source positions.

/// Compile-time assertion that a type has a specific size, to catch
/// accidental size regressions in frequently-allocated node types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod arena;
pub mod ast;
pub mod interner;
pub mod name;
pub mod span;
pub mod token;
pub mod visitor;

pub use arena::{Arena, Idx};
pub use interner::StringInterner;
pub use name::Name;
pub use span::{Span, SpanError};
pub use token::{Token, TokenKind};
