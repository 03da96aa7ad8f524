//! Structural type system for the Nova compiler front end (spec §4.3,
//! §4.6, §4.7, §4.8).
//!
//! `nova_analysis` builds scopes and symbols; this crate owns the type
//! *model* and the pure functions over it (resolution, unification,
//! assignability, variance) so they can be tested independently of a
//! whole-program analysis run.

pub mod assignability;
pub mod name_cache;
pub mod registry;
pub mod resolver;
pub mod ty;
pub mod unify;
pub mod variance_checker;
pub mod widening;

pub use assignability::is_assignable;
pub use name_cache::TypeNameCache;
pub use registry::{BuiltinConstant, BuiltinFunction, BuiltinMethod, EmptyTypeRegistry, SuperTypeRegistry, TypeRegistry};
pub use resolver::{TypeDeclaration, TypeResolver};
pub use ty::{Type, TypeArgument, Variance};
pub use unify::{common_supertype, constructor_type_args, unify, Bindings};
