//! [`Symbol`] (spec §3 "Symbol").

use nova_ir::ast::{DeclId, Visibility};
use nova_ir::{Name, Span};
use nova_types::Type;
use rustc_hash::FxHashMap;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SymbolKind {
    Variable,
    Parameter,
    Property,
    Function,
    BuiltinFunction,
    BuiltinConstant,
    Class,
    Interface,
    Object,
    Enum,
    EnumEntry,
    TypeAlias,
    Import,
}

/// One formal parameter, kept on a [`SymbolKind::Function`]/[`SymbolKind::Class`]
/// symbol so call-site argument checks (spec §4.5/§4.9) don't need to walk
/// back into the AST.
#[derive(Clone, Debug)]
pub struct ParamInfo {
    pub name: Name,
    pub ty: Option<Type>,
    pub has_default: bool,
    pub is_vararg: bool,
}

/// A named binding, per spec §3. Class-like symbols own their `members`
/// map by value rather than by arena reference (spec §9: "modeled as
/// parallel arenas... no graph cycles in ownership" — here the ownership
/// is a plain tree since a member never needs to reach back to its
/// owning class symbol).
#[derive(Clone, Debug)]
pub struct Symbol {
    pub name: Name,
    pub kind: SymbolKind,
    pub type_name: Option<String>,
    pub structural_type: Option<Type>,
    pub mutable: bool,
    pub is_const: bool,
    pub visibility: Visibility,
    pub declaration_span: Span,
    pub declaration_node: Option<DeclId>,
    pub parameters: Option<Vec<ParamInfo>>,
    pub super_class_name: Option<Name>,
    pub interface_names: Vec<Name>,
    pub members: FxHashMap<Name, Symbol>,
}

impl Symbol {
    pub fn new(name: Name, kind: SymbolKind, declaration_span: Span) -> Self {
        Symbol {
            name,
            kind,
            type_name: None,
            structural_type: None,
            mutable: false,
            is_const: false,
            visibility: Visibility::Public,
            declaration_span,
            declaration_node: None,
            parameters: None,
            super_class_name: None,
            interface_names: Vec::new(),
            members: FxHashMap::default(),
        }
    }

    pub fn is_class_like(&self) -> bool {
        matches!(self.kind, SymbolKind::Class | SymbolKind::Interface | SymbolKind::Object | SymbolKind::Enum)
    }
}
