//! Lexical scope tree and [`SymbolTable`] (spec §3 "Scope", "Symbol
//! table"; spec §9: "arena-allocate scopes indexed by integer IDs" rather
//! than parent-pointers, and an identity-keyed AST-node-to-scope map
//! rather than raw pointers).

use nova_ir::arena::{Arena, Idx};
use nova_ir::ast::{DeclId, ExprId, StmtId};
use nova_ir::{Name, Span};
use rustc_hash::FxHashMap;

use crate::symbol::{Symbol, SymbolKind};

pub type ScopeId = Idx<Scope>;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ScopeKind {
    Global,
    Class,
    Function,
    Block,
    Lambda,
    Enum,
}

/// Identifies whichever AST node family introduced a scope, so the
/// node-to-scope index (spec §3 "Symbol table") can key on any of the
/// three arena-allocated families.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AstNodeId {
    Decl(DeclId),
    Stmt(StmtId),
    Expr(ExprId),
}

impl From<DeclId> for AstNodeId {
    fn from(id: DeclId) -> Self {
        AstNodeId::Decl(id)
    }
}

impl From<StmtId> for AstNodeId {
    fn from(id: StmtId) -> Self {
        AstNodeId::Stmt(id)
    }
}

impl From<ExprId> for AstNodeId {
    fn from(id: ExprId) -> Self {
        AstNodeId::Expr(id)
    }
}

/// A lexical scope, per spec §3. `symbols` is an *ordered* name-to-symbol
/// map (insertion order, not a hash map) since §3 calls for ordered
/// resolution and scopes rarely hold more than a few dozen names.
pub struct Scope {
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    pub associated_node: Option<AstNodeId>,
    pub owner_type_name: Option<Name>,
    pub children: Vec<ScopeId>,
    symbols: Vec<(Name, Symbol)>,
}

impl Scope {
    pub fn define(&mut self, symbol: Symbol) {
        self.symbols.push((symbol.name, symbol));
    }

    pub fn lookup_local(&self, name: Name) -> Option<&Symbol> {
        self.symbols.iter().rev().find(|(n, _)| *n == name).map(|(_, s)| s)
    }

    pub fn lookup_local_mut(&mut self, name: Name) -> Option<&mut Symbol> {
        self.symbols.iter_mut().rev().find(|(n, _)| *n == name).map(|(_, s)| s)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter().map(|(_, s)| s)
    }
}

/// `(scope, startLine, startCol, endLine, endCol)` per spec §3. End
/// locations are the estimated ones (spec §4.4/§9): the source buffer is
/// released once parsing finishes (spec §5), so no real end line/column
/// is ever available to the analyzer, only the estimate.
#[derive(Copy, Clone, Debug)]
pub struct ScopeRange {
    pub scope: ScopeId,
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

fn contains(range: &ScopeRange, line: u32, column: u32) -> bool {
    let pos = (line, column);
    (range.start_line, range.start_col) <= pos && pos <= (range.end_line, range.end_col)
}

/// Owns the global scope, the node-to-scope index, and the position
/// index (spec §3 "Symbol table").
pub struct SymbolTable {
    arena: Arena<Scope>,
    global: ScopeId,
    node_to_scope: FxHashMap<AstNodeId, ScopeId>,
    ranges: Vec<ScopeRange>,
}

impl SymbolTable {
    pub fn new() -> (Self, ScopeId) {
        let mut arena = Arena::new();
        let global = arena.alloc(Scope {
            kind: ScopeKind::Global,
            parent: None,
            associated_node: None,
            owner_type_name: None,
            children: Vec::new(),
            symbols: Vec::new(),
        });
        let table = SymbolTable { arena, global, node_to_scope: FxHashMap::default(), ranges: Vec::new() };
        (table, global)
    }

    pub fn global(&self) -> ScopeId {
        self.global
    }

    pub fn create_scope(&mut self, kind: ScopeKind, parent: ScopeId, associated_node: Option<AstNodeId>, owner_type_name: Option<Name>) -> ScopeId {
        let id = self.arena.alloc(Scope {
            kind,
            parent: Some(parent),
            associated_node,
            owner_type_name,
            children: Vec::new(),
            symbols: Vec::new(),
        });
        self.arena[parent].children.push(id);
        id
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.arena[id]
    }

    pub fn scope_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.arena[id]
    }

    pub fn map_node(&mut self, node: impl Into<AstNodeId>, scope: ScopeId) {
        self.node_to_scope.insert(node.into(), scope);
    }

    pub fn scope_for_node(&self, node: impl Into<AstNodeId>) -> Option<ScopeId> {
        self.node_to_scope.get(&node.into()).copied()
    }

    /// Register a scope's source range using the estimated end (spec
    /// §4.4: "End-location estimation... advances the start line by a
    /// generous constant").
    pub fn register_range(&mut self, scope: ScopeId, start: Span) {
        let (end_line, end_col) = start.estimated_end();
        self.ranges.push(ScopeRange { scope, start_line: start.line, start_col: start.column, end_line, end_col });
    }

    /// Walk the parent chain from `scope`, returning the first symbol
    /// named `name` found (local lookup first, then enclosing scopes).
    pub fn resolve_in(&self, scope: ScopeId, name: Name) -> Option<&Symbol> {
        let mut current = Some(scope);
        while let Some(id) = current {
            if let Some(sym) = self.arena[id].lookup_local(name) {
                return Some(sym);
            }
            current = self.arena[id].parent;
        }
        None
    }

    pub fn resolve(&self, name: Name, line: u32, column: u32) -> Option<&Symbol> {
        self.resolve_in(self.scope_at_position(line, column), name)
    }

    /// All symbols visible from `scope`, innermost-first, shadowed names
    /// from outer scopes excluded (spec §6 `getVisibleSymbols`).
    pub fn visible_symbols_in(&self, scope: ScopeId) -> Vec<&Symbol> {
        let mut seen = rustc_hash::FxHashSet::default();
        let mut result = Vec::new();
        let mut current = Some(scope);
        while let Some(id) = current {
            for sym in self.arena[id].symbols() {
                if seen.insert(sym.name) {
                    result.push(sym);
                }
            }
            current = self.arena[id].parent;
        }
        result
    }

    pub fn get_visible_symbols(&self, line: u32, column: u32) -> Vec<&Symbol> {
        self.visible_symbols_in(self.scope_at_position(line, column))
    }

    /// Innermost scope at `(line, column)`: the containing range whose
    /// start is latest (spec §3, §9).
    pub fn scope_at_position(&self, line: u32, column: u32) -> ScopeId {
        let mut best: Option<&ScopeRange> = None;
        for range in &self.ranges {
            if contains(range, line, column) {
                let better = match best {
                    Some(b) => (range.start_line, range.start_col) > (b.start_line, b.start_col),
                    None => true,
                };
                if better {
                    best = Some(range);
                }
            }
        }
        best.map_or(self.global, |r| r.scope)
    }

    pub fn get_scope_at_position(&self, line: u32, column: u32) -> ScopeId {
        self.scope_at_position(line, column)
    }

    pub fn get_all_symbols_of_kind(&self, kinds: &[SymbolKind]) -> Vec<&Symbol> {
        self.arena
            .iter()
            .flat_map(|(_, scope)| scope.symbols())
            .filter(|sym| kinds.contains(&sym.kind))
            .collect()
    }
}
