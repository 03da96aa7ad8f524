//! Nova semantic analyzer: scope/symbol construction, type inference,
//! generic unification, variance checking, and diagnostic reporting
//! (spec §2 "Semantic analyzer", §4.4-§4.10).
//!
//! # Module organization
//!
//! - [`scope`]: the scope arena and [`scope::SymbolTable`].
//! - [`symbol`]: [`symbol::Symbol`] and [`symbol::SymbolKind`].
//! - [`analyzer`]: the AST-visiting [`analyzer::SemanticAnalyzer`] itself,
//!   split by concern (declarations, statements, expressions, semantic
//!   checks, built-in registration).
//! - [`result`]: [`result::AnalysisResult`], the analyzer's output.

pub mod analyzer;
pub mod result;
pub mod scope;
pub mod symbol;

pub use analyzer::SemanticAnalyzer;
pub use result::AnalysisResult;
pub use scope::{AstNodeId, Scope, ScopeId, ScopeKind, ScopeRange, SymbolTable};
pub use symbol::{ParamInfo, Symbol, SymbolKind};

use nova_ir::ast::{AstArenas, Program, StmtId};
use nova_types::TypeRegistry;

/// Entry point: run the semantic analyzer over a parsed program (spec §6
/// `analyze(program, topLevelStatements?)`).
pub fn analyze(arenas: &AstArenas, interner: &nova_ir::StringInterner, registry: &dyn TypeRegistry, program: &Program, top_level_statements: &[StmtId]) -> AnalysisResult {
    SemanticAnalyzer::new(arenas, interner, registry).analyze(program, top_level_statements)
}
