//! Built-in symbol registration (spec §4.10): the global scope is seeded
//! with every built-in function and constant the host's [`TypeRegistry`]
//! reports, before any user declaration is processed.

use nova_types::Type;

use crate::symbol::{Symbol, SymbolKind};
use nova_ir::Span;

use super::SemanticAnalyzer;

impl SemanticAnalyzer<'_> {
    pub(crate) fn register_builtins(&mut self) {
        let functions = self.registry.builtin_functions().to_vec();
        for function in functions {
            let mut sym = Symbol::new(function.name, SymbolKind::BuiltinFunction, Span::UNKNOWN);
            sym.structural_type = Some(Type::Function {
                receiver: None,
                params: Vec::new(),
                ret: Box::new(Type::raw_class(function.return_type_name, false)),
                nullable: false,
            });
            self.define_in_current_scope(sym);
        }

        let constants = self.registry.builtin_constants().to_vec();
        for constant in constants {
            let mut sym = Symbol::new(constant.name, SymbolKind::BuiltinConstant, Span::UNKNOWN);
            sym.structural_type = Some(Type::raw_class(constant.type_name, false));
            self.define_in_current_scope(sym);
        }
    }
}
