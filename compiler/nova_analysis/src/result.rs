//! [`AnalysisResult`] (spec §3 "AnalysisResult").

use nova_diagnostic::Diagnostic;
use nova_ir::ast::ExprId;
use nova_ir::StringInterner;
use nova_types::Type;
use rustc_hash::FxHashMap;

use crate::scope::SymbolTable;

/// `(symbolTable, diagnostics, exprTypeMap)` per spec §3. `expr_type_map`
/// is identity-keyed on [`ExprId`] (an arena index), which already gives
/// the "identity, not structural equality" guarantee spec §9 calls for.
pub struct AnalysisResult {
    pub symbol_table: SymbolTable,
    pub diagnostics: Vec<Diagnostic>,
    pub expr_type_map: FxHashMap<ExprId, Type>,
}

impl AnalysisResult {
    pub fn get_expr_type(&self, expr: ExprId) -> Option<&Type> {
        self.expr_type_map.get(&expr)
    }

    /// Spec §6 `AnalysisResult.getExprTypeName`.
    pub fn get_expr_type_name(&self, expr: ExprId, interner: &StringInterner) -> Option<String> {
        let ty = self.expr_type_map.get(&expr)?;
        Some(display_type(ty, interner))
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == nova_diagnostic::Severity::Error)
    }
}

/// Render a structural type back to source-like text (`"List<Int>?"`),
/// the inverse of [`nova_types::TypeNameCache`]'s parser.
pub fn display_type(ty: &Type, interner: &StringInterner) -> String {
    let suffix = if ty.nullable() { "?" } else { "" };
    match ty {
        Type::Primitive { name, .. } => format!("{}{suffix}", interner.resolve(*name)),
        Type::Class { name, type_args, .. } => {
            let base = interner.resolve(*name);
            if type_args.is_empty() {
                format!("{base}{suffix}")
            } else {
                let args: Vec<String> = type_args
                    .iter()
                    .map(|a| match &a.ty {
                        Some(t) => display_type(t, interner),
                        None => "*".to_string(),
                    })
                    .collect();
                format!("{base}<{}>{suffix}", args.join(", "))
            }
        }
        Type::TypeParameter { name, .. } => format!("{}{suffix}", interner.resolve(*name)),
        Type::Function { receiver, params, ret, .. } => {
            let receiver_prefix = receiver.as_ref().map_or(String::new(), |r| format!("{}.", display_type(r, interner)));
            let params_text: Vec<String> = params.iter().map(|p| display_type(p, interner)).collect();
            format!("{receiver_prefix}({}) -> {}{suffix}", params_text.join(", "), display_type(ret, interner))
        }
        Type::Unit => "Unit".to_string(),
        Type::Nothing { .. } => format!("Nothing{suffix}"),
        Type::Error => "<error>".to_string(),
    }
}
