//! The bundled pipeline: tokenize → parse → analyze (spec §4.1-§4.2, §6).
//!
//! Portable: source comes in as `&str`, results come out as
//! [`PipelineOutput`]/[`TolerantOutput`]. No filesystem IO, no caching.

use nova_ir::StringInterner;
use nova_types::TypeRegistry;

use crate::output::{ErrorPhase, PipelineOutput, TolerantOutput};

/// Configuration for a pipeline run. Only the logical file path today,
/// kept as its own type (rather than a bare `&str` parameter) so a future
/// option doesn't become a breaking signature change.
pub struct PipelineConfig {
    /// Logical file path, used only for error reporting — not for IO.
    pub file_path: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig { file_path: "input.nova".to_string() }
    }
}

/// Strict pipeline (spec §4.2 `parse`): stops at the first syntax error.
/// On a clean parse, analyzes with no top-level statements, since strict
/// mode never recovers bare statements at file scope.
pub fn analyze_strict(
    source: &str,
    interner: &StringInterner,
    registry: &dyn TypeRegistry,
    _config: &PipelineConfig,
) -> Result<PipelineOutput, (nova_parse::ParseError, ErrorPhase)> {
    let (program, arena) = nova_parse::parse(source, interner).map_err(|e| (e, ErrorPhase::Parse))?;
    let analysis = nova_analysis::analyze(&arena, interner, registry, &program, &[]);
    Ok(PipelineOutput { program, arena, analysis })
}

/// Tolerant pipeline (spec §4.2 `parseTolerant`, §6 `analyze`): never
/// raises. Bare top-level statements recovered during tolerant parsing
/// are wrapped into a synthetic `main` by the analyzer itself.
pub fn analyze_tolerant(source: &str, interner: &StringInterner, registry: &dyn TypeRegistry, _config: &PipelineConfig) -> TolerantOutput {
    let parsed = nova_parse::parse_tolerant(source, interner);
    let analysis = nova_analysis::analyze(&parsed.arena, interner, registry, &parsed.program, &parsed.top_level_statements);
    TolerantOutput {
        program: parsed.program,
        arena: parsed.arena,
        parse_errors: parsed.errors,
        analysis,
    }
}
