//! Result types for the bundled front-end pipeline.
//!
//! These are the public interface between the driver and its embedders;
//! they carry everything needed to report results without exposing the
//! arena/AST plumbing each stage uses internally.

use nova_diagnostic::Diagnostic;
use nova_ir::ast::{AstArenas, Program};

use nova_analysis::AnalysisResult;
use nova_parse::ParseError;

/// Which pipeline phase produced a hard (non-recoverable) failure.
/// Analysis itself never fails this way (spec §1 Non-goals: it always
/// returns a best-effort [`AnalysisResult`] and accumulates diagnostics
/// instead of raising).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorPhase {
    Parse,
}

/// Result of the strict pipeline: parse stops at the first syntax error,
/// so a [`PipelineOutput`] is only ever produced on a fully clean parse.
pub struct PipelineOutput {
    pub program: Program,
    pub arena: AstArenas,
    pub analysis: AnalysisResult,
}

impl PipelineOutput {
    pub fn has_errors(&self) -> bool {
        self.analysis.has_errors()
    }
}

/// Result of the tolerant pipeline (spec §4.2 `parseTolerant`, §6
/// `analyze`): a best-effort program, every recovered-from syntax error,
/// and the analyzer's own diagnostics over whatever was recovered.
pub struct TolerantOutput {
    pub program: Program,
    pub arena: AstArenas,
    pub parse_errors: Vec<ParseError>,
    pub analysis: AnalysisResult,
}

impl TolerantOutput {
    pub fn has_errors(&self) -> bool {
        !self.parse_errors.is_empty() || self.analysis.has_errors()
    }

    /// Every diagnostic from both phases, parse errors rendered into the
    /// same [`Diagnostic`] shape the analyzer emits, parse errors first.
    pub fn all_diagnostics(&self) -> Vec<Diagnostic> {
        let mut all: Vec<Diagnostic> = self
            .parse_errors
            .iter()
            .map(|e| Diagnostic::error(e.message.clone(), e.span))
            .collect();
        all.extend(self.analysis.diagnostics.iter().cloned());
        all
    }
}
