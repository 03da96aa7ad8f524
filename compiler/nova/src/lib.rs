//! Portable Nova front-end driver.
//!
//! Bundles tokenization, parsing, and semantic analysis behind a single
//! entry point, so an embedder (an IDE extension, a CLI, a test harness)
//! never has to wire `nova_lexer`/`nova_parse`/`nova_analysis` together
//! itself.
//!
//! # Architecture
//!
//! ```text
//! nova_ir, nova_diagnostic, nova_lexer, nova_parse, nova_types, nova_analysis
//!                                   ↓
//!                                 nova  ← this crate
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use nova::{analyze_tolerant, PipelineConfig};
//! use nova_ir::StringInterner;
//! use nova_types::EmptyTypeRegistry;
//!
//! let interner = StringInterner::new();
//! let registry = EmptyTypeRegistry;
//! let output = analyze_tolerant("val x = 1", &interner, &registry, &PipelineConfig::default());
//! assert!(!output.has_errors());
//! ```

mod output;
mod pipeline;

pub use output::{ErrorPhase, PipelineOutput, TolerantOutput};
pub use pipeline::{analyze_strict, analyze_tolerant, PipelineConfig};

pub use nova_analysis::AnalysisResult;
pub use nova_diagnostic::Diagnostic;
pub use nova_parse::ParseError;

#[cfg(test)]
mod tests;
