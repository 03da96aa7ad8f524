//! Diagnostic reporting for the Nova compiler front end (spec §3
//! "Diagnostic", §7 "Error handling design").
//!
//! Diagnostics are *data*: the analyzer never raises on a semantic
//! problem, it appends a [`Diagnostic`] and keeps going, so a caller can
//! query partial results of a broken file (spec §1 Non-goals).

use nova_ir::Span;
use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A severity-tagged message with a location and a length, per spec §3.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub span: Span,
    pub length: u32,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>, span: Span) -> Self {
        let length = span.diag_len();
        Diagnostic { severity, message: message.into(), span, length }
    }

    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self::new(Severity::Error, message, span)
    }

    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self::new(Severity::Warning, message, span)
    }

    pub fn info(message: impl Into<String>, span: Span) -> Self {
        Self::new(Severity::Info, message, span)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.severity, self.message, self.span)
    }
}

/// Accumulates diagnostics during parsing or analysis.
///
/// A thin `Vec` wrapper rather than a raw `Vec<Diagnostic>` field so that
/// future cross-cutting concerns (e.g. a per-run diagnostic cap) have one
/// place to live, matching the teacher's `DiagnosticBag`-shaped collectors.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(
            severity = %diagnostic.severity,
            message = %diagnostic.message,
            "diagnostic emitted"
        );
        self.diagnostics.push(diagnostic);
    }

    pub fn error(&mut self, message: impl Into<String>, span: Span) {
        self.push(Diagnostic::error(message, span));
    }

    pub fn warning(&mut self, message: impl Into<String>, span: Span) {
        self.push(Diagnostic::warning(message, span));
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn length_is_floored_to_one() {
        let d = Diagnostic::error("oops", Span::new(5, 5, 1, 1));
        assert_eq!(d.length, 1);
    }

    #[test]
    fn bag_tracks_errors() {
        let mut bag = DiagnosticBag::new();
        assert!(!bag.has_errors());
        bag.warning("just a warning", Span::UNKNOWN);
        assert!(!bag.has_errors());
        bag.error("boom", Span::UNKNOWN);
        assert!(bag.has_errors());
        assert_eq!(bag.as_slice().len(), 2);
    }
}
