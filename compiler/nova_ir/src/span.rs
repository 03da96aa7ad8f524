//! Source location spans.

use std::fmt;

/// Error constructing a [`Span`] from a range that exceeds `u32::MAX`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanError {
    StartTooLarge(usize),
    EndTooLarge(usize),
}

impl fmt::Display for SpanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpanError::StartTooLarge(v) => {
                write!(f, "span start {v} exceeds u32::MAX ({})", u32::MAX)
            }
            SpanError::EndTooLarge(v) => write!(f, "span end {v} exceeds u32::MAX ({})", u32::MAX),
        }
    }
}

impl std::error::Error for SpanError {}

/// A byte-offset range into a single source file, plus the 1-based
/// line/column a diagnostic should point at.
///
/// Per spec §3: `(file, line, column, byteOffset, length)`. The file is
/// tracked separately (one [`Span`] per compilation unit, no cross-file
/// spans), so this type carries line/column/offset/length; `file` lives
/// on the owning `Program`/`SourceMap`, not duplicated on every span.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
    pub line: u32,
    pub column: u32,
}

impl Span {
    /// Sentinel for "no location" (synthetic nodes, builtins).
    pub const UNKNOWN: Span = Span { start: 0, end: 0, line: 0, column: 0 };

    #[inline]
    pub const fn new(start: u32, end: u32, line: u32, column: u32) -> Self {
        Span { start, end, line, column }
    }

    #[inline]
    pub fn try_from_range(range: std::ops::Range<usize>, line: u32, column: u32) -> Result<Self, SpanError> {
        let start = u32::try_from(range.start).map_err(|_| SpanError::StartTooLarge(range.start))?;
        let end = u32::try_from(range.end).map_err(|_| SpanError::EndTooLarge(range.end))?;
        Ok(Span { start, end, line, column })
    }

    /// # Panics
    /// Panics if the range exceeds `u32::MAX` bytes. Use
    /// [`Span::try_from_range`] when the input is untrusted.
    #[inline]
    pub fn from_range(range: std::ops::Range<usize>, line: u32, column: u32) -> Self {
        Self::try_from_range(range, line, column).unwrap_or_else(|e| panic!("{e}"))
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub const fn is_unknown(&self) -> bool {
        self.start == 0 && self.end == 0 && self.line == 0
    }

    /// Diagnostic "length", floored to 1 per spec §7.
    #[inline]
    pub fn diag_len(&self) -> u32 {
        self.len().max(1)
    }

    /// Smallest span enclosing both `self` and `other`.
    #[must_use]
    pub fn to(&self, other: Span) -> Span {
        if self.is_unknown() {
            return other;
        }
        if other.is_unknown() {
            return *self;
        }
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            line: self.line,
            column: self.column,
        }
    }

    /// Estimated end location when the AST has no real end token, per
    /// spec §4.4/§9: advance 100 lines / 1000 bytes from the start.
    #[must_use]
    pub fn estimated_end(&self) -> (u32, u32) {
        (self.line + 100, self.start + 1000)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
