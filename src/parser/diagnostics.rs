//! Diagnostics collected while lexing and parsing one source unit.

use std::fmt;
use std::sync::Arc;

use super::lexer::LexError;
use super::span::Span;

/// Identifier of the source unit a diagnostic belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SourceId(Arc<str>);

impl SourceId {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Malformed literal, comment or character
    Lexical,
    /// Unexpected or missing token
    Syntax,
    /// Unbalanced braces at end of input
    Structural,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Lexical => write!(f, "lexical"),
            DiagnosticKind::Syntax => write!(f, "syntax"),
            DiagnosticKind::Structural => write!(f, "structural"),
        }
    }
}

/// Only errors are produced today; the severity is carried so consumers can
/// merge these with their own warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub source: SourceId,
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn error(source: SourceId, kind: DiagnosticKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            source,
            kind,
            severity: Severity::Error,
            message: message.into(),
            span,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.source.as_str().is_empty() {
            write!(f, "{}: {} error: {}", self.span.start, self.kind, self.message)
        } else {
            write!(f, "{}:{}: {} error: {}", self.source, self.span.start, self.kind, self.message)
        }
    }
}

/// Error collector with an optional budget.
///
/// Once `max_errors` diagnostics are held, further records are dropped and
/// [`Diagnostics::exhausted`] turns true so the parser can stop early.
/// Without a budget every diagnostic is kept.
#[derive(Debug)]
pub struct Diagnostics {
    source: SourceId,
    max_errors: Option<usize>,
    items: Vec<Diagnostic>,
    dropped: usize,
}

impl Diagnostics {
    pub fn new(source: SourceId, max_errors: Option<usize>) -> Self {
        Self {
            source,
            max_errors,
            items: Vec::new(),
            dropped: 0,
        }
    }

    /// Record a diagnostic; returns false when the budget is already spent
    pub fn record(&mut self, kind: DiagnosticKind, message: impl Into<String>, span: Span) -> bool {
        if self.exhausted() {
            self.dropped += 1;
            return false;
        }
        let diagnostic = Diagnostic::error(self.source.clone(), kind, message, span);
        log::trace!("{}", diagnostic);
        self.items.push(diagnostic);
        true
    }

    pub fn record_lex_error(&mut self, error: LexError) -> bool {
        self.record(DiagnosticKind::Lexical, error.kind.to_string(), error.span)
    }

    pub fn exhausted(&self) -> bool {
        self.max_errors.is_some_and(|max| self.items.len() >= max)
    }

    /// Diagnostics that did not fit in the budget
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Finish collection: diagnostics ordered by source position, ties kept
    /// in recording order
    pub fn into_sorted(mut self) -> Vec<Diagnostic> {
        self.items.sort_by_key(|d| d.span.start.offset);
        self.items
    }
}
