//! Parser module
//!
//! Lexical analysis and recursive descent parsing of Java-like source into
//! a declaration tree plus diagnostics.

pub mod diagnostics;
pub mod error;
pub mod lexer;
pub mod literal;
pub mod parser;
pub mod span;

mod decl;
mod expr;

pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Severity, SourceId};
pub use error::{ParseError, ParseResult};
pub use expr::{ASSIGNMENT_PRECEDENCE, CONDITIONAL_PRECEDENCE};
pub use lexer::{LexError, LexErrorKind, Lexer, LexicalToken, Token};
pub use parser::Parser;
pub use span::{HasSpan, Location, Span};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::ast::CompilationUnit;
use crate::config::ParserConfig;
use crate::error::{Error, Result};

/// In-memory source text with the identifier diagnostics refer to it by
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    pub id: SourceId,
    pub text: String,
}

impl SourceUnit {
    pub fn new(id: impl AsRef<str>, text: impl Into<String>) -> Self {
        Self {
            id: SourceId::new(id),
            text: text.into(),
        }
    }
}

/// Cooperative cancellation flag, shared across threads by cloning
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Result of parsing one source unit: the tree is produced even when
/// diagnostics exist
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    pub unit: CompilationUnit,
    /// Ordered by source position
    pub diagnostics: Vec<Diagnostic>,
    /// Set when cancellation stopped the parse early
    pub cancelled: bool,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Strict view: any error diagnostic or a cancellation fails
    pub fn into_result(self) -> Result<CompilationUnit> {
        if self.cancelled {
            return Err(Error::Cancelled);
        }
        let count = self.diagnostics.iter().filter(|d| d.is_error()).count();
        match self.diagnostics.into_iter().find(Diagnostic::is_error) {
            Some(first) => Err(Error::parse_error(
                first.span.start.line,
                first.span.start.column,
                first.message,
                count,
            )),
            None => Ok(self.unit),
        }
    }
}

/// Parse source text with the default configuration
pub fn parse_compilation_unit(source: &str) -> (CompilationUnit, Vec<Diagnostic>) {
    let output = Parser::new(source).parse();
    (output.unit, output.diagnostics)
}

/// Parse a source unit, checking `cancel` between top-level declarations
pub fn parse_source(unit: &SourceUnit, config: &ParserConfig, cancel: Option<&CancellationToken>) -> ParseOutput {
    let mut parser = Parser::with_config(&unit.text, unit.id.clone(), *config);
    if let Some(token) = cancel {
        parser = parser.with_cancellation(token.clone());
    }
    parser.parse()
}

/// Parse several units, stopping at the first that fails strictly
pub fn parse_sources(units: &[SourceUnit], config: &ParserConfig) -> Result<Vec<CompilationUnit>> {
    config.validate()?;
    units
        .iter()
        .map(|unit| parse_source(unit, config, None).into_result())
        .collect()
}
