//! jsyntax: front-end parser for a Java-like language
//!
//! Source text is lexed and parsed into a declaration tree (classes,
//! interfaces, enums, annotation types and records with their members)
//! alongside a list of diagnostics. Parsing never stops at the first error.
//!
//! ## Architecture
//!
//! - **parser**: lexer, literal decoding, declaration and expression parsers,
//!   diagnostics collection
//! - **ast**: declaration, member and expression nodes plus a read-only visitor
//! - **config**: parse limits
//! - **error**: crate-level error type
//!
//! ```text
//! Source → Lexer → Declaration Parser ⇄ Expression Parser → CompilationUnit
//!                         ↓
//!                    Diagnostics
//! ```

pub mod ast;
pub mod config;
pub mod error;
pub mod parser;

pub use config::ParserConfig;
pub use error::{Error, Result};
pub use parser::{
    parse_compilation_unit, parse_source, parse_sources, CancellationToken, Diagnostic, DiagnosticKind,
    ParseOutput, SourceId, SourceUnit,
};
