//! Parser core: token cursor, error recovery and the compilation unit.
//!
//! Declarations live in `decl.rs` and expressions in `expr.rs`; both extend
//! the same [`Parser`] with further `impl` blocks.

use super::diagnostics::{DiagnosticKind, Diagnostics, SourceId};
use super::error::{ParseError, ParseResult};
use super::lexer::{Lexer, LexicalToken, Token};
use super::span::{Location, Span};
use super::{CancellationToken, ParseOutput};
use crate::ast::*;
use crate::config::ParserConfig;

/// Recursive descent parser over a lazily lexed token stream
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    pub(super) diagnostics: Diagnostics,
    pub(super) config: ParserConfig,
    source_id: SourceId,
    cancel: Option<CancellationToken>,
    /// Current recursion depth of declarations and expressions
    depth: usize,
    /// Number of `{` consumed and not yet closed
    brace_level: usize,
    /// End of the last consumed token
    prev_end: Location,
}

impl<'src> Parser<'src> {
    /// Create a parser with the default configuration
    pub fn new(source: &'src str) -> Self {
        Self::with_config(source, SourceId::default(), ParserConfig::default())
    }

    /// Zero limits are raised to 1 so a parse always makes progress
    pub fn with_config(source: &'src str, source_id: SourceId, config: ParserConfig) -> Self {
        let config = ParserConfig {
            max_errors: config.max_errors.map(|max| max.max(1)),
            max_nesting_depth: config.max_nesting_depth.max(1),
        };
        Self {
            lexer: Lexer::new(source),
            diagnostics: Diagnostics::new(source_id.clone(), config.max_errors),
            config,
            source_id,
            cancel: None,
            depth: 0,
            brace_level: 0,
            prev_end: Location::start(),
        }
    }

    /// Check the token between top-level declarations
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Parse the whole source into a compilation unit plus diagnostics
    pub fn parse(mut self) -> ParseOutput {
        log::debug!("parsing '{}'", self.source_id);
        let start = self.current_span().start;

        let package = if self.check(Token::Package) {
            match self.parse_package_decl() {
                Ok(decl) => Some(decl),
                Err(err) => {
                    self.report(err);
                    self.synchronize(0);
                    None
                }
            }
        } else {
            None
        };

        let mut imports = Vec::new();
        while self.check(Token::Import) {
            match self.parse_import_decl() {
                Ok(decl) => imports.push(decl),
                Err(err) => {
                    self.report(err);
                    self.synchronize(0);
                }
            }
        }

        let mut types = Vec::new();
        let mut cancelled = false;
        loop {
            if self.halted() {
                log::warn!(
                    "'{}': error budget of {} exhausted, stopping after {} declaration(s)",
                    self.source_id,
                    self.diagnostics.len(),
                    types.len()
                );
                break;
            }
            if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
                log::warn!("'{}': parse cancelled after {} declaration(s)", self.source_id, types.len());
                cancelled = true;
                break;
            }
            match self.peek_token() {
                None => break,
                Some(Token::Semicolon) => {
                    self.advance();
                }
                Some(Token::RBrace) => {
                    let span = self.current_span();
                    self.report(ParseError::invalid_syntax("unmatched '}'", span));
                    self.advance();
                }
                Some(_) => match self.parse_type_decl(None) {
                    Ok(decl) => types.push(decl),
                    Err(err) => {
                        self.report(err);
                        self.synchronize(0);
                    }
                },
            }
        }

        self.drain_lex_errors();
        let span = Span::new(start, self.prev_end.max(start));
        let unit = CompilationUnit { package, imports, types, span };
        let dropped = self.diagnostics.dropped();
        let diagnostics = self.diagnostics.into_sorted();
        log::debug!(
            "parsed '{}': {} declaration(s), {} diagnostic(s){}",
            self.source_id,
            unit.types.len(),
            diagnostics.len(),
            if dropped > 0 { format!(", {} over budget", dropped) } else { String::new() }
        );

        ParseOutput { unit, diagnostics, cancelled }
    }

    // Token cursor

    pub(super) fn peek_token(&mut self) -> Option<Token> {
        self.lexer.peek(0).map(|t| t.token)
    }

    pub(super) fn peek_nth(&mut self, k: usize) -> Option<Token> {
        self.lexer.peek(k).map(|t| t.token)
    }

    pub(super) fn check(&mut self, token: Token) -> bool {
        self.peek_token() == Some(token)
    }

    /// Identifier with the given spelling (contextual keywords)
    pub(super) fn check_contextual(&mut self, k: usize, word: &str) -> bool {
        matches!(self.lexer.peek(k), Some(t) if t.token == Token::Identifier && t.lexeme == word)
    }

    pub(super) fn advance(&mut self) -> Option<LexicalToken> {
        let tok = self.lexer.next_token()?;
        match tok.token {
            Token::LBrace => self.brace_level += 1,
            Token::RBrace => self.brace_level = self.brace_level.saturating_sub(1),
            _ => {}
        }
        self.prev_end = tok.span.end;
        self.drain_lex_errors();
        Some(tok)
    }

    pub(super) fn match_token(&mut self, token: Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(super) fn consume(&mut self, token: Token, expected: &str) -> ParseResult<LexicalToken> {
        if self.check(token) {
            if let Some(tok) = self.advance() {
                return Ok(tok);
            }
        }
        Err(self.error_here(expected))
    }

    /// Close a type argument or parameter list, splitting `>>` when needed
    pub(super) fn consume_close_angle(&mut self) -> ParseResult<()> {
        self.lexer.split_angle();
        self.consume(Token::Gt, "'>'")?;
        Ok(())
    }

    pub(super) fn parse_identifier(&mut self) -> ParseResult<String> {
        Ok(self.consume(Token::Identifier, "identifier")?.lexeme)
    }

    /// `a.b.c`
    pub(super) fn parse_qualified_name(&mut self) -> ParseResult<String> {
        let mut name = self.parse_identifier()?;
        while self.check(Token::Dot) && self.peek_nth(1) == Some(Token::Identifier) {
            self.advance();
            name.push('.');
            name.push_str(&self.parse_identifier()?);
        }
        Ok(name)
    }

    /// Span of the next token, or an empty span at end of input
    pub(super) fn current_span(&mut self) -> Span {
        match self.lexer.peek(0) {
            Some(tok) => tok.span,
            None => Span::single(self.lexer.end_location()),
        }
    }

    pub(super) fn span_from(&self, start: Location) -> Span {
        Span::new(start, self.prev_end.max(start))
    }

    pub(super) fn brace_level(&self) -> usize {
        self.brace_level
    }

    /// Error describing the next token as unexpected
    pub(super) fn error_here(&mut self, expected: &str) -> ParseError {
        match self.lexer.peek(0) {
            None => {
                let span = Span::single(self.lexer.end_location());
                ParseError::unexpected_end_of_input(expected, span)
            }
            Some(tok) => {
                let found = match tok.token {
                    Token::Identifier => format!("identifier '{}'", tok.lexeme),
                    other => other.describe().to_string(),
                };
                ParseError::unexpected_token(expected, &found, tok.span)
            }
        }
    }

    // Diagnostics and recovery

    pub(super) fn report(&mut self, err: ParseError) {
        if self.at_truncated_end() {
            log::trace!("suppressed at truncated end of input: {}", err);
            return;
        }
        self.diagnostics.record(DiagnosticKind::Syntax, err.message(), err.span());
    }

    /// Note a `{` that is still open at end of input
    pub(super) fn report_unclosed(&mut self, open: Span, what: &str) {
        if self.at_truncated_end() {
            return;
        }
        let message = format!("'{{' of {} is never closed", what);
        self.diagnostics.record(DiagnosticKind::Structural, message, open);
    }

    /// End of input reached because an unterminated comment or text block
    /// swallowed the rest; the lexical error already covers what follows
    fn at_truncated_end(&mut self) -> bool {
        self.peek_token().is_none() && self.lexer.truncated()
    }

    fn drain_lex_errors(&mut self) {
        for err in self.lexer.take_errors() {
            self.diagnostics.record_lex_error(err);
        }
    }

    /// True once an opt-in error budget is spent; every loop unwinds from here
    pub(super) fn halted(&self) -> bool {
        self.diagnostics.exhausted()
    }

    /// Skip to the next synchronizing token for a body opened at `level`.
    ///
    /// Stops after a `;` at that level, after a `}` that brings the level
    /// back to it, or before the `}` closing the body itself.
    pub(super) fn synchronize(&mut self, level: usize) {
        let from = self.current_span().start;
        let mut skipped = 0usize;
        while let Some(token) = self.peek_token() {
            let at_level = self.brace_level <= level;
            match token {
                Token::Semicolon if at_level => {
                    self.advance();
                    skipped += 1;
                    break;
                }
                Token::RBrace if at_level => break,
                Token::RBrace => {
                    self.advance();
                    skipped += 1;
                    if self.brace_level <= level {
                        break;
                    }
                }
                _ => {
                    self.advance();
                    skipped += 1;
                }
            }
        }
        log::trace!("recovered from {}: skipped {} token(s)", from, skipped);
    }

    /// Skip until one of `stops` at brace level `level` outside parentheses,
    /// leaving it in place. `}` closing the body also stops the skip.
    pub(super) fn skip_until(&mut self, level: usize, stops: &[Token]) {
        let mut parens = 0usize;
        while let Some(token) = self.peek_token() {
            let at_level = self.brace_level <= level;
            if at_level && parens == 0 && (stops.contains(&token) || token == Token::RBrace) {
                break;
            }
            match token {
                Token::LParen => parens += 1,
                Token::RParen => parens = parens.saturating_sub(1),
                _ => {}
            }
            self.advance();
        }
    }

    /// Run `f` one nesting level deeper, failing when the configured depth
    /// is exceeded
    pub(super) fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= self.config.max_nesting_depth {
            let span = self.current_span();
            return Err(ParseError::invalid_syntax(
                format!("nesting exceeds the maximum depth of {}", self.config.max_nesting_depth),
                span,
            ));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    // Compilation unit preamble

    fn parse_package_decl(&mut self) -> ParseResult<PackageDecl> {
        let start = self.consume(Token::Package, "'package'")?.span.start;
        let name = self.parse_qualified_name()?;
        self.consume(Token::Semicolon, "';' after package name")?;
        Ok(PackageDecl { name, span: self.span_from(start) })
    }

    fn parse_import_decl(&mut self) -> ParseResult<ImportDecl> {
        let start = self.consume(Token::Import, "'import'")?.span.start;
        let is_static = self.match_token(Token::Static);
        let name = self.parse_qualified_name()?;
        let mut is_wildcard = false;
        if self.match_token(Token::Dot) {
            self.consume(Token::Star, "'*' after '.' in import")?;
            is_wildcard = true;
        }
        self.consume(Token::Semicolon, "';' after import")?;
        Ok(ImportDecl {
            name,
            is_static,
            is_wildcard,
            span: self.span_from(start),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preamble_is_parsed() {
        let source = "package com.example;\nimport java.util.List;\nimport static java.lang.Math.*;\n";
        let output = Parser::new(source).parse();
        assert!(output.diagnostics.is_empty());
        let unit = output.unit;
        assert_eq!(unit.package.as_ref().map(|p| p.name.as_str()), Some("com.example"));
        assert_eq!(unit.imports.len(), 2);
        assert!(!unit.imports[0].is_static);
        assert!(unit.imports[1].is_static && unit.imports[1].is_wildcard);
        assert_eq!(unit.imports[1].name, "java.lang.Math");
    }

    #[test]
    fn stray_semicolons_and_braces_at_top_level() {
        let output = Parser::new(";; class A {} ; }").parse();
        assert_eq!(output.unit.types.len(), 1);
        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(output.diagnostics[0].message, "unmatched '}'");
    }

    #[test]
    fn budget_of_one_stops_early() {
        let config = ParserConfig::new().with_max_errors(1);
        let output = Parser::with_config("int x; int y; class A {}", SourceId::new("T.java"), config).parse();
        assert_eq!(output.diagnostics.len(), 1);
        assert!(output.unit.types.is_empty());
    }
}
