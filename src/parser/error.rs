use std::fmt;

use super::span::Span;

/// A recoverable parse failure travelling up to the nearest recovery point,
/// where it is turned into a diagnostic
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Unexpected token encountered
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    /// Unexpected end of input
    UnexpectedEndOfInput {
        expected: String,
        span: Span,
    },

    /// Invalid syntax
    InvalidSyntax {
        message: String,
        span: Span,
    },
}

impl ParseError {
    /// Create a new unexpected token error
    pub fn unexpected_token(expected: &str, found: &str, span: Span) -> Self {
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: found.to_string(),
            span,
        }
    }

    /// Create a new unexpected end of input error
    pub fn unexpected_end_of_input(expected: &str, span: Span) -> Self {
        ParseError::UnexpectedEndOfInput {
            expected: expected.to_string(),
            span,
        }
    }

    /// Create a new invalid syntax error
    pub fn invalid_syntax(message: impl Into<String>, span: Span) -> Self {
        ParseError::InvalidSyntax {
            message: message.into(),
            span,
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: &str) -> Self {
        match self {
            ParseError::UnexpectedToken { expected, found, span } => ParseError::UnexpectedToken {
                expected: format!("{} in {}", expected, context),
                found,
                span,
            },
            ParseError::UnexpectedEndOfInput { expected, span } => ParseError::UnexpectedEndOfInput {
                expected: format!("{} in {}", expected, context),
                span,
            },
            ParseError::InvalidSyntax { message, span } => ParseError::InvalidSyntax {
                message: format!("{} in {}", message, context),
                span,
            },
        }
    }

    /// Get the span of the error
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::UnexpectedEndOfInput { span, .. }
            | ParseError::InvalidSyntax { span, .. } => *span,
        }
    }

    /// Diagnostic message without the position prefix
    pub fn message(&self) -> String {
        match self {
            ParseError::UnexpectedToken { expected, found, .. } => {
                format!("expected {}, found {}", expected, found)
            }
            ParseError::UnexpectedEndOfInput { expected, .. } => {
                format!("unexpected end of input, expected {}", expected)
            }
            ParseError::InvalidSyntax { message, .. } => message.clone(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parse error at {}: {}", self.span().start, self.message())
    }
}

impl std::error::Error for ParseError {}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
