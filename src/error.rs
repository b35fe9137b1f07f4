use thiserror::Error;

/// Result type for jsyntax operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types surfaced by the public API.
///
/// Individual syntax problems never become an `Error`; they are collected as
/// diagnostics. `Parse` only appears when a caller asks for a strict result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Parse error at line {line}, column {column}: {message} ({count} error(s) total)")]
    Parse {
        line: usize,
        column: usize,
        message: String,
        count: usize,
    },

    #[error("Parse cancelled")]
    Cancelled,
}

impl Error {
    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    /// Create a parse error with location information
    pub fn parse_error(line: usize, column: usize, message: impl Into<String>, count: usize) -> Self {
        Self::Parse {
            line,
            column,
            message: message.into(),
            count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats() {
        let err = Error::parse_error(3, 9, "expected ';', found '}'", 2);
        assert_eq!(
            err.to_string(),
            "Parse error at line 3, column 9: expected ';', found '}' (2 error(s) total)"
        );
        assert_eq!(Error::config_error("bad").to_string(), "Configuration error: bad");
        assert_eq!(Error::Cancelled.to_string(), "Parse cancelled");
    }
}
