//! Parser configuration

use crate::error::{Error, Result};

pub const MAX_ERRORS_VAR: &str = "JSYNTAX_MAX_ERRORS";
pub const MAX_NESTING_DEPTH_VAR: &str = "JSYNTAX_MAX_NESTING_DEPTH";

/// Limits applied to a single parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Diagnostics kept before the parser stops consuming declarations;
    /// `None` parses to the end and reports everything
    pub max_errors: Option<usize>,
    /// Deepest nesting of declarations or expressions accepted
    pub max_nesting_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_errors: None,
            max_nesting_depth: 64,
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the parse once this many diagnostics are recorded
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = Some(max_errors);
        self
    }

    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_errors == Some(0) {
            return Err(Error::config_error("max_errors must be at least 1"));
        }
        if self.max_nesting_depth == 0 {
            return Err(Error::config_error("max_nesting_depth must be at least 1"));
        }
        Ok(())
    }

    /// Defaults overridden by `JSYNTAX_MAX_ERRORS` and
    /// `JSYNTAX_MAX_NESTING_DEPTH`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(value) = lookup(MAX_ERRORS_VAR) {
            config.max_errors = Some(parse_limit(MAX_ERRORS_VAR, &value)?);
        }
        if let Some(value) = lookup(MAX_NESTING_DEPTH_VAR) {
            config.max_nesting_depth = parse_limit(MAX_NESTING_DEPTH_VAR, &value)?;
        }
        config.validate()?;
        log::debug!("parser config from environment: {:?}", config);
        Ok(config)
    }
}

fn parse_limit(key: &str, value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err(Error::config_error(format!("{} must be at least 1", key))),
        Ok(n) => Ok(n),
        Err(_) => Err(Error::config_error(format!("{}: invalid number '{}'", key, value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = ParserConfig::default();
        assert_eq!(config.max_errors, None);
        assert_eq!(config.max_nesting_depth, 64);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_and_validation() {
        let config = ParserConfig::new().with_max_errors(5).with_max_nesting_depth(8);
        assert_eq!((config.max_errors, config.max_nesting_depth), (Some(5), 8));
        assert!(matches!(ParserConfig::new().with_max_errors(0).validate(), Err(Error::Config { .. })));
        assert!(ParserConfig::new().with_max_nesting_depth(0).validate().is_err());
    }

    #[test]
    fn environment_overrides() {
        let config = ParserConfig::from_lookup(lookup(&[(MAX_ERRORS_VAR, "7")])).unwrap();
        assert_eq!(config.max_errors, Some(7));
        assert_eq!(config.max_nesting_depth, 64);

        let config = ParserConfig::from_lookup(lookup(&[(MAX_NESTING_DEPTH_VAR, " 12 ")])).unwrap();
        assert_eq!(config.max_nesting_depth, 12);
    }

    #[test]
    fn environment_rejects_bad_values() {
        assert!(ParserConfig::from_lookup(lookup(&[(MAX_ERRORS_VAR, "lots")])).is_err());
        assert!(ParserConfig::from_lookup(lookup(&[(MAX_NESTING_DEPTH_VAR, "0")])).is_err());
        assert!(ParserConfig::from_lookup(lookup(&[(MAX_ERRORS_VAR, "-1")])).is_err());
    }
}
