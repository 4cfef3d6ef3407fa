//! `key:value` placeholder substitution over raw fragment text

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// One substitution: every literal `{key}` becomes `value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    key: String,
    value: String,
}

impl Pattern {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let (key, value): (String, String) = (key.into(), value.into());
        if key.is_empty() {
            return Err(Error::invalid_pattern(format!(":{value}"), "key must not be empty"));
        }
        Ok(Self { key, value })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The placeholder this pattern replaces, braces included.
    pub fn placeholder(&self) -> String {
        format!("{{{}}}", self.key)
    }

    pub fn apply(&self, text: &str) -> String {
        text.replace(&self.placeholder(), &self.value)
    }
}

impl FromStr for Pattern {
    type Err = Error;

    /// Split at the first `:`. The value may itself contain colons.
    fn from_str(s: &str) -> Result<Self> {
        let (key, value) = s
            .split_once(':')
            .ok_or_else(|| Error::invalid_pattern(s, "expected key:value"))?;
        if key.is_empty() {
            return Err(Error::invalid_pattern(s, "key must not be empty"));
        }
        Ok(Self {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key, self.value)
    }
}

/// Apply `patterns` to `text` in order.
pub fn substitute(text: &str, patterns: &[Pattern]) -> String {
    patterns
        .iter()
        .fold(text.to_string(), |acc, pattern| pattern.apply(&acc))
}
