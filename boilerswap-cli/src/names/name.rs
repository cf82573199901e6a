use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

use crate::core::{BoilerError, Result};

/// Lowercase letter at both ends, letters only in between.
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-zA-Z]*[a-z]$").expect("name pattern compiles"));

/// A validated entity name such as `widgetItem`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    /// Parse `value`, reporting `flag` as the option that sets it.
    pub fn parse(value: &str, flag: &'static str) -> Result<Self> {
        if !is_valid(value) {
            return Err(BoilerError::invalid("not a valid entity name", value, flag));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn is_valid(value: &str) -> bool {
    NAME_PATTERN.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(is_valid("ab"));
        assert!(is_valid("widget"));
        assert!(is_valid("widgetItem"));
        assert!(is_valid("myHTTPServer"));
    }

    #[test]
    fn test_invalid_names() {
        assert!(!is_valid(""));
        assert!(!is_valid("a"));
        assert!(!is_valid("Widget"));
        assert!(!is_valid("widgetX"));
        assert!(!is_valid("widget2item"));
        assert!(!is_valid("widget_item"));
        assert!(!is_valid("widget-item"));
        assert!(!is_valid("wïdget"));
    }

    #[test]
    fn test_parse_reports_flag() {
        let err = Name::parse("Bad", "--singular").unwrap_err();
        match err {
            BoilerError::InvalidConfig { value, flag, .. } => {
                assert_eq!(value, "Bad");
                assert_eq!(flag, "--singular");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
