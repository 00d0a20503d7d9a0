//! Equality-based label selectors.
//!
//! A selector is a conjunction of `key=value` requirements, written in the
//! familiar comma separated form:
//!
//! ```text
//! openebs.io/replica-anti-affinity=vol-1,openebs.io/version=1.0
//! ```
//!
//! The empty selector matches every label set. Keys and values must not
//! contain `,` or `=`, otherwise the written form is ambiguous; see
//! [`LabelSelector::validate`].

use std::collections::BTreeMap;
use std::fmt;

use crate::error::Error;

const RESERVED: [char; 2] = [',', '='];

/// A single `key=value` requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Label key.
    pub key: String,
    /// Required value.
    pub value: String,
}

/// A conjunction of label equality requirements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSelector {
    requirements: Vec<Requirement>,
}

impl LabelSelector {
    /// Creates a selector matching everything.
    #[must_use]
    pub fn everything() -> Self {
        Self::default()
    }

    /// Creates a selector with a single equality requirement.
    #[must_use]
    pub fn equality(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::default().and(key, value)
    }

    /// Adds an equality requirement.
    #[must_use]
    pub fn and(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.requirements.push(Requirement { key: key.into(), value: value.into() });
        self
    }

    /// Returns the requirements of this selector.
    #[must_use]
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    /// Returns true if the selector has no requirements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    /// Checks that every requirement can be written unambiguously.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSelector`] if a key is empty or a key or value
    /// contains `,` or `=`.
    pub fn validate(&self) -> Result<(), Error> {
        for r in &self.requirements {
            if r.key.is_empty() {
                return Err(Error::InvalidSelector(format!("empty key in '{self}'")));
            }
            if r.key.contains(RESERVED) || r.value.contains(RESERVED) {
                return Err(Error::InvalidSelector(format!(
                    "'{}={}' contains a reserved character (',' or '=')",
                    r.key, r.value
                )));
            }
        }
        Ok(())
    }

    /// Returns true if every requirement is satisfied by `labels`.
    #[must_use]
    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        self.requirements
            .iter()
            .all(|r| labels.get(&r.key).is_some_and(|v| *v == r.value))
    }
}

impl fmt::Display for LabelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, r) in self.requirements.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}={}", r.key, r.value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn test_everything_matches_all() {
        let selector = LabelSelector::everything();
        assert!(selector.matches(&labels(&[])));
        assert!(selector.matches(&labels(&[("a", "b")])));
        assert_eq!(selector.to_string(), "");
    }

    #[test]
    fn test_conjunction() {
        let selector = LabelSelector::equality("scope", "vol-1").and("tier", "ssd");

        assert!(selector.matches(&labels(&[("scope", "vol-1"), ("tier", "ssd"), ("x", "y")])));
        assert!(!selector.matches(&labels(&[("scope", "vol-1")])));
        assert!(!selector.matches(&labels(&[("scope", "vol-2"), ("tier", "ssd")])));
    }

    #[test]
    fn test_display() {
        let selector = LabelSelector::equality("scope", "vol-1").and("tier", "ssd");
        assert_eq!(selector.to_string(), "scope=vol-1,tier=ssd");
        assert!(selector.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_reserved_characters() {
        for (key, value) in [("scope", "a,b"), ("scope", "a=b"), ("a=b", "c"), ("a,b", "c")] {
            let selector = LabelSelector::equality(key, value);
            assert!(
                matches!(selector.validate(), Err(Error::InvalidSelector(_))),
                "{key}={value}"
            );
        }
    }

    #[test]
    fn test_validate_rejects_empty_key() {
        let selector = LabelSelector::equality("scope", "vol-1").and("", "x");
        assert!(matches!(selector.validate(), Err(Error::InvalidSelector(_))));
    }

    #[test]
    fn test_empty_value_is_valid() {
        assert!(LabelSelector::equality("scope", "").validate().is_ok());
        assert!(LabelSelector::everything().validate().is_ok());
    }
}
