// SPDX-License-Identifier: MIT OR Apache-2.0

//! Slug newtype and normalization.
//!
//! A `Slug` is the canonical identifier of a project record. It doubles as the
//! name of the record's storage container, so every slug that exists has been
//! through [`Slug::parse`]: trimmed, lower-cased and restricted to `[a-z0-9-]`.

use crate::domain::errors::InvalidSlug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A normalized, storage-safe project identifier.
///
/// # Examples
///
/// ```
/// use sale_factory::domain::Slug;
///
/// let slug = Slug::parse("  Atlas-Chain ").unwrap();
/// assert_eq!(slug.as_str(), "atlas-chain");
///
/// assert!(Slug::parse("../etc").is_err());
/// assert!(Slug::parse("My Project!").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Normalizes `raw` into a slug.
    ///
    /// The rules are applied in order: trim and lower-case, reject empty,
    /// reject `..`, reject `/` and `\`, reject anything outside `[a-z0-9-]`.
    pub fn parse(raw: &str) -> Result<Self, InvalidSlug> {
        let normalized = raw.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(InvalidSlug::Empty);
        }
        if normalized.contains("..") {
            return Err(InvalidSlug::Traversal);
        }
        if normalized.contains(|c: char| c == '/' || c == '\\') {
            return Err(InvalidSlug::PathSeparator);
        }
        if !normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(InvalidSlug::DisallowedCharacters);
        }

        Ok(Slug(normalized))
    }

    /// Normalizes an untyped value, rejecting anything that is not a string.
    ///
    /// # Examples
    ///
    /// ```
    /// use sale_factory::domain::Slug;
    /// use sale_factory::domain::errors::InvalidSlug;
    /// use serde_json::json;
    ///
    /// assert_eq!(Slug::from_value(&json!(42)), Err(InvalidSlug::NotAString));
    /// assert!(Slug::from_value(&json!("seed-round")).is_ok());
    /// ```
    pub fn from_value(raw: &Value) -> Result<Self, InvalidSlug> {
        match raw {
            Value::String(s) => Self::parse(s),
            _ => Err(InvalidSlug::NotAString),
        }
    }

    /// Returns the slug as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the slug into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Slug {
    type Error = InvalidSlug;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl TryFrom<&str> for Slug {
    type Error = InvalidSlug;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_slug_lowercases_and_trims() {
        let slug = Slug::parse("  ATLAS-chain-2 \n").unwrap();
        assert_eq!(slug.as_str(), "atlas-chain-2");
    }

    #[test]
    fn test_slug_rejects_empty() {
        assert_eq!(Slug::parse(""), Err(InvalidSlug::Empty));
        assert_eq!(Slug::parse("   "), Err(InvalidSlug::Empty));
    }

    #[test]
    fn test_slug_rejects_traversal() {
        assert_eq!(Slug::parse(".."), Err(InvalidSlug::Traversal));
        assert_eq!(Slug::parse("a..b"), Err(InvalidSlug::Traversal));
    }

    #[test]
    fn test_traversal_checked_before_separator() {
        assert_eq!(Slug::parse("../etc"), Err(InvalidSlug::Traversal));
    }

    #[test]
    fn test_slug_rejects_separators() {
        assert_eq!(Slug::parse("a/b"), Err(InvalidSlug::PathSeparator));
        assert_eq!(Slug::parse("a\\b"), Err(InvalidSlug::PathSeparator));
    }

    #[test]
    fn test_slug_rejects_disallowed_characters() {
        assert_eq!(
            Slug::parse("My Project!"),
            Err(InvalidSlug::DisallowedCharacters)
        );
        assert_eq!(
            Slug::parse("under_score"),
            Err(InvalidSlug::DisallowedCharacters)
        );
        assert_eq!(Slug::parse("café"), Err(InvalidSlug::DisallowedCharacters));
        assert_eq!(Slug::parse("a.b"), Err(InvalidSlug::DisallowedCharacters));
    }

    #[test]
    fn test_slug_from_non_string_value() {
        assert_eq!(Slug::from_value(&json!(null)), Err(InvalidSlug::NotAString));
        assert_eq!(
            Slug::from_value(&json!(["atlas"])),
            Err(InvalidSlug::NotAString)
        );
    }

    #[test]
    fn test_slug_serde_round_trip_normalizes() {
        let slug: Slug = serde_json::from_value(json!("Atlas-Chain")).unwrap();
        assert_eq!(slug.as_str(), "atlas-chain");
        assert_eq!(serde_json::to_value(&slug).unwrap(), json!("atlas-chain"));
    }

    #[test]
    fn test_slug_deserialize_rejects_invalid() {
        let result: std::result::Result<Slug, _> = serde_json::from_value(json!("../x"));
        assert!(result.is_err());
    }

    #[test]
    fn test_slug_display() {
        let slug = Slug::parse("atlas").unwrap();
        assert_eq!(format!("{}", slug), "atlas");
        let inner: String = slug.into();
        assert_eq!(inner, "atlas");
    }
}
