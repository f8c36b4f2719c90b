//! Category identifier with the synthetic "All" sentinel.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies a category, or the synthetic "All" pseudo-category.
///
/// Every comparison between category ids in the crate goes through this type,
/// so ids arriving as numbers, numeric strings, or the `"all"` keyword all
/// compare the same way.
///
/// `All` exists only on the client. It never appears in request bodies: the
/// wire types carry [`CategoryId::real`] values instead.
///
/// # Examples
///
/// ```
/// use notekeeper::domain::CategoryId;
///
/// let id: CategoryId = " 3 ".parse().unwrap();
/// assert_eq!(id, CategoryId::Id(3));
///
/// let all: CategoryId = "ALL".parse().unwrap();
/// assert!(all.is_all());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CategoryId {
    /// The "no filter" pseudo-category.
    #[default]
    All,
    /// A real, server-persisted category.
    Id(u64),
}

impl CategoryId {
    /// Server id of the category notes fall back to.
    pub const FALLBACK_ID: u64 = 1;

    /// The category notes fall back to when none (or `All`) is given.
    pub const FALLBACK: CategoryId = CategoryId::Id(Self::FALLBACK_ID);

    /// Textual form of the sentinel.
    pub const ALL_KEYWORD: &'static str = "all";

    /// Returns true for the `All` sentinel.
    pub fn is_all(self) -> bool {
        matches!(self, CategoryId::All)
    }

    /// Returns the server id, or `None` for the sentinel.
    pub fn real(self) -> Option<u64> {
        match self {
            CategoryId::All => None,
            CategoryId::Id(id) => Some(id),
        }
    }

    /// Replaces the sentinel with `fallback`.
    pub fn or_fallback(self, fallback: CategoryId) -> CategoryId {
        if self.is_all() { fallback } else { self }
    }
}

impl From<u64> for CategoryId {
    fn from(id: u64) -> Self {
        CategoryId::Id(id)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryId::All => f.write_str(Self::ALL_KEYWORD),
            CategoryId::Id(id) => write!(f, "{}", id),
        }
    }
}

/// Error returned when parsing an invalid category id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryIdError {
    value: String,
}

impl ParseCategoryIdError {
    /// Returns the value that failed to parse.
    pub fn invalid_value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ParseCategoryIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid category id '{}': expected a positive integer or 'all'",
            self.value
        )
    }
}

impl std::error::Error for ParseCategoryIdError {}

impl FromStr for CategoryId {
    type Err = ParseCategoryIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(Self::ALL_KEYWORD) {
            return Ok(CategoryId::All);
        }
        match trimmed.parse::<u64>() {
            Ok(id) if id > 0 => Ok(CategoryId::Id(id)),
            _ => Err(ParseCategoryIdError {
                value: s.to_string(),
            }),
        }
    }
}

impl Serialize for CategoryId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            CategoryId::All => serializer.serialize_str(Self::ALL_KEYWORD),
            CategoryId::Id(id) => serializer.serialize_u64(*id),
        }
    }
}

impl<'de> Deserialize<'de> for CategoryId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(0) => Err(serde::de::Error::custom(
                "invalid category id '0': expected a positive integer or 'all'",
            )),
            Raw::Number(id) => Ok(CategoryId::Id(id)),
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_numeric_strings() {
        assert_eq!("7".parse::<CategoryId>().unwrap(), CategoryId::Id(7));
        assert_eq!(" 42\n".parse::<CategoryId>().unwrap(), CategoryId::Id(42));
    }

    #[test]
    fn parses_all_keyword_case_insensitively() {
        assert_eq!("all".parse::<CategoryId>().unwrap(), CategoryId::All);
        assert_eq!("All".parse::<CategoryId>().unwrap(), CategoryId::All);
    }

    #[test]
    fn rejects_zero_and_garbage() {
        assert!("0".parse::<CategoryId>().is_err());
        assert!("-3".parse::<CategoryId>().is_err());
        assert!("work".parse::<CategoryId>().is_err());
        assert!("".parse::<CategoryId>().is_err());
    }

    #[test]
    fn error_keeps_invalid_value() {
        let err = "nope".parse::<CategoryId>().unwrap_err();
        assert_eq!(err.invalid_value(), "nope");
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn deserializes_number_string_and_sentinel() {
        let ids: Vec<CategoryId> = serde_json::from_str(r#"[3, "4", "all"]"#).unwrap();
        assert_eq!(ids, vec![CategoryId::Id(3), CategoryId::Id(4), CategoryId::All]);
    }

    #[test]
    fn deserialize_rejects_zero() {
        assert!(serde_json::from_str::<CategoryId>("0").is_err());
    }

    #[test]
    fn serializes_real_ids_as_numbers() {
        assert_eq!(serde_json::to_string(&CategoryId::Id(9)).unwrap(), "9");
        assert_eq!(serde_json::to_string(&CategoryId::All).unwrap(), "\"all\"");
    }

    #[test]
    fn fallback_replaces_only_the_sentinel() {
        assert_eq!(
            CategoryId::All.or_fallback(CategoryId::FALLBACK),
            CategoryId::Id(1)
        );
        assert_eq!(
            CategoryId::Id(5).or_fallback(CategoryId::FALLBACK),
            CategoryId::Id(5)
        );
    }

    #[test]
    fn real_hides_the_sentinel() {
        assert_eq!(CategoryId::All.real(), None);
        assert_eq!(CategoryId::Id(2).real(), Some(2));
    }
}
