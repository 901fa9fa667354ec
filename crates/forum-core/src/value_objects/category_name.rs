//! Normalized category name
//!
//! Category names compare case-insensitively with surrounding whitespace
//! ignored. Every name that reaches storage or a membership check goes through
//! [`CategoryName::parse`], so stored names and filter input always agree.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Trimmed, lowercased, non-empty category name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryName(String);

impl CategoryName {
    /// Normalize raw input; `None` when nothing is left after trimming
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = Self::normalize(raw);
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    /// The normalization rule itself: trim, then lowercase
    pub fn normalize(raw: &str) -> String {
        raw.trim().to_lowercase()
    }

    /// Normalize a list of names, dropping empties and duplicates.
    ///
    /// First occurrence wins, so the output keeps input order.
    pub fn parse_many<'a, I>(raw: I) -> Vec<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut names: Vec<Self> = Vec::new();
        for name in raw.into_iter().filter_map(Self::parse) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether an arbitrary (possibly un-normalized) name refers to this category
    pub fn matches(&self, raw: &str) -> bool {
        Self::normalize(raw) == self.0
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CategoryName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| "category name must not be empty".to_string())
    }
}

impl From<CategoryName> for String {
    fn from(name: CategoryName) -> Self {
        name.0
    }
}
