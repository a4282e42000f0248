//! Revision value object

use std::fmt;

/// Revision used for the newer side of a range when none is given
pub const DEFAULT_PRESENT_REVISION: &str = "HEAD";

/// A non-empty, trimmed revision identifier (hash, branch, tag or alias)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Revision(String);

impl Revision {
    /// Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Prefer `input` when non-blank, otherwise fall back.
    pub fn or_fallback(input: Option<&str>, fallback: Option<&str>) -> Option<Self> {
        input
            .and_then(Self::parse)
            .or_else(|| fallback.and_then(Self::parse))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Revision {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
