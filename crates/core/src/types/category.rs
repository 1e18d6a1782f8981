//! Artwork category enumeration.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown category string.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown artwork category: {0}")]
pub struct CategoryError(pub String);

/// The fixed set of artwork categories.
///
/// Restricted client-side; the backend stores the lowercase string and does
/// not enforce the enumeration itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtworkCategory {
    Painting,
    Digital,
    Sculpture,
    Photography,
}

impl ArtworkCategory {
    /// All categories, in display order.
    pub const ALL: [Self; 4] = [
        Self::Painting,
        Self::Digital,
        Self::Sculpture,
        Self::Photography,
    ];

    /// The lowercase wire/form value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Painting => "painting",
            Self::Digital => "digital",
            Self::Sculpture => "sculpture",
            Self::Photography => "photography",
        }
    }

    /// Human-readable label for option lists.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Painting => "Painting",
            Self::Digital => "Digital Art",
            Self::Sculpture => "Sculpture",
            Self::Photography => "Photography",
        }
    }
}

impl fmt::Display for ArtworkCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ArtworkCategory {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "painting" => Ok(Self::Painting),
            "digital" => Ok(Self::Digital),
            "sculpture" => Ok(Self::Sculpture),
            "photography" => Ok(Self::Photography),
            other => Err(CategoryError(other.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_str_roundtrip() {
        for category in ArtworkCategory::ALL {
            let parsed: ArtworkCategory = category.as_str().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert!("watercolor".parse::<ArtworkCategory>().is_err());
        assert!("Painting".parse::<ArtworkCategory>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&ArtworkCategory::Digital).unwrap();
        assert_eq!(json, "\"digital\"");

        let parsed: ArtworkCategory = serde_json::from_str("\"photography\"").unwrap();
        assert_eq!(parsed, ArtworkCategory::Photography);
    }
}
