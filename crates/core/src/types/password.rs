//! Password strength classification.
//!
//! Registration refuses anything weaker than [`PasswordStrength::Strong`]
//! before a single byte reaches the backend. The classifier is purely
//! lexical:
//!
//! - `Strong`: at least 8 characters with a lowercase letter, an uppercase
//!   letter, a digit, and one of `!@#$%^&*`.
//! - `Medium`: at least 6 characters with two of {lowercase, uppercase,
//!   digit}.
//! - `Weak`: everything else.

use serde::{Deserialize, Serialize};

/// Characters counted as the special class for [`PasswordStrength::Strong`].
const SPECIAL_CHARS: &str = "!@#$%^&*";

/// Classification of a candidate password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

impl PasswordStrength {
    /// Classify a candidate password.
    #[must_use]
    pub fn classify(password: &str) -> Self {
        let length = password.chars().count();
        let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        let has_special = password.chars().any(|c| SPECIAL_CHARS.contains(c));

        if length >= 8 && has_lower && has_upper && has_digit && has_special {
            return Self::Strong;
        }

        let class_pairs = usize::from(has_lower) + usize::from(has_upper) + usize::from(has_digit);
        if length >= 6 && class_pairs >= 2 {
            return Self::Medium;
        }

        Self::Weak
    }

    /// The lowercase label rendered next to the strength meter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Medium => "medium",
            Self::Strong => "strong",
        }
    }

    /// Whether this strength is acceptable for registration.
    #[must_use]
    pub const fn is_strong(&self) -> bool {
        matches!(self, Self::Strong)
    }
}
