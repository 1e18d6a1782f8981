//! Profile rows from the `profiles` table.

use serde::{Deserialize, Serialize};

use litart_core::UserId;

/// A user profile. One-to-one with the backend identity: the row id always
/// equals the owning identity's id (enforced by upsert semantics).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl Profile {
    /// Bio text for display.
    #[must_use]
    pub fn bio_text(&self) -> &str {
        self.bio.as_deref().unwrap_or("")
    }
}

/// Upsert payload written right after sign-up, keyed by identity id.
#[derive(Debug, Clone, Serialize)]
pub struct NewProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub bio: String,
}

/// Update payload committed by the profile editor on explicit submit.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileChanges {
    pub name: String,
    pub bio: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_row_with_nulls() {
        let raw = r#"{
            "id": "4f2f1f60-9318-4b1e-a6b6-80e0e7a0a4f7",
            "name": "Mina",
            "email": "mina@example.com",
            "bio": null,
            "avatar_url": null
        }"#;

        let profile: Profile = serde_json::from_str(raw).unwrap();
        assert_eq!(profile.bio_text(), "");
        assert!(profile.avatar_url.is_none());
    }
}
