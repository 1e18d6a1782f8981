//! Artwork rows from the `artworks` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use litart_core::{ArtworkCategory, ArtworkId, Price, UserId};

/// A stored artwork. Created by the upload flow, read by the gallery;
/// never updated or deleted by this application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artwork {
    /// Generated by the backend on insert.
    pub id: ArtworkId,
    pub title: String,
    /// Denormalized artist display name. Nullable for rows inserted before
    /// the upload flow started populating it.
    #[serde(default)]
    pub artist: Option<String>,
    pub user_id: UserId,
    pub description: String,
    pub category: ArtworkCategory,
    pub price: Price,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

impl Artwork {
    /// Artist name for display and sorting.
    #[must_use]
    pub fn artist_name(&self) -> &str {
        self.artist.as_deref().unwrap_or("Unknown artist")
    }
}

/// Insert payload for one artwork row.
#[derive(Debug, Clone, Serialize)]
pub struct NewArtwork {
    pub title: String,
    pub artist: String,
    pub user_id: UserId,
    pub description: String,
    pub category: ArtworkCategory,
    pub price: Price,
    pub image_url: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_row() {
        let raw = r#"{
            "id": "7f0a1a33-57a1-4b31-a2be-2f18b1f86c25",
            "title": "Dusk",
            "artist": "Mina",
            "user_id": "4f2f1f60-9318-4b1e-a6b6-80e0e7a0a4f7",
            "description": "Oil on canvas",
            "category": "painting",
            "price": "120.00",
            "image_url": "https://cdn.example/dusk.png",
            "created_at": "2026-08-01T10:00:00+00:00"
        }"#;

        let artwork: Artwork = serde_json::from_str(raw).unwrap();
        assert_eq!(artwork.artist_name(), "Mina");
        assert_eq!(artwork.category, ArtworkCategory::Painting);
        assert_eq!(artwork.price.to_cents(), 12_000);
    }

    #[test]
    fn test_missing_artist_falls_back() {
        let raw = r#"{
            "id": "7f0a1a33-57a1-4b31-a2be-2f18b1f86c25",
            "title": "Dusk",
            "artist": null,
            "user_id": "4f2f1f60-9318-4b1e-a6b6-80e0e7a0a4f7",
            "description": "Oil on canvas",
            "category": "digital",
            "price": "15",
            "image_url": "https://cdn.example/dusk.png",
            "created_at": "2026-08-01T10:00:00+00:00"
        }"#;

        let artwork: Artwork = serde_json::from_str(raw).unwrap();
        assert_eq!(artwork.artist_name(), "Unknown artist");
    }
}
