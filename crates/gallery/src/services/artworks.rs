//! Artwork publishing and gallery browsing.
//!
//! Publishing is the second two-phase operation in the application:
//! upload the image, then insert the row. A failure between the phases
//! orphans the stored image; there is no compensation.
//!
//! Browsing is a single ordered fetch plus in-process filtering and
//! sorting - no pagination, no server-side query composition.

use std::str::FromStr;

use tracing::instrument;

use litart_core::{ArtworkCategory, Price};

use crate::backend::{BackendClient, BackendError, Identity, TableQuery};
use crate::error::AppError;
use crate::models::{Artwork, NewArtwork};
use crate::services::images::{ImageUpload, artwork_object_name};
use crate::services::profiles;

/// Bucket holding artwork images.
pub const ARTWORK_IMAGES_BUCKET: &str = "artwork-images";

/// Validated upload form fields.
#[derive(Debug, Clone)]
pub struct ArtworkSubmission {
    pub title: String,
    pub description: String,
    pub category: ArtworkCategory,
    pub price: Price,
}

/// Fetch all artworks, newest first.
///
/// # Errors
///
/// Returns an error if the fetch fails.
pub async fn list_artworks(backend: &BackendClient) -> Result<Vec<Artwork>, BackendError> {
    backend
        .select_rows("artworks", &TableQuery::new().order_desc("created_at"))
        .await
}

/// Publish an artwork for the signed-in identity.
///
/// Uploads the image under a randomized name, resolves its public URL,
/// then inserts one row referencing the identity. The artist display name
/// comes from the uploader's profile, falling back to the email local
/// part. A failure after the upload but before the insert leaves an
/// unreferenced stored image.
///
/// # Errors
///
/// Validation errors are returned before any network call; upload and
/// insert failures map to [`AppError::Storage`] and [`AppError::Backend`].
#[instrument(skip(backend, submission, image), fields(user_id = %identity.id, title = %submission.title))]
pub async fn publish_artwork(
    backend: &BackendClient,
    identity: &Identity,
    submission: ArtworkSubmission,
    image: ImageUpload,
) -> Result<Artwork, AppError> {
    image.validate()?;

    let artist = match profiles::fetch_profile(backend, identity.id).await {
        Ok(profile) => profile.name,
        Err(err) => {
            tracing::warn!("falling back to email local part for artist name: {err}");
            identity.email.local_part().to_string()
        }
    };

    let object_name = artwork_object_name(&image);
    backend
        .upload_object(
            ARTWORK_IMAGES_BUCKET,
            &object_name,
            &image.content_type,
            image.bytes,
        )
        .await?;

    let image_url = backend.get_public_url(ARTWORK_IMAGES_BUCKET, &object_name);

    let row = NewArtwork {
        title: submission.title,
        artist,
        user_id: identity.id,
        description: submission.description,
        category: submission.category,
        price: submission.price,
        image_url,
    };

    let artwork: Artwork = backend.insert_row("artworks", &row).await?;
    tracing::info!(artwork_id = %artwork.id, "artwork published");
    Ok(artwork)
}

// =============================================================================
// Gallery filtering and sorting (in-process, pure)
// =============================================================================

/// Gallery category filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Pass everything through unchanged.
    #[default]
    All,
    /// Keep one category.
    Only(ArtworkCategory),
}

impl FromStr for CategoryFilter {
    type Err = litart_core::CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(Self::All);
        }
        Ok(Self::Only(s.parse()?))
    }
}

/// Gallery sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GallerySort {
    /// The fetched order (creation time descending).
    #[default]
    Newest,
    TitleAsc,
    TitleDesc,
    Artist,
}

impl GallerySort {
    /// The form value for this sort.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::TitleAsc => "title-asc",
            Self::TitleDesc => "title-desc",
            Self::Artist => "artist",
        }
    }
}

impl FromStr for GallerySort {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "title-asc" => Ok(Self::TitleAsc),
            "title-desc" => Ok(Self::TitleDesc),
            "artist" => Ok(Self::Artist),
            _ => Err(()),
        }
    }
}

/// Filter artworks by category.
///
/// [`CategoryFilter::All`] returns the input set unchanged, in its
/// original order - filtering never mutates the fetched set.
#[must_use]
pub fn filter_artworks(artworks: &[Artwork], filter: CategoryFilter) -> Vec<Artwork> {
    match filter {
        CategoryFilter::All => artworks.to_vec(),
        CategoryFilter::Only(category) => artworks
            .iter()
            .filter(|artwork| artwork.category == category)
            .cloned()
            .collect(),
    }
}

/// Sort artworks for display.
///
/// [`GallerySort::Newest`] keeps the fetched order. Title and artist sorts
/// are stable and consistent with lexicographic string comparison.
#[must_use]
pub fn sort_artworks(mut artworks: Vec<Artwork>, sort: GallerySort) -> Vec<Artwork> {
    match sort {
        GallerySort::Newest => {}
        GallerySort::TitleAsc => artworks.sort_by(|a, b| a.title.cmp(&b.title)),
        GallerySort::TitleDesc => artworks.sort_by(|a, b| b.title.cmp(&a.title)),
        GallerySort::Artist => {
            artworks.sort_by(|a, b| a.artist_name().cmp(b.artist_name()));
        }
    }
    artworks
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use litart_core::{ArtworkId, UserId};

    use super::*;

    fn artwork(title: &str, artist: &str, category: ArtworkCategory) -> Artwork {
        Artwork {
            id: ArtworkId::random(),
            title: title.to_string(),
            artist: Some(artist.to_string()),
            user_id: UserId::random(),
            description: String::new(),
            category,
            price: Price::parse("10").unwrap(),
            image_url: "https://cdn.example/x.png".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 8, 1, 10, 0, 0).unwrap(),
        }
    }

    fn sample() -> Vec<Artwork> {
        vec![
            artwork("Cedar", "Noor", ArtworkCategory::Painting),
            artwork("Aster", "Mina", ArtworkCategory::Digital),
            artwork("Basalt", "Orin", ArtworkCategory::Painting),
        ]
    }

    #[test]
    fn test_filter_all_returns_original_set_unmutated() {
        let fetched = sample();
        let narrowed = filter_artworks(&fetched, CategoryFilter::Only(ArtworkCategory::Painting));
        assert_eq!(narrowed.len(), 2);

        // Filtering by "all" afterwards yields the fetched set in its
        // original order
        let all = filter_artworks(&fetched, CategoryFilter::All);
        let titles: Vec<&str> = all.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Cedar", "Aster", "Basalt"]);
    }

    #[test]
    fn test_filter_by_category() {
        let fetched = sample();
        let digital = filter_artworks(&fetched, CategoryFilter::Only(ArtworkCategory::Digital));
        assert_eq!(digital.len(), 1);
        assert_eq!(digital.first().unwrap().title, "Aster");
    }

    #[test]
    fn test_title_sort_is_total_and_reversible() {
        let asc = sort_artworks(sample(), GallerySort::TitleAsc);
        let asc_titles: Vec<&str> = asc.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(asc_titles, vec!["Aster", "Basalt", "Cedar"]);

        let desc = sort_artworks(sample(), GallerySort::TitleDesc);
        let desc_titles: Vec<&str> = desc.iter().map(|a| a.title.as_str()).collect();
        let mut reversed = asc_titles.clone();
        reversed.reverse();
        assert_eq!(desc_titles, reversed);
    }

    #[test]
    fn test_artist_sort() {
        let sorted = sort_artworks(sample(), GallerySort::Artist);
        let artists: Vec<&str> = sorted.iter().map(Artwork::artist_name).collect();
        assert_eq!(artists, vec!["Mina", "Noor", "Orin"]);
    }

    #[test]
    fn test_newest_keeps_fetched_order() {
        let sorted = sort_artworks(sample(), GallerySort::Newest);
        let titles: Vec<&str> = sorted.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Cedar", "Aster", "Basalt"]);
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "sculpture".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(ArtworkCategory::Sculpture)
        );
        assert!("everything".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn test_sort_parse() {
        assert_eq!("newest".parse::<GallerySort>().unwrap(), GallerySort::Newest);
        assert_eq!(
            "title-desc".parse::<GallerySort>().unwrap(),
            GallerySort::TitleDesc
        );
        assert!("price".parse::<GallerySort>().is_err());
    }
}
