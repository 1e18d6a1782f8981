//! Gallery route handler.
//!
//! One ordered fetch, then in-process filtering and sorting. No
//! pagination.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use crate::filters;
use crate::models::Artwork;
use crate::services::artworks::{
    self, CategoryFilter, GallerySort, filter_artworks, sort_artworks,
};
use crate::state::AppState;

/// Gallery query parameters.
#[derive(Debug, Deserialize)]
pub struct GalleryQuery {
    pub category: Option<String>,
    pub sort: Option<String>,
}

/// Artwork display data for templates.
#[derive(Clone)]
pub struct ArtworkView {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub image_url: String,
    pub price: String,
    pub category: String,
}

impl From<&Artwork> for ArtworkView {
    fn from(artwork: &Artwork) -> Self {
        Self {
            id: artwork.id.to_string(),
            title: artwork.title.clone(),
            artist: artwork.artist_name().to_string(),
            image_url: artwork.image_url.clone(),
            price: artwork.price.to_string(),
            category: artwork.category.label().to_string(),
        }
    }
}

/// Gallery page template.
#[derive(Template, WebTemplate)]
#[template(path = "gallery.html")]
pub struct GalleryTemplate {
    pub artworks: Vec<ArtworkView>,
    pub selected_category: String,
    pub selected_sort: String,
    pub error: Option<String>,
}

/// Display the gallery grid.
///
/// Unknown `category`/`sort` values silently fall back to the defaults,
/// as submitting the filter form can only produce known values.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<GalleryQuery>,
) -> impl IntoResponse {
    let category: CategoryFilter = query
        .category
        .as_deref()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default();
    let sort: GallerySort = query
        .sort
        .as_deref()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default();

    let (artworks, error) = match artworks::list_artworks(state.backend()).await {
        Ok(fetched) => {
            let shown = sort_artworks(filter_artworks(&fetched, category), sort);
            (shown.iter().map(ArtworkView::from).collect(), None)
        }
        Err(err) => {
            tracing::error!("error fetching artworks: {err}");
            (Vec::new(), Some("Failed to load the gallery.".to_string()))
        }
    };

    GalleryTemplate {
        artworks,
        selected_category: match category {
            CategoryFilter::All => "all".to_string(),
            CategoryFilter::Only(c) => c.as_str().to_string(),
        },
        selected_sort: sort.as_str().to_string(),
        error,
    }
}
