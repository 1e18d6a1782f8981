//! Artwork upload route handlers.
//!
//! Requires an authenticated identity. The form is multipart: text fields
//! plus the image file, held in memory and validated before any backend
//! call.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Query, State},
    response::{IntoResponse, Response},
};
use tracing::instrument;

use litart_core::{ArtworkCategory, Price};

use crate::error::{AppError, ValidationError};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::routes::{MessageQuery, redirect_with_error, redirect_with_success};
use crate::services::artworks::{self, ArtworkSubmission};
use crate::services::images::ImageUpload;
use crate::state::AppState;

/// Upload page template.
#[derive(Template, WebTemplate)]
#[template(path = "upload.html")]
pub struct UploadTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Display the upload form.
pub async fn form(
    RequireAuth(_identity): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    UploadTemplate {
        error: query.error,
        success: query.success,
    }
}

/// Parsed multipart upload form.
struct UploadForm {
    title: String,
    description: String,
    category: Option<ArtworkCategory>,
    price: Option<Price>,
    image: Option<ImageUpload>,
}

/// Drain the multipart stream into an [`UploadForm`].
async fn read_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm {
        title: String::new(),
        description: String::new(),
        category: None,
        price: None,
        image: None,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => {
                form.title = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            "description" => {
                form.description = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            "category" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.category = Some(raw.parse().map_err(ValidationError::from)?);
            }
            "price" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.price = Some(Price::parse(&raw).map_err(ValidationError::from)?);
            }
            "image" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;

                // An empty file input still submits a zero-length part
                if !filename.is_empty() && !bytes.is_empty() {
                    form.image = Some(ImageUpload {
                        filename,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Handle the upload form submission.
#[instrument(skip(state, multipart), fields(user_id = %identity.id))]
pub async fn submit(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
    multipart: Multipart,
) -> Response {
    let outcome = async {
        let form = read_form(multipart).await?;

        let image = form.image.ok_or(ValidationError::MissingImage)?;
        let category = form
            .category
            .ok_or_else(|| AppError::BadRequest("Please select a category.".to_string()))?;
        let price = form
            .price
            .ok_or_else(|| AppError::BadRequest("Please enter a valid price.".to_string()))?;

        let submission = ArtworkSubmission {
            title: form.title,
            description: form.description,
            category,
            price,
        };

        artworks::publish_artwork(state.backend(), &identity, submission, image).await
    }
    .await;

    match outcome {
        Ok(artwork) => {
            tracing::debug!(artwork_id = %artwork.id, "upload succeeded");
            redirect_with_success("/upload", "Artwork uploaded successfully!").into_response()
        }
        Err(err) => {
            tracing::warn!("upload failed: {err}");
            redirect_with_error("/upload", &err.user_message()).into_response()
        }
    }
}
