//! Profile route handlers.
//!
//! These routes require authentication. Edits are buffered in the form
//! and committed on explicit submit; avatar replacement is the documented
//! two-phase upload-then-update.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Multipart, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, ValidationError};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::ProfileChanges;
use crate::routes::{MessageQuery, redirect_with_error, redirect_with_success};
use crate::services::images::ImageUpload;
use crate::services::profiles;
use crate::state::AppState;

/// Avatar shown before the user has uploaded one.
const PLACEHOLDER_AVATAR: &str = "https://via.placeholder.com/150";

/// Profile edit form data.
#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    pub name: String,
    #[serde(default)]
    pub bio: String,
}

/// Profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "profile/show.html")]
pub struct ProfileTemplate {
    pub name: String,
    pub email: String,
    pub bio: String,
    pub avatar_url: String,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Display the profile page.
///
/// A missing row is a fetch error, not "no profile yet" - registration
/// upserts the row before the user can ever land here.
#[instrument(skip(state, query), fields(user_id = %identity.id))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    match profiles::fetch_profile(state.backend(), identity.id).await {
        Ok(profile) => ProfileTemplate {
            name: profile.name.clone(),
            email: profile.email.clone(),
            bio: profile.bio_text().to_string(),
            avatar_url: profile
                .avatar_url
                .unwrap_or_else(|| PLACEHOLDER_AVATAR.to_string()),
            error: query.error,
            success: query.success,
        },
        Err(err) => {
            tracing::error!("error fetching profile: {err}");
            ProfileTemplate {
                name: String::new(),
                email: identity.email.to_string(),
                bio: String::new(),
                avatar_url: PLACEHOLDER_AVATAR.to_string(),
                error: Some("Failed to fetch profile".to_string()),
                success: None,
            }
        }
    }
}

/// Commit buffered profile edits.
#[instrument(skip(state, form), fields(user_id = %identity.id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
    Form(form): Form<ProfileForm>,
) -> Response {
    let changes = ProfileChanges {
        name: form.name,
        bio: form.bio,
    };

    match profiles::update_profile(state.backend(), identity.id, &changes).await {
        Ok(()) => {
            redirect_with_success("/profile", "Profile updated successfully").into_response()
        }
        Err(err) => {
            tracing::error!("error updating profile: {err}");
            redirect_with_error("/profile", &AppError::from(err).user_message()).into_response()
        }
    }
}

/// Replace the avatar.
///
/// Validation happens before any network call; afterwards the upload and
/// the row update are two independent phases with no rollback.
#[instrument(skip(state, multipart), fields(user_id = %identity.id))]
pub async fn replace_avatar(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
    mut multipart: Multipart,
) -> Response {
    let outcome = async {
        let mut upload: Option<ImageUpload> = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            if field.name() == Some("avatar") {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;

                if !filename.is_empty() && !bytes.is_empty() {
                    upload = Some(ImageUpload {
                        filename,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
        }

        let upload = upload.ok_or(ValidationError::MissingImage)?;
        profiles::replace_avatar(state.backend(), &identity, upload).await
    }
    .await;

    match outcome {
        Ok(_avatar_url) => {
            redirect_with_success("/profile", "Profile picture updated successfully")
                .into_response()
        }
        Err(err) => {
            tracing::warn!("avatar replacement failed: {err}");
            redirect_with_error("/profile", &err.user_message()).into_response()
        }
    }
}
