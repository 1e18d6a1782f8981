//! Profile operations: fetch, upsert after sign-up, edit, avatar replace.

use thiserror::Error;
use tracing::instrument;

use litart_core::UserId;

use crate::backend::{BackendClient, BackendError, Identity, TableQuery};
use crate::bootstrap::AVATARS_BUCKET;
use crate::error::AppError;
use crate::models::{NewProfile, Profile, ProfileChanges};
use crate::services::images::{ImageUpload, avatar_object_name};

/// Errors that can occur writing profile rows.
#[derive(Debug, Error)]
pub enum ProfileWriteError {
    /// Row-level security rejected the write; the session is stale or the
    /// row belongs to someone else. Users are told to log in again.
    #[error("permission denied")]
    PermissionDenied,

    /// Underlying backend failure.
    #[error("backend error: {0}")]
    Backend(BackendError),
}

impl From<BackendError> for ProfileWriteError {
    fn from(err: BackendError) -> Self {
        if err.is_permission_denied() {
            Self::PermissionDenied
        } else {
            Self::Backend(err)
        }
    }
}

/// Fetch the profile row for an identity.
///
/// A missing row is surfaced as an error ([`BackendError::NotFound`]), not
/// treated as "no profile yet" - registration always upserts one.
///
/// # Errors
///
/// Returns an error if the fetch fails or no row matches.
pub async fn fetch_profile(
    backend: &BackendClient,
    user_id: UserId,
) -> Result<Profile, BackendError> {
    backend
        .select_single("profiles", &TableQuery::new().eq("id", user_id))
        .await
}

/// Create (or overwrite) the profile row right after sign-up.
///
/// Upsert keyed by the identity id keeps the one-to-one invariant: the
/// row id always equals the owning identity's id.
///
/// # Errors
///
/// Returns [`ProfileWriteError::PermissionDenied`] on an RLS denial.
#[instrument(skip(backend, name, bio), fields(user_id = %identity.id))]
pub async fn create_profile(
    backend: &BackendClient,
    identity: &Identity,
    name: String,
    bio: String,
) -> Result<Profile, ProfileWriteError> {
    let row = NewProfile {
        id: identity.id,
        name,
        email: identity.email.to_string(),
        bio,
    };

    Ok(backend.upsert_row("profiles", &row).await?)
}

/// Commit buffered profile edits (name, bio) by identity id.
///
/// # Errors
///
/// Returns [`ProfileWriteError::PermissionDenied`] on an RLS denial.
#[instrument(skip(backend, changes), fields(user_id = %user_id))]
pub async fn update_profile(
    backend: &BackendClient,
    user_id: UserId,
    changes: &ProfileChanges,
) -> Result<(), ProfileWriteError> {
    backend
        .update_rows("profiles", &TableQuery::new().eq("id", user_id), changes)
        .await?;
    Ok(())
}

/// Replace the avatar: validate, upload, resolve the public URL, update the
/// profile row. Returns the new avatar URL.
///
/// Two-phase, not atomic: when the storage upload succeeds but the row
/// update fails, the uploaded object is orphaned and stays in the bucket.
/// There is no rollback.
///
/// # Errors
///
/// Validation errors are returned before any network call; upload and row
/// update failures map to [`AppError::Storage`] and
/// [`AppError::ProfileWrite`] respectively.
#[instrument(skip(backend, upload), fields(user_id = %identity.id))]
pub async fn replace_avatar(
    backend: &BackendClient,
    identity: &Identity,
    upload: ImageUpload,
) -> Result<String, AppError> {
    upload.validate()?;

    let object_name = avatar_object_name(identity.id, &upload);
    backend
        .upload_object(
            AVATARS_BUCKET,
            &object_name,
            &upload.content_type,
            upload.bytes,
        )
        .await?;

    let avatar_url = backend.get_public_url(AVATARS_BUCKET, &object_name);

    backend
        .update_rows(
            "profiles",
            &TableQuery::new().eq("id", identity.id),
            &serde_json::json!({ "avatar_url": avatar_url }),
        )
        .await
        .map_err(ProfileWriteError::from)?;

    Ok(avatar_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_denied_mapping() {
        let denied = BackendError::Api {
            status: 403,
            code: Some("42501".to_string()),
            message: "permission denied for table profiles".to_string(),
        };
        assert!(matches!(
            ProfileWriteError::from(denied),
            ProfileWriteError::PermissionDenied
        ));

        let other = BackendError::NotFound("profiles".to_string());
        assert!(matches!(
            ProfileWriteError::from(other),
            ProfileWriteError::Backend(_)
        ));
    }
}
