//! Image upload validation and naming.
//!
//! Validation runs before any network call: an oversized or wrongly-typed
//! file is rejected without touching the backend. Object names are
//! randomized (UUID) so uploads never collide; avatar names are
//! additionally scoped by the owning identity id.

use std::path::Path;

use litart_core::UserId;
use uuid::Uuid;

use crate::error::ValidationError;

/// Object size ceiling (5 MiB), matching the bucket configuration.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Accepted image MIME types.
pub const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/gif"];

/// An image file received from a form, held entirely in memory.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Validate size and MIME type.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::FileTooLarge`] over 5 MiB and
    /// [`ValidationError::UnsupportedImageType`] for anything but
    /// JPEG/PNG/GIF.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.bytes.len() > MAX_IMAGE_BYTES {
            return Err(ValidationError::FileTooLarge);
        }

        if !ALLOWED_IMAGE_TYPES.contains(&self.content_type.as_str()) {
            return Err(ValidationError::UnsupportedImageType);
        }

        Ok(())
    }

    /// File extension of the original name, lowercased; `bin` if absent.
    #[must_use]
    pub fn extension(&self) -> String {
        Path::new(&self.filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or_else(|| "bin".to_string(), str::to_lowercase)
    }
}

/// Randomized object name for an artwork image.
#[must_use]
pub fn artwork_object_name(upload: &ImageUpload) -> String {
    format!("{}.{}", Uuid::new_v4(), upload.extension())
}

/// Randomized object name for an avatar, scoped by the owning identity.
#[must_use]
pub fn avatar_object_name(owner: UserId, upload: &ImageUpload) -> String {
    format!("{owner}-{}.{}", Uuid::new_v4(), upload.extension())
}
