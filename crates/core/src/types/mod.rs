//! Core types for LitArt Gallery.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod email;
pub mod id;
pub mod password;
pub mod price;

pub use category::{ArtworkCategory, CategoryError};
pub use email::{Email, EmailError};
pub use id::*;
pub use password::PasswordStrength;
pub use price::{Price, PriceError};
