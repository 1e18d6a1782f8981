//! LitArt Core - Shared types library.
//!
//! This crate provides common types used across all LitArt Gallery components:
//! - `gallery` - Public-facing web application
//! - `cli` - Command-line tools for storage bootstrap and health checks
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Everything
//! that talks to the external backend lives in the `gallery` crate.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails,
//!   categories, and the password strength classifier

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
