//! Business logic services for the gallery.
//!
//! # Services
//!
//! - `images` - pre-network validation and naming for image uploads
//! - `profiles` - profile fetch/upsert/update and avatar replacement
//! - `artworks` - artwork publishing and in-process gallery filter/sort
//! - `payments` - card tokenization against the payment gateway
//! - `checkout` - order submission to the external order endpoint

pub mod artworks;
pub mod checkout;
pub mod images;
pub mod payments;
pub mod profiles;
