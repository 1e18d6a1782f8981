//! Domain models for the gallery.
//!
//! Rows are owned by the external backend; these are the shapes this
//! application reads and writes. The cart is the one purely local model,
//! living in the per-browser session for the duration of a checkout.

pub mod artwork;
pub mod cart;
pub mod profile;

pub use artwork::{Artwork, NewArtwork};
pub use cart::{CartItem, cart_total, session_keys};
pub use profile::{NewProfile, Profile, ProfileChanges};
