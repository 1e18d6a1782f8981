//! Integration tests for LitArt Gallery.
//!
//! The tests live in `tests/` and run against a live gallery server plus
//! its configured backend; they are `#[ignore]`d so `cargo test` stays
//! hermetic. Run them with:
//!
//! ```bash
//! cargo test -p litart-integration-tests -- --ignored
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
