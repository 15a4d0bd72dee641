//! Core types, store traits, and the recurring-issue analytics engine.
//!
//! Everything here is pure domain logic: no HTTP, no database. Storage
//! backends implement the traits in [`store`]; the API layer calls the
//! operations in [`engine`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod engine;
pub mod error;
pub mod event;
pub mod investigation;
pub mod issue;
pub mod metrics;
pub mod score;
pub mod store;
pub mod window;

pub use error::{Error, Result};
