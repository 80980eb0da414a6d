//! Editorial article repository.
//!
//! Articles are read-only content, so this crate has no error wrapper
//! of its own; operations surface [`climatewise_api::ApiFailure`]
//! directly.

pub mod client;
pub mod types;

pub use client::ArticlesClient;
pub use types::Article;
