//! Local identity and preference storage.
//!
//! A single-table SQLite key/value store holding the device's guest
//! identity and onboarding flags. Nothing in here ever leaves the
//! device except the guest id, which tags backend submissions.

pub mod store;

pub use store::{PreferenceStore, StoreError};
