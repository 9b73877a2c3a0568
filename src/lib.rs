//! Core library surface for the Dog Profile Manager TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as the test suite can reuse the same pieces: the
//! domain model, the profile store behind its capability trait, the photo
//! collaborator, and the interactive front-end.
pub mod models;
pub mod photo;
pub mod store;
pub mod ui;

/// The single domain entity every layer manipulates.
pub use models::DogProfile;

/// The persistence seam. Screens receive a [`ProfileStore`] rather than a
/// concrete database handle so tests can substitute [`store::MemoryStore`].
pub use store::{ProfileStore, SqliteStore, StoreError};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
