//! Tinysave Core Library
//!
//! This crate provides the domain models, settings resolution, and the
//! gate logic (extension allow-list, content change detection) shared by
//! the Tinysave components.

pub mod change;
pub mod models;
pub mod settings;

// Re-export commonly used types
pub use change::is_unchanged;
pub use models::{FileFingerprint, RecordKind, SaveRecord};
pub use settings::{EnvSettingsProvider, SettingsProvider, TinifySettings};
