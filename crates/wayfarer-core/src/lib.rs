//! # wayfarer-core
//!
//! Core types for the wayfarer navigation engine. This crate has no
//! dependency on the router or pages crates and provides the foundation
//! they share.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Engine settings and TOML loading
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;

// Re-export the most commonly used types at the crate root.
pub use error::{WayfarerError, WayfarerResult};
pub use settings::Settings;
