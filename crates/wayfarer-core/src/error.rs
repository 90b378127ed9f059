//! Core error types for the wayfarer navigation engine.
//!
//! This module provides the [`WayfarerError`] enum covering navigation
//! errors, loader failures, and configuration errors, together with the
//! [`WayfarerResult`] alias used throughout the workspace.

use thiserror::Error;

/// The primary error type for the wayfarer navigation engine.
///
/// The navigation pipeline never lets one of these escape to the caller:
/// every variant is collapsed to a renderable page (or a redirect) before
/// the pipeline returns. The variants exist so that loaders, pattern
/// construction, and registration can report failures precisely and so
/// that diagnostics carry the right status code.
#[derive(Error, Debug)]
pub enum WayfarerError {
    // ── Navigation errors ────────────────────────────────────────────

    /// No registered pattern matched the requested path.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A route's module loader failed.
    #[error("Module load failed: {0}")]
    LoadFailure(String),

    /// A props loader failed while resolving page props.
    #[error("Props resolution failed: {0}")]
    PropsFailure(String),

    // ── Configuration ────────────────────────────────────────────────

    /// A pattern source, flag set, or setting is invalid.
    ///
    /// Duplicate capture names across joined pattern layers also land
    /// here: the composed expression fails to compile.
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),
}

impl WayfarerError {
    /// Returns the HTTP status code associated with this error.
    ///
    /// - `NotFound` -> 404
    /// - `LoadFailure`, `PropsFailure`, `ImproperlyConfigured` -> 500
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::LoadFailure(_) | Self::PropsFailure(_) | Self::ImproperlyConfigured(_) => 500,
        }
    }
}

/// A convenience type alias for `Result<T, WayfarerError>`.
pub type WayfarerResult<T> = Result<T, WayfarerError>;
