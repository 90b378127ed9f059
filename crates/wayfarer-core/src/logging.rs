//! Logging integration for the wayfarer navigation engine.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for creating per-navigation
//! spans.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The log filter is read from `settings.log_level`. In debug mode a
/// pretty, human-readable format is used; otherwise a structured JSON
/// format is used. Calling this twice is harmless: the second install
/// attempt is ignored.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for one navigation event.
///
/// Attach this span to the navigation pipeline so that all log entries
/// emitted while resolving a URL include the requested path.
///
/// # Examples
///
/// ```
/// use wayfarer_core::logging::navigation_span;
///
/// let span = navigation_span("/apps/abc123/logs");
/// let _guard = span.enter();
/// tracing::info!("resolving route");
/// ```
pub fn navigation_span(path: &str) -> tracing::Span {
    tracing::info_span!("navigation", path = path)
}
