//! # wayfarer-router
//!
//! Routing layer for the wayfarer navigation engine: matchable path
//! patterns, the pattern joiner used for layout nesting, and the ordered
//! route registry.
//!
//! ## Modules
//!
//! - [`pattern`] - Literal and parameterized path patterns
//! - [`join`] - Combining a parent pattern with a child pattern
//! - [`router`] - The ordered route registry and match results
//! - [`request`] - The navigation request type

pub mod join;
pub mod pattern;
pub mod request;
pub mod router;

pub use join::join;
pub use pattern::PathPattern;
pub use request::NavRequest;
pub use router::{BoxFuture, Loader, MatchResult, RouteEntry, Router};
