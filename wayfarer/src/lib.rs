//! # wayfarer
//!
//! A single-page-application navigation engine: given an incoming URL it
//! selects a registered route, resolves enclosing layouts, gathers the
//! props the matched view and its layouts need, enforces an
//! authorization gate, and produces a renderable page description (or a
//! well-defined redirect/error outcome).
//!
//! This is the meta-crate that re-exports the sub-crates. Depend on
//! `wayfarer` for everything, or on the individual crates for
//! finer-grained control.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use wayfarer::pages::{Component, Module, Navigator, PageLoader, PageRouter, Session};
//! use wayfarer::router::{NavRequest, PathPattern};
//!
//! fn load_index() -> PageLoader {
//!     Arc::new(|_req| {
//!         Box::pin(async { Ok(Module::view(Component::new("Index")).public()) })
//!     })
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut router = PageRouter::new();
//! router.register(PathPattern::literal("/"), load_index());
//!
//! let navigator =
//!     Navigator::builder(Arc::new(router), Arc::new(Session::anonymous())).build();
//!
//! let result = navigator.navigate(NavRequest::new("/")).await;
//! assert_eq!(result.status, 200);
//! # }
//! ```

/// Core types: errors, settings, and logging.
pub use wayfarer_core as core;

/// Routing: path patterns, pattern joining, and the route registry.
pub use wayfarer_router as router;

/// Pages: modules, layout composition, and the navigation pipeline.
pub use wayfarer_pages as pages;

/// The most commonly used types in one import.
pub mod prelude {
    pub use wayfarer_core::{Settings, WayfarerError, WayfarerResult};
    pub use wayfarer_pages::{
        layout_group, with_layout, Component, Identity, Module, Navigator, Page, PageLoader,
        PageResult, PageRouter, Props, PropsContext, Registrar, RequiredRights, Session,
    };
    pub use wayfarer_router::{join, NavRequest, PathPattern, Router};
}
