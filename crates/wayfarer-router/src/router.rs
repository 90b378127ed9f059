//! The route registry.
//!
//! [`Router`] is an ordered collection of `(pattern, loader)` entries.
//! Registration order defines match priority: when a path satisfies more
//! than one pattern, the entry registered earliest wins. The registry is
//! append-only at startup and read-only during navigation, so it can be
//! shared across in-flight navigations without synchronization.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use wayfarer_core::WayfarerResult;

use crate::pattern::PathPattern;
use crate::request::NavRequest;

/// A boxed, sendable future, the return type of loader functions.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A lazy module loader: given the navigation request, asynchronously
/// produces the module for a route.
///
/// Loaders are opaque to the registry; they may perform any asynchronous
/// work (dynamic code loading, network fetches). They are wrapped in an
/// `Arc` so routes can be shared across threads and navigations.
pub type Loader<M> =
    Arc<dyn Fn(NavRequest) -> BoxFuture<'static, WayfarerResult<M>> + Send + Sync>;

/// A registered route: a path pattern paired with a lazy module loader.
pub struct RouteEntry<M> {
    pattern: PathPattern,
    loader: Loader<M>,
}

impl<M> RouteEntry<M> {
    /// Returns the pattern this route was registered with.
    pub const fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// Loads the route's module for the given request.
    pub async fn load(&self, request: &NavRequest) -> WayfarerResult<M> {
        (self.loader)(request.clone()).await
    }
}

impl<M> fmt::Debug for RouteEntry<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

/// The result of matching a path against the registry: the winning route
/// and the params its pattern captured.
pub struct MatchResult<M> {
    /// The matched route entry.
    pub route: Arc<RouteEntry<M>>,
    /// Named params captured from the path.
    pub params: HashMap<String, String>,
}

impl<M> Clone for MatchResult<M> {
    fn clone(&self) -> Self {
        Self {
            route: Arc::clone(&self.route),
            params: self.params.clone(),
        }
    }
}

impl<M> fmt::Debug for MatchResult<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchResult")
            .field("route", &self.route)
            .field("params", &self.params)
            .finish()
    }
}

/// An ordered route registry, generic over the module type its loaders
/// produce.
pub struct Router<M> {
    entries: Vec<Arc<RouteEntry<M>>>,
}

impl<M> Default for Router<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> fmt::Debug for Router<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router").field("entries", &self.entries).finish()
    }
}

impl<M> Router<M> {
    /// Creates an empty registry.
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Registers a route and returns a handle to it.
    ///
    /// Entries are tried in registration order; unregistration is not
    /// supported.
    pub fn register(&mut self, pattern: PathPattern, loader: Loader<M>) -> Arc<RouteEntry<M>> {
        tracing::debug!(pattern = ?pattern, "registering route");
        let entry = Arc::new(RouteEntry { pattern, loader });
        self.entries.push(Arc::clone(&entry));
        entry
    }

    /// Matches an incoming path against the registry.
    ///
    /// Pure and side-effect free: safe to call repeatedly (e.g. for
    /// speculative pre-fetch). Returns the first satisfying entry in
    /// registration order, or `None` if no pattern matches.
    pub fn match_path(&self, path: &str) -> Option<MatchResult<M>> {
        for entry in &self.entries {
            if let Some(params) = entry.pattern.matches(path) {
                tracing::trace!(pattern = ?entry.pattern, path, "route matched");
                return Some(MatchResult {
                    route: Arc::clone(entry),
                    params,
                });
            }
        }
        None
    }

    /// Returns the registered entries in registration order.
    pub fn entries(&self) -> &[Arc<RouteEntry<M>>] {
        &self.entries
    }

    /// Returns the number of registered routes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
