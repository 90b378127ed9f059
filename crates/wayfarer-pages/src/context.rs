//! The per-navigation props context.
//!
//! A [`PropsContext`] is constructed fresh for every navigation event and
//! handed to each props loader in the composed chain. It carries the
//! router handle, the matched route, the request, the identity, the
//! injected service bundle, and the redirect slot. It is never shared or
//! reused across navigation events.

use std::fmt;
use std::sync::{Arc, Mutex};

use http::StatusCode;

use wayfarer_router::{NavRequest, RouteEntry};

use crate::module::Module;
use crate::session::Identity;
use crate::PageRouter;

/// A redirect requested by a props loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    /// The redirect status (usually 302).
    pub status: StatusCode,
    /// The destination URL.
    pub url: String,
}

/// The mutable carrier threaded through every props-loading call of one
/// navigation event.
///
/// Loaders receive the context behind an `Arc`; the redirect slot is the
/// only mutable part and is checked by the pipeline after every loader
/// step, so a redirect acts as a terminal signal rather than an
/// exception. A later loader's request overrides an earlier one, but the
/// layout composer stops running loaders once a redirect is set.
pub struct PropsContext {
    /// The router that matched this navigation.
    pub router: Arc<PageRouter>,
    /// The matched route, if any.
    pub route: Option<Arc<RouteEntry<Module>>>,
    /// The navigation request.
    pub request: NavRequest,
    /// The caller's identity.
    pub session: Arc<dyn Identity>,
    services: Arc<http::Extensions>,
    redirect: Mutex<Option<Redirect>>,
}

impl fmt::Debug for PropsContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropsContext")
            .field("request", &self.request)
            .field("redirect", &self.redirect())
            .finish_non_exhaustive()
    }
}

impl PropsContext {
    /// Creates the context for one navigation event.
    pub fn new(
        router: Arc<PageRouter>,
        route: Option<Arc<RouteEntry<Module>>>,
        request: NavRequest,
        session: Arc<dyn Identity>,
        services: Arc<http::Extensions>,
    ) -> Self {
        Self {
            router,
            route,
            request,
            session,
            services,
            redirect: Mutex::new(None),
        }
    }

    /// Requests a 302 redirect to the given URL.
    pub fn set_redirect(&self, url: impl Into<String>) {
        self.set_redirect_with_status(url, StatusCode::FOUND);
    }

    /// Requests a redirect with an explicit status.
    pub fn set_redirect_with_status(&self, url: impl Into<String>, status: StatusCode) {
        let mut slot = self.redirect.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *slot = Some(Redirect {
            status,
            url: url.into(),
        });
    }

    /// Returns the currently requested redirect, if any.
    pub fn redirect(&self) -> Option<Redirect> {
        self.redirect
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Takes the requested redirect out of the context.
    pub(crate) fn take_redirect(&self) -> Option<Redirect> {
        self.redirect
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .take()
    }

    /// Looks up an injected service by type.
    ///
    /// Services are bundled once at application start; props loaders use
    /// this to reach collaborators (API clients, caches) without ambient
    /// globals.
    pub fn service<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.services.get::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use wayfarer_router::Router;

    #[derive(Clone, Debug, PartialEq)]
    struct AppsClient {
        base_url: String,
    }

    fn context(services: http::Extensions) -> PropsContext {
        PropsContext::new(
            Arc::new(Router::new()),
            None,
            NavRequest::new("/"),
            Arc::new(Session::anonymous()),
            Arc::new(services),
        )
    }

    #[test]
    fn test_redirect_defaults_to_302() {
        let ctx = context(http::Extensions::new());
        assert!(ctx.redirect().is_none());

        ctx.set_redirect("/other");
        let redirect = ctx.redirect().unwrap();
        assert_eq!(redirect.status, StatusCode::FOUND);
        assert_eq!(redirect.url, "/other");
    }

    #[test]
    fn test_later_redirect_overrides() {
        let ctx = context(http::Extensions::new());
        ctx.set_redirect("/first");
        ctx.set_redirect_with_status("/second", StatusCode::MOVED_PERMANENTLY);

        let redirect = ctx.redirect().unwrap();
        assert_eq!(redirect.status, StatusCode::MOVED_PERMANENTLY);
        assert_eq!(redirect.url, "/second");
    }

    #[test]
    fn test_take_redirect_clears_slot() {
        let ctx = context(http::Extensions::new());
        ctx.set_redirect("/other");
        assert!(ctx.take_redirect().is_some());
        assert!(ctx.redirect().is_none());
    }

    #[test]
    fn test_service_lookup() {
        let mut services = http::Extensions::new();
        services.insert(AppsClient {
            base_url: "/api".into(),
        });
        let ctx = context(services);

        assert_eq!(ctx.service::<AppsClient>().unwrap().base_url, "/api");
        assert!(ctx.service::<String>().is_none());
    }
}
