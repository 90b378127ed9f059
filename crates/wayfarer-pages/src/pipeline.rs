//! The navigation pipeline.
//!
//! [`Navigator`] orchestrates one navigation event: route matching,
//! module loading, the authorization gate, props resolution, redirect
//! short-circuiting, and error fallback. The pipeline is a total
//! function: for every request it produces exactly one [`PageResult`],
//! never an escaped error.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use http::StatusCode;
use tracing::Instrument;

use wayfarer_core::logging::navigation_span;
use wayfarer_core::Settings;
use wayfarer_router::{MatchResult, NavRequest};

use crate::context::PropsContext;
use crate::module::{Component, Module, Props};
use crate::session::Identity;
use crate::PageRouter;

/// A renderable page description: what to mount and with which props.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// The enclosing layout component, if the route was layout-wrapped.
    pub layout: Option<Component>,
    /// The view component.
    pub component: Component,
    /// The resolved props.
    pub props: Props,
}

/// The terminal output of one navigation event.
///
/// Either a renderable page (200/404/500) or a redirect instruction.
/// Consumed by the rendering layer; immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    /// The result status.
    pub status: StatusCode,
    /// The page to render, absent for redirects.
    pub page: Option<Page>,
    /// The redirect destination, present iff this is a redirect.
    pub redirect: Option<String>,
}

impl PageResult {
    /// A resolved page.
    pub const fn ok(page: Page) -> Self {
        Self {
            status: StatusCode::OK,
            page: Some(page),
            redirect: None,
        }
    }

    /// The 404 fallback for an unmatched path.
    pub fn not_found(component: Component) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            page: Some(Page {
                layout: None,
                component,
                props: Props::new(),
            }),
            redirect: None,
        }
    }

    /// The generic 500 fallback for a failed load or props step.
    pub fn error(component: Component) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            page: Some(Page {
                layout: None,
                component,
                props: Props::new(),
            }),
            redirect: None,
        }
    }

    /// A redirect instruction.
    pub const fn redirect(status: StatusCode, url: String) -> Self {
        Self {
            status,
            page: None,
            redirect: Some(url),
        }
    }

    /// Returns `true` if this result is a redirect instruction.
    pub const fn is_redirect(&self) -> bool {
        self.redirect.is_some()
    }
}

/// The navigation pipeline entry point.
///
/// Holds the route registry, the identity source, the injected service
/// bundle, and the fallback pages. Constructed once per application
/// start via [`Navigator::builder`]; safe to share across in-flight
/// navigations.
pub struct Navigator {
    router: Arc<PageRouter>,
    session: Arc<dyn Identity>,
    services: Arc<http::Extensions>,
    not_found_page: Component,
    error_page: Component,
    sign_in_url: String,
    generation: AtomicU64,
}

impl Navigator {
    /// Starts building a navigator over the given registry and identity
    /// source.
    pub fn builder(router: Arc<PageRouter>, session: Arc<dyn Identity>) -> NavigatorBuilder {
        NavigatorBuilder {
            router,
            session,
            services: http::Extensions::new(),
            not_found_page: Component::new("NotFound"),
            error_page: Component::new("Error"),
            sign_in_url: Settings::default().sign_in_url,
        }
    }

    /// Returns the route registry.
    pub const fn router(&self) -> &Arc<PageRouter> {
        &self.router
    }

    /// Resolves one navigation event to a page result.
    ///
    /// Total: always produces exactly one result, logging failures
    /// rather than propagating them.
    pub async fn navigate(&self, request: NavRequest) -> PageResult {
        let span = navigation_span(request.path());
        let matched = self.router.match_path(request.path());
        self.handle_route(request, matched).instrument(span).await
    }

    /// Like [`navigate`](Self::navigate), but drops results of
    /// superseded navigations.
    ///
    /// Each call advances a generation counter; if another navigation
    /// started while this one was resolving, `None` is returned so the
    /// host never applies a stale page over a newer one.
    pub async fn navigate_latest(&self, request: NavRequest) -> Option<PageResult> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.navigate(request).await;
        (self.generation.load(Ordering::SeqCst) == generation).then_some(result)
    }

    /// Runs the pipeline for an already-performed match.
    ///
    /// States: matched or not-found, module loading, the authorization
    /// gate, props resolution with redirect short-circuiting, then a
    /// terminal page result.
    pub async fn handle_route(
        &self,
        request: NavRequest,
        matched: Option<MatchResult<Module>>,
    ) -> PageResult {
        let Some(matched) = matched else {
            return PageResult::not_found(self.not_found_page.clone());
        };

        let module = match matched.route.load(&request).await {
            Ok(module) => module,
            Err(error) => {
                tracing::error!(path = request.path(), %error, "module load failed");
                return PageResult::error(self.error_page.clone());
            }
        };

        if module.requires_rights.needs_identity() && !self.session.is_authenticated() {
            return PageResult::redirect(StatusCode::FOUND, self.sign_in_redirect(request.path()));
        }

        let mut props: Props = matched
            .params
            .iter()
            .map(|(name, value)| (name.clone(), serde_json::Value::String(value.clone())))
            .collect();

        let ctx = Arc::new(PropsContext::new(
            Arc::clone(&self.router),
            Some(Arc::clone(&matched.route)),
            request.clone(),
            Arc::clone(&self.session),
            Arc::clone(&self.services),
        ));

        if let Some(load) = &module.props_loader {
            match load(props.clone(), Arc::clone(&ctx)).await {
                Ok(Some(resolved)) => props = resolved,
                Ok(None) => {}
                Err(error) => {
                    tracing::error!(path = request.path(), %error, "props loader failed");
                    return PageResult::error(self.error_page.clone());
                }
            }
        }

        if let Some(redirect) = ctx.take_redirect() {
            // Partially computed props are discarded.
            return PageResult::redirect(redirect.status, redirect.url);
        }

        PageResult::ok(Page {
            layout: module.layout_view,
            component: module.default_view,
            props,
        })
    }

    /// Builds the sign-in redirect URL, preserving the original target
    /// path as a query parameter so the sign-in flow can return the
    /// user.
    fn sign_in_redirect(&self, path: &str) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("url", path)
            .finish();
        format!("{}?{query}", self.sign_in_url)
    }
}

/// Builder for [`Navigator`].
pub struct NavigatorBuilder {
    router: Arc<PageRouter>,
    session: Arc<dyn Identity>,
    services: http::Extensions,
    not_found_page: Component,
    error_page: Component,
    sign_in_url: String,
}

impl NavigatorBuilder {
    /// Injects a service props loaders can look up by type.
    #[must_use]
    pub fn service<T: Clone + Send + Sync + 'static>(mut self, service: T) -> Self {
        self.services.insert(service);
        self
    }

    /// Sets the 404 fallback component.
    #[must_use]
    pub fn not_found_page(mut self, component: Component) -> Self {
        self.not_found_page = component;
        self
    }

    /// Sets the generic 500 fallback component.
    #[must_use]
    pub fn error_page(mut self, component: Component) -> Self {
        self.error_page = component;
        self
    }

    /// Sets the sign-in URL used by the authorization gate.
    #[must_use]
    pub fn sign_in_url(mut self, url: impl Into<String>) -> Self {
        self.sign_in_url = url.into();
        self
    }

    /// Applies the relevant settings (currently the sign-in URL).
    #[must_use]
    pub fn settings(self, settings: &Settings) -> Self {
        self.sign_in_url(settings.sign_in_url.clone())
    }

    /// Finishes the builder.
    pub fn build(self) -> Navigator {
        Navigator {
            router: self.router,
            session: self.session,
            services: Arc::new(self.services),
            not_found_page: self.not_found_page,
            error_page: self.error_page,
            sign_in_url: self.sign_in_url,
            generation: AtomicU64::new(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;

    fn navigator() -> Navigator {
        Navigator::builder(
            Arc::new(PageRouter::new()),
            Arc::new(Session::anonymous()),
        )
        .build()
    }

    #[test]
    fn test_sign_in_redirect_encodes_path() {
        let nav = navigator();
        assert_eq!(
            nav.sign_in_redirect("/apps/abc123/logs"),
            "/signin?url=%2Fapps%2Fabc123%2Flogs"
        );
    }

    #[test]
    fn test_sign_in_url_override() {
        let nav = Navigator::builder(
            Arc::new(PageRouter::new()),
            Arc::new(Session::anonymous()),
        )
        .sign_in_url("/login")
        .build();
        assert!(nav.sign_in_redirect("/x").starts_with("/login?url="));
    }

    #[test]
    fn test_settings_apply() {
        let settings = Settings {
            sign_in_url: "/auth/signin".into(),
            ..Settings::default()
        };
        let nav = Navigator::builder(
            Arc::new(PageRouter::new()),
            Arc::new(Session::anonymous()),
        )
        .settings(&settings)
        .build();
        assert!(nav.sign_in_redirect("/x").starts_with("/auth/signin?url="));
    }

    #[tokio::test]
    async fn test_unmatched_path_is_not_found() {
        let result = navigator().navigate(NavRequest::new("/does-not-exist")).await;
        assert_eq!(result.status, StatusCode::NOT_FOUND);
        let page = result.page.unwrap();
        assert_eq!(page.component, Component::new("NotFound"));
        assert!(page.layout.is_none());
    }
}
