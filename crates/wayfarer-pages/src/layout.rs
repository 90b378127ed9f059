//! Layout wrapping and nested layout groups.
//!
//! [`with_layout`] wraps a view loader in a layout loader, producing a
//! composite module whose props step runs the layout's loader before the
//! view's and merges the results. [`layout_group`] lets many sibling
//! routes share one layout declaration; groups nest, so a group's
//! registrar can itself host another group.

use std::sync::Arc;

use wayfarer_core::WayfarerResult;
use wayfarer_router::{join, PathPattern, RouteEntry, Router};

use crate::context::PropsContext;
use crate::module::{merge_props, Module, Props, PropsLoader};
use crate::{PageLoader, PageRouter};

/// Wraps a view loader with a layout loader.
///
/// The returned loader resolves both modules concurrently (neither
/// depends on the other's module, only on the request) and composes
/// them:
///
/// - the layout module's view becomes the composite's `layout_view`;
/// - the composite's props step runs the layout's loader first, merges
///   its result over the initial props, then runs the view's loader on
///   the merged map. The view step must wait for the layout step: a view
///   is allowed to read values its layout computed.
/// - on key collision the view's props win over the layout's, and both
///   win over the caller-supplied initial props;
/// - if the layout's loader requests a redirect, the view's loader is
///   not invoked.
pub fn with_layout(load_layout: PageLoader, load_view: PageLoader) -> PageLoader {
    Arc::new(move |request| {
        let load_layout = Arc::clone(&load_layout);
        let load_view = Arc::clone(&load_view);
        Box::pin(async move {
            let (layout, view) =
                tokio::try_join!(load_layout(request.clone()), load_view(request))?;
            Ok(compose(layout, view))
        })
    })
}

/// Composes a resolved layout module and view module into one.
///
/// The composite keeps the view's rights declaration, so a public page
/// stays public under a layout.
fn compose(layout: Module, view: Module) -> Module {
    let layout_loader = layout.props_loader;
    let view_loader = view.props_loader;

    let merged: PropsLoader = Arc::new(move |initial: Props, ctx: Arc<PropsContext>| {
        let layout_loader = layout_loader.clone();
        let view_loader = view_loader.clone();
        Box::pin(async move {
            let layout_props = match &layout_loader {
                Some(load) => load(initial.clone(), Arc::clone(&ctx)).await?.unwrap_or_default(),
                None => Props::new(),
            };

            // A redirect is terminal; don't run the view loader past it.
            if ctx.redirect().is_some() {
                return Ok(None);
            }

            let merged = merge_props(initial, layout_props);
            let view_props = match &view_loader {
                Some(load) => load(merged.clone(), ctx).await?.unwrap_or_default(),
                None => Props::new(),
            };

            Ok(Some(merge_props(merged, view_props)))
        })
    });

    Module {
        default_view: view.default_view,
        layout_view: Some(layout.default_view),
        requires_rights: view.requires_rights,
        props_loader: Some(merged),
    }
}

/// Something routes can be registered against: the real router, or a
/// layout group's restricted registrar.
pub trait Registrar {
    /// Registers a route and returns a handle to it.
    fn register(
        &mut self,
        pattern: PathPattern,
        loader: PageLoader,
    ) -> WayfarerResult<Arc<RouteEntry<Module>>>;
}

impl Registrar for PageRouter {
    fn register(
        &mut self,
        pattern: PathPattern,
        loader: PageLoader,
    ) -> WayfarerResult<Arc<RouteEntry<Module>>> {
        Ok(Router::register(self, pattern, loader))
    }
}

/// The restricted registrar a layout group hands to its children.
///
/// Each `register` call joins the group's base pattern with the child
/// pattern and wraps the child loader with the group's layout before
/// delegating to the underlying registrar.
pub struct GroupRegistrar<'a, R: Registrar> {
    inner: &'a mut R,
    base: PathPattern,
    load_layout: PageLoader,
}

impl<R: Registrar> Registrar for GroupRegistrar<'_, R> {
    fn register(
        &mut self,
        pattern: PathPattern,
        loader: PageLoader,
    ) -> WayfarerResult<Arc<RouteEntry<Module>>> {
        let joined = join(&self.base, &pattern)?;
        self.inner
            .register(joined, with_layout(Arc::clone(&self.load_layout), loader))
    }
}

/// Registers a group of routes that share one layout.
///
/// `register_children` receives a [`GroupRegistrar`]; every route it
/// registers is joined onto `base` and wrapped with `load_layout`,
/// without repeating the join/wrap boilerplate per route. Because
/// `GroupRegistrar` is itself a [`Registrar`], groups nest.
pub fn layout_group<R, F>(
    registrar: &mut R,
    base: PathPattern,
    load_layout: PageLoader,
    register_children: F,
) -> WayfarerResult<()>
where
    R: Registrar,
    F: FnOnce(&mut GroupRegistrar<'_, R>) -> WayfarerResult<()>,
{
    let mut group = GroupRegistrar {
        inner: registrar,
        base,
        load_layout,
    };
    register_children(&mut group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use wayfarer_router::NavRequest;

    use crate::module::Component;
    use crate::session::Session;

    fn props(value: Value) -> Props {
        value.as_object().unwrap().clone()
    }

    fn plain(name: &'static str) -> PageLoader {
        Arc::new(move |_req| Box::pin(async move { Ok(Module::view(Component::new(name))) }))
    }

    fn with_props(name: &'static str, value: Value) -> PageLoader {
        Arc::new(move |_req| {
            let value = value.clone();
            Box::pin(async move {
                Ok(Module::view(Component::new(name)).with_props_loader(Arc::new(
                    move |_initial, _ctx| {
                        let value = value.clone();
                        Box::pin(async move { Ok(Some(props(value))) })
                    },
                )))
            })
        })
    }

    fn context() -> Arc<PropsContext> {
        Arc::new(PropsContext::new(
            Arc::new(Router::new()),
            None,
            NavRequest::new("/"),
            Arc::new(Session::anonymous()),
            Arc::new(http::Extensions::new()),
        ))
    }

    async fn resolve_props(loader: &PageLoader, initial: Props) -> Props {
        let module = loader(NavRequest::new("/")).await.unwrap();
        let load = module.props_loader.unwrap();
        load(initial.clone(), context())
            .await
            .unwrap()
            .unwrap_or(initial)
    }

    #[tokio::test]
    async fn test_composite_views() {
        let loader = with_layout(plain("MainLayout"), plain("Index"));
        let module = loader(NavRequest::new("/")).await.unwrap();

        assert_eq!(module.layout_view.unwrap(), Component::new("MainLayout"));
        assert_eq!(module.default_view, Component::new("Index"));
    }

    #[tokio::test]
    async fn test_merge_precedence() {
        let loader = with_layout(
            with_props("Layout", json!({"a": 1, "b": 1})),
            with_props("View", json!({"b": 2, "c": 2})),
        );

        let merged = resolve_props(&loader, props(json!({"a": 0, "d": 0}))).await;
        assert_eq!(
            Value::Object(merged),
            json!({"a": 1, "b": 2, "c": 2, "d": 0})
        );
    }

    #[tokio::test]
    async fn test_view_sees_layout_props() {
        // The view loader must observe values the layout loader set.
        let layout: PageLoader = Arc::new(move |_req| {
            Box::pin(async move {
                Ok(Module::view(Component::new("TeamLayout")).with_props_loader(Arc::new(
                    |_initial, _ctx| {
                        Box::pin(async move { Ok(Some(props(json!({"teamId": "t-42"})))) })
                    },
                )))
            })
        });
        let view: PageLoader = Arc::new(move |_req| {
            Box::pin(async move {
                Ok(Module::view(Component::new("Members")).with_props_loader(Arc::new(
                    |initial: Props, _ctx| {
                        Box::pin(async move {
                            let team_id = initial
                                .get("teamId")
                                .and_then(Value::as_str)
                                .unwrap_or_default();
                            assert!(!team_id.is_empty());
                            Ok(Some(props(json!({"members": [team_id]}))))
                        })
                    },
                )))
            })
        });

        let merged = resolve_props(&with_layout(layout, view), Props::new()).await;
        assert_eq!(merged.get("teamId").unwrap(), "t-42");
        assert_eq!(*merged.get("members").unwrap(), json!(["t-42"]));
    }

    #[tokio::test]
    async fn test_redirect_skips_view_loader() {
        let layout: PageLoader = Arc::new(move |_req| {
            Box::pin(async move {
                Ok(Module::view(Component::new("Layout")).with_props_loader(Arc::new(
                    |_initial, ctx: Arc<PropsContext>| {
                        Box::pin(async move {
                            ctx.set_redirect("/other");
                            Ok(None)
                        })
                    },
                )))
            })
        });
        let view: PageLoader = Arc::new(move |_req| {
            Box::pin(async move {
                Ok(Module::view(Component::new("View")).with_props_loader(Arc::new(
                    |_initial, _ctx| {
                        Box::pin(async move {
                            panic!("view props loader must not run after a redirect");
                        })
                    },
                )))
            })
        });

        let loader = with_layout(layout, view);
        let module = loader(NavRequest::new("/")).await.unwrap();
        let ctx = context();
        let result = module.props_loader.unwrap()(Props::new(), Arc::clone(&ctx))
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(ctx.redirect().unwrap().url, "/other");
    }

    #[tokio::test]
    async fn test_composite_keeps_view_rights() {
        let public_view: PageLoader = Arc::new(move |_req| {
            Box::pin(async move { Ok(Module::view(Component::new("SignIn")).public()) })
        });
        let loader = with_layout(plain("Layout"), public_view);

        let module = loader(NavRequest::new("/")).await.unwrap();
        assert!(!module.requires_rights.needs_identity());
    }

    #[tokio::test]
    async fn test_layout_group_joins_and_wraps() {
        let mut router = PageRouter::new();
        layout_group(
            &mut router,
            PathPattern::parameterized(r"^/apps/(?<id>[a-zA-Z0-9_-]+)$", "").unwrap(),
            plain("AppLayout"),
            |r| {
                r.register(PathPattern::literal(""), plain("AppIndex"))?;
                r.register(PathPattern::literal("/logs"), plain("Logs"))?;
                r.register(PathPattern::literal("/settings"), plain("AppSettings"))?;
                Ok(())
            },
        )
        .unwrap();

        let m = router.match_path("/apps/abc123/logs").unwrap();
        assert_eq!(m.params.get("id").unwrap(), "abc123");

        let module = m.route.load(&NavRequest::new("/apps/abc123/logs")).await.unwrap();
        assert_eq!(module.layout_view.unwrap(), Component::new("AppLayout"));
        assert_eq!(module.default_view, Component::new("Logs"));

        let m = router.match_path("/apps/abc123").unwrap();
        let module = m.route.load(&NavRequest::new("/apps/abc123")).await.unwrap();
        assert_eq!(module.default_view, Component::new("AppIndex"));
    }

    #[tokio::test]
    async fn test_nested_layout_groups() {
        let mut router = PageRouter::new();
        layout_group(
            &mut router,
            PathPattern::literal("/settings"),
            plain("SettingsLayout"),
            |settings| {
                settings.register(PathPattern::literal("/account"), plain("Account"))?;
                layout_group(
                    settings,
                    PathPattern::literal("/servers"),
                    plain("ServersLayout"),
                    |servers| {
                        servers.register(PathPattern::literal(""), plain("ServerList"))?;
                        Ok(())
                    },
                )
            },
        )
        .unwrap();

        let m = router.match_path("/settings/servers").unwrap();
        let module = m.route.load(&NavRequest::new("/settings/servers")).await.unwrap();
        // The outermost layout frames the page.
        assert_eq!(module.layout_view.unwrap(), Component::new("SettingsLayout"));
        assert_eq!(module.default_view, Component::new("ServerList"));
    }
}
