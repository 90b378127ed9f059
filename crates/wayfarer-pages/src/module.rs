//! The page module type.
//!
//! A [`Module`] is what a route's loader resolves to: the view component,
//! an optional enclosing layout component, the rights the page requires,
//! and an optional props loader. The dynamically-shaped module of a
//! loosely-typed host becomes a struct with explicit optional fields and
//! documented defaults, resolved once at load time.

use std::fmt;
use std::sync::Arc;

use wayfarer_core::WayfarerResult;
use wayfarer_router::BoxFuture;

use crate::context::PropsContext;

/// The props a view needs to render: a JSON object with spread-merge
/// semantics.
pub type Props = serde_json::Map<String, serde_json::Value>;

/// An asynchronous props loader.
///
/// Receives the props assembled so far and the navigation's context;
/// returns replacement props, or `None` for "no changes". A loader may
/// request a redirect through the context instead of returning props.
pub type PropsLoader = Arc<
    dyn Fn(Props, Arc<PropsContext>) -> BoxFuture<'static, WayfarerResult<Option<Props>>>
        + Send
        + Sync,
>;

/// An opaque, cheaply-cloneable reference to a renderable component.
///
/// The engine never renders; it only carries these references through to
/// the [`Page`](crate::pipeline::Page) so the host renderer can mount
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Component(Arc<str>);

impl Component {
    /// Creates a component reference from its renderer-side name.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    /// Returns the renderer-side name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The rights a page declares.
///
/// The default is [`Normal`](Self::Normal): any authenticated identity.
/// An explicit [`None`](Self::None) or an empty rights list marks a page
/// public.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequiredRights {
    /// Public: no identity required.
    None,
    /// Any authenticated identity.
    #[default]
    Normal,
    /// A specific set of named rights. An empty list means public.
    Rights(Vec<String>),
}

impl RequiredRights {
    /// Returns `true` if the page may only be shown to an authenticated
    /// identity.
    pub fn needs_identity(&self) -> bool {
        match self {
            Self::None => false,
            Self::Normal => true,
            Self::Rights(rights) => !rights.is_empty(),
        }
    }
}

/// The result of resolving a route's loader.
#[derive(Clone)]
pub struct Module {
    /// The view component to mount.
    pub default_view: Component,
    /// The enclosing layout component, if the route was layout-wrapped.
    pub layout_view: Option<Component>,
    /// The rights required to show this page.
    pub requires_rights: RequiredRights,
    /// The props loader, if this page needs any.
    pub props_loader: Option<PropsLoader>,
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("default_view", &self.default_view)
            .field("layout_view", &self.layout_view)
            .field("requires_rights", &self.requires_rights)
            .field("has_props_loader", &self.props_loader.is_some())
            .finish()
    }
}

impl Module {
    /// Creates a module for a plain view: no layout, default rights,
    /// no props loader.
    pub fn view(default_view: Component) -> Self {
        Self {
            default_view,
            layout_view: None,
            requires_rights: RequiredRights::default(),
            props_loader: None,
        }
    }

    /// Sets the rights declaration.
    #[must_use]
    pub fn with_rights(mut self, rights: RequiredRights) -> Self {
        self.requires_rights = rights;
        self
    }

    /// Marks the page public.
    #[must_use]
    pub fn public(self) -> Self {
        self.with_rights(RequiredRights::None)
    }

    /// Attaches a props loader.
    #[must_use]
    pub fn with_props_loader(mut self, loader: PropsLoader) -> Self {
        self.props_loader = Some(loader);
        self
    }
}

/// Merges two props maps with spread semantics: keys from `overlay` win
/// over keys from `base`.
pub fn merge_props(base: Props, overlay: Props) -> Props {
    let mut merged = base;
    for (key, value) in overlay {
        merged.insert(key, value);
    }
    merged
}
