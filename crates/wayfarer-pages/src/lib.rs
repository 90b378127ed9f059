//! # wayfarer-pages
//!
//! Page layer for the wayfarer navigation engine: the typed page module,
//! layout composition, the per-navigation props context, and the
//! navigation pipeline that turns a URL into a renderable page
//! description.
//!
//! ## Modules
//!
//! - [`module`] - The page module type, components, props, and rights
//! - [`context`] - The per-navigation props context
//! - [`session`] - The identity seam consumed by the authorization gate
//! - [`layout`] - Layout wrapping and nested layout groups
//! - [`pipeline`] - The navigation pipeline and its page results

pub mod context;
pub mod layout;
pub mod module;
pub mod pipeline;
pub mod session;

pub use context::{PropsContext, Redirect};
pub use layout::{layout_group, with_layout, GroupRegistrar, Registrar};
pub use module::{merge_props, Component, Module, Props, PropsLoader, RequiredRights};
pub use pipeline::{Navigator, NavigatorBuilder, Page, PageResult};
pub use session::{Identity, Session};

/// The route registry instantiated for page modules.
pub type PageRouter = wayfarer_router::Router<module::Module>;

/// A module loader over page modules.
pub type PageLoader = wayfarer_router::Loader<module::Module>;
