//! Router module for client-side page navigation
//!
//! A [`RouteTable`] maps locations to lazily loaded views, a [`Navigator`]
//! walks it and keeps a [`Document`] title and viewport in sync.

pub mod document;
pub mod navigator;
pub mod route;
pub mod table;
pub mod view;

// Re-export commonly used types
pub use document::{Document, HeadlessDocument};
pub use navigator::{Navigation, NavigationState, Navigator};
pub use route::{Params, PathPattern, Route, RouteMeta, RouteName};
pub use table::{
    names, student_routes, Resolution, RouteMatch, RouteTable, RouteTableBuilder, STUDENT_ROUTES,
};
pub use view::{LazyView, Rendered, View, ViewContext, ViewFactory, ViewRegistry};
