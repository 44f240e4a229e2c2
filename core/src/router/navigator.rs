//! Navigator: drives navigation through the route table and keeps the
//! document in sync
//!
//! Navigation never fails. Unmatched locations are redirected by the table,
//! and the navigator always ends back in [`NavigationState::Idle`].

use super::document::Document;
use super::route::{Params, RouteName};
use super::table::RouteTable;
use super::view::View;
use crate::config::DEFAULT_APP_NAME;
use crate::error::RouterError;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Default number of history entries kept
pub const DEFAULT_MAX_HISTORY: usize = 50;

/// Whether a navigation is in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationState {
    Idle,
    Navigating,
}

/// A completed navigation
#[derive(Clone)]
pub struct Navigation {
    /// Name of the route that was selected
    pub route: RouteName,
    /// Location that was resolved (the redirect target when redirected)
    pub path: String,
    /// Parameters captured from the path
    pub params: Params,
    /// Route title, if any
    pub title: Option<String>,
    /// Location originally requested, if the fallback redirect was taken
    pub redirected_from: Option<String>,
    /// View for the route, loaded on demand
    pub view: Arc<dyn View>,
}

impl Navigation {
    /// Whether the fallback redirect was taken
    pub fn was_redirected(&self) -> bool {
        self.redirected_from.is_some()
    }
}

impl fmt::Debug for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigation")
            .field("route", &self.route)
            .field("path", &self.path)
            .field("params", &self.params)
            .field("title", &self.title)
            .field("redirected_from", &self.redirected_from)
            .finish_non_exhaustive()
    }
}

type AfterEachHook = Box<dyn Fn(&Navigation) + Send + Sync>;

/// Drives navigation over a shared, read-only [`RouteTable`]
pub struct Navigator<D: Document> {
    table: Arc<RouteTable>,
    document: D,
    app_name: String,
    state: NavigationState,
    current: Option<Navigation>,
    /// Previously visited locations (most recent first)
    history: Vec<String>,
    max_history: usize,
    hooks: Vec<AfterEachHook>,
}

impl<D: Document> Navigator<D> {
    /// Create a navigator; nothing is resolved until the first navigation
    pub fn new(table: Arc<RouteTable>, document: D) -> Self {
        Self {
            table,
            document,
            app_name: DEFAULT_APP_NAME.to_string(),
            state: NavigationState::Idle,
            current: None,
            history: Vec::new(),
            max_history: DEFAULT_MAX_HISTORY,
            hooks: Vec::new(),
        }
    }

    /// Set the suffix used in document titles
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    /// Set maximum history size; zero disables history
    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history;
        self.history.truncate(max_history);
        self
    }

    /// Register a callback run after every completed navigation
    pub fn on_after_each<F>(&mut self, hook: F)
    where
        F: Fn(&Navigation) + Send + Sync + 'static,
    {
        self.hooks.push(Box::new(hook));
    }

    /// Navigate to a location
    pub fn navigate(&mut self, location: &str) -> Navigation {
        if let Some(previous) = self.current.as_ref().map(|n| n.path.clone()) {
            self.push_history(previous);
        }
        self.complete(location)
    }

    /// Navigate to a named route
    pub fn navigate_named(
        &mut self,
        name: &str,
        params: &Params,
    ) -> Result<Navigation, RouterError> {
        let location = self.table.href(name, params)?;
        Ok(self.navigate(&location))
    }

    /// Go back to the previous location, if there is one
    pub fn back(&mut self) -> Option<Navigation> {
        if self.history.is_empty() {
            return None;
        }
        let previous = self.history.remove(0);
        Some(self.complete(&previous))
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Current navigation state
    pub fn state(&self) -> NavigationState {
        self.state
    }

    /// Most recent completed navigation
    pub fn current(&self) -> Option<&Navigation> {
        self.current.as_ref()
    }

    /// Previously visited locations, most recent first
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// The route table being navigated
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// The document being kept in sync
    pub fn document(&self) -> &D {
        &self.document
    }

    fn push_history(&mut self, location: String) {
        if self.max_history == 0 {
            return;
        }
        self.history.insert(0, location);
        self.history.truncate(self.max_history);
    }

    fn complete(&mut self, location: &str) -> Navigation {
        self.state = NavigationState::Navigating;
        debug!(location, "Navigating");

        let resolution = self.table.resolve(location);
        let route = resolution.matched.route;
        let navigation = Navigation {
            route: route.name.clone(),
            path: resolution.matched.path,
            params: resolution.matched.params,
            title: route.meta.title.clone(),
            redirected_from: resolution.redirected_from,
            view: route.view.load(),
        };

        self.state = NavigationState::Idle;

        if let Some(title) = &navigation.title {
            self.document
                .set_title(format!("{} | {}", title, self.app_name));
        }
        self.document.scroll_to_top();

        for hook in &self.hooks {
            hook(&navigation);
        }

        info!(route = %navigation.route, path = %navigation.path, "Navigation complete");
        self.current = Some(navigation.clone());
        navigation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::document::HeadlessDocument;
    use crate::router::route::Route;
    use crate::router::table::student_routes;
    use crate::router::table::tests::{stub_views, StubFactory};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn navigator(created: &Arc<AtomicUsize>) -> Navigator<HeadlessDocument> {
        let table = student_routes(stub_views(created)).unwrap();
        Navigator::new(Arc::new(table), HeadlessDocument::with_title("Initial"))
    }

    #[test]
    fn test_title_follows_route() {
        let mut nav = navigator(&Arc::new(AtomicUsize::new(0)));

        nav.navigate("/students");
        assert_eq!(nav.document().title(), "Students | Student Management System");

        nav.navigate("/students/7/edit");
        assert_eq!(nav.document().title(), "Edit Student | Student Management System");
    }

    #[test]
    fn test_untitled_route_keeps_prior_title() {
        let table = RouteTable::builder()
            .route(Route::new(
                "home",
                "/",
                StubFactory {
                    name: "home".to_string(),
                    created: Arc::new(AtomicUsize::new(0)),
                },
            ))
            .build()
            .unwrap();
        let mut nav = Navigator::new(Arc::new(table), HeadlessDocument::with_title("Before"));

        nav.navigate("/");
        assert_eq!(nav.document().title(), "Before");
        assert_eq!(nav.document().scroll_resets(), 1);
    }

    #[test]
    fn test_app_name_suffix_is_configurable() {
        let mut nav = navigator(&Arc::new(AtomicUsize::new(0))).with_app_name("Registry");
        nav.navigate("/");
        assert_eq!(nav.document().title(), "Home | Registry");
    }

    #[test]
    fn test_unmatched_location_lands_on_home() {
        let mut nav = navigator(&Arc::new(AtomicUsize::new(0)));

        let navigation = nav.navigate("/does/not/exist");
        assert_eq!(navigation.route.as_str(), "home");
        assert_eq!(navigation.path, "/");
        assert_eq!(navigation.redirected_from.as_deref(), Some("/does/not/exist"));
        assert!(navigation.was_redirected());
        assert_eq!(nav.state(), NavigationState::Idle);
        assert_eq!(nav.document().title(), "Home | Student Management System");
    }

    #[test]
    fn test_every_navigation_scrolls_to_top() {
        let mut nav = navigator(&Arc::new(AtomicUsize::new(0)));
        nav.navigate("/");
        nav.navigate("/students");
        nav.navigate("/nowhere");
        assert_eq!(nav.document().scroll_resets(), 3);
    }

    #[test]
    fn test_views_load_only_when_visited() {
        let created = Arc::new(AtomicUsize::new(0));
        let mut nav = navigator(&created);
        assert_eq!(created.load(Ordering::SeqCst), 0);

        nav.navigate("/students/1");
        assert_eq!(created.load(Ordering::SeqCst), 1);

        nav.navigate("/students/2");
        assert_eq!(created.load(Ordering::SeqCst), 1);

        nav.navigate("/students");
        assert_eq!(created.load(Ordering::SeqCst), 2);

        let loaded: Vec<_> = nav
            .table()
            .routes()
            .filter(|route| route.view.is_loaded())
            .map(|route| route.name.to_string())
            .collect();
        assert_eq!(loaded, vec!["students", "student-detail"]);
    }

    #[test]
    fn test_back_restores_previous_location() {
        let mut nav = navigator(&Arc::new(AtomicUsize::new(0)));
        assert!(nav.back().is_none());

        nav.navigate("/students");
        nav.navigate("/students/3");
        assert!(nav.can_go_back());
        assert_eq!(nav.history(), ["/students".to_string()]);

        let back = nav.back().unwrap();
        assert_eq!(back.route.as_str(), "students");
        assert_eq!(nav.document().title(), "Students | Student Management System");
        assert!(!nav.can_go_back());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut nav = navigator(&Arc::new(AtomicUsize::new(0))).with_max_history(2);
        for id in 1..=5 {
            nav.navigate(&format!("/students/{id}"));
        }
        assert_eq!(
            nav.history(),
            ["/students/4".to_string(), "/students/3".to_string()]
        );

        let mut nav = navigator(&Arc::new(AtomicUsize::new(0))).with_max_history(0);
        nav.navigate("/");
        nav.navigate("/students");
        assert!(!nav.can_go_back());
    }

    #[test]
    fn test_navigate_named() {
        let mut nav = navigator(&Arc::new(AtomicUsize::new(0)));
        let params = Params::from([("id".to_string(), "12".to_string())]);

        let navigation = nav.navigate_named("student-delete", &params).unwrap();
        assert_eq!(navigation.path, "/students/12/delete");
        assert_eq!(navigation.params, params);

        assert!(nav.navigate_named("student-delete", &Params::new()).is_err());

        let opaque = Params::from([("id".to_string(), "a/b".to_string())]);
        let navigation = nav.navigate_named("student-edit", &opaque).unwrap();
        assert_eq!(navigation.route.as_str(), "student-edit");
        assert_eq!(navigation.params, opaque);
        assert!(!navigation.was_redirected());
    }

    #[test]
    fn test_after_each_hooks_run_in_order() {
        let mut nav = navigator(&Arc::new(AtomicUsize::new(0)));
        let seen = Arc::new(Mutex::new(Vec::new()));

        let first = Arc::clone(&seen);
        nav.on_after_each(move |n| first.lock().unwrap().push(format!("a:{}", n.route)));
        let second = Arc::clone(&seen);
        nav.on_after_each(move |n| second.lock().unwrap().push(format!("b:{}", n.route)));

        nav.navigate("/students/create");

        assert_eq!(
            *seen.lock().unwrap(),
            vec!["a:student-create".to_string(), "b:student-create".to_string()]
        );
        assert_eq!(nav.current().unwrap().route.as_str(), "student-create");
    }
}
