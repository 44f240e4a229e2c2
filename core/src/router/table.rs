//! Route table: ordered, immutable dispatch from paths to routes

use super::route::{split_path, Params, PathPattern, Route, RouteName};
use super::view::{LazyView, ViewRegistry};
use crate::error::RouterError;
use std::collections::HashSet;
use tracing::debug;

/// Where unmatched paths are sent when no other target is configured
pub const DEFAULT_FALLBACK: &str = "/";

/// A route selected for a concrete path
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    /// The matched route
    pub route: &'a Route,
    /// Parameters captured from the path
    pub params: Params,
    /// The location that was matched
    pub path: String,
}

/// Result of resolving a path. Resolution always succeeds.
#[derive(Debug, Clone)]
pub struct Resolution<'a> {
    /// The route finally selected
    pub matched: RouteMatch<'a>,
    /// Original location when the catch-all redirect was taken
    pub redirected_from: Option<String>,
}

#[derive(Debug)]
struct CompiledRoute {
    route: Route,
    pattern: PathPattern,
}

#[derive(Debug)]
struct Fallback {
    target: String,
    index: usize,
    params: Params,
}

/// Immutable route table built once at startup
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
    fallback: Fallback,
}

/// Builder for [`RouteTable`]
#[derive(Debug)]
pub struct RouteTableBuilder {
    routes: Vec<Route>,
    fallback: String,
}

impl Default for RouteTableBuilder {
    fn default() -> Self {
        Self {
            routes: Vec::new(),
            fallback: DEFAULT_FALLBACK.to_string(),
        }
    }
}

impl RouteTableBuilder {
    /// Append a route; declaration order is matching order
    pub fn route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    /// Set where unmatched paths redirect to
    pub fn fallback_redirect(mut self, target: impl Into<String>) -> Self {
        self.fallback = target.into();
        self
    }

    /// Validate and freeze the table
    pub fn build(self) -> Result<RouteTable, RouterError> {
        if self.routes.is_empty() {
            return Err(RouterError::NoRoutes);
        }

        let mut names = HashSet::new();
        let mut paths = HashSet::new();
        let mut routes = Vec::with_capacity(self.routes.len());

        for route in self.routes {
            let pattern = PathPattern::parse(&route.path)?;

            if pattern.is_catch_all() {
                return Err(RouterError::InvalidPattern {
                    pattern: route.path.clone(),
                    message: "catch-all is reserved for the fallback redirect".to_string(),
                });
            }
            if !names.insert(route.name.clone()) {
                return Err(RouterError::DuplicateName(route.name.to_string()));
            }
            if !paths.insert(pattern.canonical()) {
                return Err(RouterError::DuplicatePath(route.path.clone()));
            }

            routes.push(CompiledRoute { route, pattern });
        }

        let segments = split_path(&self.fallback);
        let (index, params) = routes
            .iter()
            .enumerate()
            .find_map(|(index, compiled)| {
                compiled.pattern.matches(&segments).map(|params| (index, params))
            })
            .ok_or_else(|| RouterError::FallbackUnresolved(self.fallback.clone()))?;

        Ok(RouteTable {
            routes,
            fallback: Fallback {
                target: self.fallback,
                index,
                params,
            },
        })
    }
}

impl RouteTable {
    /// Start building a table
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// Find the first declared route matching `location`, without fallback
    pub fn match_path(&self, location: &str) -> Option<RouteMatch<'_>> {
        let segments = split_path(location);
        self.routes.iter().find_map(|compiled| {
            compiled.pattern.matches(&segments).map(|params| RouteMatch {
                route: &compiled.route,
                params,
                path: location.to_string(),
            })
        })
    }

    /// Resolve `location` to a route, taking the catch-all redirect if nothing matches
    pub fn resolve(&self, location: &str) -> Resolution<'_> {
        if let Some(matched) = self.match_path(location) {
            return Resolution {
                matched,
                redirected_from: None,
            };
        }

        debug!(
            location,
            target = %self.fallback.target,
            "No route matched, redirecting"
        );

        Resolution {
            matched: RouteMatch {
                route: &self.routes[self.fallback.index].route,
                params: self.fallback.params.clone(),
                path: self.fallback.target.clone(),
            },
            redirected_from: Some(location.to_string()),
        }
    }

    /// Build the path for a named route
    pub fn href(&self, name: &str, params: &Params) -> Result<String, RouterError> {
        let compiled = self
            .routes
            .iter()
            .find(|compiled| compiled.route.name.as_str() == name)
            .ok_or_else(|| RouterError::RouteNotFound(name.to_string()))?;
        compiled.pattern.fill(&compiled.route.name, params)
    }

    /// Look up a route by name
    pub fn get(&self, name: &str) -> Option<&Route> {
        self.routes().find(|route| route.name.as_str() == name)
    }

    /// All declared routes in matching order
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter().map(|compiled| &compiled.route)
    }

    /// Number of declared routes, excluding the fallback
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Where unmatched paths are redirected
    pub fn fallback_target(&self) -> &str {
        &self.fallback.target
    }
}

/// Route names of the Student Management front-end, in declaration order
pub mod names {
    pub const HOME: &str = "home";
    pub const STUDENTS: &str = "students";
    pub const STUDENT_CREATE: &str = "student-create";
    pub const STUDENT_DETAIL: &str = "student-detail";
    pub const STUDENT_EDIT: &str = "student-edit";
    pub const STUDENT_DELETE: &str = "student-delete";
}

/// (name, path, title) for every Student Management route.
///
/// `/students/create` sits before `/students/:id` so the static segment wins.
pub const STUDENT_ROUTES: [(&str, &str, &str); 6] = [
    (names::HOME, "/", "Home"),
    (names::STUDENTS, "/students", "Students"),
    (names::STUDENT_CREATE, "/students/create", "Create Student"),
    (names::STUDENT_DETAIL, "/students/:id", "Student Detail"),
    (names::STUDENT_EDIT, "/students/:id/edit", "Edit Student"),
    (names::STUDENT_DELETE, "/students/:id/delete", "Delete Student"),
];

/// Build the Student Management route table, taking one view factory per route
/// from `views`. Unmatched paths redirect to `/`.
pub fn student_routes(mut views: ViewRegistry) -> Result<RouteTable, RouterError> {
    let mut builder = RouteTable::builder();

    for (name, path, title) in STUDENT_ROUTES {
        let factory = views
            .take(name)
            .ok_or_else(|| RouterError::MissingView(name.to_string()))?;
        builder = builder.route(
            Route::with_view(RouteName::from(name), path, LazyView::from_boxed(factory))
                .with_title(title),
        );
    }

    builder.fallback_redirect(DEFAULT_FALLBACK).build()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::Result;
    use crate::router::view::{Rendered, View, ViewContext, ViewFactory};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Named(String);

    #[async_trait]
    impl View for Named {
        async fn render(&self, _ctx: &ViewContext<'_>) -> Result<Rendered> {
            Ok(Rendered::new(self.0.clone()))
        }
    }

    /// Factory that renders its route name and counts instantiations
    pub(crate) struct StubFactory {
        pub name: String,
        pub created: Arc<AtomicUsize>,
    }

    impl ViewFactory for StubFactory {
        fn create(&self) -> Box<dyn View> {
            self.created.fetch_add(1, Ordering::SeqCst);
            Box::new(Named(self.name.clone()))
        }

        fn view_name(&self) -> &str {
            &self.name
        }
    }

    /// Registry with a stub view for every student route, sharing one counter
    pub(crate) fn stub_views(created: &Arc<AtomicUsize>) -> ViewRegistry {
        let mut registry = ViewRegistry::new();
        for (name, _, _) in STUDENT_ROUTES {
            registry.register(
                name,
                Box::new(StubFactory {
                    name: name.to_string(),
                    created: Arc::clone(created),
                }),
            );
        }
        registry
    }

    fn table() -> RouteTable {
        student_routes(stub_views(&Arc::new(AtomicUsize::new(0)))).unwrap()
    }

    fn stub(name: &str) -> StubFactory {
        StubFactory {
            name: name.to_string(),
            created: Arc::new(AtomicUsize::new(0)),
        }
    }

    #[test]
    fn test_each_declared_path_resolves_to_its_route() {
        let table = table();
        let cases = [
            ("/", "home"),
            ("/students", "students"),
            ("/students/create", "student-create"),
            ("/students/42", "student-detail"),
            ("/students/42/edit", "student-edit"),
            ("/students/42/delete", "student-delete"),
        ];

        for (path, expected) in cases {
            let resolution = table.resolve(path);
            assert_eq!(resolution.matched.route.name.as_str(), expected, "path {path}");
            assert!(resolution.redirected_from.is_none(), "path {path}");
        }
    }

    #[test]
    fn test_create_wins_over_detail() {
        let table = table();
        let matched = table.match_path("/students/create").unwrap();
        assert_eq!(matched.route.name.as_str(), names::STUDENT_CREATE);
        assert!(matched.params.is_empty());
    }

    #[test]
    fn test_params_are_captured() {
        let table = table();
        let matched = table.match_path("/students/abc-9/edit").unwrap();
        assert_eq!(matched.params.get("id").map(String::as_str), Some("abc-9"));
    }

    #[test]
    fn test_unmatched_paths_redirect_home() {
        let table = table();
        for path in ["/nope", "/students/1/edit/extra", "/teachers/1", "/students/1/grades"] {
            let resolution = table.resolve(path);
            assert_eq!(resolution.matched.route.name.as_str(), names::HOME, "path {path}");
            assert_eq!(resolution.matched.path, "/");
            assert_eq!(resolution.redirected_from.as_deref(), Some(path));
        }
    }

    #[test]
    fn test_query_fragment_and_trailing_slash_ignored() {
        let table = table();
        assert_eq!(
            table.resolve("/students/?page=2").matched.route.name.as_str(),
            names::STUDENTS
        );
        assert_eq!(
            table.resolve("/students/7#notes").matched.route.name.as_str(),
            names::STUDENT_DETAIL
        );
    }

    #[test]
    fn test_titles_attached() {
        let table = table();
        assert_eq!(table.get("students").unwrap().title(), Some("Students"));
        assert_eq!(
            table.get("student-delete").unwrap().title(),
            Some("Delete Student")
        );
        assert_eq!(table.len(), 6);
        assert_eq!(table.fallback_target(), "/");
    }

    #[test]
    fn test_views_are_not_loaded_by_construction() {
        let created = Arc::new(AtomicUsize::new(0));
        let table = student_routes(stub_views(&created)).unwrap();
        table.resolve("/students/1");
        assert_eq!(created.load(Ordering::SeqCst), 0);
        assert!(table.routes().all(|route| !route.view.is_loaded()));
    }

    #[test]
    fn test_href_builds_paths() {
        let table = table();
        let params = Params::from([("id".to_string(), "7".to_string())]);
        assert_eq!(table.href("student-edit", &params).unwrap(), "/students/7/edit");
        assert_eq!(table.href("home", &Params::new()).unwrap(), "/");
        assert_eq!(
            table.href("student-detail", &Params::new()),
            Err(RouterError::MissingParam {
                route: "student-detail".to_string(),
                param: "id".to_string()
            })
        );
        assert_eq!(
            table.href("nope", &Params::new()),
            Err(RouterError::RouteNotFound("nope".to_string()))
        );
    }

    #[test]
    fn test_href_round_trips_through_resolve() {
        let table = table();
        for id in ["7", "a/b", "a b", "100%", "é"] {
            let params = Params::from([("id".to_string(), id.to_string())]);
            for name in ["student-detail", "student-edit", "student-delete"] {
                let location = table.href(name, &params).unwrap();
                let resolution = table.resolve(&location);
                assert!(resolution.redirected_from.is_none(), "{location} redirected");
                assert_eq!(resolution.matched.route.name.as_str(), name);
                assert_eq!(resolution.matched.params, params);
            }
        }
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = RouteTable::builder()
            .route(Route::new("home", "/", stub("a")))
            .route(Route::new("home", "/other", stub("b")))
            .build();
        assert_eq!(result.unwrap_err(), RouterError::DuplicateName("home".to_string()));
    }

    #[test]
    fn test_duplicate_paths_rejected() {
        let result = RouteTable::builder()
            .route(Route::new("home", "/", stub("a")))
            .route(Route::new("one", "/students/:id", stub("b")))
            .route(Route::new("two", "/students/:sid", stub("c")))
            .build();
        assert_eq!(
            result.unwrap_err(),
            RouterError::DuplicatePath("/students/:sid".to_string())
        );
    }

    #[test]
    fn test_fallback_must_resolve() {
        let result = RouteTable::builder()
            .route(Route::new("students", "/students", stub("a")))
            .build();
        assert_eq!(
            result.unwrap_err(),
            RouterError::FallbackUnresolved("/".to_string())
        );

        let table = RouteTable::builder()
            .route(Route::new("students", "/students", stub("a")))
            .fallback_redirect("/students")
            .build()
            .unwrap();
        assert_eq!(
            table.resolve("/x").matched.route.name.as_str(),
            "students"
        );
    }

    #[test]
    fn test_catch_all_route_rejected() {
        let result = RouteTable::builder()
            .route(Route::new("home", "/", stub("a")))
            .route(Route::new("any", "/:pathMatch(.*)*", stub("b")))
            .build();
        assert!(matches!(result, Err(RouterError::InvalidPattern { .. })));
    }

    #[test]
    fn test_empty_table_rejected() {
        assert_eq!(
            RouteTable::builder().build().unwrap_err(),
            RouterError::NoRoutes
        );
    }

    #[test]
    fn test_missing_view_rejected() {
        let mut views = stub_views(&Arc::new(AtomicUsize::new(0)));
        views.take("student-edit");
        assert_eq!(
            student_routes(views).unwrap_err(),
            RouterError::MissingView("student-edit".to_string())
        );
    }
}
