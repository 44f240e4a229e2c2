//! Views and their lazy loading
//!
//! A route never holds a constructed view. It holds a [`ViewFactory`] wrapped
//! in a [`LazyView`], which instantiates the view on the first navigation to
//! that route and reuses it afterwards.

use crate::api::{SharedTransport, StudentApi};
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::debug;

use super::navigator::Navigation;

/// Everything a view may use while rendering
pub struct ViewContext<'a> {
    /// Shared Student API client
    pub api: &'a StudentApi<SharedTransport>,
    /// The navigation that selected this view
    pub navigation: &'a Navigation,
    /// Optional payload supplied by the shell, e.g. form data for create/edit
    pub input: Option<&'a Value>,
}

impl<'a> ViewContext<'a> {
    pub fn new(api: &'a StudentApi<SharedTransport>, navigation: &'a Navigation) -> Self {
        Self {
            api,
            navigation,
            input: None,
        }
    }

    pub fn with_input(mut self, input: Option<&'a Value>) -> Self {
        self.input = input;
        self
    }

    /// Captured route parameter
    pub fn param(&self, name: &str) -> Option<&str> {
        self.navigation.params.get(name).map(String::as_str)
    }
}

/// What a view produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    /// Text to display
    pub body: String,
    /// Location the shell should navigate to next, if any
    pub next: Option<String>,
}

impl Rendered {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            next: None,
        }
    }

    /// Ask the shell to continue to `location` after displaying this
    pub fn then_navigate(mut self, location: impl Into<String>) -> Self {
        self.next = Some(location.into());
        self
    }
}

/// A display handler bound to a route.
///
/// Loading and error presentation for in-flight requests is up to each view.
#[async_trait]
pub trait View: Send + Sync {
    async fn render(&self, ctx: &ViewContext<'_>) -> Result<Rendered>;
}

/// Factory trait for creating views on demand
pub trait ViewFactory: Send + Sync {
    /// Create a new instance of the view
    fn create(&self) -> Box<dyn View>;

    /// Name of the view this factory creates
    fn view_name(&self) -> &str;
}

/// Macro to help implement view factories
#[macro_export]
macro_rules! impl_view_factory {
    ($factory:ident, $view:ident, $name:expr) => {
        pub struct $factory;

        impl $crate::router::ViewFactory for $factory {
            fn create(&self) -> Box<dyn $crate::router::View> {
                Box::new($view::new())
            }

            fn view_name(&self) -> &str {
                $name
            }
        }
    };
}

/// A view that is instantiated at most once, on first use
pub struct LazyView {
    factory: Box<dyn ViewFactory>,
    instance: OnceLock<Arc<dyn View>>,
}

impl LazyView {
    pub fn new(factory: impl ViewFactory + 'static) -> Self {
        Self::from_boxed(Box::new(factory))
    }

    pub fn from_boxed(factory: Box<dyn ViewFactory>) -> Self {
        Self {
            factory,
            instance: OnceLock::new(),
        }
    }

    /// Name of the wrapped view
    pub fn name(&self) -> &str {
        self.factory.view_name()
    }

    /// Whether the view has been instantiated yet
    pub fn is_loaded(&self) -> bool {
        self.instance.get().is_some()
    }

    /// Get the view, instantiating it on first call
    pub fn load(&self) -> Arc<dyn View> {
        Arc::clone(self.instance.get_or_init(|| {
            debug!(view = self.factory.view_name(), "Loading view");
            Arc::from(self.factory.create())
        }))
    }
}

impl fmt::Debug for LazyView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyView")
            .field("name", &self.name())
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

/// Registry mapping route names to view factories
#[derive(Default)]
pub struct ViewRegistry {
    factories: HashMap<String, Box<dyn ViewFactory>>,
}

impl ViewRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the factory for a route
    pub fn register(&mut self, route: impl Into<String>, factory: Box<dyn ViewFactory>) {
        self.factories.insert(route.into(), factory);
    }

    /// Builder-style registration
    pub fn with(mut self, route: impl Into<String>, factory: impl ViewFactory + 'static) -> Self {
        self.register(route, Box::new(factory));
        self
    }

    /// Remove and return the factory for a route
    pub fn take(&mut self, route: &str) -> Option<Box<dyn ViewFactory>> {
        self.factories.remove(route)
    }

    /// Route names that have a factory
    pub fn routes(&self) -> Vec<&str> {
        self.factories.keys().map(|s| s.as_str()).collect()
    }
}
