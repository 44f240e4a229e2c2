//! Shell: navigates, renders the selected view and follows the view's
//! requested next location

use colored::Colorize;
use serde_json::Value;
use studentdesk_core::router::{Document, Navigation, Navigator, Rendered, ViewContext};
use studentdesk_core::{Result, SharedTransport, StudentApi};
use tracing::{debug, warn};

/// How many view-requested follow-up navigations one `open` may take
pub const MAX_FOLLOW: usize = 5;

/// One navigation plus what its view rendered
#[derive(Debug, Clone)]
pub struct Visit {
    pub navigation: Navigation,
    pub rendered: Rendered,
}

impl Visit {
    /// Print this visit to stdout
    pub fn print(&self) {
        if let Some(from) = &self.navigation.redirected_from {
            println!(
                "{}",
                format!("↪ {} is not a page, showing {}", from, self.navigation.path).dimmed()
            );
        }
        if let Some(title) = &self.navigation.title {
            println!("{}", format!("── {title} ──").cyan());
        }
        println!("{}", self.rendered.body);
    }
}

/// Navigator plus the API client its views render against
pub struct Shell<D: Document> {
    navigator: Navigator<D>,
    api: StudentApi<SharedTransport>,
}

impl<D: Document> Shell<D> {
    pub fn new(navigator: Navigator<D>, api: StudentApi<SharedTransport>) -> Self {
        Self { navigator, api }
    }

    /// Open a location. `input` goes to the first view only; follow-ups
    /// requested through [`Rendered::next`] are rendered without it.
    pub async fn open(&mut self, location: &str, input: Option<&Value>) -> Result<Vec<Visit>> {
        let navigation = self.navigator.navigate(location);
        self.follow(navigation, input).await
    }

    /// Go back one location; `None` when there is no history
    pub async fn back(&mut self) -> Result<Option<Vec<Visit>>> {
        match self.navigator.back() {
            Some(navigation) => Ok(Some(self.follow(navigation, None).await?)),
            None => Ok(None),
        }
    }

    pub fn navigator(&self) -> &Navigator<D> {
        &self.navigator
    }

    async fn follow(&mut self, first: Navigation, input: Option<&Value>) -> Result<Vec<Visit>> {
        let mut visits = Vec::new();
        let mut navigation = first;
        let mut input = input;

        loop {
            let ctx = ViewContext::new(&self.api, &navigation).with_input(input);
            let rendered = navigation.view.render(&ctx).await?;
            let next = rendered.next.clone();
            visits.push(Visit {
                navigation,
                rendered,
            });

            let Some(next) = next else {
                break;
            };
            if visits.len() > MAX_FOLLOW {
                warn!(location = %next, "Too many follow-up navigations, stopping");
                break;
            }

            debug!(location = %next, "Following view redirect");
            navigation = self.navigator.navigate(&next);
            input = None;
        }

        Ok(visits)
    }
}
