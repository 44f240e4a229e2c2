//! Landing page

use super::format::heading;
use async_trait::async_trait;
use studentdesk_core::impl_view_factory;
use studentdesk_core::router::{Rendered, View, ViewContext};
use studentdesk_core::Result;

pub struct LandingPage;

impl LandingPage {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl View for LandingPage {
    async fn render(&self, _ctx: &ViewContext<'_>) -> Result<Rendered> {
        let body = [
            heading("Welcome to the Student Management System"),
            String::new(),
            "  /students           browse all students".to_string(),
            "  /students/create    register a new student".to_string(),
        ]
        .join("\n");
        Ok(Rendered::new(body))
    }
}

impl_view_factory!(LandingPageFactory, LandingPage, "LandingPage");
