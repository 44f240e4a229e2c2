//! Student detail page

use super::format::{describe, failure, heading, is_not_found, student_label};
use async_trait::async_trait;
use studentdesk_core::impl_view_factory;
use studentdesk_core::router::{Rendered, View, ViewContext};
use studentdesk_core::{Error, Result};

pub struct StudentDetailPage;

impl StudentDetailPage {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl View for StudentDetailPage {
    async fn render(&self, ctx: &ViewContext<'_>) -> Result<Rendered> {
        let id = ctx
            .param("id")
            .ok_or_else(|| Error::View("route has no :id parameter".to_string()))?;

        match ctx.api.get_student(id).await {
            Ok(student) => Ok(Rendered::new(format!(
                "{}\n{}\n\n  edit:   /students/{id}/edit\n  delete: /students/{id}/delete",
                heading(&student_label(&student)),
                describe(&student),
            ))),
            Err(e) if is_not_found(&e) => {
                Ok(Rendered::new(format!("Student {id} was not found.")))
            }
            Err(e) => Ok(Rendered::new(failure("Could not load student", &e))),
        }
    }
}

impl_view_factory!(StudentDetailPageFactory, StudentDetailPage, "StudentDetailPage");
