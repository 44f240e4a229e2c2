//! Student edit page

use super::format::{failure, heading, is_not_found};
use async_trait::async_trait;
use studentdesk_core::impl_view_factory;
use studentdesk_core::router::{Rendered, View, ViewContext};
use studentdesk_core::{Error, Result};

pub struct StudentEditPage;

impl StudentEditPage {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl View for StudentEditPage {
    async fn render(&self, ctx: &ViewContext<'_>) -> Result<Rendered> {
        let id = ctx
            .param("id")
            .ok_or_else(|| Error::View("route has no :id parameter".to_string()))?;

        if let Some(changes) = ctx.input {
            return Ok(match ctx.api.update_student(id, changes).await {
                Ok(_) => Rendered::new(format!("Saved student #{id}"))
                    .then_navigate(format!("/students/{id}")),
                Err(e) => Rendered::new(failure("Could not save student", &e)),
            });
        }

        // No changes supplied: show the current record as an editable template
        match ctx.api.get_student(id).await {
            Ok(current) => Ok(Rendered::new(format!(
                "{}\n{}\n\n  Re-open with --data '<json>' to save changes",
                heading(&format!("Edit Student #{id}")),
                serde_json::to_string_pretty(&current)?,
            ))),
            Err(e) if is_not_found(&e) => {
                Ok(Rendered::new(format!("Student {id} was not found.")))
            }
            Err(e) => Ok(Rendered::new(failure("Could not load student", &e))),
        }
    }
}

impl_view_factory!(StudentEditPageFactory, StudentEditPage, "StudentEditPage");
