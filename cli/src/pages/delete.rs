//! Student delete page

use super::format::{failure, heading, is_not_found, student_label};
use async_trait::async_trait;
use serde_json::Value;
use studentdesk_core::impl_view_factory;
use studentdesk_core::router::{Rendered, View, ViewContext};
use studentdesk_core::{Error, Result};

pub struct StudentDeletePage;

impl StudentDeletePage {
    pub fn new() -> Self {
        Self
    }
}

fn confirmed(input: &Value) -> bool {
    input.get("confirm").and_then(Value::as_bool).unwrap_or(false)
}

#[async_trait]
impl View for StudentDeletePage {
    async fn render(&self, ctx: &ViewContext<'_>) -> Result<Rendered> {
        let id = ctx
            .param("id")
            .ok_or_else(|| Error::View("route has no :id parameter".to_string()))?;

        match ctx.input {
            Some(input) if confirmed(input) => {
                return Ok(match ctx.api.delete_student(id).await {
                    Ok(()) => Rendered::new(format!("Deleted student #{id}"))
                        .then_navigate("/students"),
                    Err(e) => Rendered::new(failure("Could not delete student", &e)),
                });
            }
            Some(_) => {
                return Ok(Rendered::new("Deletion cancelled")
                    .then_navigate(format!("/students/{id}")));
            }
            None => {}
        }

        match ctx.api.get_student(id).await {
            Ok(student) => Ok(Rendered::new(format!(
                "{}\n  About to delete {}.\n  \
                 Re-open with --data '{{\"confirm\":true}}' to proceed",
                heading(&format!("Delete Student #{id}")),
                student_label(&student),
            ))),
            Err(e) if is_not_found(&e) => {
                Ok(Rendered::new(format!("Student {id} was not found.")))
            }
            Err(e) => Ok(Rendered::new(failure("Could not load student", &e))),
        }
    }
}

impl_view_factory!(StudentDeletePageFactory, StudentDeletePage, "StudentDeletePage");
