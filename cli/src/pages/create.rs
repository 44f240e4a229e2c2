//! Student creation page

use super::format::{failure, heading, student_id};
use async_trait::async_trait;
use studentdesk_core::impl_view_factory;
use studentdesk_core::router::{Rendered, View, ViewContext};
use studentdesk_core::Result;

pub struct StudentCreatePage;

impl StudentCreatePage {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl View for StudentCreatePage {
    async fn render(&self, ctx: &ViewContext<'_>) -> Result<Rendered> {
        let Some(payload) = ctx.input else {
            return Ok(Rendered::new(format!(
                "{}\n  Supply the new student as JSON, e.g. --data '{{\"name\":\"Ann\"}}'",
                heading("Create Student")
            )));
        };

        match ctx.api.create_student(payload).await {
            Ok(created) => Ok(match student_id(&created) {
                Some(id) => Rendered::new(format!("Created student #{id}"))
                    .then_navigate(format!("/students/{id}")),
                None => Rendered::new("Created student").then_navigate("/students"),
            }),
            Err(e) => Ok(Rendered::new(failure("Could not create student", &e))),
        }
    }
}

impl_view_factory!(StudentCreatePageFactory, StudentCreatePage, "StudentCreatePage");
