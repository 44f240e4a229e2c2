//! Student list page

use super::format::{failure, heading, student_id, student_label, student_list};
use async_trait::async_trait;
use studentdesk_core::impl_view_factory;
use studentdesk_core::router::{Rendered, View, ViewContext};
use studentdesk_core::Result;

pub struct StudentsPage;

impl StudentsPage {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl View for StudentsPage {
    async fn render(&self, ctx: &ViewContext<'_>) -> Result<Rendered> {
        let body = match ctx.api.list_students().await {
            Ok(body) => body,
            Err(e) => return Ok(Rendered::new(failure("Could not load students", &e))),
        };
        let Some(students) = student_list(&body) else {
            return Ok(Rendered::new(format!("Unrecognised student list: {body}")));
        };

        if students.is_empty() {
            return Ok(Rendered::new("No students yet. Create one at /students/create"));
        }

        let mut lines = vec![heading(&format!("Students ({})", students.len()))];
        for student in students {
            let id = student_id(student).unwrap_or_else(|| "?".to_string());
            lines.push(format!("  {:>6}  {}", format!("#{id}"), student_label(student)));
        }
        lines.push(String::new());
        lines.push("Open /students/<id> for details".to_string());

        Ok(Rendered::new(lines.join("\n")))
    }
}

impl_view_factory!(StudentsPageFactory, StudentsPage, "StudentsPage");
