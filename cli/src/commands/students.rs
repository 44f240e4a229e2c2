//! Direct Student API access, bypassing the pages

use super::{connect, parse_data};
use crate::pages::format::student_list;
use anyhow::{anyhow, Result};
use clap::Subcommand;
use futures::future::try_join_all;
use serde_json::Value;
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum StudentsAction {
    /// List all students
    List,
    /// Fetch one or more students by id
    Get {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Create a student from a JSON payload
    Create {
        /// Student payload, e.g. '{"name":"Ann"}'
        data: String,
    },
    /// Replace a student's fields
    Update { id: String, data: String },
    /// Delete a student
    Delete { id: String },
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn payload(raw: &str) -> Result<Value> {
    parse_data(Some(raw))?.ok_or_else(|| anyhow!("missing payload"))
}

/// Run a students subcommand
pub async fn students_command(
    config_loader: crate::config::CliConfigLoader,
    action: StudentsAction,
) -> Result<()> {
    let (_, api) = connect(&config_loader).await?;

    match action {
        StudentsAction::List => {
            let body = api.list_students().await?;
            if let Some(students) = student_list(&body) {
                info!(count = students.len(), "Fetched students");
            }
            print_json(&body)
        }
        StudentsAction::Get { ids } => {
            // Independent requests, issued together
            let students = try_join_all(ids.iter().map(|id| api.get_student(id.as_str()))).await?;
            for student in &students {
                print_json(student)?;
            }
            Ok(())
        }
        StudentsAction::Create { data } => print_json(&api.create_student(&payload(&data)?).await?),
        StudentsAction::Update { id, data } => {
            print_json(&api.update_student(id.as_str(), &payload(&data)?).await?)
        }
        StudentsAction::Delete { id } => {
            api.delete_student(id.as_str()).await?;
            println!("Deleted student {id}");
            Ok(())
        }
    }
}
