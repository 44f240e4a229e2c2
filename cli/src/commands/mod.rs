//! CLI command implementations

pub mod interactive;
pub mod open;
pub mod routes;
pub mod students;

pub use interactive::interactive_command;
pub use open::open_command;
pub use routes::routes_command;
pub use students::{students_command, StudentsAction};

use crate::config::CliConfigLoader;
use crate::document::TerminalDocument;
use crate::pages;
use crate::shell::Shell;
use anyhow::{Context, Result};
use std::sync::Arc;
use studentdesk_core::router::{student_routes, Navigator};
use studentdesk_core::{AppConfig, HttpTransport, SharedTransport, StudentApi};
use tracing::debug;

/// Load configuration and build the shared API client
pub async fn connect(
    loader: &CliConfigLoader,
) -> Result<(AppConfig, StudentApi<SharedTransport>)> {
    let config = loader.load().await?;
    debug!(base_url = %config.api.base_url, "Using Student API");

    let transport: SharedTransport = Arc::new(HttpTransport::new()?);
    let api = StudentApi::with_transport(&config.api, transport)
        .context("Failed to create Student API client")?;
    Ok((config, api))
}

/// Build the route table once and wrap it in a terminal shell
pub fn terminal_shell(
    config: &AppConfig,
    api: StudentApi<SharedTransport>,
    clear_on_navigate: bool,
) -> Result<Shell<TerminalDocument>> {
    let table = student_routes(pages::registry()).context("Invalid route table")?;
    let navigator = Navigator::new(Arc::new(table), TerminalDocument::new(clear_on_navigate))
        .with_app_name(config.app_name.clone());
    Ok(Shell::new(navigator, api))
}

/// Parse a `--data` argument
pub fn parse_data(data: Option<&str>) -> Result<Option<serde_json::Value>> {
    data.map(|raw| serde_json::from_str(raw).context("--data is not valid JSON"))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_data() {
        assert_eq!(parse_data(None).unwrap(), None);
        assert_eq!(
            parse_data(Some(r#"{"confirm":true}"#)).unwrap(),
            Some(serde_json::json!({"confirm": true}))
        );
        assert!(parse_data(Some("{oops")).is_err());
    }
}
