//! Single-location command

use super::{connect, parse_data, terminal_shell};
use crate::config::CliConfigLoader;
use anyhow::Result;

/// Open one location, print what it rendered and any follow-up pages
pub async fn open_command(
    config_loader: CliConfigLoader,
    location: String,
    data: Option<String>,
) -> Result<()> {
    let input = parse_data(data.as_deref())?;
    let (config, api) = connect(&config_loader).await?;
    let mut shell = terminal_shell(&config, api, false)?;

    for visit in shell.open(&location, input.as_ref()).await? {
        visit.print();
        println!();
    }

    Ok(())
}
