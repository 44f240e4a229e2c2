//! Route table listing command

use crate::pages;
use anyhow::Result;
use colored::Colorize;
use studentdesk_core::router::student_routes;
use tracing::info;

/// Print every route with its path and title
pub async fn routes_command() -> Result<()> {
    info!("Listing routes");

    let table = student_routes(pages::registry())?;

    println!("{}\n", "Routes".bold());
    for route in table.routes() {
        println!(
            "  {:<16} {:<22} {}",
            route.name.as_str().green(),
            route.path,
            route.title().unwrap_or("-")
        );
    }
    println!(
        "\n  {:<16} {:<22} redirects to {}",
        "(anything else)".dimmed(),
        "*",
        table.fallback_target()
    );

    Ok(())
}
