//! # studentdesk CLI
//!
//! Terminal front-end for the Student Management REST service.
//!
//! ## Usage
//!
//! - `studentdesk` - Start interactive mode
//! - `studentdesk open /students/3` - Render a single page
//! - `studentdesk open /students/create --data '{"name":"Ann"}'` - Submit a page
//! - `studentdesk students list` - Call the API directly
//! - `studentdesk routes` - Show the route table

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod document;
mod pages;
mod shell;

use commands::{
    interactive_command, open_command, routes_command, students_command, StudentsAction,
};
use config::CliConfigLoader;

/// studentdesk - browse and edit students from the terminal
#[derive(Parser)]
#[command(name = "studentdesk")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Browse and edit students through the Student Management API")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file or directory path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL override
    #[arg(long)]
    base_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the route table
    Routes,

    /// Open a location and print what it renders
    Open {
        /// Location, e.g. /students/3/edit
        location: String,

        /// JSON form data handed to the page
        #[arg(short, long)]
        data: Option<String>,
    },

    /// Call the Student API directly
    Students {
        #[command(subcommand)]
        action: StudentsAction,
    },
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli) -> CliConfigLoader {
    let mut loader = CliConfigLoader::new();

    if let Some(config_path) = &cli.config {
        loader = loader.with_config_override(config_path.clone());
    }

    if let Some(base_url) = &cli.base_url {
        loader = loader.with_base_url_override(base_url.clone());
    }

    loader
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    studentdesk_core::init_tracing_with_debug(cli.verbose);

    let config_loader = build_config_loader(&cli);

    match cli.command {
        Some(Commands::Routes) => routes_command().await,
        Some(Commands::Open { location, data }) => {
            open_command(config_loader, location, data).await
        }
        Some(Commands::Students { action }) => students_command(config_loader, action).await,
        None => interactive_command(config_loader).await,
    }
}
