//! Interactive mode command

use super::{connect, parse_data, routes_command, terminal_shell};
use crate::config::CliConfigLoader;
use crate::document::TerminalDocument;
use crate::shell::{Shell, Visit};
use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

const HELP: &str = "\
  <path> [json]   open a page, optionally with form data
  back            return to the previous page
  routes          list all routes
  help            show this message
  quit | exit     leave";

/// One line typed at the prompt
#[derive(Debug, PartialEq)]
enum Input<'a> {
    Empty,
    Quit,
    Back,
    Routes,
    Help,
    Open { location: &'a str, data: Option<&'a str> },
}

fn parse_line(line: &str) -> Input<'_> {
    let line = line.trim();
    match line {
        "" => Input::Empty,
        "quit" | "exit" => Input::Quit,
        "back" => Input::Back,
        "routes" => Input::Routes,
        "help" | "?" => Input::Help,
        _ => match line.split_once(char::is_whitespace) {
            Some((location, data)) => Input::Open {
                location,
                data: Some(data.trim()),
            },
            None => Input::Open {
                location: line,
                data: None,
            },
        },
    }
}

fn show(visits: &[Visit]) {
    for visit in visits {
        visit.print();
        println!();
    }
}

fn prompt() {
    print!("{} ", "studentdesk>".bold());
    let _ = std::io::stdout().flush();
}

async fn handle(
    shell: &mut Shell<TerminalDocument>,
    location: &str,
    data: Option<&str>,
) -> Result<()> {
    let input = parse_data(data)?;
    let visits = shell.open(location, input.as_ref()).await?;
    show(&visits);
    Ok(())
}

/// Start interactive mode
pub async fn interactive_command(config_loader: CliConfigLoader) -> Result<()> {
    let (config, api) = connect(&config_loader).await?;
    let mut shell = terminal_shell(&config, api, true)?;

    show(&shell.open("/", None).await?);
    println!("{}", "Type `help` for commands.".dimmed());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt();
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let result = match parse_line(&line) {
            Input::Empty => Ok(()),
            Input::Quit => break,
            Input::Help => {
                println!("{HELP}");
                Ok(())
            }
            Input::Routes => routes_command().await,
            Input::Back => match shell.back().await {
                Ok(Some(visits)) => {
                    show(&visits);
                    Ok(())
                }
                Ok(None) => {
                    println!("{}", "Nothing to go back to.".dimmed());
                    Ok(())
                }
                Err(e) => Err(e.into()),
            },
            Input::Open { location, data } => handle(&mut shell, location, data).await,
        };

        if let Err(e) = result {
            debug!("Command failed: {:?}", e);
            println!("{} {}", "✗".red(), e);
        }
    }

    println!("Goodbye!");
    Ok(())
}
