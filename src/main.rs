//! git-remote-sync CLI
//!
//! Usage: git-remote-sync [COMMAND]
//!
//! Commands:
//!   package  Package the files changed between two revisions
//!   upload   Upload the existing package
//!   run      Package the changes, then upload them
//!
//! Without a command, an interactive menu is shown.

mod cli;
mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;
use git_remote_sync::RevisionRequest;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    git_remote_sync::telemetry::init_tracing(cli.verbose, cli.json);

    let json = cli.json;
    if let Err(err) = dispatch(cli) {
        ui::error::print_error(&err, json);
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<()> {
    let package_dir = cli.package_dir.as_path();
    match cli.command {
        Some(Commands::Package { config, from, to }) => commands::package::cmd_package(
            &config,
            package_dir,
            RevisionRequest { from, to: Some(to) },
            cli.json,
            cli.verbose,
        ),
        Some(Commands::Upload { config, yes }) => {
            commands::upload::cmd_upload(&config, package_dir, yes, cli.json, cli.verbose)
        }
        Some(Commands::Run {
            config,
            from,
            to,
            yes,
        }) => commands::run::cmd_run(
            &config,
            package_dir,
            RevisionRequest { from, to: Some(to) },
            yes,
            cli.json,
            cli.verbose,
        ),
        None => commands::interactive::cmd_interactive(package_dir, cli.json, cli.verbose),
    }
}
