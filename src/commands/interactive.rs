//! Interactive menu, used when no subcommand is given

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use git_remote_sync::{DeploymentConfig, RevisionRequest, UploadOutcome};

use crate::cli::DEFAULT_CONFIG_FILE;
use crate::ui::confirm::DialoguerConfirmer;
use crate::ui::icon::Icon;

const MENU_ITEMS: &[&str] = &[
    "[1] Package changes",
    "[2] Upload existing package",
    "[3] Package and upload",
    "[4] Exit",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Package,
    Upload,
    Run,
    Exit,
}

fn action_for(selection: Option<usize>) -> MenuAction {
    match selection {
        Some(0) => MenuAction::Package,
        Some(1) => MenuAction::Upload,
        Some(2) => MenuAction::Run,
        _ => MenuAction::Exit,
    }
}

pub fn cmd_interactive(package_dir: &Path, json: bool, verbose: u8) -> Result<()> {
    if json {
        bail!("the interactive menu is not available with --json; use a subcommand");
    }
    if !crate::ui::terminal::can_prompt() {
        println!("No command provided.");
        println!("Try: `git-remote-sync run` or `git-remote-sync --help`");
        return Ok(());
    }

    let caps = crate::ui::terminal::detect_capabilities();
    println!(
        "{} git-remote-sync\n",
        Icon::Package.colored(caps.supports_color, caps.supports_unicode)
    );

    let theme = ColorfulTheme::default();
    let config: String = Input::with_theme(&theme)
        .with_prompt("Config file")
        .default(DEFAULT_CONFIG_FILE.to_string())
        .interact_text()?;
    let config = PathBuf::from(config.trim());

    loop {
        let selection = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(MENU_ITEMS)
            .default(0)
            .interact_opt()?;

        let result = match action_for(selection) {
            MenuAction::Package => prompt_revisions(&theme, &config)
                .and_then(|request| run_package(&config, package_dir, request, verbose)),
            MenuAction::Upload => run_upload(&config, package_dir, verbose),
            MenuAction::Run => prompt_revisions(&theme, &config)
                .and_then(|request| run_full(&config, package_dir, request, verbose)),
            MenuAction::Exit => return Ok(()),
        };

        if let Err(err) = result {
            crate::ui::error::print_error(&err, false);
        }
        println!();
    }
}

/// Ask for the revision range, offering the recorded revision and `HEAD`
fn prompt_revisions(theme: &ColorfulTheme, config: &Path) -> Result<RevisionRequest> {
    // A broken config is reported by the pipeline itself.
    let recorded = DeploymentConfig::load(config)
        .ok()
        .and_then(|c| c.repo.last_synced_revision);

    let mut earlier = Input::<String>::with_theme(theme)
        .with_prompt("Earlier revision")
        .allow_empty(true);
    if let Some(recorded) = recorded {
        earlier = earlier.default(recorded);
    }
    let from = earlier.interact_text()?;

    let to = Input::<String>::with_theme(theme)
        .with_prompt("Present revision")
        .default("HEAD".to_string())
        .allow_empty(true)
        .interact_text()?;

    Ok(RevisionRequest {
        from: Some(from),
        to: Some(to),
    })
}

fn run_package(config: &Path, package_dir: &Path, request: RevisionRequest, verbose: u8) -> Result<()> {
    super::package::cmd_package(config, package_dir, request, false, verbose)
}

fn run_upload(config: &Path, package_dir: &Path, verbose: u8) -> Result<()> {
    let pipeline = super::build_pipeline(config, package_dir, super::event_sink("upload", false, verbose))?;
    if pipeline.upload(&DialoguerConfirmer)? == UploadOutcome::NothingToUpload {
        println!("The package is empty, nothing to upload.");
    }
    Ok(())
}

fn run_full(config: &Path, package_dir: &Path, request: RevisionRequest, verbose: u8) -> Result<()> {
    let pipeline = super::build_pipeline(config, package_dir, super::event_sink("run", false, verbose))?;
    let report = pipeline.run(&request, &DialoguerConfirmer)?;
    if report.package.manifest.is_empty() {
        super::package::print_package_hint(&report.package);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_selection_maps_to_actions() {
        assert_eq!(action_for(Some(0)), MenuAction::Package);
        assert_eq!(action_for(Some(1)), MenuAction::Upload);
        assert_eq!(action_for(Some(2)), MenuAction::Run);
        assert_eq!(action_for(Some(3)), MenuAction::Exit);
        assert_eq!(action_for(None), MenuAction::Exit);
    }

    #[test]
    fn menu_has_an_entry_per_action() {
        assert_eq!(MENU_ITEMS.len(), 4);
        assert!(MENU_ITEMS[3].contains("Exit"));
    }
}
