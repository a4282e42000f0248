use std::path::Path;

use anyhow::Result;
use git_remote_sync::{PackageSummary, RevisionRequest};

use crate::ui::console::short_revision;

pub fn cmd_package(
    config: &Path,
    package_dir: &Path,
    request: RevisionRequest,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let pipeline = super::build_pipeline(config, package_dir, super::event_sink("package", json, verbose))?;
    let summary = pipeline.package(&request)?;

    if !json {
        print_package_hint(&summary);
    }
    Ok(())
}

pub(crate) fn print_package_hint(summary: &PackageSummary) {
    if summary.manifest.is_empty() {
        println!(
            "No files to deploy between {} and {}.",
            short_revision(&summary.from),
            short_revision(&summary.to)
        );
    } else {
        println!("Run `git-remote-sync upload` to deploy the package.");
    }
}
