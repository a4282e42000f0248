use std::path::Path;

use anyhow::Result;
use git_remote_sync::RevisionRequest;

pub fn cmd_run(
    config: &Path,
    package_dir: &Path,
    request: RevisionRequest,
    yes: bool,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let pipeline = super::build_pipeline(config, package_dir, super::event_sink("run", json, verbose))?;
    let confirm = super::confirmer(yes, json);

    let report = pipeline.run(&request, confirm.as_ref())?;

    if !json && report.package.manifest.is_empty() {
        super::package::print_package_hint(&report.package);
    }
    Ok(())
}
