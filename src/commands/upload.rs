use std::path::Path;

use anyhow::Result;
use git_remote_sync::UploadOutcome;

pub fn cmd_upload(config: &Path, package_dir: &Path, yes: bool, json: bool, verbose: u8) -> Result<()> {
    let pipeline = super::build_pipeline(config, package_dir, super::event_sink("upload", json, verbose))?;
    let confirm = super::confirmer(yes, json);

    let outcome = pipeline.upload(confirm.as_ref())?;

    if !json && outcome == UploadOutcome::NothingToUpload {
        println!("The package is empty, nothing to upload.");
    }
    Ok(())
}
