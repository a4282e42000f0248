//! Interactive upload confirmation

use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use git_remote_sync::domain::ports::UploadConfirmation;
use git_remote_sync::{Manifest, SyncError, SyncResult};

use crate::ui::console::short_revision;

/// Entries listed before the prompt; the rest are summarized
const MAX_LISTED: usize = 20;

/// Lists the package contents and asks before uploading.
///
/// Defaults to "no"; Esc or Ctrl-C also decline.
pub struct DialoguerConfirmer;

impl UploadConfirmation for DialoguerConfirmer {
    fn confirm_upload(&self, manifest: &Manifest) -> SyncResult<bool> {
        eprint!("{}", render_listing(manifest));

        let answer = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Upload {} file(s) to the server?", manifest.len()))
            .default(false)
            .interact_opt()
            .map_err(|e| SyncError::Io(std::io::Error::other(e)))?;

        Ok(answer.unwrap_or(false))
    }
}

fn render_listing(manifest: &Manifest) -> String {
    let mut out = format!(
        "Package from revision {}:\n",
        short_revision(manifest.source_revision())
    );
    for entry in manifest.entries().take(MAX_LISTED) {
        out.push_str(&format!("  #{} {}\n", entry.number, entry.target));
    }
    if manifest.len() > MAX_LISTED {
        out.push_str(&format!("  ... and {} more\n", manifest.len() - MAX_LISTED));
    }
    out
}
