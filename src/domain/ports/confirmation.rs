//! Upload Confirmation Port
//!
//! The single point where a run waits for the user. Implementations can be
//! interactive (prompting) or automatic (`--yes`, non-interactive defaults).

use crate::domain::entities::Manifest;
use crate::error::SyncResult;

/// Decides whether a packaged manifest should be uploaded.
pub trait UploadConfirmation {
    fn confirm_upload(&self, manifest: &Manifest) -> SyncResult<bool>;
}

/// Always confirms. Use this when `--yes` is passed.
pub struct AssumeYes;

impl UploadConfirmation for AssumeYes {
    fn confirm_upload(&self, _manifest: &Manifest) -> SyncResult<bool> {
        Ok(true)
    }
}

/// Always declines. Used when no one can be asked.
pub struct AssumeNo;

impl UploadConfirmation for AssumeNo {
    fn confirm_upload(&self, _manifest: &Manifest) -> SyncResult<bool> {
        Ok(false)
    }
}
