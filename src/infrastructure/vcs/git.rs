//! Git CLI adapter
//!
//! Shells out to `git` in the repository directory. Paths are requested
//! NUL-separated (`-z`) so names with spaces or non-ASCII characters come back
//! verbatim instead of quoted. Revision arguments follow `--end-of-options`
//! so a value starting with `-` is never read as a flag.

use std::path::Path;
use std::process::{Command, Output, Stdio};

use crate::domain::ports::VersionControl;
use crate::error::{SyncError, SyncResult};

/// `VersionControl` backed by the `git` executable on `PATH`
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl GitCli {
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
        }
    }

    /// Use a specific git executable
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Check if the git executable can be started
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn run(&self, repo: &Path, args: &[&str]) -> SyncResult<Output> {
        let command = self.describe(args);
        tracing::debug!(repo = %repo.display(), %command, "running git");

        Command::new(&self.program)
            .args(args)
            .current_dir(repo)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| SyncError::VcsInvocation {
                command,
                stderr: e.to_string(),
            })
    }

    /// Run and require a zero exit status
    fn run_checked(&self, repo: &Path, args: &[&str]) -> SyncResult<Vec<u8>> {
        let output = self.run(repo, args)?;
        if !output.status.success() {
            return Err(SyncError::VcsInvocation {
                command: self.describe(args),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output.stdout)
    }

    fn describe(&self, args: &[&str]) -> String {
        let mut command = self.program.clone();
        for arg in args {
            command.push(' ');
            command.push_str(arg);
        }
        command
    }
}

impl VersionControl for GitCli {
    fn changed_files(&self, repo: &Path, from: &str, to: &str) -> SyncResult<Vec<String>> {
        let stdout = self.run_checked(
            repo,
            &["diff", "--name-only", "-z", "--end-of-options", from, to, "--"],
        )?;
        Ok(parse_name_list(&stdout))
    }

    fn resolve_revision(&self, repo: &Path, alias: &str) -> SyncResult<String> {
        let spec = format!("{}^{{commit}}", alias);
        let args = ["rev-parse", "--verify", "--quiet", "--end-of-options", &spec];
        let stdout = self.run_checked(repo, &args)?;
        let hash = String::from_utf8_lossy(&stdout).trim().to_string();
        if hash.is_empty() {
            return Err(SyncError::VcsInvocation {
                command: self.describe(&args),
                stderr: format!("unknown revision '{}'", alias),
            });
        }
        Ok(hash)
    }

    fn show_file(&self, repo: &Path, revision: &str, path: &str) -> SyncResult<Option<Vec<u8>>> {
        let object = format!("{}:{}", revision, path);
        let output = self.run(repo, &["show", "--end-of-options", &object])?;

        if output.status.success() {
            Ok(Some(output.stdout))
        } else {
            tracing::debug!(
                %object,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "path not present at revision"
            );
            Ok(None)
        }
    }
}

/// Split `-z` output into paths
///
/// Names that are not valid UTF-8 cannot be addressed on the remote, so they
/// are dropped with a warning rather than reported as deleted later.
fn parse_name_list(stdout: &[u8]) -> Vec<String> {
    stdout
        .split(|b| *b == 0)
        .filter(|name| !name.is_empty())
        .filter_map(|name| match std::str::from_utf8(name) {
            Ok(name) => Some(name.to_string()),
            Err(_) => {
                tracing::warn!(
                    path = %String::from_utf8_lossy(name),
                    "skipping changed path that is not valid UTF-8"
                );
                None
            }
        })
        .collect()
}
