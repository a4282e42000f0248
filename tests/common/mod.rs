//! Shared fixtures for integration tests.
//!
//! `TestEnv` owns a temp directory holding a git repository (`repo/`) and a
//! deployment config (`deploy.json`), and runs the CLI from that directory.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// Result of running the CLI
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for TestResult {
    fn from(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Whether a usable git binary is on PATH; tests that need git skip otherwise
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

pub struct TestEnv {
    pub root: TempDir,
}

impl TestEnv {
    /// Create an environment with an empty repository.
    pub fn new() -> Self {
        let env = Self {
            root: tempfile::tempdir().unwrap(),
        };
        fs::create_dir_all(env.repo()).unwrap();
        env.git(&["init", "-q"]);
        env
    }

    pub fn repo(&self) -> PathBuf {
        self.root.path().join("repo")
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn config_path(&self) -> PathBuf {
        self.path("deploy.json")
    }

    pub fn package_dir(&self) -> PathBuf {
        self.path("upload-package")
    }

    /// Run git in the repository and return trimmed stdout.
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args([
                "-c",
                "user.name=Test",
                "-c",
                "user.email=test@example.com",
                "-c",
                "commit.gpgsign=false",
            ])
            .args(args)
            .current_dir(self.repo())
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.repo().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn remove(&self, relative: &str) {
        fs::remove_file(self.repo().join(relative)).unwrap();
    }

    /// Stage everything and commit; returns the new commit hash.
    pub fn commit(&self, message: &str) -> String {
        self.git(&["add", "-A"]);
        self.git(&["commit", "-q", "--allow-empty", "-m", message]);
        self.git(&["rev-parse", "HEAD"])
    }

    /// Write `deploy.json`. The FTP port points at a closed local port.
    pub fn write_config(&self, last_synced: Option<&str>) -> PathBuf {
        let mut repo = serde_json::json!({ "path": "repo" });
        if let Some(revision) = last_synced {
            repo["lastSyncedRevision"] = serde_json::json!(revision);
        }
        let config = serde_json::json!({
            "repo": repo,
            "ftp": {
                "host": "127.0.0.1",
                "port": 1,
                "username": "deploy",
                "password": "secret",
                "targetDir": "/www"
            },
            "notes": "kept on save"
        });
        let path = self.config_path();
        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        path
    }

    pub fn read_config(&self) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(self.config_path()).unwrap()).unwrap()
    }

    pub fn read_manifest(&self) -> serde_json::Value {
        let path = self.package_dir().join("upload-spec.json");
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    /// Run the CLI from the environment root with stdin closed.
    pub fn run(&self, args: &[&str]) -> TestResult {
        run_cli(self.root.path(), args)
    }
}

pub fn run_cli(cwd: &Path, args: &[&str]) -> TestResult {
    Command::new(env!("CARGO_BIN_EXE_git-remote-sync"))
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("GIT_REMOTE_SYNC_FTP_HOST")
        .env_remove("GIT_REMOTE_SYNC_FTP_PASSWORD")
        .env_remove("GITHUB_ACTIONS")
        .output()
        .unwrap()
        .into()
}

/// Commit the a/b/c/d scenario and return `(earlier, present)`.
///
/// Earlier: a.txt, b.css, d.js. Present: b.css modified, c.html added,
/// d.js deleted, a.txt untouched.
pub fn abcd_scenario(env: &TestEnv) -> (String, String) {
    env.write("a.txt", "alpha\n");
    env.write("b.css", "body {}\n");
    env.write("d.js", "console.log(1);\n");
    let earlier = env.commit("first");

    env.write("b.css", "body { color: red; }\n");
    env.write("c.html", "<p>c</p>\n");
    env.remove("d.js");
    let present = env.commit("second");

    (earlier, present)
}
