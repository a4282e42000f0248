//! In-memory port implementations shared by the use case tests

use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::config::{ConfigWarning, DeploymentConfig, RemoteConfig, RepoConfig};
use crate::domain::ports::{
    ConfigRepository, RemoteConnector, RemoteError, RemoteSession, VersionControl,
};
use crate::error::{SyncError, SyncResult};

// ---------------------------------------------------------------------------
// Version control
// ---------------------------------------------------------------------------

/// Snapshot-based repository: each revision is a full map of path to content.
#[derive(Default)]
pub(crate) struct InMemoryVcs {
    revisions: HashMap<String, BTreeMap<String, Vec<u8>>>,
    aliases: HashMap<String, String>,
    pub(crate) diff_calls: Cell<usize>,
}

impl InMemoryVcs {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_revision(mut self, id: &str, files: &[(&str, &str)]) -> Self {
        let snapshot = files
            .iter()
            .map(|(path, content)| (path.to_string(), content.as_bytes().to_vec()))
            .collect();
        self.revisions.insert(id.to_string(), snapshot);
        self
    }

    pub(crate) fn with_alias(mut self, alias: &str, id: &str) -> Self {
        self.aliases.insert(alias.to_string(), id.to_string());
        self
    }

    fn lookup(&self, rev: &str) -> Option<&str> {
        let id = self.aliases.get(rev).map(String::as_str).unwrap_or(rev);
        self.revisions.get_key_value(id).map(|(k, _)| k.as_str())
    }

    fn unknown(rev: &str) -> SyncError {
        SyncError::VcsInvocation {
            command: format!("git rev-parse {}", rev),
            stderr: format!("fatal: bad revision '{}'", rev),
        }
    }
}

impl VersionControl for InMemoryVcs {
    fn changed_files(&self, _repo: &Path, from: &str, to: &str) -> SyncResult<Vec<String>> {
        self.diff_calls.set(self.diff_calls.get() + 1);
        let from = self.lookup(from).ok_or_else(|| Self::unknown(from))?;
        let to = self.lookup(to).ok_or_else(|| Self::unknown(to))?;
        let (old, new) = (&self.revisions[from], &self.revisions[to]);

        let all: BTreeSet<&String> = old.keys().chain(new.keys()).collect();
        Ok(all
            .into_iter()
            .filter(|path| old.get(*path) != new.get(*path))
            .cloned()
            .collect())
    }

    fn resolve_revision(&self, _repo: &Path, alias: &str) -> SyncResult<String> {
        self.lookup(alias)
            .map(str::to_string)
            .ok_or_else(|| Self::unknown(alias))
    }

    fn show_file(&self, _repo: &Path, revision: &str, path: &str) -> SyncResult<Option<Vec<u8>>> {
        Ok(self
            .lookup(revision)
            .and_then(|id| self.revisions[id].get(path))
            .cloned())
    }
}

// ---------------------------------------------------------------------------
// Remote server
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub(crate) struct ServerState {
    pub(crate) dirs: BTreeSet<String>,
    pub(crate) files: BTreeMap<String, Vec<u8>>,
    /// Every command received, e.g. `MKD /var/www/site/js`
    pub(crate) log: Vec<String>,
    pub(crate) quit: bool,
    pub(crate) connections: usize,
    pub(crate) deny_mkdir: BTreeSet<String>,
    pub(crate) deny_put: BTreeSet<String>,
}

/// Fake FTP server with a directory tree rooted at `/`
#[derive(Clone)]
pub(crate) struct MockServer {
    pub(crate) state: Arc<Mutex<ServerState>>,
    refuse: bool,
}

impl MockServer {
    /// Server where each of `dirs` (and its ancestors) already exists
    pub(crate) fn with_dirs(dirs: &[&str]) -> Self {
        let mut state = ServerState::default();
        state.dirs.insert("/".to_string());
        for dir in dirs {
            let mut current = String::new();
            for part in dir.split('/').filter(|p| !p.is_empty()) {
                current.push('/');
                current.push_str(part);
                state.dirs.insert(current.clone());
            }
        }
        Self {
            state: Arc::new(Mutex::new(state)),
            refuse: false,
        }
    }

    pub(crate) fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::with_dirs(&[])
        }
    }

    pub(crate) fn deny_mkdir(&self, path: &str) {
        self.state.lock().unwrap().deny_mkdir.insert(path.to_string());
    }

    pub(crate) fn deny_put(&self, path: &str) {
        self.state.lock().unwrap().deny_put.insert(path.to_string());
    }

    pub(crate) fn log(&self) -> Vec<String> {
        self.state.lock().unwrap().log.clone()
    }

    pub(crate) fn file(&self, path: &str) -> Option<Vec<u8>> {
        self.state.lock().unwrap().files.get(path).cloned()
    }

    pub(crate) fn has_dir(&self, path: &str) -> bool {
        self.state.lock().unwrap().dirs.contains(path)
    }

    pub(crate) fn quit_called(&self) -> bool {
        self.state.lock().unwrap().quit
    }

    pub(crate) fn connections(&self) -> usize {
        self.state.lock().unwrap().connections
    }
}

impl RemoteConnector for MockServer {
    type Session = MockSession;

    fn connect(&self, _remote: &RemoteConfig) -> Result<MockSession, RemoteError> {
        if self.refuse {
            return Err(RemoteError::Connection("connection refused".to_string()));
        }
        self.state.lock().unwrap().connections += 1;
        Ok(MockSession {
            state: self.state.clone(),
            cwd: "/".to_string(),
        })
    }
}

pub(crate) struct MockSession {
    state: Arc<Mutex<ServerState>>,
    cwd: String,
}

impl MockSession {
    fn resolve(&self, path: &str) -> String {
        let joined = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("{}/{}", self.cwd, path)
        };

        let mut parts: Vec<&str> = Vec::new();
        for part in joined.split('/') {
            match part {
                "" | "." => {}
                ".." => {
                    parts.pop();
                }
                p => parts.push(p),
            }
        }
        format!("/{}", parts.join("/"))
    }
}

impl RemoteSession for MockSession {
    fn change_dir(&mut self, path: &str) -> Result<(), RemoteError> {
        let target = self.resolve(path);
        let mut state = self.state.lock().unwrap();
        state.log.push(format!("CWD {}", target));
        if state.dirs.contains(&target) {
            self.cwd = target;
            Ok(())
        } else {
            Err(RemoteError::Command(format!(
                "550 {}: No such file or directory",
                path
            )))
        }
    }

    fn make_dir(&mut self, name: &str) -> Result<(), RemoteError> {
        let target = self.resolve(name);
        let mut state = self.state.lock().unwrap();
        state.log.push(format!("MKD {}", target));
        if state.deny_mkdir.contains(&target) {
            return Err(RemoteError::Command(format!("550 {}: Permission denied", name)));
        }
        if !state.dirs.insert(target) {
            return Err(RemoteError::Command(format!("550 {}: File exists", name)));
        }
        Ok(())
    }

    fn put_file(&mut self, name: &str, content: &[u8]) -> Result<(), RemoteError> {
        let target = self.resolve(name);
        let mut state = self.state.lock().unwrap();
        state.log.push(format!("STOR {}", target));
        if state.deny_put.contains(&target) {
            return Err(RemoteError::Command("552 Quota exceeded".to_string()));
        }
        state.files.insert(target, content.to_vec());
        Ok(())
    }

    fn quit(&mut self) -> Result<(), RemoteError> {
        let mut state = self.state.lock().unwrap();
        state.log.push("QUIT".to_string());
        state.quit = true;
        Ok(())
    }
}

pub(crate) fn remote_config(target_dir: &str) -> RemoteConfig {
    RemoteConfig {
        host: "ftp.example.com".to_string(),
        port: 21,
        username: "deploy".to_string(),
        password: "secret".to_string(),
        target_dir: target_dir.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Config held in memory; records every saved revision
pub(crate) struct MemoryConfigRepository {
    config: Mutex<DeploymentConfig>,
    pub(crate) saved: Mutex<Vec<String>>,
    missing: bool,
}

impl MemoryConfigRepository {
    pub(crate) fn new(last_synced_revision: Option<&str>) -> Self {
        Self {
            config: Mutex::new(DeploymentConfig {
                repo: RepoConfig {
                    path: PathBuf::from("/srv/repo"),
                    last_synced_revision: last_synced_revision.map(str::to_string),
                },
                ftp: remote_config("/var/www/site"),
            }),
            saved: Mutex::new(Vec::new()),
            missing: false,
        }
    }

    /// A config whose file does not exist
    pub(crate) fn missing() -> Self {
        Self {
            missing: true,
            ..Self::new(None)
        }
    }

    pub(crate) fn last_synced(&self) -> Option<String> {
        self.config.lock().unwrap().repo.last_synced_revision.clone()
    }

    pub(crate) fn saved(&self) -> Vec<String> {
        self.saved.lock().unwrap().clone()
    }
}

impl ConfigRepository for MemoryConfigRepository {
    fn load(&self) -> SyncResult<(DeploymentConfig, Vec<ConfigWarning>)> {
        if self.missing {
            return Err(SyncError::ConfigNotFound {
                path: PathBuf::from("deploy.json"),
            });
        }
        Ok((self.config.lock().unwrap().clone(), Vec::new()))
    }

    fn record_synced_revision(&self, revision: &str) -> SyncResult<()> {
        self.config.lock().unwrap().repo.last_synced_revision = Some(revision.to_string());
        self.saved.lock().unwrap().push(revision.to_string());
        Ok(())
    }
}
