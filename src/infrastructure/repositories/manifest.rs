//! JSON Manifest Repository
//!
//! Reads and writes `upload-spec.json` inside a package directory:
//!
//! ```json
//! {
//!     "sourceRevision": "R2",
//!     "1": "b.css",
//!     "2": "c.html"
//! }
//! ```
//!
//! `sourceRevision` comes first, followed by the numbered entries in
//! ascending order.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::domain::entities::Manifest;
use crate::domain::value_objects::TargetPath;
use crate::error::{SyncError, SyncResult};
use crate::infrastructure::fs::{atomic_write, to_pretty_json};

/// File name of the manifest inside the package directory
pub const MANIFEST_FILE_NAME: &str = "upload-spec.json";

const SOURCE_REVISION_KEY: &str = "sourceRevision";

/// Manifest storage for one package directory
#[derive(Debug, Clone)]
pub struct JsonManifestRepository {
    package_dir: PathBuf,
}

impl JsonManifestRepository {
    pub fn new(package_dir: impl Into<PathBuf>) -> Self {
        Self {
            package_dir: package_dir.into(),
        }
    }

    pub fn package_dir(&self) -> &Path {
        &self.package_dir
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.package_dir.join(MANIFEST_FILE_NAME)
    }

    /// Path of numbered package file `number`
    pub fn entry_path(&self, number: u32) -> PathBuf {
        self.package_dir.join(number.to_string())
    }

    pub fn save(&self, manifest: &Manifest) -> SyncResult<()> {
        let path = self.manifest_path();
        atomic_write(&path, to_pretty_json(&to_document(manifest))?.as_bytes())?;
        tracing::debug!(path = %path.display(), entries = manifest.len(), "manifest written");
        Ok(())
    }

    pub fn load(&self) -> SyncResult<Manifest> {
        let path = self.manifest_path();
        if !path.is_file() {
            return Err(SyncError::PackageNotFound {
                path: self.package_dir.clone(),
            });
        }

        let content = fs::read_to_string(&path)?;
        let document: Value = serde_json::from_str(&content).map_err(|e| SyncError::InvalidManifest {
            file: path.clone(),
            message: e.to_string(),
        })?;

        from_document(document).map_err(|message| SyncError::InvalidManifest {
            file: path,
            message,
        })
    }
}

fn to_document(manifest: &Manifest) -> Value {
    let mut object = Map::new();
    object.insert(
        SOURCE_REVISION_KEY.to_string(),
        Value::String(manifest.source_revision().to_string()),
    );
    for entry in manifest.entries() {
        object.insert(
            entry.file_name(),
            Value::String(entry.target.as_str().to_string()),
        );
    }
    Value::Object(object)
}

fn from_document(document: Value) -> Result<Manifest, String> {
    let Value::Object(object) = document else {
        return Err("expected a JSON object".to_string());
    };

    let mut source_revision = None;
    let mut entries = BTreeMap::new();

    for (key, value) in object {
        if key == SOURCE_REVISION_KEY {
            match value {
                Value::String(rev) => source_revision = Some(rev),
                _ => return Err(format!("'{}' must be a string", SOURCE_REVISION_KEY)),
            }
            continue;
        }

        let number: u32 = key
            .parse()
            .map_err(|_| format!("unexpected key '{}'", key))?;
        let Value::String(path) = value else {
            return Err(format!("entry '{}' must be a string", key));
        };
        let target = TargetPath::new(&path).map_err(|e| format!("entry '{}': {}", key, e))?;
        entries.insert(number, target);
    }

    let source_revision =
        source_revision.ok_or_else(|| format!("missing '{}'", SOURCE_REVISION_KEY))?;
    Manifest::from_entries(source_revision, entries).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn target(path: &str) -> TargetPath {
        TargetPath::new(path).unwrap()
    }

    #[test]
    fn save_writes_revision_first_then_numbers() {
        let dir = tempdir().unwrap();
        let repo = JsonManifestRepository::new(dir.path());

        let mut manifest = Manifest::new("R2");
        manifest.push(target("b.css"));
        manifest.push(target("c.html"));
        repo.save(&manifest).unwrap();

        let content = fs::read_to_string(repo.manifest_path()).unwrap();
        assert_eq!(
            content,
            "{\n    \"sourceRevision\": \"R2\",\n    \"1\": \"b.css\",\n    \"2\": \"c.html\"\n}\n"
        );
    }

    #[test]
    fn keys_sort_numerically() {
        let dir = tempdir().unwrap();
        let repo = JsonManifestRepository::new(dir.path());

        let mut manifest = Manifest::new("R2");
        for i in 1..=11 {
            manifest.push(target(&format!("f{}.txt", i)));
        }
        repo.save(&manifest).unwrap();

        let content = fs::read_to_string(repo.manifest_path()).unwrap();
        let pos_2 = content.find("\"2\"").unwrap();
        let pos_10 = content.find("\"10\"").unwrap();
        assert!(pos_2 < pos_10);
        assert_eq!(repo.load().unwrap(), manifest);
    }

    #[test]
    fn load_empty_manifest() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILE_NAME), r#"{"sourceRevision":"R1"}"#).unwrap();

        let manifest = JsonManifestRepository::new(dir.path()).load().unwrap();
        assert!(manifest.is_empty());
        assert_eq!(manifest.source_revision(), "R1");
    }

    #[test]
    fn load_missing_is_package_not_found() {
        let dir = tempdir().unwrap();
        let repo = JsonManifestRepository::new(dir.path().join("upload-package"));

        let err = repo.load().unwrap_err();
        assert!(matches!(err, SyncError::PackageNotFound { .. }));
    }

    #[test]
    fn load_rejects_gaps() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(MANIFEST_FILE_NAME),
            r#"{"sourceRevision":"R1","1":"a.txt","3":"c.txt"}"#,
        )
        .unwrap();

        let err = JsonManifestRepository::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, SyncError::InvalidManifest { .. }));
        assert!(err.to_string().contains("dense"));
    }

    #[test]
    fn load_rejects_unknown_keys_and_bad_paths() {
        let dir = tempdir().unwrap();
        let repo = JsonManifestRepository::new(dir.path());

        for content in [
            r#"{"sourceRevision":"R1","extra":"a.txt"}"#,
            r#"{"sourceRevision":"R1","1":"../etc/passwd"}"#,
            r#"{"sourceRevision":"R1","1":42}"#,
            r#"{"1":"a.txt"}"#,
            r#"["a.txt"]"#,
            "not json",
        ] {
            fs::write(repo.manifest_path(), content).unwrap();
            let err = repo.load().unwrap_err();
            assert!(
                matches!(err, SyncError::InvalidManifest { .. }),
                "{} -> {:?}",
                content,
                err
            );
        }
    }

    #[test]
    fn load_keeps_backslash_names() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(MANIFEST_FILE_NAME),
            r#"{"sourceRevision":"R1","1":"css\\site.css"}"#,
        )
        .unwrap();

        let manifest = JsonManifestRepository::new(dir.path()).load().unwrap();
        assert_eq!(manifest.get(1).unwrap().as_str(), r"css\site.css");
    }
}
