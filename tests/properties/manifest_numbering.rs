//! Property tests for manifest numbering.

use std::collections::BTreeMap;

use proptest::prelude::*;

use git_remote_sync::{JsonManifestRepository, Manifest, TargetPath};

fn target_path() -> impl Strategy<Value = TargetPath> {
    proptest::string::string_regex("[a-z]{1,6}(/[a-z]{1,6}){0,3}\\.[a-z]{2,4}")
        .unwrap()
        .prop_map(|s| TargetPath::new(s).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Pushed entries are numbered 1..=n in push order.
    #[test]
    fn property_push_numbers_are_dense(paths in proptest::collection::vec(target_path(), 0..20)) {
        let mut manifest = Manifest::new("R");
        for (i, path) in paths.iter().enumerate() {
            prop_assert_eq!(manifest.push(path.clone()), i as u32 + 1);
        }

        prop_assert_eq!(manifest.len(), paths.len());
        prop_assert_eq!(manifest.next_number(), paths.len() as u32 + 1);
        for (entry, path) in manifest.entries().zip(&paths) {
            prop_assert_eq!(entry.target, path);
        }
    }

    /// PROPERTY: Stored entries load only when their numbers are exactly 1..=n.
    #[test]
    fn property_from_entries_requires_dense_keys(
        keys in proptest::collection::btree_set(1u32..12, 0..8),
    ) {
        let entries: BTreeMap<u32, TargetPath> = keys
            .iter()
            .map(|k| (*k, TargetPath::new(format!("f{}.txt", k)).unwrap()))
            .collect();
        let dense = keys.iter().copied().eq(1..=keys.len() as u32);

        prop_assert_eq!(Manifest::from_entries("R", entries).is_ok(), dense);
    }

    /// PROPERTY: A saved manifest loads back unchanged.
    #[test]
    fn property_saved_manifest_loads_back(paths in proptest::collection::vec(target_path(), 0..10)) {
        let dir = tempfile::tempdir().unwrap();
        let mut manifest = Manifest::new("0123456789abcdef0123456789abcdef01234567");
        for path in paths {
            manifest.push(path);
        }

        let repo = JsonManifestRepository::new(dir.path());
        repo.save(&manifest).unwrap();
        prop_assert_eq!(repo.load().unwrap(), manifest);
    }
}
