//! Property tests for target path validation.

use proptest::prelude::*;

use git_remote_sync::TargetPath;

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_-][A-Za-z0-9_. -]{0,10}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Validation never panics, whatever git reports.
    #[test]
    fn property_target_path_never_panics(raw in "\\PC{0,40}") {
        let _ = TargetPath::new(&raw);
    }

    /// PROPERTY: Accepted paths are relative and free of traversal.
    #[test]
    fn property_accepted_paths_are_safe(raw in "[a-z./\\\\:]{0,16}") {
        if let Ok(path) = TargetPath::new(&raw) {
            let s = path.as_str();
            prop_assert!(!s.starts_with('/'));
            for part in s.split('/') {
                prop_assert!(!part.is_empty());
                prop_assert!(part != "." && part != "..");
            }
        }
    }

    /// PROPERTY: Only `/` separates; backslashes and colons stay in the name.
    #[test]
    fn property_backslash_and_colon_are_name_characters(
        segments in proptest::collection::vec(segment(), 1..=5),
    ) {
        let backslashed = segments.join("\\");
        let path = TargetPath::new(&backslashed).unwrap();
        prop_assert_eq!(path.as_str(), backslashed.as_str());
        prop_assert!(path.directories().is_empty());

        let drive_like = format!("c:{}", segments.join("/"));
        let path = TargetPath::new(&drive_like).unwrap();
        prop_assert_eq!(path.as_str(), drive_like.as_str());
    }

    /// PROPERTY: Directories plus file name rebuild the path, and validation is idempotent.
    #[test]
    fn property_directories_and_file_name_rebuild_path(
        segments in proptest::collection::vec(segment(), 1..=5),
    ) {
        let path = TargetPath::new(segments.join("/")).unwrap();

        let mut parts: Vec<&str> = path.directories();
        parts.push(path.file_name());
        prop_assert_eq!(parts.join("/"), path.as_str());
        prop_assert_eq!(TargetPath::new(path.as_str()).unwrap(), path.clone());
    }
}
