use proptest::prelude::*;
use sandbox_manifest::merge::{EntryKey, merge_entries};
use sandbox_manifest::{Entry, ManifestBuilder, SandboxConfig};
use serde_json::json;

fn src_path() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["/a", "/b", "/c", "/d", "/e"]).prop_map(String::from)
}

fn entry() -> impl Strategy<Value = Entry> {
    (
        src_path(),
        prop::option::of("/[a-z]{1,4}"),
        prop::sample::subsequence(vec!["bind", "rec", "private"], 0..=3),
    )
        .prop_map(|(src, sandbox_path, flags)| {
            let mut value = json!({"src-path": src});
            if let Some(path) = sandbox_path {
                value["sandbox-path"] = json!(path);
            }
            if !flags.is_empty() {
                value["sandbox-flags"] = json!(flags);
            }
            serde_json::from_value(value).unwrap()
        })
}

fn src_paths(entries: &[Entry]) -> Vec<String> {
    entries.iter().filter_map(|e| e.src_path.get().cloned()).collect()
}

proptest! {
    #[test]
    fn merge_entries_is_idempotent(
        base in prop::collection::vec(entry(), 0..6),
        incoming in prop::collection::vec(entry(), 0..6),
    ) {
        let mut once = base.clone();
        merge_entries(&mut once, &incoming, &[EntryKey::SrcPath]);
        let mut twice = once.clone();
        merge_entries(&mut twice, &incoming, &[EntryKey::SrcPath]);

        prop_assert_eq!(once, twice);
    }

    #[test]
    fn merge_entries_preserves_positions_and_appends_in_order(
        base in prop::collection::vec(entry(), 0..6),
        incoming in prop::collection::vec(entry(), 0..6),
    ) {
        let mut merged = base.clone();
        merge_entries(&mut merged, &incoming, &[EntryKey::SrcPath]);

        let merged_paths = src_paths(&merged);
        let base_paths = src_paths(&base);

        // Existing entries keep their slots
        prop_assert_eq!(&merged_paths[..base.len()], &base_paths[..]);

        // New keys follow in first-appearance order of the incoming list
        let mut expected_tail: Vec<String> = Vec::new();
        for path in src_paths(&incoming) {
            if !base_paths.contains(&path) && !expected_tail.contains(&path) {
                expected_tail.push(path);
            }
        }
        prop_assert_eq!(&merged_paths[base.len()..], &expected_tail[..]);
    }

    #[test]
    fn merge_entries_never_duplicates_new_keys(
        incoming in prop::collection::vec(entry(), 0..8),
    ) {
        let mut merged = Vec::new();
        merge_entries(&mut merged, &incoming, &[EntryKey::SrcPath]);

        let paths = src_paths(&merged);
        let mut unique = paths.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(paths.len(), unique.len());
    }

    #[test]
    fn sandbox_flags_union_has_no_duplicates(
        incoming in prop::collection::vec(entry(), 0..8),
    ) {
        let mut merged: Vec<Entry> = Vec::new();
        merge_entries(&mut merged, &incoming, &[EntryKey::SrcPath]);

        for entry in &merged {
            if let Some(flags) = entry.sandbox_flags.get() {
                let mut seen = Vec::new();
                for flag in flags {
                    prop_assert!(!seen.contains(&flag), "duplicate flag {}", flag);
                    seen.push(flag);
                }
            }
        }
    }

    #[test]
    fn applying_a_fragment_twice_is_idempotent(
        mounts in prop::collection::vec(entry(), 0..6),
    ) {
        let fragment: SandboxConfig = serde_json::from_value(json!({
            "common": [{"app-base": [{"mount-paths": mounts}]}],
            "individual": [{"pkg": [{"mount-paths": mounts}]}]
        })).unwrap();

        let mut builder = ManifestBuilder::new();
        builder.apply(&fragment);
        let once = builder.clone().build();
        builder.apply(&fragment);

        prop_assert_eq!(builder.build(), once);
    }

    #[test]
    fn new_scope_and_flags_point_never_repeat_src_path(
        mounts in prop::collection::vec(entry(), 0..8),
    ) {
        let fragment: SandboxConfig = serde_json::from_value(json!({
            "individual": [{"pkg": [{
                "mount-paths": mounts,
                "flags-point": [{"flags": "DLP_MANAGER", "mount-paths": mounts}]
            }]}]
        })).unwrap();

        let mut builder = ManifestBuilder::new();
        builder.apply(&fragment);
        let manifest = builder.build();
        let scope = manifest.individual().and_then(|m| m["pkg"].first()).unwrap();
        let point_mounts = scope.flags_point.get().unwrap()[0].mount_paths.get().unwrap();

        for paths in [src_paths(scope.mount_paths.get().unwrap()), src_paths(point_mounts)] {
            let mut unique = paths.clone();
            unique.sort();
            unique.dedup();
            prop_assert_eq!(paths.len(), unique.len());
        }
    }
}
