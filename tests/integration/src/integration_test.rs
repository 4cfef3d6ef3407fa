//! End-to-end integration tests against the JSON fixtures
//!
//! Exercises the complete flow: fragment loading -> substitution -> merge ->
//! manifest write, using the fragments under `test-fixtures/sandbox/`.

use pretty_assertions::assert_eq;
use rstest::rstest;
use sandbox_manifest::{FixOptions, Pattern, SandboxConfig, fix_sandbox_config, load_document};
use sandbox_test_utils::FragmentDir;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/sandbox")
        .join(name)
}

fn read_fixture(name: &str) -> Value {
    let text = fs::read_to_string(fixture(name)).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn lib64() -> Vec<Pattern> {
    vec!["libpath:lib64".parse().unwrap()]
}

#[test]
fn test_fixture_fragments_produce_expected_manifest() {
    let dir = FragmentDir::new();
    let options = FixOptions {
        patterns: lib64(),
        extra_sandbox_cfgs: vec![fixture("product-sandbox.json")],
        ..FixOptions::new(fixture("appdata-sandbox.json"), dir.join("appdata-sandbox.json"))
    };

    fix_sandbox_config(&options).unwrap();

    assert_eq!(dir.read_json("appdata-sandbox.json"), read_fixture("expected-lib64.json"));
}

#[test]
fn test_rerunning_with_output_as_extra_is_stable() {
    let dir = FragmentDir::new();
    let first = FixOptions {
        patterns: lib64(),
        extra_sandbox_cfgs: vec![fixture("product-sandbox.json")],
        ..FixOptions::new(fixture("appdata-sandbox.json"), dir.join("first.json"))
    };
    fix_sandbox_config(&first).unwrap();

    // Feeding the merged manifest back in must not change it
    let second = FixOptions {
        patterns: lib64(),
        extra_sandbox_cfgs: vec![dir.join("first.json")],
        ..FixOptions::new(dir.join("first.json"), dir.join("second.json"))
    };
    fix_sandbox_config(&second).unwrap();

    assert_eq!(dir.read_json("second.json"), dir.read_json("first.json"));
}

#[rstest]
#[case("appdata-sandbox.json")]
#[case("product-sandbox.json")]
#[case("expected-lib64.json")]
fn test_fixtures_parse(#[case] name: &str) {
    let document = load_document(&fixture(name), &lib64()).unwrap();
    assert!(!document.is_empty());
}

#[test]
fn test_placeholders_left_without_patterns() {
    let document = load_document(&fixture("appdata-sandbox.json"), &[]).unwrap();
    let value = serde_json::to_value(&document).unwrap();
    assert_eq!(
        value["common"][0]["app-base"][0]["mount-paths"][1]["src-path"],
        "/system/{libpath}"
    );
}

#[test]
fn test_template_only_when_source_is_empty() {
    let dir = FragmentDir::new();
    let source = dir.write_raw("empty.json", "{}");

    let manifest = fix_sandbox_config(&FixOptions::new(&source, dir.join("out.json"))).unwrap();

    assert_eq!(manifest, SandboxConfig::default_template());
}
