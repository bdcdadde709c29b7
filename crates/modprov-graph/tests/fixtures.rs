//! End-to-end checks over manifest fixtures loaded from disk.

use std::fs;
use std::path::PathBuf;

use modprov_addrs::{AbsProviderConfig, DEFAULT_REGISTRY_HOST, LocalProviderConfig, ModulePath, Provider};
use modprov_config::InventorySettings;
use modprov_graph::{ConfigTree, GraphError};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load(name: &str) -> ConfigTree {
    ConfigTree::load(fixture(name)).unwrap()
}

#[test]
fn implied_providers_are_collected_as_legacy() {
    let tree = load("providers-explicit-implied.json");
    assert_eq!(
        tree.provider_types(),
        vec![
            Provider::new_legacy("aws"),
            Provider::new_legacy("null"),
            Provider::new_legacy("template"),
        ]
    );
}

#[test]
fn nested_modules_report_every_source() {
    let tree = load("nested-providers-fqns.json");
    let want = vec![
        Provider::new_legacy("test"),
        Provider::new(DEFAULT_REGISTRY_HOST, "bar", "test"),
        Provider::new(DEFAULT_REGISTRY_HOST, "foo", "test"),
    ];
    assert_eq!(tree.provider_types(), want);
    assert_eq!(tree.provider_types_with(&InventorySettings::parallel()), want);
}

#[test]
fn resolves_addresses_in_explicit_fqn_module() {
    let tree = load("providers-explicit-fqn.json");
    let root = ModulePath::root();

    let abs = AbsProviderConfig::new(root.clone(), Provider::new_legacy("test"), None);
    assert_eq!(tree.resolve_abs_provider_addr(abs.clone(), &root), abs);

    let implied = tree.resolve_abs_provider_addr(LocalProviderConfig::with_alias("implied", "boop"), &root);
    assert_eq!(
        implied.to_string(),
        r#"provider["registry.terraform.io/-/implied"].boop"#
    );

    let explicit =
        tree.resolve_abs_provider_addr(LocalProviderConfig::with_alias("foo-test", "boop"), &root);
    assert_eq!(
        explicit.to_string(),
        r#"provider["registry.terraform.io/foo/test"].boop"#
    );
}

#[test]
fn provider_for_config_addr_uses_module_table() {
    let tree = load("providers-fqns.json");
    let root = ModulePath::root();

    let got = tree.provider_for_config_addr(&LocalProviderConfig::new_default("foo-test"), &root);
    assert!(got.equals(&Provider::new(DEFAULT_REGISTRY_HOST, "foo", "test")));

    let got = tree.provider_for_config_addr(&LocalProviderConfig::new_default("bar-test"), &root);
    assert!(got.equals(&Provider::new_legacy("bar-test")));
}

#[test]
fn toml_manifest_with_pass_through() {
    let tree = load("pass-through.toml");
    assert_eq!(tree.module_count(), 3);

    let subnets = ModulePath::new(["network", "subnets"]);
    let passed = tree.resolve_passed_provider(&LocalProviderConfig::new_default("cloud"), &subnets);
    assert_eq!(passed.to_string(), r#"provider["example.com/corp/aws"].east"#);

    // Inventory resolves each reference where it is written.
    assert_eq!(
        tree.provider_types(),
        vec![
            Provider::new("example.com", "corp", "aws"),
            Provider::new_legacy("cloud"),
            Provider::new_default("aws"),
        ]
    );
}

#[test]
fn duplicate_requirement_fails_to_load() {
    let err = ConfigTree::load(fixture("duplicate-requirement.json")).unwrap_err();
    match &err {
        GraphError::DuplicateRequirement { module, local_name } => {
            assert_eq!(module, &ModulePath::new(["child"]));
            assert_eq!(local_name, "test");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        err.to_string(),
        r#"duplicate required provider "test" in module.child"#
    );
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("manifest.yaml");
    fs::write(&path, "providers: []\n").unwrap();

    let err = ConfigTree::load(&path).unwrap_err();
    assert!(matches!(err, GraphError::UnsupportedFormat(p) if p == path));
}

#[test]
fn missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");

    let err = ConfigTree::load(&path).unwrap_err();
    assert!(matches!(&err, GraphError::Io { path: p, .. } if p == &path));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, r#"{"providers": [{"alias": "x"}]}"#).unwrap();

    assert!(matches!(ConfigTree::load(&path), Err(GraphError::Json(_))));
}

#[test]
fn invalid_source_in_child_names_the_module() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad-source.toml");
    fs::write(
        &path,
        r#"
[[module_calls]]
name = "child"

[[module_calls.module.required_providers]]
name = "widget"
source = "a/b/c/d"
"#,
    )
    .unwrap();

    let err = ConfigTree::load(&path).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("\"widget\""), "{message}");
    assert!(message.contains("module.child"), "{message}");
}
