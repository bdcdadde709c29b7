//! Serialized module tree handed over by the configuration loader.
//!
//! The loader that parses configuration source produces one manifest per
//! module, with child manifests nested under their module calls. Provider
//! references use the same `name` / `name.alias` spelling as configuration
//! source.
//!
//! ```json
//! {
//!   "required_providers": [{"name": "foo-test", "source": "foo/test"}],
//!   "providers": [{"name": "foo-test", "alias": "boop"}],
//!   "resources": [{"type": "foo-test_thing", "name": "a"}],
//!   "module_calls": [
//!     {"name": "child", "providers": [{"child": "test", "parent": "foo-test.boop"}], "module": {}}
//!   ]
//! }
//! ```

use modprov_addrs::{LocalProviderConfig, ModulePath, parse_provider_source};
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};
use crate::module::{ModuleBuilder, PassedProviderConfig};
use crate::resource::{Resource, ResourceMode};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleManifest {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_providers: Vec<RequiredProviderEntry>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub providers: Vec<ProviderConfigEntry>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<ResourceEntry>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub module_calls: Vec<ModuleCallEntry>,
}

/// One `required_providers` entry: local name and source string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredProviderEntry {
    pub name: String,
    pub source: String,
}

/// One provider configuration block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfigEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl ProviderConfigEntry {
    /// Validate the block's name and alias with the same rules as a
    /// `name[.alias]` reference.
    pub fn to_config(&self, module: &ModulePath) -> Result<LocalProviderConfig> {
        let reference = match &self.alias {
            Some(alias) => format!("{}.{alias}", self.name),
            None => self.name.clone(),
        };
        let config = parse_local_reference(module, &reference)?;
        if config.local_name != self.name {
            return Err(GraphError::InvalidReference {
                module: module.clone(),
                reference,
                reason: "provider name must not contain '.'",
            });
        }
        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEntry {
    #[serde(default)]
    pub mode: ResourceMode,
    #[serde(rename = "type")]
    pub type_name: String,
    pub name: String,
    /// `provider` attribute as written, e.g. `aws` or `aws.east`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleCallEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub providers: Vec<PassedProviderEntry>,
    #[serde(default)]
    pub module: ModuleManifest,
}

/// One entry of a module call's `providers` map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassedProviderEntry {
    pub child: String,
    pub parent: String,
}

impl ModuleManifest {
    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Convert into a builder for the module at `path`, parsing provider
    /// sources and references on the way.
    pub fn to_builder(&self, path: &ModulePath) -> Result<ModuleBuilder> {
        let mut builder = ModuleBuilder::new();

        for entry in &self.required_providers {
            let provider =
                parse_provider_source(&entry.source).map_err(|source| GraphError::InvalidSource {
                    module: path.clone(),
                    local_name: entry.name.clone(),
                    source,
                })?;
            builder = builder.require(entry.name.clone(), provider);
        }

        for entry in &self.providers {
            builder = builder.provider_config(entry.to_config(path)?);
        }

        for entry in &self.resources {
            let mut resource = Resource {
                mode: entry.mode,
                type_name: entry.type_name.clone(),
                name: entry.name.clone(),
                provider: None,
            };
            if let Some(reference) = &entry.provider {
                resource = resource.with_provider(parse_local_reference(path, reference)?);
            }
            builder = builder.resource(resource);
        }

        for call in &self.module_calls {
            let child_path = path.child(call.name.clone());
            let passed = call
                .providers
                .iter()
                .map(|entry| -> Result<PassedProviderConfig> {
                    Ok(PassedProviderConfig::new(
                        parse_local_reference(&child_path, &entry.child)?,
                        parse_local_reference(path, &entry.parent)?,
                    ))
                })
                .collect::<Result<Vec<_>>>()?;
            let child = call.module.to_builder(&child_path)?;
            builder = builder.call_with_providers(call.name.clone(), passed, child);
        }

        Ok(builder)
    }
}

/// Parse a `name` or `name.alias` provider reference.
pub fn parse_local_reference(module: &ModulePath, reference: &str) -> Result<LocalProviderConfig> {
    let invalid = |reason| GraphError::InvalidReference {
        module: module.clone(),
        reference: reference.to_string(),
        reason,
    };

    let (name, alias) = match reference.split_once('.') {
        Some((name, alias)) => (name, Some(alias)),
        None => (reference, None),
    };
    if name.is_empty() {
        return Err(invalid("missing provider name"));
    }
    if let Some(alias) = alias {
        if alias.is_empty() || alias.contains('.') {
            return Err(invalid("expected NAME or NAME.ALIAS"));
        }
    }

    Ok(LocalProviderConfig::new(name, alias.map(str::to_string)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use modprov_addrs::{DEFAULT_REGISTRY_HOST, Provider};

    #[test]
    fn parses_references() {
        let root = ModulePath::root();
        assert_eq!(
            parse_local_reference(&root, "aws").unwrap(),
            LocalProviderConfig::new_default("aws")
        );
        assert_eq!(
            parse_local_reference(&root, "aws.east").unwrap(),
            LocalProviderConfig::with_alias("aws", "east")
        );
        for bad in ["", ".east", "aws.", "aws.a.b"] {
            assert!(
                matches!(
                    parse_local_reference(&root, bad),
                    Err(GraphError::InvalidReference { .. })
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn json_manifest_builds_module() {
        let manifest = ModuleManifest::from_json_str(
            r#"{
                "required_providers": [{"name": "foo-test", "source": "foo/test"}],
                "providers": [{"name": "foo-test"}, {"name": "foo-test", "alias": "boop"}],
                "resources": [
                    {"type": "aws_instance", "name": "web"},
                    {"mode": "data", "type": "aws_ami", "name": "img", "provider": "aws.east"}
                ]
            }"#,
        )
        .unwrap();

        let module = manifest
            .to_builder(&ModulePath::root())
            .unwrap()
            .build(ModulePath::root())
            .unwrap();

        assert_eq!(
            module.requirements().get("foo-test"),
            Some(&Provider::new(DEFAULT_REGISTRY_HOST, "foo", "test"))
        );
        assert_eq!(module.provider_configs().count(), 2);
        assert_eq!(module.managed_resources().len(), 1);
        assert_eq!(
            module.data_resources()[0].provider,
            Some(LocalProviderConfig::with_alias("aws", "east"))
        );
    }

    #[test]
    fn toml_manifest_nests_module_calls() {
        let manifest = ModuleManifest::from_toml_str(
            r#"
            [[providers]]
            name = "aws"

            [[module_calls]]
            name = "child"
            providers = [{ child = "aws", parent = "aws" }]

            [[module_calls.module.required_providers]]
            name = "aws"
            source = "example.com/corp/aws"
            "#,
        )
        .unwrap();

        assert_eq!(manifest.module_calls.len(), 1);
        let child = &manifest.module_calls[0];
        assert_eq!(child.providers[0].parent, "aws");
        assert_eq!(child.module.required_providers[0].source, "example.com/corp/aws");
    }

    #[test]
    fn invalid_source_names_module_and_provider() {
        let manifest = ModuleManifest {
            module_calls: vec![ModuleCallEntry {
                name: "child".to_string(),
                providers: Vec::new(),
                module: ModuleManifest {
                    required_providers: vec![RequiredProviderEntry {
                        name: "broken".to_string(),
                        source: "a/b/c/d".to_string(),
                    }],
                    ..Default::default()
                },
            }],
            ..Default::default()
        };

        let err = manifest.to_builder(&ModulePath::root()).unwrap_err();
        match err {
            GraphError::InvalidSource {
                module, local_name, ..
            } => {
                assert_eq!(module, ModulePath::new(["child"]));
                assert_eq!(local_name, "broken");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn manifest_survives_json_rendering() {
        let manifest = ModuleManifest {
            providers: vec![ProviderConfigEntry {
                name: "aws".to_string(),
                alias: Some("east".to_string()),
            }],
            ..Default::default()
        };
        let rendered = manifest.to_json_string().unwrap();
        assert_eq!(ModuleManifest::from_json_str(&rendered).unwrap(), manifest);
    }

    #[test]
    fn provider_blocks_follow_reference_rules() {
        let root = ModulePath::root();
        let entry = |name: &str, alias: Option<&str>| ProviderConfigEntry {
            name: name.to_string(),
            alias: alias.map(str::to_string),
        };

        assert_eq!(
            entry("aws", Some("east")).to_config(&root).unwrap(),
            LocalProviderConfig::with_alias("aws", "east")
        );

        for bad in [
            entry("aws.east", None),
            entry("aws.east", Some("west")),
            entry("", None),
            entry("aws", Some("")),
            entry("aws", Some("a.b")),
        ] {
            assert!(
                matches!(bad.to_config(&root), Err(GraphError::InvalidReference { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn dotted_provider_block_name_fails_the_manifest() {
        let manifest =
            ModuleManifest::from_json_str(r#"{"providers": [{"name": "aws.east"}]}"#).unwrap();
        let err = manifest.to_builder(&ModulePath::root()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid provider reference \"aws.east\" in the root module: provider name must not contain '.'"
        );
    }

    #[test]
    fn passing_one_child_reference_twice_fails_the_manifest() {
        let manifest = ModuleManifest::from_json_str(
            r#"{
                "providers": [{"name": "aws", "alias": "a"}, {"name": "aws", "alias": "b"}],
                "module_calls": [{
                    "name": "child",
                    "providers": [
                        {"child": "aws", "parent": "aws.a"},
                        {"child": "aws", "parent": "aws.b"}
                    ]
                }]
            }"#,
        )
        .unwrap();

        let err = manifest
            .to_builder(&ModulePath::root())
            .unwrap()
            .build(ModulePath::root())
            .unwrap_err();
        assert!(matches!(
            err,
            GraphError::DuplicatePassedProvider { ref module, .. } if module == &ModulePath::new(["child"])
        ));
    }
}
