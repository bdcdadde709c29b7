//! Parsing of provider source strings.
//!
//! A source string is what a module writes in its required-providers block:
//! `type`, `namespace/type` or `hostname/namespace/type`.

use std::str::FromStr;

use crate::error::{ParseProviderError, Result};
use crate::provider::{
    DEFAULT_PROVIDER_NAMESPACE, DEFAULT_REGISTRY_HOST, LEGACY_PROVIDER_NAMESPACE, Provider,
};

/// Parse a provider source string into a [`Provider`].
///
/// Parts are lowercased. A one-part source expands into the default
/// namespace; the legacy namespace `-` is accepted only on the default
/// registry host.
///
/// # Example
///
/// ```
/// use modprov_addrs::{Provider, parse_provider_source};
///
/// let p = parse_provider_source("foo/test")?;
/// assert_eq!(p, Provider::new("registry.terraform.io", "foo", "test"));
/// # Ok::<(), modprov_addrs::ParseProviderError>(())
/// ```
pub fn parse_provider_source(source: &str) -> Result<Provider> {
    let trimmed = source.trim();
    if trimmed.is_empty() {
        return Err(ParseProviderError::Empty);
    }

    let parts: Vec<&str> = trimmed.split('/').collect();
    let (hostname, namespace, type_name) = match parts.as_slice() {
        [type_name] => (DEFAULT_REGISTRY_HOST, DEFAULT_PROVIDER_NAMESPACE, *type_name),
        [namespace, type_name] => (DEFAULT_REGISTRY_HOST, *namespace, *type_name),
        [hostname, namespace, type_name] => (*hostname, *namespace, *type_name),
        _ => {
            return Err(ParseProviderError::TooManyParts {
                source_str: source.to_string(),
            });
        }
    };

    let hostname = normalize_hostname(source, hostname)?;
    let type_name = normalize_part(source, "type", type_name)?;

    if namespace == LEGACY_PROVIDER_NAMESPACE {
        if hostname != DEFAULT_REGISTRY_HOST {
            return Err(ParseProviderError::LegacyNamespaceOnForeignHost {
                source_str: source.to_string(),
                expected_host: DEFAULT_REGISTRY_HOST,
            });
        }
        return Ok(Provider::new_legacy(type_name));
    }

    let namespace = normalize_part(source, "namespace", namespace)?;
    Ok(Provider::new(hostname, namespace, type_name))
}

fn normalize_part(source: &str, part: &'static str, value: &str) -> Result<String> {
    let invalid = |reason| ParseProviderError::InvalidPart {
        source_str: source.to_string(),
        part,
        value: value.to_string(),
        reason,
    };

    if value.is_empty() {
        return Err(invalid("is empty"));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(invalid("may contain only letters, digits, '-' and '_'"));
    }
    if value.starts_with('-') || value.ends_with('-') {
        return Err(invalid("must not start or end with '-'"));
    }

    Ok(value.to_ascii_lowercase())
}

fn normalize_hostname(source: &str, value: &str) -> Result<String> {
    let invalid = |reason| ParseProviderError::InvalidPart {
        source_str: source.to_string(),
        part: "hostname",
        value: value.to_string(),
        reason,
    };

    if value.is_empty() {
        return Err(invalid("is empty"));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
    {
        return Err(invalid("is not a valid hostname"));
    }
    if value.starts_with(['-', '.']) || value.ends_with(['-', '.']) {
        return Err(invalid("must not start or end with '-' or '.'"));
    }

    Ok(value.to_ascii_lowercase())
}

impl FromStr for Provider {
    type Err = ParseProviderError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        parse_provider_source(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_part_uses_default_namespace() {
        let p: Provider = "aws".parse().unwrap();
        assert_eq!(p, Provider::new_default("aws"));
    }

    #[test]
    fn two_parts_use_default_host() {
        let p: Provider = "bar/test".parse().unwrap();
        assert_eq!(p, Provider::new(DEFAULT_REGISTRY_HOST, "bar", "test"));
    }

    #[test]
    fn three_parts_keep_hostname() {
        let p: Provider = "Example.COM/Corp/Widget".parse().unwrap();
        assert_eq!(p, Provider::new("example.com", "corp", "widget"));
    }

    #[test]
    fn legacy_namespace_round_trips_through_display() {
        let legacy = Provider::new_legacy("template");
        let reparsed: Provider = legacy.to_string().parse().unwrap();
        assert_eq!(reparsed, legacy);
        assert!(reparsed.is_legacy());

        let short: Provider = "-/template".parse().unwrap();
        assert_eq!(short, legacy);
    }

    #[test]
    fn legacy_namespace_on_other_host_is_rejected() {
        let err = parse_provider_source("example.com/-/aws").unwrap_err();
        assert!(matches!(
            err,
            ParseProviderError::LegacyNamespaceOnForeignHost { .. }
        ));
    }

    #[test]
    fn malformed_sources_are_rejected() {
        assert_eq!(parse_provider_source("  "), Err(ParseProviderError::Empty));
        assert!(matches!(
            parse_provider_source("a/b/c/d"),
            Err(ParseProviderError::TooManyParts { .. })
        ));
        assert!(matches!(
            parse_provider_source("foo//test"),
            Err(ParseProviderError::InvalidPart { part: "namespace", .. })
        ));
        assert!(matches!(
            parse_provider_source("foo/te st"),
            Err(ParseProviderError::InvalidPart { part: "type", .. })
        ));
        assert!(matches!(
            parse_provider_source("foo/-test"),
            Err(ParseProviderError::InvalidPart { part: "type", .. })
        ));
        assert!(matches!(
            parse_provider_source(".example.com/foo/test"),
            Err(ParseProviderError::InvalidPart { part: "hostname", .. })
        ));
    }

    #[test]
    fn hostname_may_carry_a_port() {
        let p: Provider = "localhost:8080/corp/widget".parse().unwrap();
        assert_eq!(p.hostname(), "localhost:8080");
    }
}
