// Copyright 2025 coScene
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Decoding a raw document and merging it over a defaulted configuration

use super::types::SpartaConfig;
use crate::error::{ConfigError, Result};
use crate::source::{Format, RawSource};
use serde_yaml::{Mapping, Value};
use tracing::debug;

/// Key paths whose values keep their authored key casing; `*` matches any key
const VERBATIM_PATHS: &[&[&str]] = &[&["koffer", "plugins", "*", "env"]];

/// Older root keys and the key they now map to
const LEGACY_ROOT_KEYS: &[(&str, &str)] = &[("provider-pullsecret", "provider-auth")];

/// Merge `raw` over `into`.
///
/// Fields present in the document replace the ones in `into`; fields absent
/// from it (or explicitly null) are left alone. On error `into` is unchanged.
pub fn merge(into: &mut SpartaConfig, raw: &RawSource) -> Result<()> {
    let document = fold_root(parse(raw)?);

    let mut merged = serde_yaml::to_value(&*into)
        .map_err(|e| ConfigError::Decode(format!("cannot encode defaults: {}", e)))?;
    merge_values(&mut merged, document);

    let config: SpartaConfig = serde_yaml::from_value(merged)
        .map_err(|e| ConfigError::Decode(format!("{} ({})", e, raw.origin)))?;

    debug!("Decoded {} configuration from {}", raw.format, raw.origin);
    *into = config;
    Ok(())
}

/// Parse raw bytes into a value tree. An empty document is an empty mapping.
fn parse(raw: &RawSource) -> Result<Value> {
    if raw.bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Mapping(Mapping::new()));
    }

    let value = match raw.format {
        Format::Yaml => serde_yaml::from_slice::<Value>(&raw.bytes)
            .map_err(|e| ConfigError::Decode(format!("invalid YAML in {}: {}", raw.origin, e)))?,
        Format::Json => {
            let json: serde_json::Value = serde_json::from_slice(&raw.bytes).map_err(|e| {
                ConfigError::Decode(format!("invalid JSON in {}: {}", raw.origin, e))
            })?;
            serde_yaml::to_value(json).map_err(|e| ConfigError::Decode(e.to_string()))?
        }
    };

    match value {
        Value::Mapping(_) => Ok(value),
        Value::Null => Ok(Value::Mapping(Mapping::new())),
        other => Err(ConfigError::Decode(format!(
            "document root in {} must be a mapping, found {}",
            raw.origin,
            kind(&other)
        ))),
    }
}

fn fold_root(document: Value) -> Value {
    let mut folded = fold_keys(document);
    if let Value::Mapping(root) = &mut folded {
        for (legacy, current) in LEGACY_ROOT_KEYS {
            if let Some(value) = root.remove(*legacy) {
                debug!("Reading legacy key '{}' as '{}'", legacy, current);
                match root.get_mut(*current) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        root.insert(Value::String(current.to_string()), value);
                    }
                }
            }
        }
    }
    folded
}

/// Lowercase every mapping key, except below the paths in `VERBATIM_PATHS`.
///
/// Keys that collide after folding are merged, later entries winning.
pub(crate) fn fold_keys(value: Value) -> Value {
    fold_at(value, &mut Vec::new())
}

fn fold_at(value: Value, path: &mut Vec<String>) -> Value {
    match value {
        Value::Mapping(mapping) => {
            let mut folded = Mapping::with_capacity(mapping.len());
            for (key, value) in mapping {
                let key = fold_key(key);
                path.push(key.as_str().unwrap_or_default().to_string());
                let value = if is_verbatim(path) {
                    value
                } else {
                    fold_at(value, path)
                };
                path.pop();

                match folded.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        folded.insert(key, value);
                    }
                }
            }
            Value::Mapping(folded)
        }
        Value::Sequence(items) => {
            Value::Sequence(items.into_iter().map(|item| fold_at(item, path)).collect())
        }
        Value::Tagged(tagged) => fold_at(tagged.value, path),
        other => other,
    }
}

fn is_verbatim(path: &[String]) -> bool {
    VERBATIM_PATHS.iter().any(|pattern| {
        pattern.len() == path.len()
            && pattern
                .iter()
                .zip(path)
                .all(|(expected, key)| *expected == "*" || *expected == key.as_str())
    })
}

fn fold_key(key: Value) -> Value {
    match key {
        Value::String(s) => Value::String(s.to_lowercase()),
        Value::Bool(b) => Value::String(b.to_string()),
        Value::Number(n) => Value::String(n.to_string()),
        other => other,
    }
}

/// Deep-merge `overlay` into `base`: mappings merge key by key, nulls are
/// ignored, anything else replaces.
pub(crate) fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (_, Value::Null) => {}
        (Value::Mapping(base), Value::Mapping(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        if !value.is_null() {
                            base.insert(key, value);
                        }
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(text: &str) -> RawSource {
        RawSource::new(text.as_bytes().to_vec(), Format::Yaml, "test.yml")
    }

    fn load(text: &str) -> Result<SpartaConfig> {
        let mut config = SpartaConfig::default();
        merge(&mut config, &yaml(text))?;
        Ok(config)
    }

    #[test]
    fn test_keys_default_true_when_absent() {
        let config = load("provider-auth:\n  Secret: abc\n").unwrap();
        assert!(config.provider_auth.keys);
        assert_eq!(config.provider_auth.secret, "abc");
    }

    #[test]
    fn test_keys_false_when_set() {
        let config = load("provider-auth:\n  Keys: false\n").unwrap();
        assert!(!config.provider_auth.keys);
    }

    #[test]
    fn test_case_insensitive_fields() {
        let config = load(
            "OpenShift:\n  Version: 4.5.6\nCLUSTER:\n  Cluster-Name: i\n  base-domain: am.groot\n",
        )
        .unwrap();
        assert_eq!(config.openshift.version, "4.5.6");
        assert_eq!(config.cluster.cluster_name, "i");
        assert_eq!(config.cluster.base_domain, "am.groot");
    }

    #[test]
    fn test_env_keeps_case() {
        let config = load(
            "Koffer:\n  Plugins:\n    Collector-Ops:\n      Env:\n        COLLECT_ALL: true\n        scope: test\n",
        )
        .unwrap();

        // plugin names fold, variable names do not
        let plugin = &config.koffer.plugins["collector-ops"];
        assert_eq!(plugin.env.pairs(), vec!["COLLECT_ALL=true", "scope=test"]);
    }

    #[test]
    fn test_legacy_auth_key() {
        let config = load("provider-pullsecret:\n  Keys: false\n  Key: k\n").unwrap();
        assert!(!config.provider_auth.keys);
        assert_eq!(config.provider_auth.key, "k");
    }

    #[test]
    fn test_null_section_keeps_defaults() {
        let config = load("provider-auth:\nsubnets: ~\n").unwrap();
        assert!(config.provider_auth.keys);
        assert!(config.subnets.is_empty());
    }

    #[test]
    fn test_merge_over_existing_values() {
        let mut config = SpartaConfig::default();
        config.cluster.target = "govcloud".to_string();
        config.cloud.region = "us-gov-west-1".to_string();

        merge(&mut config, &yaml("cloud:\n  region: us-east-1\n")).unwrap();
        assert_eq!(config.cluster.target, "govcloud");
        assert_eq!(config.cloud.region, "us-east-1");
    }

    #[test]
    fn test_syntax_error_leaves_target_untouched() {
        let mut config = SpartaConfig::default();
        config.cluster.target = "keep".to_string();

        let result = merge(&mut config, &yaml("cluster: [unclosed\n"));
        assert!(matches!(result, Err(ConfigError::Decode(_))));
        assert_eq!(config.cluster.target, "keep");
    }

    #[test]
    fn test_type_error_is_decode_error() {
        let result = load("provider-auth:\n  keys: sometimes\n");
        assert!(matches!(result, Err(ConfigError::Decode(msg)) if msg.contains("sometimes")));
    }

    #[test]
    fn test_non_mapping_root() {
        assert!(matches!(load("- a\n- b\n"), Err(ConfigError::Decode(_))));
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(load("").unwrap(), SpartaConfig::default());
        assert_eq!(load("---\n").unwrap(), SpartaConfig::default());
    }

    #[test]
    fn test_json_document() {
        let raw = RawSource::new(
            br#"{"Cloud": {"Provider": "aws", "vpc-id": "vpc-1"},
                 "Koffer": {"Plugins": {"p": {"Env": {"B": "2", "A": "1"}}}}}"#
                .to_vec(),
            Format::Json,
            "test.json",
        );
        let mut config = SpartaConfig::default();
        merge(&mut config, &raw).unwrap();

        assert_eq!(config.cloud.provider, "aws");
        assert_eq!(config.cloud.vpc_id, "vpc-1");
        assert_eq!(config.koffer.plugins["p"].env.pairs(), vec!["B=2", "A=1"]);
    }

    #[test]
    fn test_fold_keys_merges_collisions() {
        let value: Value = serde_yaml::from_str("Cloud:\n  provider: aws\ncloud:\n  region: r\n").unwrap();
        let folded = fold_keys(value);
        let cloud = folded.get("cloud").unwrap();
        assert_eq!(cloud.get("provider").and_then(Value::as_str), Some("aws"));
        assert_eq!(cloud.get("region").and_then(Value::as_str), Some("r"));
    }

    #[test]
    fn test_plugin_named_env_is_folded() {
        let config = load(
            "Koffer:\n  Plugins:\n    env:\n      Version: '1.0'\n      Service: github.com\n      Env:\n        Mixed_Case: kept\n",
        )
        .unwrap();
        let plugin = &config.koffer.plugins["env"];
        assert_eq!(plugin.version, "1.0");
        assert_eq!(plugin.service, "github.com");
        assert_eq!(plugin.env.pairs(), vec!["Mixed_Case=kept"]);
    }

    #[test]
    fn test_subnet_class_named_env_is_folded() {
        let value: Value = serde_yaml::from_str("Subnets:\n  env:\n    - {Id: a}\n").unwrap();
        let folded = fold_keys(value);
        let entry = &folded["subnets"]["env"][0];
        assert_eq!(entry.get("id").and_then(Value::as_str), Some("a"));
    }

    #[test]
    fn test_numeric_subnet_ids() {
        let config = load("Subnets:\n  Private: [12345, subnet-b]\n").unwrap();
        assert_eq!(config.subnets["private"], vec!["12345", "subnet-b"]);
    }
}
