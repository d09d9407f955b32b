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

// Shared fixtures and assertions for integration tests

#![allow(dead_code)]

use sparta_config::SpartaConfig;
use std::path::PathBuf;

pub fn testdata_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("testdata")
}

pub fn sample_yaml() -> String {
    std::fs::read_to_string(testdata_dir().join("sparta.yml")).expect("Failed to read sample")
}

/// Check every value of `tests/testdata/sparta.yml` (and its JSON twin)
pub fn assert_sample_data(config: &SpartaConfig) {
    assert_eq!(config.openshift.version, "4.5.6");

    let cluster = &config.cluster;
    assert_eq!(cluster.target, "govcloud");
    assert_eq!(cluster.vpc_name, "iamgroot");
    assert_eq!(cluster.cluster_name, "i");
    assert_eq!(cluster.base_domain, "am.groot");
    assert_eq!(cluster.cluster_domain, "i.am.groot");
    assert_eq!(cluster.ami_id, "ami-e06e5081");

    let cloud = &config.cloud;
    assert_eq!(cloud.provider, "aws");
    assert_eq!(cloud.region, "us-gov-west-1");
    assert_eq!(cloud.vpc_id, "vpc-0aef6256b40f30778");
    assert_eq!(cloud.cidr_private, "10.0.0.0/24");

    assert_eq!(config.subnets.len(), 1);
    assert_eq!(
        config.subnets["private"],
        vec![
            "subnet-02bf7c8c69067b993",
            "subnet-0d75d5033bfc98414",
            "subnet-058e00cfdb41ca5ce",
        ]
    );

    // keys is not in the document, so the default holds
    assert!(config.provider_auth.keys);
    assert_eq!(config.provider_auth.secret, "XXXXXXXXXXXXXXXXXXXX");
    assert_eq!(
        config.provider_auth.key,
        "xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx"
    );

    assert!(!config.red_sord.enabled);
    assert!(config.koffer.silent);

    let plugins = &config.koffer.plugins;
    assert_eq!(plugins.len(), 3);
    for name in ["collector-infra", "collector-operators", "collector-apps"] {
        assert!(plugins.contains_key(name), "missing plugin {}", name);
    }

    let infra = &plugins["collector-infra"];
    assert_eq!(infra.version, "4.5.6");
    assert_eq!(infra.service, "github.com");
    assert_eq!(infra.organization, "codesparta");
    assert_eq!(infra.branch, "master");
    assert!(infra.env.is_empty());

    let operators = &plugins["collector-operators"];
    let vars = operators.env.to_map();
    assert_eq!(vars.get("COLLECT_ALL").map(String::as_str), Some("true"));
    assert_eq!(vars.get("SCOPE").map(String::as_str), Some("test"));
    assert_eq!(operators.env.pairs(), vec!["COLLECT_ALL=true", "SCOPE=test"]);

    let apps = &plugins["collector-apps"];
    assert_eq!(
        apps.env.pairs(),
        vec!["REGISTRY=registry.sparta.local", "Mixed_Case=kept"]
    );
}
