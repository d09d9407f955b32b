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

// Configuration types for Sparta provisioning
//
// Field names are the lowercase external names. The decoder folds document
// keys to lowercase before matching, so `OpenShift.Version` and
// `openshift.version` address the same field.

use super::env::EnvVars;
use super::weak;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Main configuration structure
///
/// Every section is always present. `SpartaConfig::default()` is the seed
/// that a source document is merged over.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SpartaConfig {
    pub openshift: OpenShift,
    pub cluster: Cluster,
    pub cloud: Cloud,
    #[serde(deserialize_with = "weak::string_lists")]
    pub subnets: Subnets,
    #[serde(rename = "provider-auth")]
    pub provider_auth: ProviderAuth,
    #[serde(rename = "redsord")]
    pub red_sord: RedSord,
    pub koffer: Koffer,
}

impl Default for SpartaConfig {
    fn default() -> Self {
        Self {
            openshift: OpenShift::default(),
            cluster: Cluster::default(),
            cloud: Cloud::default(),
            subnets: Subnets::new(),
            provider_auth: ProviderAuth::default(),
            red_sord: RedSord::default(),
            koffer: Koffer::default(),
        }
    }
}

/// OpenShift release the artifacts are collected for
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OpenShift {
    #[serde(deserialize_with = "weak::string")]
    pub version: String,
}

/// Cluster naming and networking
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Cluster {
    #[serde(deserialize_with = "weak::string")]
    pub target: String,

    #[serde(rename = "vpc-name", deserialize_with = "weak::string")]
    pub vpc_name: String,

    #[serde(rename = "cluster-name", deserialize_with = "weak::string")]
    pub cluster_name: String,

    #[serde(rename = "base-domain", deserialize_with = "weak::string")]
    pub base_domain: String,

    #[serde(rename = "cluster-domain", deserialize_with = "weak::string")]
    pub cluster_domain: String,

    #[serde(rename = "ami-id", deserialize_with = "weak::string")]
    pub ami_id: String,
}

/// Target cloud and the VPC created there
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Cloud {
    #[serde(deserialize_with = "weak::string")]
    pub provider: String,

    #[serde(deserialize_with = "weak::string")]
    pub region: String,

    #[serde(rename = "vpc-id", deserialize_with = "weak::string")]
    pub vpc_id: String,

    #[serde(rename = "cidr-private", deserialize_with = "weak::string")]
    pub cidr_private: String,
}

/// VPC subnet ids, in document order
pub type SubnetGroup = Vec<String>;

/// Subnet class ("private", "public") to its subnet ids
pub type Subnets = BTreeMap<String, SubnetGroup>;

/// Provider (AWS) authentication
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderAuth {
    #[serde(deserialize_with = "weak::bool")]
    pub keys: bool,

    #[serde(deserialize_with = "weak::string")]
    pub secret: String,

    #[serde(deserialize_with = "weak::string")]
    pub key: String,
}

impl Default for ProviderAuth {
    fn default() -> Self {
        Self {
            keys: true,
            secret: String::new(),
            key: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RedSord {
    #[serde(deserialize_with = "weak::bool")]
    pub enabled: bool,
}

/// A Koffer collector plugin: where it comes from and how it runs
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Plugin {
    #[serde(deserialize_with = "weak::string")]
    pub version: String,

    /// Hosting service, e.g. "github.com"
    #[serde(deserialize_with = "weak::string")]
    pub service: String,

    #[serde(deserialize_with = "weak::string")]
    pub organization: String,

    #[serde(deserialize_with = "weak::string")]
    pub branch: String,

    pub env: EnvVars,
}

/// Plugin name to plugin definition
pub type Plugins = BTreeMap<String, Plugin>;

/// Koffer artifact collector settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Koffer {
    #[serde(deserialize_with = "weak::bool")]
    pub silent: bool,

    pub plugins: Plugins,
}
