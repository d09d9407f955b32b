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

// Configuration module for Sparta
//
// Provides:
// - Typed configuration with safe defaults
// - Loading from local files, HTTP(S) and S3
// - Case-insensitive decoding merged over defaults
// - Writing a configuration back to disk

pub mod decode;
mod env;
mod loader;
pub mod types;
mod weak;
pub mod writer;

pub use env::{EnvVar, EnvVars};
pub use loader::{ConfigLoader, LoaderSettings, DEFAULT_CONFIG_NAME};
pub use types::*;
pub use writer::write_config;

use crate::error::Result;
use crate::source::ObjectStoreSettings;
use std::path::PathBuf;

/// A fresh configuration with every section present and defaults applied
pub fn build_default() -> SpartaConfig {
    SpartaConfig::default()
}

/// Load configuration from `locator`, searching `search_paths` for relative names
pub async fn load_config<I, P>(locator: &str, search_paths: I) -> Result<SpartaConfig>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    let settings = LoaderSettings::new().with_search_paths(search_paths);
    ConfigLoader::new(settings)?.load(locator).await
}

/// Load configuration with S3 bootstrap values taken from `SPARTA_S3_*`
pub async fn load_config_with_env<I, P>(locator: &str, search_paths: I) -> Result<SpartaConfig>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    let settings = LoaderSettings::new()
        .with_search_paths(search_paths)
        .with_object_store(ObjectStoreSettings::from_env());
    ConfigLoader::new(settings)?.load(locator).await
}
