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

// Sparta configuration resolution
//
// Resolves the single deployment configuration document used for cluster
// provisioning:
// - Locates it on disk (absolute path or search paths), over HTTP(S) or in S3
// - Authenticates against S3 with configured, ambient or anonymous credentials
// - Merges it over safe defaults with case-insensitive field matching
// - Keeps plugin environment variable names exactly as authored
// - Writes a configuration back out losslessly

pub mod config;
pub mod error;
pub mod source;

// Re-export main types
pub use config::{
    build_default, load_config, load_config_with_env, write_config, ConfigLoader, EnvVar,
    EnvVars, LoaderSettings, SpartaConfig, DEFAULT_CONFIG_NAME,
};
pub use error::{ConfigError, Result};
pub use source::{
    split_name_and_ext, CloudAuthenticator, Credentials, Format, Locator, ObjectStoreSettings,
    RawSource, Region,
};
