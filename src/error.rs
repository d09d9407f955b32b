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

// Error types for configuration resolution

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving, decoding or writing a configuration.
///
/// Every variant is terminal for the call that produced it. Nothing is retried.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration locator '{locator}': {reason}")]
    InvalidLocator { locator: String, reason: String },

    #[error("Configuration '{name}' not found (searched: {searched:?})")]
    SourceNotFound { name: String, searched: Vec<PathBuf> },

    #[error("Configuration source '{locator}' is unreachable: {reason}")]
    SourceUnreachable { locator: String, reason: String },

    #[error("Unsupported locator scheme '{0}'. Supported: file, http, https, s3")]
    UnsupportedScheme(String),

    #[error("The region '{0}' is not a valid AWS region")]
    InvalidRegion(String),

    #[error("Unsupported configuration format '{0}'. Supported: yml, yaml, json")]
    UnsupportedFormat(String),

    #[error("Failed to decode configuration: {0}")]
    Decode(String),

    #[error("Failed to write configuration to {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid_locator(locator: &str, reason: impl ToString) -> Self {
        ConfigError::InvalidLocator {
            locator: locator.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn unreachable(locator: &str, reason: impl ToString) -> Self {
        ConfigError::SourceUnreachable {
            locator: locator.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
