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

// Object-store authentication: credentials, region and endpoint resolution

use crate::error::{ConfigError, Result};
use std::fmt;
use tracing::{debug, info};

/// Region used when no region name is configured
pub const DEFAULT_REGION: &str = "us-gov-west-1";

// Environment variables for bootstrap values
pub const ENV_S3_KEY: &str = "SPARTA_S3_KEY";
pub const ENV_S3_SECRET: &str = "SPARTA_S3_SECRET";
pub const ENV_S3_REGION: &str = "SPARTA_S3_REGION";
pub const ENV_S3_URL: &str = "SPARTA_S3_URL";

// Ambient AWS credentials
const ENV_AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
const ENV_AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
const ENV_AWS_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";

/// Known regions and their S3 endpoints
static REGIONS: &[(&str, &str)] = &[
    ("us-gov-west-1", "https://s3-fips-us-gov-west-1.amazonaws.com"),
    ("us-gov-east-1", "https://s3.us-gov-east-1.amazonaws.com"),
    ("us-east-1", "https://s3.amazonaws.com"),
    ("us-east-2", "https://s3.us-east-2.amazonaws.com"),
    ("us-west-1", "https://s3-us-west-1.amazonaws.com"),
    ("us-west-2", "https://s3-us-west-2.amazonaws.com"),
    ("ca-central-1", "https://s3.ca-central-1.amazonaws.com"),
    ("eu-west-1", "https://s3-eu-west-1.amazonaws.com"),
    ("eu-west-2", "https://s3.eu-west-2.amazonaws.com"),
    ("eu-west-3", "https://s3.eu-west-3.amazonaws.com"),
    ("eu-central-1", "https://s3.eu-central-1.amazonaws.com"),
    ("eu-north-1", "https://s3.eu-north-1.amazonaws.com"),
    ("ap-northeast-1", "https://s3-ap-northeast-1.amazonaws.com"),
    ("ap-northeast-2", "https://s3.ap-northeast-2.amazonaws.com"),
    ("ap-southeast-1", "https://s3-ap-southeast-1.amazonaws.com"),
    ("ap-southeast-2", "https://s3-ap-southeast-2.amazonaws.com"),
    ("ap-south-1", "https://s3.ap-south-1.amazonaws.com"),
    ("sa-east-1", "https://s3-sa-east-1.amazonaws.com"),
    ("cn-north-1", "https://s3.cn-north-1.amazonaws.com.cn"),
    ("cn-northwest-1", "https://s3.cn-northwest-1.amazonaws.com.cn"),
];

/// A region name and the S3 endpoint requests for it go to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub name: String,
    pub s3_endpoint: String,
}

impl Region {
    pub fn new(name: impl Into<String>, s3_endpoint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            s3_endpoint: s3_endpoint.into(),
        }
    }

    /// Look a region up by exact name in the known region table
    pub fn lookup(name: &str) -> Option<Self> {
        REGIONS
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(known, endpoint)| Self::new(*known, *endpoint))
    }

    pub fn known_names() -> impl Iterator<Item = &'static str> {
        REGIONS.iter().map(|(name, _)| *name)
    }
}

impl Default for Region {
    fn default() -> Self {
        // DEFAULT_REGION is always in the table
        Self::lookup(DEFAULT_REGION).unwrap_or_else(|| {
            Self::new(DEFAULT_REGION, "https://s3-fips-us-gov-west-1.amazonaws.com")
        })
    }
}

/// Credentials requests are made with
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Unsigned requests, for publicly readable objects
    Anonymous,
    Static {
        access_key: String,
        secret_key: String,
        session_token: Option<String>,
    },
}

impl Credentials {
    /// Resolve credentials from an explicit key pair, falling back to the
    /// `AWS_*` variables returned by `env` when both halves are blank.
    pub fn resolve<F>(key: &str, secret: &str, env: F) -> std::result::Result<Self, &'static str>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = key.trim();
        let secret = secret.trim();

        match (key.is_empty(), secret.is_empty()) {
            (false, false) => Ok(Credentials::Static {
                access_key: key.to_string(),
                secret_key: secret.to_string(),
                session_token: None,
            }),
            (true, true) => {
                let access_key = non_blank(env(ENV_AWS_ACCESS_KEY_ID))
                    .ok_or("no access key configured or in the environment")?;
                let secret_key = non_blank(env(ENV_AWS_SECRET_ACCESS_KEY))
                    .ok_or("no secret key configured or in the environment")?;
                Ok(Credentials::Static {
                    access_key,
                    secret_key,
                    session_token: non_blank(env(ENV_AWS_SESSION_TOKEN)),
                })
            }
            (false, true) => Err("access key configured without a secret"),
            (true, false) => Err("secret configured without an access key"),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Credentials::Anonymous)
    }
}

// Keep secrets out of logs and panic messages
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Anonymous => f.write_str("Anonymous"),
            Credentials::Static {
                access_key,
                session_token,
                ..
            } => f
                .debug_struct("Static")
                .field("access_key", access_key)
                .field("secret_key", &"<redacted>")
                .field("session_token", &session_token.as_ref().map(|_| "<redacted>"))
                .finish(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Bootstrap values for the `s3` scheme
///
/// These are supplied by the caller before the document itself is read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectStoreSettings {
    pub key: String,
    pub secret: String,
    pub region: String,
    /// Replaces the region's S3 endpoint when set
    pub url: String,
}

impl ObjectStoreSettings {
    /// Read `SPARTA_S3_KEY`, `SPARTA_S3_SECRET`, `SPARTA_S3_REGION` and `SPARTA_S3_URL`
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).unwrap_or_default();
        Self {
            key: var(ENV_S3_KEY),
            secret: var(ENV_S3_SECRET),
            region: var(ENV_S3_REGION),
            url: var(ENV_S3_URL),
        }
    }

    pub fn with_credentials(mut self, key: impl Into<String>, secret: impl Into<String>) -> Self {
        self.key = key.into();
        self.secret = secret.into();
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

/// Resolved client settings for one object-store fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub region: Region,
    pub credentials: Credentials,
}

/// Turns bootstrap settings into a `ClientConfig`
#[derive(Clone)]
pub struct CloudAuthenticator {
    default_region: Region,
    env: fn(&str) -> Option<String>,
}

impl fmt::Debug for CloudAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudAuthenticator")
            .field("default_region", &self.default_region)
            .finish_non_exhaustive()
    }
}

impl Default for CloudAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}

impl CloudAuthenticator {
    pub fn new() -> Self {
        Self {
            default_region: Region::default(),
            env: |name| std::env::var(name).ok(),
        }
    }

    /// Use `region` when no region name is configured, e.g. a local mock store
    pub fn with_default_region(mut self, region: Region) -> Self {
        self.default_region = region;
        self
    }

    /// Replace the process environment lookup used for ambient credentials
    pub fn with_env_lookup(mut self, env: fn(&str) -> Option<String>) -> Self {
        self.env = env;
        self
    }

    pub fn default_region(&self) -> &Region {
        &self.default_region
    }

    pub fn authenticate(&self, settings: &ObjectStoreSettings) -> Result<ClientConfig> {
        let credentials = match Credentials::resolve(&settings.key, &settings.secret, self.env) {
            Ok(credentials) => credentials,
            Err(reason) => {
                info!("Using anonymous S3 access: {}", reason);
                Credentials::Anonymous
            }
        };

        let region_name = settings.region.trim();
        let mut region = if region_name.is_empty() {
            self.default_region.clone()
        } else {
            Region::lookup(region_name)
                .ok_or_else(|| ConfigError::InvalidRegion(region_name.to_string()))?
        };

        let endpoint = settings.url.trim();
        if !endpoint.is_empty() {
            region.s3_endpoint = endpoint.to_string();
        }

        debug!(
            "S3 region '{}' at {} ({})",
            region.name,
            region.s3_endpoint,
            if credentials.is_anonymous() {
                "anonymous"
            } else {
                "signed"
            }
        );

        Ok(ClientConfig {
            region,
            credentials,
        })
    }
}
