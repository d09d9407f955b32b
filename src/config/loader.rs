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

// Configuration loader: locate, fetch, default and merge

use super::decode;
use super::types::SpartaConfig;
use crate::error::{ConfigError, Result};
use crate::source::{
    CloudAuthenticator, Locator, ObjectStoreSettings, RawSource, SourceContext, SourceFactory,
};
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Default file name of the configuration document
pub const DEFAULT_CONFIG_NAME: &str = "sparta.yml";

/// How the loader finds and fetches documents
#[derive(Debug, Clone, Default)]
pub struct LoaderSettings {
    /// Directories searched, in order, for relative locators
    pub search_paths: Vec<PathBuf>,
    /// Bootstrap values for `s3://` locators
    pub object_store: ObjectStoreSettings,
    /// Request timeout for HTTP and S3; the client default when unset
    pub timeout: Option<Duration>,
}

impl LoaderSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.search_paths.push(path.into());
        self
    }

    pub fn with_search_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.search_paths.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn with_object_store(mut self, object_store: ObjectStoreSettings) -> Self {
        self.object_store = object_store;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Resolves a locator into a fully merged `SpartaConfig`
pub struct ConfigLoader {
    settings: LoaderSettings,
    authenticator: CloudAuthenticator,
    client: Client,
}

impl ConfigLoader {
    pub fn new(settings: LoaderSettings) -> Result<Self> {
        Self::with_authenticator(settings, CloudAuthenticator::new())
    }

    /// Use a specific authenticator, e.g. one with a test default region
    pub fn with_authenticator(
        settings: LoaderSettings,
        authenticator: CloudAuthenticator,
    ) -> Result<Self> {
        let mut client_builder = reqwest::ClientBuilder::new()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = settings.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder
            .build()
            .map_err(|e| ConfigError::unreachable("http", format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            settings,
            authenticator,
            client,
        })
    }

    pub fn settings(&self) -> &LoaderSettings {
        &self.settings
    }

    /// Locate and read the document `locator` points at
    pub async fn resolve(&self, locator: &str) -> Result<RawSource> {
        let locator = Locator::parse(locator)?;
        let ctx = SourceContext {
            search_paths: &self.settings.search_paths,
            client: &self.client,
            authenticator: &self.authenticator,
            object_store: &self.settings.object_store,
        };

        let source = SourceFactory::create(&locator, &ctx)?;
        source.fetch().await
    }

    /// Load a configuration: fresh defaults with the document merged over them
    pub async fn load(&self, locator: &str) -> Result<SpartaConfig> {
        let raw = self.resolve(locator).await?;

        let mut config = SpartaConfig::default();
        decode::merge(&mut config, &raw)?;

        info!(
            "Loaded configuration from {} ({} subnet groups, {} plugins)",
            raw.origin,
            config.subnets.len(),
            config.koffer.plugins.len()
        );
        Ok(config)
    }

    /// Load `sparta.yml` from the search paths
    pub async fn load_default(&self) -> Result<SpartaConfig> {
        self.load(DEFAULT_CONFIG_NAME).await
    }
}
