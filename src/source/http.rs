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

// HTTP(S) source implementation

use super::backend::{ConfigSource, RawSource};
use super::locator::Format;
use crate::error::{ConfigError, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

/// Fetches a configuration document with a plain GET
pub struct HttpSource {
    client: Client,
    url: Url,
    format: Format,
}

impl HttpSource {
    pub fn new(client: Client, url: Url) -> Result<Self> {
        let format = Format::for_locator(url.path())?;
        Ok(Self {
            client,
            url,
            format,
        })
    }
}

#[async_trait]
impl ConfigSource for HttpSource {
    async fn fetch(&self) -> Result<RawSource> {
        let locator = self.url.as_str();
        debug!("GET {}", locator);

        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| ConfigError::unreachable(locator, e))?;

        if !response.status().is_success() {
            let status = response.status();
            warn!("Configuration request to {} failed with status {}", locator, status);
            return Err(ConfigError::unreachable(
                locator,
                format!("HTTP status {}", status),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ConfigError::unreachable(locator, e))?;

        debug!("Read {} bytes from {}", bytes.len(), locator);

        Ok(RawSource::new(bytes, self.format, locator))
    }

    fn source_type(&self) -> &str {
        "http"
    }
}
