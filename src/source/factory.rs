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

// Source factory for creating configuration sources from a locator

use super::auth::{CloudAuthenticator, ObjectStoreSettings};
use super::backend::ConfigSource;
use super::file::FileSource;
use super::http::HttpSource;
use super::locator::Locator;
use super::s3::S3Source;
use crate::error::Result;
use reqwest::Client;
use std::path::PathBuf;
use tracing::info;

/// Everything a source may need besides the locator itself
pub struct SourceContext<'a> {
    pub search_paths: &'a [PathBuf],
    pub client: &'a Client,
    pub authenticator: &'a CloudAuthenticator,
    pub object_store: &'a ObjectStoreSettings,
}

pub struct SourceFactory;

impl SourceFactory {
    /// Create the source a locator points at
    ///
    /// Local lookups happen here, so a missing file fails before any read.
    pub fn create(locator: &Locator, ctx: &SourceContext<'_>) -> Result<Box<dyn ConfigSource>> {
        match locator {
            Locator::Path(path) => {
                info!("Loading configuration from file {}", path.display());
                Ok(Box::new(FileSource::new(path.clone())?))
            }

            Locator::Search(name) => {
                let source = FileSource::search(name, ctx.search_paths)?;
                info!("Loading configuration from file {}", source.path().display());
                Ok(Box::new(source))
            }

            Locator::Http(url) => {
                info!("Loading configuration from {}", url);
                Ok(Box::new(HttpSource::new(ctx.client.clone(), url.clone())?))
            }

            Locator::S3 { bucket, key } => {
                let client_config = ctx.authenticator.authenticate(ctx.object_store)?;
                info!(
                    "Loading configuration from s3://{}/{} (region {})",
                    bucket, key, client_config.region.name
                );
                Ok(Box::new(S3Source::new(
                    ctx.client.clone(),
                    client_config,
                    bucket.clone(),
                    key.clone(),
                )?))
            }
        }
    }
}
