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

// Configuration source trait for read-once document retrieval

use super::locator::Format;
use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;

/// A fully buffered configuration document and the format to decode it with
#[derive(Debug, Clone, PartialEq)]
pub struct RawSource {
    pub bytes: Bytes,
    pub format: Format,
    /// Human-readable origin (resolved path or URL), for logging
    pub origin: String,
}

impl RawSource {
    pub fn new(bytes: impl Into<Bytes>, format: Format, origin: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            format,
            origin: origin.into(),
        }
    }
}

/// Generic configuration source
///
/// A source fetches exactly one document. Any handle it opens is released
/// before `fetch` returns, on success and on error.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Read the whole document
    async fn fetch(&self) -> Result<RawSource>;

    /// Get source type identifier
    fn source_type(&self) -> &str;
}
