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

// Locator parsing: scheme dispatch and name/extension splitting

use crate::error::{ConfigError, Result};
use percent_encoding::percent_decode_str;
use std::fmt;
use std::path::PathBuf;
use url::Url;

/// Extension assumed when a locator has none
pub const DEFAULT_EXTENSION: &str = "yml";

/// Document format, derived from the locator's extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "yml" | "yaml" => Ok(Format::Yaml),
            "json" => Ok(Format::Json),
            _ => Err(ConfigError::UnsupportedFormat(ext.to_string())),
        }
    }

    /// Format of a path or URL path, YAML when there is no extension
    pub fn for_locator(locator: &str) -> Result<Self> {
        let (_, ext) = split_name_and_ext(locator);
        Self::from_extension(&ext)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Yaml => f.write_str("yaml"),
            Format::Json => f.write_str("json"),
        }
    }
}

/// Split a path or URL path into its final segment and that segment's extension.
///
/// `"conf/sparta.json"` gives `("sparta.json", "json")`; `"sparta"` gives
/// `("sparta", "yml")`.
pub fn split_name_and_ext(locator: &str) -> (String, String) {
    let trimmed = locator.trim_end_matches(['/', '\\']);
    let name = trimmed
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(trimmed)
        .to_string();

    let ext = match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() => name[idx + 1..].to_string(),
        _ => DEFAULT_EXTENSION.to_string(),
    };

    (name, ext)
}

/// Where a configuration document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// Absolute local path, read directly
    Path(PathBuf),
    /// Relative name, resolved against the search paths
    Search(PathBuf),
    /// `http://` or `https://` URL
    Http(Url),
    /// `s3://bucket/key`
    S3 { bucket: String, key: String },
}

/// Bucket and object key of an `s3://bucket/key` locator.
///
/// The key is taken from the locator text rather than the parsed URL, so it
/// keeps `.` and `..` segments, and is percent-decoded exactly once.
fn split_s3(locator: &str, trimmed: &str) -> Result<(String, String)> {
    let rest = trimmed
        .get("s3:".len()..)
        .and_then(|rest| rest.strip_prefix("//"))
        .ok_or_else(|| ConfigError::invalid_locator(locator, "expected s3://bucket/key"))?;
    let (bucket, key) = rest.split_once('/').unwrap_or((rest, ""));

    let key = percent_decode_str(key)
        .decode_utf8()
        .map_err(|e| ConfigError::invalid_locator(locator, format!("bad S3 object key: {}", e)))?;
    Ok((bucket.to_string(), key.trim_start_matches('/').to_string()))
}

impl Locator {
    pub fn parse(locator: &str) -> Result<Self> {
        let trimmed = locator.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::invalid_locator(locator, "locator is empty"));
        }

        let url = match Url::parse(trimmed) {
            Ok(url) => url,
            // no scheme at all: a plain filesystem path
            Err(url::ParseError::RelativeUrlWithoutBase) => return Ok(Self::from_path(trimmed)),
            Err(e) => return Err(ConfigError::invalid_locator(locator, e)),
        };

        match url.scheme() {
            "file" => {
                let path = url.to_file_path().map_err(|_| {
                    ConfigError::invalid_locator(locator, "file URL is not an absolute local path")
                })?;
                Ok(Locator::Path(path))
            }
            "http" | "https" => Ok(Locator::Http(url)),
            "s3" => {
                let (bucket, key) = split_s3(locator, trimmed)?;
                if bucket.is_empty() {
                    return Err(ConfigError::invalid_locator(locator, "missing S3 bucket"));
                }
                if key.is_empty() {
                    return Err(ConfigError::invalid_locator(locator, "missing S3 object key"));
                }
                Ok(Locator::S3 { bucket, key })
            }
            // Windows drive letters parse as one-letter schemes
            scheme if scheme.len() == 1 && cfg!(windows) => Ok(Self::from_path(trimmed)),
            scheme => Err(ConfigError::UnsupportedScheme(scheme.to_string())),
        }
    }

    fn from_path(path: &str) -> Self {
        let path = PathBuf::from(path);
        if path.is_absolute() {
            Locator::Path(path)
        } else {
            Locator::Search(path)
        }
    }

    /// Path component used to pick the document format
    pub fn format_path(&self) -> String {
        match self {
            Locator::Path(path) | Locator::Search(path) => path.to_string_lossy().into_owned(),
            Locator::Http(url) => url.path().to_string(),
            Locator::S3 { key, .. } => key.clone(),
        }
    }

    pub fn format(&self) -> Result<Format> {
        Format::for_locator(&self.format_path())
    }

    pub fn scheme(&self) -> &str {
        match self {
            Locator::Path(_) | Locator::Search(_) => "file",
            Locator::Http(url) => url.scheme(),
            Locator::S3 { .. } => "s3",
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Path(path) | Locator::Search(path) => write!(f, "{}", path.display()),
            Locator::Http(url) => write!(f, "{}", url),
            Locator::S3 { bucket, key } => write!(f, "s3://{}/{}", bucket, key),
        }
    }
}
