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

// Filesystem source implementation

use super::backend::{ConfigSource, RawSource};
use super::locator::{Format, DEFAULT_EXTENSION};
use crate::error::{ConfigError, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Reads a configuration document from local disk
pub struct FileSource {
    path: PathBuf,
    format: Format,
}

impl FileSource {
    pub fn new(path: PathBuf) -> Result<Self> {
        let format = Format::for_locator(&path.to_string_lossy())?;
        Ok(Self { path, format })
    }

    /// Find `name` in the first search path that contains it.
    ///
    /// A name without an extension is looked up as `name.yml`. An empty
    /// list of search paths means the current directory.
    pub fn search(name: &Path, search_paths: &[PathBuf]) -> Result<Self> {
        let file_name = if name.extension().is_some() {
            name.to_path_buf()
        } else {
            let mut with_ext = name.as_os_str().to_owned();
            with_ext.push(".");
            with_ext.push(DEFAULT_EXTENSION);
            PathBuf::from(with_ext)
        };

        let current_dir = [PathBuf::from(".")];
        let dirs = if search_paths.is_empty() {
            &current_dir[..]
        } else {
            search_paths
        };

        let mut searched = Vec::with_capacity(dirs.len());
        for dir in dirs {
            let candidate = dir.join(&file_name);
            debug!("Looking for configuration at {}", candidate.display());
            if candidate.is_file() {
                return Self::new(candidate);
            }
            searched.push(candidate);
        }

        Err(ConfigError::SourceNotFound {
            name: file_name.to_string_lossy().into_owned(),
            searched,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ConfigSource for FileSource {
    async fn fetch(&self) -> Result<RawSource> {
        let bytes = fs::read(&self.path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::SourceNotFound {
                name: self.path.to_string_lossy().into_owned(),
                searched: vec![self.path.clone()],
            },
            _ => ConfigError::unreachable(&self.path.to_string_lossy(), e),
        })?;

        debug!("Read {} bytes from {}", bytes.len(), self.path.display());

        Ok(RawSource::new(
            bytes,
            self.format,
            self.path.to_string_lossy(),
        ))
    }

    fn source_type(&self) -> &str {
        "file"
    }
}
