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

// Writing a configuration back to disk

use super::types::SpartaConfig;
use crate::error::{ConfigError, Result};
use crate::source::Format;
use std::path::Path;
use tracing::info;

/// Render a configuration in the given format, using the external key names
pub fn to_string(config: &SpartaConfig, format: Format) -> std::result::Result<String, String> {
    match format {
        Format::Yaml => serde_yaml::to_string(config).map_err(|e| e.to_string()),
        Format::Json => serde_json::to_string_pretty(config)
            .map(|mut text| {
                text.push('\n');
                text
            })
            .map_err(|e| e.to_string()),
    }
}

/// Write `config` to `path` in the format implied by its extension
/// (YAML when there is none).
pub fn write_config<P: AsRef<Path>>(config: &SpartaConfig, path: P) -> Result<()> {
    let path = path.as_ref();
    let format = Format::for_locator(&path.to_string_lossy())?;

    let write_error = |reason: String| ConfigError::Write {
        path: path.to_path_buf(),
        reason,
    };

    let content = to_string(config, format).map_err(write_error)?;
    std::fs::write(path, content).map_err(|e| write_error(e.to_string()))?;

    info!("Wrote {} configuration to {}", format, path.display());
    Ok(())
}
