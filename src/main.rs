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

use anyhow::{Context, Result};
use clap::Parser;
use sparta_config::source::auth::{ENV_S3_KEY, ENV_S3_REGION, ENV_S3_SECRET, ENV_S3_URL};
use sparta_config::{write_config, ConfigLoader, LoaderSettings, ObjectStoreSettings};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Sparta Config - resolve and check a Sparta deployment configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration locator: file name, path, file://, http(s):// or s3://
    #[arg(short, long, default_value = sparta_config::DEFAULT_CONFIG_NAME)]
    config: String,

    /// Directory searched for relative locators (repeatable, in order)
    #[arg(short, long = "search-path", default_value = ".")]
    search_paths: Vec<PathBuf>,

    /// S3 access key id
    #[arg(long, env = ENV_S3_KEY, default_value = "")]
    s3_key: String,

    /// S3 secret access key
    #[arg(long, env = ENV_S3_SECRET, default_value = "", hide_env_values = true)]
    s3_secret: String,

    /// S3 region name (defaults to us-gov-west-1)
    #[arg(long, env = ENV_S3_REGION, default_value = "")]
    s3_region: String,

    /// S3 endpoint URL, replacing the region's endpoint
    #[arg(long, env = ENV_S3_URL, default_value = "")]
    s3_url: String,

    /// Write the resolved configuration to this path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize tracing with configured level
    let log_level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let object_store = ObjectStoreSettings::default()
        .with_credentials(args.s3_key, args.s3_secret)
        .with_region(args.s3_region)
        .with_url(args.s3_url);

    let settings = LoaderSettings::new()
        .with_search_paths(args.search_paths)
        .with_object_store(object_store);

    let loader = ConfigLoader::new(settings)?;
    let config = loader
        .load(&args.config)
        .await
        .with_context(|| format!("Failed to load configuration '{}'", args.config))?;

    info!("OpenShift version: {}", config.openshift.version);
    info!(
        "Cluster: {} ({})",
        config.cluster.cluster_name, config.cluster.cluster_domain
    );
    info!("Cloud: {} in {}", config.cloud.provider, config.cloud.region);
    for (name, plugin) in &config.koffer.plugins {
        info!(
            "Plugin {}: {}/{} {} on {} ({} env vars)",
            name,
            plugin.service,
            plugin.organization,
            plugin.version,
            plugin.branch,
            plugin.env.len()
        );
    }

    if let Some(output) = args.output {
        write_config(&config, &output)
            .with_context(|| format!("Failed to write configuration to {}", output.display()))?;
    }

    Ok(())
}
