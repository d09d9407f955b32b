// Configuration loading integration tests (local files)

mod common;

use common::{assert_sample_data, sample_yaml, testdata_dir};
use sparta_config::{
    load_config, write_config, ConfigError, ConfigLoader, LoaderSettings, SpartaConfig,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[tokio::test]
async fn test_read_sample_yaml() {
    let config = load_config("sparta.yml", [testdata_dir()])
        .await
        .expect("Failed to load sample");
    assert_sample_data(&config);
}

#[tokio::test]
async fn test_read_sample_json() {
    let config = load_config("sparta.json", [testdata_dir()])
        .await
        .expect("Failed to load JSON sample");
    assert_sample_data(&config);
}

#[tokio::test]
async fn test_name_without_extension_defaults_to_yml() {
    let config = load_config("sparta", [testdata_dir()]).await.unwrap();
    assert_sample_data(&config);
}

#[tokio::test]
async fn test_absolute_path_ignores_search_paths() {
    let path = testdata_dir().join("sparta.yml");
    let empty = TempDir::new().unwrap();

    let config = load_config(path.to_str().unwrap(), [empty.path().to_path_buf()])
        .await
        .unwrap();
    assert_sample_data(&config);
}

#[cfg(unix)]
#[tokio::test]
async fn test_file_url() {
    let path = testdata_dir().join("sparta.yml");
    let url = format!("file://{}", path.display());

    let config = load_config(&url, Vec::<PathBuf>::new()).await.unwrap();
    assert_sample_data(&config);
}

#[tokio::test]
async fn test_search_path_precedence() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    fs::write(first.path().join("sparta.yml"), "Cluster:\n  Target: first\n").unwrap();
    fs::write(second.path().join("sparta.yml"), "Cluster:\n  Target: second\n").unwrap();

    let config = load_config(
        "sparta.yml",
        [first.path().to_path_buf(), second.path().to_path_buf()],
    )
    .await
    .unwrap();
    assert_eq!(config.cluster.target, "first");

    let config = load_config(
        "sparta.yml",
        [second.path().to_path_buf(), first.path().to_path_buf()],
    )
    .await
    .unwrap();
    assert_eq!(config.cluster.target, "second");
}

#[tokio::test]
async fn test_search_falls_through_to_later_path() {
    let empty = TempDir::new().unwrap();
    let config = load_config("sparta.yml", [empty.path().to_path_buf(), testdata_dir()])
        .await
        .unwrap();
    assert_sample_data(&config);
}

#[tokio::test]
async fn test_missing_file() {
    let empty = TempDir::new().unwrap();
    let result = load_config("sparta.yml", [empty.path().to_path_buf()]).await;
    assert!(matches!(result, Err(ConfigError::SourceNotFound { .. })));

    let absolute = empty.path().join("nope.yml");
    let result = load_config(absolute.to_str().unwrap(), Vec::<PathBuf>::new()).await;
    assert!(matches!(result, Err(ConfigError::SourceNotFound { .. })));
}

#[tokio::test]
async fn test_keys_default_and_override() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("absent.yml"), "provider-auth:\n  Key: k\n").unwrap();
    fs::write(dir.path().join("off.yml"), "provider-auth:\n  Keys: false\n").unwrap();

    let config = load_config("absent.yml", [dir.path().to_path_buf()]).await.unwrap();
    assert!(config.provider_auth.keys);

    let config = load_config("off.yml", [dir.path().to_path_buf()]).await.unwrap();
    assert!(!config.provider_auth.keys);
}

#[tokio::test]
async fn test_partial_document_keeps_sections() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("sparta.yml"), "OpenShift:\n  Version: 4.6\n").unwrap();

    let config = load_config("sparta.yml", [dir.path().to_path_buf()]).await.unwrap();
    assert_eq!(config.openshift.version, "4.6");
    assert!(config.subnets.is_empty());
    assert!(config.koffer.plugins.is_empty());
    assert!(config.cluster.target.is_empty());
}

#[tokio::test]
async fn test_malformed_document() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("sparta.yml"), "Cluster: [unclosed\n").unwrap();

    let result = load_config("sparta.yml", [dir.path().to_path_buf()]).await;
    assert!(matches!(result, Err(ConfigError::Decode(_))));
}

#[tokio::test]
async fn test_unsupported_scheme() {
    let result = load_config("ftp://host/file", [testdata_dir()]).await;
    assert!(matches!(result, Err(ConfigError::UnsupportedScheme(s)) if s == "ftp"));
}

#[tokio::test]
async fn test_round_trip_yaml() {
    let original = load_config("sparta.yml", [testdata_dir()]).await.unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("written.yml");
    write_config(&original, &path).expect("Failed to write config");

    let reloaded = load_config(path.to_str().unwrap(), Vec::<PathBuf>::new())
        .await
        .unwrap();
    assert_eq!(reloaded, original);
    assert_sample_data(&reloaded);
}

#[tokio::test]
async fn test_round_trip_json() {
    let original = load_config("sparta.yml", [testdata_dir()]).await.unwrap();

    let dir = TempDir::new().unwrap();
    write_config(&original, dir.path().join("written.json")).unwrap();

    let reloaded = load_config("written.json", [dir.path().to_path_buf()])
        .await
        .unwrap();
    assert_eq!(reloaded, original);
}

#[tokio::test]
async fn test_round_trip_is_stable() {
    let original = load_config("sparta.yml", [testdata_dir()]).await.unwrap();
    let dir = TempDir::new().unwrap();

    let first = dir.path().join("first.yml");
    write_config(&original, &first).unwrap();
    let reloaded = load_config(first.to_str().unwrap(), Vec::<PathBuf>::new())
        .await
        .unwrap();

    let second = dir.path().join("second.yml");
    write_config(&reloaded, &second).unwrap();

    assert_eq!(
        fs::read_to_string(&first).unwrap(),
        fs::read_to_string(&second).unwrap()
    );
}

#[tokio::test]
async fn test_round_trip_default_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("default.yml");
    write_config(&SpartaConfig::default(), &path).unwrap();

    let reloaded = load_config(path.to_str().unwrap(), Vec::<PathBuf>::new())
        .await
        .unwrap();
    assert_eq!(reloaded, SpartaConfig::default());
}

#[tokio::test]
async fn test_load_default_name() {
    let loader = ConfigLoader::new(LoaderSettings::new().with_search_path(testdata_dir())).unwrap();
    let config = loader.load_default().await.unwrap();
    assert_sample_data(&config);
}

#[tokio::test]
async fn test_resolve_returns_raw_document() {
    let loader = ConfigLoader::new(LoaderSettings::new().with_search_path(testdata_dir())).unwrap();
    let raw = loader.resolve("sparta.yml").await.unwrap();

    assert_eq!(raw.format, sparta_config::Format::Yaml);
    assert_eq!(&raw.bytes[..], sample_yaml().as_bytes());
}
