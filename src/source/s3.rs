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

// S3 object source implementation
//
// Objects are fetched path-style (`{endpoint}/{bucket}/{key}`) so that any
// S3-compatible store works behind an endpoint override. Requests carry an
// AWS Signature Version 4 when credentials are configured, and go out
// unsigned for anonymous access.

use super::auth::{ClientConfig, Credentials};
use super::backend::{ConfigSource, RawSource};
use super::locator::Format;
use crate::error::{ConfigError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::Client;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};
use url::Url;

type HmacSha256 = Hmac<Sha256>;

/// SHA-256 of an empty body
const EMPTY_PAYLOAD_SHA256: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Fetches a configuration document from an S3 bucket
pub struct S3Source {
    client: Client,
    config: ClientConfig,
    bucket: String,
    key: String,
    format: Format,
}

impl S3Source {
    pub fn new(client: Client, config: ClientConfig, bucket: String, key: String) -> Result<Self> {
        let format = Format::for_locator(&key)?;
        Ok(Self {
            client,
            config,
            bucket,
            key,
            format,
        })
    }

    fn locator(&self) -> String {
        format!("s3://{}/{}", self.bucket, self.key)
    }

    /// Path-style object URL on the configured endpoint
    pub fn object_url(&self) -> Result<Url> {
        // URLs normalize dot segments away, which would address another object
        if self.key.split('/').any(|segment| segment == "." || segment == "..") {
            return Err(ConfigError::invalid_locator(
                &self.locator(),
                "S3 object keys with '.' or '..' segments cannot be requested",
            ));
        }

        let endpoint = self.config.region.s3_endpoint.trim_end_matches('/');
        let endpoint = if endpoint.contains("://") {
            endpoint.to_string()
        } else {
            format!("https://{}", endpoint)
        };

        let raw = format!(
            "{}/{}/{}",
            endpoint,
            uri_encode(&self.bucket),
            uri_encode(&self.key)
        );
        Url::parse(&raw).map_err(|e| {
            ConfigError::invalid_locator(&self.config.region.s3_endpoint, format!("bad S3 endpoint: {}", e))
        })
    }
}

#[async_trait]
impl ConfigSource for S3Source {
    async fn fetch(&self) -> Result<RawSource> {
        let locator = self.locator();
        let url = self.object_url()?;
        debug!("GET {} via {}", locator, url);

        let mut request = self.client.get(url.clone());
        if let Credentials::Static {
            access_key,
            secret_key,
            session_token,
        } = &self.config.credentials
        {
            let headers = sign_get(
                &url,
                &self.config.region.name,
                access_key,
                secret_key,
                session_token.as_deref(),
                Utc::now(),
            )
            .map_err(|e| ConfigError::unreachable(&locator, format!("request signing failed: {}", e)))?;

            for (name, value) in headers {
                request = request.header(name, value);
            }
        }

        let response = request
            .send()
            .await
            .map_err(|e| ConfigError::unreachable(&locator, e))?;

        if !response.status().is_success() {
            let status = response.status();
            warn!("S3 request for {} failed with status {}", locator, status);
            return Err(ConfigError::unreachable(
                &locator,
                format!("HTTP status {}", status),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ConfigError::unreachable(&locator, e))?;

        debug!("Read {} bytes from {}", bytes.len(), locator);

        Ok(RawSource::new(bytes, self.format, locator))
    }

    fn source_type(&self) -> &str {
        "s3"
    }
}

/// Percent-encode an object key the way SigV4 expects: unreserved characters
/// and `/` stay, everything else becomes `%XX`.
fn uri_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> std::result::Result<Vec<u8>, hmac::digest::InvalidLength> {
    let mut mac = HmacSha256::new_from_slice(key)?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Derive the SigV4 signing key for a date (`YYYYMMDD`), region and service
fn signing_key(
    secret_key: &str,
    date: &str,
    region: &str,
    service: &str,
) -> std::result::Result<Vec<u8>, hmac::digest::InvalidLength> {
    let k_date = hmac_sha256(format!("AWS4{}", secret_key).as_bytes(), date.as_bytes())?;
    let k_region = hmac_sha256(&k_date, region.as_bytes())?;
    let k_service = hmac_sha256(&k_region, service.as_bytes())?;
    hmac_sha256(&k_service, b"aws4_request")
}

/// Headers that sign an empty-bodied GET of `url` with AWS Signature Version 4
fn sign_get(
    url: &Url,
    region: &str,
    access_key: &str,
    secret_key: &str,
    session_token: Option<&str>,
    now: DateTime<Utc>,
) -> std::result::Result<Vec<(&'static str, String)>, hmac::digest::InvalidLength> {
    let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();

    let host = match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    };

    // sorted by header name
    let mut headers: Vec<(&'static str, String)> = vec![
        ("host", host),
        ("x-amz-content-sha256", EMPTY_PAYLOAD_SHA256.to_string()),
        ("x-amz-date", amz_date),
    ];
    if let Some(token) = session_token {
        headers.push(("x-amz-security-token", token.to_string()));
    }

    let authorization = authorization(
        "GET",
        url.path(),
        url.query().unwrap_or_default(),
        &headers,
        region,
        access_key,
        secret_key,
        now,
    )?;

    // host is set by the HTTP client from the URL
    headers.retain(|(name, _)| *name != "host");
    headers.push(("authorization", authorization));
    Ok(headers)
}

/// `Authorization` header value for a request with an empty body.
///
/// `headers` are the signed headers with lowercase names, sorted by name.
#[allow(clippy::too_many_arguments)]
fn authorization(
    method: &str,
    path: &str,
    query: &str,
    headers: &[(&str, String)],
    region: &str,
    access_key: &str,
    secret_key: &str,
    now: DateTime<Utc>,
) -> std::result::Result<String, hmac::digest::InvalidLength> {
    let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
    let date = now.format("%Y%m%d").to_string();

    let canonical_headers: String = headers
        .iter()
        .map(|(name, value)| format!("{}:{}\n", name, value.trim()))
        .collect();
    let signed_headers = headers
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(";");

    let canonical_request = format!(
        "{}\n{}\n{}\n{}\n{}\n{}",
        method, path, query, canonical_headers, signed_headers, EMPTY_PAYLOAD_SHA256
    );

    let scope = format!("{}/{}/s3/aws4_request", date, region);
    let string_to_sign = format!(
        "AWS4-HMAC-SHA256\n{}\n{}\n{}",
        amz_date,
        scope,
        hex::encode(Sha256::digest(canonical_request.as_bytes()))
    );

    let key = signing_key(secret_key, &date, region, "s3")?;
    let signature = hex::encode(hmac_sha256(&key, string_to_sign.as_bytes())?);

    Ok(format!(
        "AWS4-HMAC-SHA256 Credential={}/{}, SignedHeaders={}, Signature={}",
        access_key, scope, signed_headers, signature
    ))
}
