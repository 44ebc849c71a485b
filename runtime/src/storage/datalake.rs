//! Azure Data Lake Storage Gen2 client over the DFS REST API.
//!
//! Requests are authorized with the storage account's shared key
//! (HMAC-SHA256 over the canonical request). Only the two operations the
//! publisher needs are implemented: create filesystem and write file
//! (create, append, flush).

use std::collections::BTreeMap;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::header::AUTHORIZATION;
use reqwest::Method;
use sha2::Sha256;
use url::Url;

use super::{ContainerStatus, ObjectStore, StorageError};
use crate::config::StorageConfig;

/// REST API version sent with every request.
pub const API_VERSION: &str = "2021-08-06";

/// Error codes returned with 409 when the filesystem is already there.
const ALREADY_EXISTS_CODES: [&str; 2] = ["FilesystemAlreadyExists", "ContainerAlreadyExists"];

type HmacSha256 = Hmac<Sha256>;

/// Data Lake Gen2 store authenticated with an account key.
#[derive(Clone)]
pub struct DataLakeStore {
    client: reqwest::Client,
    account: String,
    key: Vec<u8>,
    endpoint: Url,
}

impl std::fmt::Debug for DataLakeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataLakeStore")
            .field("account", &self.account)
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl DataLakeStore {
    /// Build a store from validated credentials. Performs no I/O.
    pub fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        let key = STANDARD
            .decode(config.account_key.trim())
            .map_err(|e| StorageError::InvalidKey(e.to_string()))?;
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| StorageError::InvalidEndpoint(e.to_string()))?;
        if endpoint.cannot_be_a_base() {
            return Err(StorageError::InvalidEndpoint(config.endpoint.clone()));
        }

        // Uploads carry no timeout.
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            account: config.account_name.clone(),
            key,
            endpoint,
        })
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    /// Resource URL for `segments` (each may contain `/`) plus query pairs.
    fn url(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, StorageError> {
        let mut url = self.endpoint.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| StorageError::InvalidEndpoint(self.endpoint.to_string()))?;
            path.pop_if_empty();
            for seg in segments {
                path.extend(seg.split('/').filter(|s| !s.is_empty()));
            }
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }
        Ok(url)
    }

    fn sign(&self, string_to_sign: &str) -> Result<String, StorageError> {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|e| StorageError::InvalidKey(e.to_string()))?;
        mac.update(string_to_sign.as_bytes());
        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }

    async fn send(
        &self,
        operation: &'static str,
        method: Method,
        url: Url,
        extra_headers: Vec<(&'static str, String)>,
        body: Vec<u8>,
    ) -> Result<reqwest::Response, StorageError> {
        let mut headers = vec![
            ("x-ms-date", Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string()),
            ("x-ms-version", API_VERSION.to_string()),
        ];
        headers.extend(extra_headers);

        let to_sign = string_to_sign(&self.account, &method, &url, &headers, body.len());
        let signature = self.sign(&to_sign)?;

        tracing::debug!(operation, %method, url = %url, "data lake request");

        let mut req = self.client.request(method, url);
        for (name, value) in &headers {
            req = req.header(*name, value);
        }
        let resp = req
            .header(AUTHORIZATION, format!("SharedKey {}:{signature}", self.account))
            .body(body)
            .send()
            .await?;

        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status().as_u16();
        let code = resp
            .headers()
            .get("x-ms-error-code")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();
        let body = resp.text().await.unwrap_or_default();
        Err(StorageError::Status {
            operation,
            status,
            code,
            body,
        })
    }
}

#[async_trait]
impl ObjectStore for DataLakeStore {
    fn describe(&self) -> String {
        format!("datalake:{}", self.account)
    }

    async fn ensure_container(&self, container: &str) -> Result<ContainerStatus, StorageError> {
        let url = self.url(&[container], &[("resource", "filesystem")])?;
        match self
            .send("create filesystem", Method::PUT, url, Vec::new(), Vec::new())
            .await
        {
            Ok(_) => Ok(ContainerStatus::Created),
            Err(StorageError::Status { status: 409, code, .. })
                if ALREADY_EXISTS_CODES.contains(&code.as_str()) =>
            {
                Ok(ContainerStatus::AlreadyExists)
            }
            Err(e) => Err(e),
        }
    }

    async fn put(&self, container: &str, path: &str, body: Vec<u8>) -> Result<(), StorageError> {
        if path.trim_matches('/').is_empty() {
            return Err(StorageError::InvalidPath(path.to_string()));
        }
        let len = body.len().to_string();

        // Create (or truncate) the file.
        let create = self.url(&[container, path], &[("resource", "file")])?;
        self.send("create file", Method::PUT, create, Vec::new(), Vec::new())
            .await?;

        if !body.is_empty() {
            let append = self.url(&[container, path], &[("action", "append"), ("position", "0")])?;
            self.send("append", Method::PATCH, append, Vec::new(), body)
                .await?;
        }

        let flush = self.url(
            &[container, path],
            &[("action", "flush"), ("position", len.as_str()), ("close", "true")],
        )?;
        self.send(
            "flush",
            Method::PATCH,
            flush,
            vec![("x-ms-content-type", content_type_for(path).to_string())],
            Vec::new(),
        )
        .await?;

        Ok(())
    }
}

fn content_type_for(path: &str) -> &'static str {
    if path.ends_with(".json") {
        "application/json"
    } else {
        "application/octet-stream"
    }
}

/// Shared Key string-to-sign for the blob/DFS services.
///
/// Only `Content-Length` is populated among the standard headers; the date
/// travels in `x-ms-date`. A zero length is signed as the empty string.
pub fn string_to_sign(
    account: &str,
    method: &Method,
    url: &Url,
    headers: &[(&str, String)],
    content_length: usize,
) -> String {
    let length = if content_length == 0 {
        String::new()
    } else {
        content_length.to_string()
    };

    let mut out = format!("{method}\n\n\n{length}\n\n\n\n\n\n\n\n\n");

    let mut ms_headers: Vec<(String, &str)> = headers
        .iter()
        .map(|(k, v)| (k.to_ascii_lowercase(), v.trim()))
        .filter(|(k, _)| k.starts_with("x-ms-"))
        .collect();
    ms_headers.sort();
    for (name, value) in ms_headers {
        out.push_str(&name);
        out.push(':');
        out.push_str(value);
        out.push('\n');
    }

    out.push('/');
    out.push_str(account);
    out.push_str(url.path());

    let mut params: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (k, v) in url.query_pairs() {
        params
            .entry(k.to_ascii_lowercase())
            .or_default()
            .push(v.into_owned());
    }
    for (name, values) in params {
        out.push('\n');
        out.push_str(&name);
        out.push(':');
        out.push_str(&values.join(","));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(endpoint: &str) -> StorageConfig {
        StorageConfig {
            account_name: "wcldatalake".into(),
            account_key: "a2V5".into(),
            endpoint: endpoint.into(),
        }
    }

    #[test]
    fn test_new_rejects_non_base64_key() {
        let mut cfg = config("https://wcldatalake.dfs.core.windows.net");
        cfg.account_key = "not base64!".into();
        assert!(matches!(
            DataLakeStore::new(&cfg),
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_url_joins_segments_and_query() {
        let store = DataLakeStore::new(&config("https://wcldatalake.dfs.core.windows.net/")).unwrap();
        let url = store
            .url(
                &["warcraft-logs-data", "mythic_damage_stats/mythic_damage_1.json"],
                &[("action", "append"), ("position", "0")],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://wcldatalake.dfs.core.windows.net/warcraft-logs-data/mythic_damage_stats/mythic_damage_1.json?action=append&position=0"
        );
    }

    #[test]
    fn test_string_to_sign_layout() {
        let url = Url::parse(
            "https://wcldatalake.dfs.core.windows.net/fs/dir/file.json?position=0&action=append",
        )
        .unwrap();
        let headers = vec![
            ("x-ms-version", API_VERSION.to_string()),
            ("x-ms-date", "Sat, 01 Mar 2025 12:00:00 GMT".to_string()),
        ];
        let sts = string_to_sign("wcldatalake", &Method::PATCH, &url, &headers, 42);
        let expected = "PATCH\n\n\n42\n\n\n\n\n\n\n\n\n\
                        x-ms-date:Sat, 01 Mar 2025 12:00:00 GMT\n\
                        x-ms-version:2021-08-06\n\
                        /wcldatalake/fs/dir/file.json\n\
                        action:append\n\
                        position:0";
        assert_eq!(sts, expected);
    }

    #[test]
    fn test_string_to_sign_empty_body_has_blank_length() {
        let url = Url::parse("https://a.dfs.core.windows.net/fs?resource=filesystem").unwrap();
        let sts = string_to_sign("a", &Method::PUT, &url, &[], 0);
        assert_eq!(sts, "PUT\n\n\n\n\n\n\n\n\n\n\n\n/a/fs\nresource:filesystem");
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("x/y.json"), "application/json");
        assert_eq!(content_type_for("x/y.bin"), "application/octet-stream");
    }
}
