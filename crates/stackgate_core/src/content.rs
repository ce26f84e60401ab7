//! Raw content loading from local files and URLs.
//!
//! Documents are parsed as YAML when the source ends in `.yaml`/`.yml` and as
//! JSON otherwise. Both formats land in a [`serde_yaml::Value`].

use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::{Client, Url};
use serde_yaml::Value;
use tracing::{debug, info};

use crate::error::{CoreError, CoreResult};

/// Document format, selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    Yaml,
    Json,
}

impl ContentFormat {
    /// Pick the format for a path; anything that is not `.yaml`/`.yml` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Whether `source` should be fetched over HTTP rather than read from disk.
pub fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Parse raw text in the given format.
///
/// Blank content yields [`Value::Null`].
pub fn parse_content(raw: &str, format: ContentFormat, origin: &str) -> CoreResult<Value> {
    if raw.trim().is_empty() {
        return Ok(Value::Null);
    }

    match format {
        ContentFormat::Yaml => serde_yaml::from_str(raw).map_err(|e| CoreError::parse(origin, e)),
        ContentFormat::Json => serde_json::from_str(raw).map_err(|e| CoreError::parse(origin, e)),
    }
}

/// Loader for local and remote documents.
#[derive(Debug, Clone)]
pub struct ContentLoader {
    client: Client,
}

impl ContentLoader {
    /// Create a loader; `timeout` bounds each HTTP request.
    pub fn new(timeout: Option<Duration>) -> CoreResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Load and parse a document from a path or an HTTP(S) URL.
    pub async fn load(&self, source: &str) -> CoreResult<Value> {
        if is_url(source) {
            self.load_url(source).await
        } else {
            load_local(Path::new(source))
        }
    }

    async fn load_url(&self, source: &str) -> CoreResult<Value> {
        let url = Url::parse(source).map_err(|e| CoreError::Fetch {
            url: source.to_string(),
            message: e.to_string(),
        })?;
        let format = ContentFormat::from_path(Path::new(url.path()));

        info!("Fetching {}", source);
        let response = self.client.get(url).send().await.map_err(|e| CoreError::Fetch {
            url: source.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| CoreError::Fetch {
            url: source.to_string(),
            message: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(CoreError::Fetch {
                url: source.to_string(),
                message: format!("HTTP {}: {}", status, body.trim()),
            });
        }

        debug!("Fetched {} bytes from {}", body.len(), source);
        parse_content(&body, format, source)
    }
}

/// Load and parse a document from the local filesystem.
pub fn load_local(path: &Path) -> CoreResult<Value> {
    debug!("Reading {:?}", path);
    let raw = fs::read_to_string(path).map_err(|e| CoreError::io(path, e))?;
    parse_content(&raw, ContentFormat::from_path(path), &path.to_string_lossy())
}
