use crate::endpoints::Endpoint;
use crate::error::FetchError;
use crate::FetchClient;
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Reads endpoint payloads from `<dir>/<endpoint-name>.json`.
///
/// Lets the dashboard run directly off the files the analysis pipeline writes,
/// without the HTTP backend in between. Read-only: `post` is not supported.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    root: PathBuf,
}

impl DirectoryClient {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, endpoint: Endpoint) -> PathBuf {
        self.root.join(format!("{}.json", endpoint.name()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl FetchClient for DirectoryClient {
    async fn fetch(&self, endpoint: Endpoint) -> Result<Value, FetchError> {
        let path = self.path_for(endpoint);
        tracing::debug!(%endpoint, path = %path.display(), "Reading endpoint file.");

        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| FetchError::Io { endpoint, source })?;

        serde_json::from_str(&text).map_err(|e| FetchError::Parse {
            endpoint,
            message: e.to_string(),
        })
    }

    async fn post(&self, endpoint: Endpoint, _body: &Value) -> Result<Value, FetchError> {
        Err(FetchError::Unsupported {
            endpoint,
            operation: "POST",
        })
    }
}
