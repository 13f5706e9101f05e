use std::sync::Arc;

use membit_core::{MembitError, ToolOutcome};
use serde::Serialize;
use serde_json::Value;

use crate::backend::{HttpBackend, Transport, TransportRequest};
use crate::config::{TransportConfig, UpstreamKind};
use crate::extract::{extract_list, CLUSTER_LIST_KEYS, POST_LIST_KEYS};
use crate::render::{payload_text, render_clusters, render_posts, MAX_POST_LINES};

pub const DEFAULT_POSTS_LIMIT: usize = 10;
pub const DEFAULT_CLUSTERS_LIMIT: usize = 6;

/// The two Membit search endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Posts,
    Clusters,
}

impl SearchKind {
    pub fn path(&self) -> &'static str {
        match self {
            SearchKind::Posts => "search-posts",
            SearchKind::Clusters => "search-clusters",
        }
    }

    pub fn default_limit(&self) -> usize {
        match self {
            SearchKind::Posts => DEFAULT_POSTS_LIMIT,
            SearchKind::Clusters => DEFAULT_CLUSTERS_LIMIT,
        }
    }
}

/// JSON body sent to both endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub limit: usize,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, limit: usize) -> Result<Self, MembitError> {
        if limit == 0 {
            return Err(MembitError::Validation(
                "limit must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            query: query.into(),
            limit,
        })
    }

    /// `{"query": .., "limit": ..}`.
    pub fn to_body(&self) -> Result<Value, MembitError> {
        serde_json::to_value(self)
            .map_err(|e| MembitError::Validation(format!("cannot encode search request: {e}")))
    }
}

/// Membit search adapter.
///
/// Each call sends exactly one request. Configuration and transport problems
/// are errors; once a 2xx response arrives the call always yields text, no
/// matter what the payload looks like.
pub struct MembitClient {
    config: TransportConfig,
    backend: Arc<dyn Transport>,
}

impl MembitClient {
    pub fn new(config: TransportConfig, backend: Arc<dyn Transport>) -> Self {
        Self { config, backend }
    }

    /// Client over [`HttpBackend`] configured from the environment.
    pub fn from_env() -> Self {
        Self::new(TransportConfig::from_env(), Arc::new(HttpBackend::new()))
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Up to `min(8, limit)` post lines, `"(no results)"` for an empty list.
    pub async fn search_posts(&self, query: &str, limit: usize) -> Result<String, MembitError> {
        let payload = self.fetch(SearchKind::Posts, query, limit).await?;
        Ok(match extract_list(&payload, POST_LIST_KEYS) {
            Some(items) => render_posts(items, limit.min(MAX_POST_LINES)),
            None => {
                tracing::warn!(
                    endpoint = "search-posts",
                    "no result list in response, returning raw payload"
                );
                payload_text(&payload)
            }
        })
    }

    /// Up to `limit` cluster lines.
    pub async fn search_clusters(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<String, MembitError> {
        let payload = self.fetch(SearchKind::Clusters, query, limit).await?;
        Ok(match extract_list(&payload, CLUSTER_LIST_KEYS) {
            Some(items) => render_clusters(items, limit),
            None => {
                tracing::warn!(
                    endpoint = "search-clusters",
                    "no result list in response, returning raw payload"
                );
                payload_text(&payload)
            }
        })
    }

    /// Run a search and fold any error into a [`ToolOutcome`].
    pub async fn search(&self, kind: SearchKind, query: &str, limit: usize) -> ToolOutcome {
        let result = match kind {
            SearchKind::Posts => self.search_posts(query, limit).await,
            SearchKind::Clusters => self.search_clusters(query, limit).await,
        };
        ToolOutcome::from(result)
    }

    async fn fetch(
        &self,
        kind: SearchKind,
        query: &str,
        limit: usize,
    ) -> Result<Value, MembitError> {
        let body = SearchRequest::new(query, limit)?.to_body()?;
        let headers = self.config.headers()?;
        let url = self.config.endpoint(kind.path());

        tracing::debug!(url = %url, limit = limit, "membit search");

        let response = self
            .backend
            .send(TransportRequest {
                url,
                headers,
                body,
            })
            .await
            .map_err(|e| self.wrap_transport_error(e))?;

        if !response.is_success() {
            tracing::warn!(
                status = response.status,
                endpoint = kind.path(),
                "membit returned an error status"
            );
            return Err(MembitError::UpstreamStatus {
                status: response.status,
                body: response.body,
            });
        }

        Ok(serde_json::from_str(&response.body).unwrap_or_else(|_| Value::String(response.body)))
    }

    fn wrap_transport_error(&self, err: MembitError) -> MembitError {
        match (self.config.kind, err) {
            (UpstreamKind::Proxy, MembitError::Transport(msg)) => MembitError::Transport(format!(
                "Membit proxy unreachable at {}: {msg}",
                self.config.base_url
            )),
            (_, other) => other,
        }
    }
}
