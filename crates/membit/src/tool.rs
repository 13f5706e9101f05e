use std::sync::Arc;

use async_trait::async_trait;
use membit_core::{MembitError, Tool};
use serde_json::{json, Value};

use crate::client::{MembitClient, SearchKind};

fn search_parameters() -> Value {
    json!({
        "type": "object",
        "properties": {
            "query": {
                "type": "string",
                "description": "The search query"
            },
            "limit": {
                "type": "integer",
                "minimum": 1,
                "description": "Maximum number of results to request"
            }
        },
        "required": ["query"]
    })
}

fn parse_args(args: &Value, default_limit: usize) -> Result<(&str, usize), MembitError> {
    let query = args
        .get("query")
        .and_then(|q| q.as_str())
        .ok_or_else(|| MembitError::Tool("missing 'query' argument".to_string()))?;

    let limit = match args.get("limit") {
        None | Some(Value::Null) => default_limit,
        Some(v) => v
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| MembitError::Tool("'limit' must be a positive integer".to_string()))?,
    };

    Ok((query, limit))
}

async fn run(
    client: &MembitClient,
    kind: SearchKind,
    args: Value,
    default_limit: usize,
) -> Result<Value, MembitError> {
    let (query, limit) = parse_args(&args, default_limit)?;
    let text = match kind {
        SearchKind::Posts => client.search_posts(query, limit).await?,
        SearchKind::Clusters => client.search_clusters(query, limit).await?,
    };
    Ok(json!(text))
}

/// Recent social posts matching a query, as numbered summary lines.
pub struct MembitSearchPostsTool {
    client: Arc<MembitClient>,
    limit: usize,
}

impl MembitSearchPostsTool {
    pub fn new(client: Arc<MembitClient>) -> Self {
        Self {
            client,
            limit: SearchKind::Posts.default_limit(),
        }
    }

    /// Limit used when the call arguments do not carry one.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

#[async_trait]
impl Tool for MembitSearchPostsTool {
    fn name(&self) -> &'static str {
        "membit_search_posts"
    }

    fn description(&self) -> &'static str {
        "Search recent social posts by query. Input: a string query."
    }

    fn parameters(&self) -> Option<Value> {
        Some(search_parameters())
    }

    async fn call(&self, args: Value) -> Result<Value, MembitError> {
        run(&self.client, SearchKind::Posts, args, self.limit).await
    }
}

/// Topic clusters matching a query, as numbered summary lines.
pub struct MembitSearchClustersTool {
    client: Arc<MembitClient>,
    limit: usize,
}

impl MembitSearchClustersTool {
    pub fn new(client: Arc<MembitClient>) -> Self {
        Self {
            client,
            limit: SearchKind::Clusters.default_limit(),
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

#[async_trait]
impl Tool for MembitSearchClustersTool {
    fn name(&self) -> &'static str {
        "membit_search_clusters"
    }

    fn description(&self) -> &'static str {
        "Search topic clusters. Input: a string query."
    }

    fn parameters(&self) -> Option<Value> {
        Some(search_parameters())
    }

    async fn call(&self, args: Value) -> Result<Value, MembitError> {
        run(&self.client, SearchKind::Clusters, args, self.limit).await
    }
}
