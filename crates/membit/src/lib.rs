//! Membit social search for LLM agents.
//!
//! [`MembitClient`] posts `{query, limit}` to Membit (directly or through a
//! proxy), pulls the result list out of whatever JSON comes back and renders
//! a short numbered summary. [`MembitSearchPostsTool`] and
//! [`MembitSearchClustersTool`] expose the two searches as agent tools.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use membit::{MembitClient, MembitSearchPostsTool};
//! use membit_core::Tool;
//!
//! let client = Arc::new(MembitClient::from_env());
//! let tool = MembitSearchPostsTool::new(client).with_limit(8);
//! let summary = tool.call(serde_json::json!({"query": "post-quantum cryptography"})).await?;
//! ```

pub mod backend;
mod client;
pub mod config;
pub mod extract;
pub mod render;
mod tool;

pub use backend::{
    FakeBackend, HttpBackend, Transport, TransportRequest, TransportResponse, DEFAULT_TIMEOUT,
};
pub use client::{
    MembitClient, SearchKind, SearchRequest, DEFAULT_CLUSTERS_LIMIT, DEFAULT_POSTS_LIMIT,
};
pub use config::{TransportConfig, UpstreamKind};
pub use extract::resolve_field;
pub use membit_core::{ErrorKind, MembitError, Tool, ToolOutcome};
pub use tool::{MembitSearchClustersTool, MembitSearchPostsTool};
