use std::sync::Arc;

use clap::Parser;
use membit::{
    MembitClient, MembitSearchClustersTool, MembitSearchPostsTool, SearchKind, UpstreamKind,
};
use membit_core::{MembitError, ToolOutcome};
use membit_tools::{HandleErrorTool, SerialToolExecutor, ToolRegistry};
use serde_json::json;

/// Fetch Membit posts and clusters for a topic and print the context an
/// agent would reason over.
#[derive(Parser, Debug)]
#[command(name = "membit_pulse")]
struct Args {
    /// Topic to search for.
    query: Vec<String>,

    /// Posts to request (at most 8 are shown).
    #[arg(long, default_value_t = 8)]
    posts_limit: usize,

    /// Clusters to request.
    #[arg(long, default_value_t = 6)]
    clusters_limit: usize,

    /// Print the tool definitions an agent would be given and exit.
    #[arg(long)]
    list_tools: bool,

    /// Call a single registered tool with the query instead.
    #[arg(long)]
    tool: Option<String>,
}

fn build_registry(client: Arc<MembitClient>, args: &Args) -> Result<ToolRegistry, MembitError> {
    let posts = MembitSearchPostsTool::new(client.clone()).with_limit(args.posts_limit);
    let clusters = MembitSearchClustersTool::new(client).with_limit(args.clusters_limit);

    let registry = ToolRegistry::new();
    registry.register(Arc::new(HandleErrorTool::labelled(
        Arc::new(posts),
        "Membit posts",
    )))?;
    registry.register(Arc::new(HandleErrorTool::labelled(
        Arc::new(clusters),
        "Membit clusters",
    )))?;
    Ok(registry)
}

fn section(outcome: ToolOutcome, label: &str, placeholder: &str) -> String {
    match outcome {
        ToolOutcome::Ok { text } if text.is_empty() => placeholder.to_string(),
        ToolOutcome::Ok { text } => text,
        ToolOutcome::Failed { kind, message } => {
            tracing::warn!(kind = kind.as_str(), label = label, "search failed");
            format!("{label} search failed: {message}")
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), MembitError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let query = if args.query.is_empty() {
        "post-quantum cryptography".to_string()
    } else {
        args.query.join(" ")
    };

    let client = Arc::new(MembitClient::from_env());
    match client.config().kind {
        UpstreamKind::Proxy => tracing::info!(base = %client.config().base_url, "using Membit proxy"),
        UpstreamKind::Direct => tracing::info!(base = %client.config().base_url, "using Membit API"),
    }

    let registry = build_registry(client.clone(), &args)?;

    if args.list_tools {
        for def in registry.definitions() {
            println!("{}", json!(def));
        }
        return Ok(());
    }

    if let Some(name) = &args.tool {
        let executor = SerialToolExecutor::new(registry);
        let outcome = executor.run(name, json!({ "query": query })).await;
        println!("{}", outcome.to_json());
        return Ok(());
    }

    println!("Query: {query}");
    let posts = client
        .search(SearchKind::Posts, &query, args.posts_limit)
        .await;
    let clusters = client
        .search(SearchKind::Clusters, &query, args.clusters_limit)
        .await;

    println!(
        "\nTop posts:\n{}\n\nTop clusters:\n{}",
        section(posts, "Membit posts", "(no posts)"),
        section(clusters, "Membit clusters", "(no clusters)"),
    );
    Ok(())
}
