//! # Sharded State Node
//!
//! Single-run demo of the sharded Merkle state engine.
//!
//! ## Startup Sequence
//!
//! 1. Install the `tracing` subscriber with a reloadable `info` filter
//! 2. Load configuration from `SC_*` environment variables
//! 3. Switch the filter to the configured `log_level`
//! 4. Validate configuration and build the shard manager
//! 5. Run the demo phases (see `runtime.rs`)
//! 6. Print the run summary as JSON

use anyhow::Result;
use node_runtime::{NodeConfig, NodeRuntime};
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging before config so parse warnings are visible
    let (filter, filter_handle) = reload::Layer::new(EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .try_init()?;

    let config = NodeConfig::from_env();
    filter_handle.reload(config.env_filter())?;

    let runtime = NodeRuntime::new(config)?;
    let summary = runtime.run().await?;

    info!("Run complete");
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
