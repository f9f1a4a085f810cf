//! CLI command implementations.

use std::path::PathBuf;
use std::sync::Arc;

use color_eyre::eyre::Result;

use fairway_core::{JsonStore, MemoryStore, RoundStore};
use fairway_server::{Server, ServerConfig};

/// Start the API server.
pub async fn serve(
    host: String,
    port: u16,
    cors_origin: Option<String>,
    data_file: Option<PathBuf>,
) -> Result<()> {
    tracing::info!("Starting Fairway server...");

    let store: Arc<dyn RoundStore> = match data_file {
        Some(path) => Arc::new(JsonStore::open(path)?),
        None => {
            tracing::warn!("No data file configured, rounds will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };

    let addr = format!("{}:{}", host, port).parse()?;
    let config = ServerConfig { addr, cors_origin };

    let server = Server::new(config, store);
    server.run().await?;

    Ok(())
}

/// Display version information.
pub fn version() {
    println!("Fairway {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Components:");
    println!("  fairway-core    - Round storage and handicap calculation");
    println!("  fairway-server  - HTTP API");
}
