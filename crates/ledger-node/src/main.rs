use clap::Parser;
use ledger_node::{config::Args, router, HttpTransport, Node, NodeConfig};
use std::net::SocketAddr;
use tracing::{info, warn, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = NodeConfig::from(Args::parse());
    let transport = HttpTransport::new(config.node_id.clone(), config.peer_timeout)?;
    let node = Node::new(config.clone(), transport);

    if !config.initial_peers.is_empty() {
        let added = node.seed_peers(&config.initial_peers).await;
        info!(added, "registered initial peers");
    }

    let addr: SocketAddr = config.listen_addr().parse()?;
    info!(node_id = %config.node_id, "node identifier");
    info!("ledger-node listening on http://{addr}");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, router(node))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
