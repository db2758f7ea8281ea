use clap::Parser;
use std::time::Duration;
use uuid::Uuid;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_PEER_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MINE_ATTEMPTS: u32 = 8;

#[derive(Parser, Debug, Clone)]
#[command(name = "ledger-node")]
#[command(about = "Minimal proof-of-work ledger node")]
pub struct Args {
    /// Port to listen on; also the port this node advertises to peers
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Interface to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub bind: String,

    /// Host name peers use to reach this node
    #[arg(long, default_value = "localhost")]
    pub advertise_host: String,

    /// Timeout for each request to a peer, in seconds
    #[arg(long, default_value_t = DEFAULT_PEER_TIMEOUT_SECS)]
    pub peer_timeout_secs: u64,

    /// Peers to register at startup (not announced to anyone)
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    pub peers: Vec<String>,

    /// Proof searches `/mine` starts before giving up while the chain keeps moving
    #[arg(long, default_value_t = DEFAULT_MINE_ATTEMPTS, value_parser = clap::value_parser!(u32).range(1..))]
    pub mine_attempts: u32,

    /// Fixed node identifier; a random UUID is used when absent
    #[arg(long)]
    pub node_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub node_id: String,
    pub port: u16,
    pub bind: String,
    pub advertise_host: String,
    pub peer_timeout: Duration,
    pub initial_peers: Vec<String>,
    pub mine_attempts: u32,
}

impl NodeConfig {
    /// Base URL other nodes use for this one.
    pub fn self_url(&self) -> String {
        format!("http://{}:{}", self.advertise_host, self.port)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            node_id: Uuid::new_v4().to_string(),
            port: DEFAULT_PORT,
            bind: "0.0.0.0".to_string(),
            advertise_host: "localhost".to_string(),
            peer_timeout: Duration::from_secs(DEFAULT_PEER_TIMEOUT_SECS),
            initial_peers: Vec::new(),
            mine_attempts: DEFAULT_MINE_ATTEMPTS,
        }
    }
}

impl From<Args> for NodeConfig {
    fn from(args: Args) -> Self {
        Self {
            node_id: args
                .node_id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            port: args.port,
            bind: args.bind,
            advertise_host: args.advertise_host,
            peer_timeout: Duration::from_secs(args.peer_timeout_secs),
            initial_peers: args.peers,
            mine_attempts: args.mine_attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_node() {
        let args = Args::parse_from(["ledger-node"]);
        let config = NodeConfig::from(args);
        assert_eq!(config.port, 8000);
        assert_eq!(config.peer_timeout, Duration::from_secs(10));
        assert_eq!(config.self_url(), "http://localhost:8000");
        assert_eq!(config.listen_addr(), "0.0.0.0:8000");
        assert!(Uuid::parse_str(&config.node_id).is_ok());
        assert_eq!(config.mine_attempts, DEFAULT_MINE_ATTEMPTS);
    }

    #[test]
    fn mine_attempts_must_be_positive() {
        assert!(Args::try_parse_from(["ledger-node", "--mine-attempts", "0"]).is_err());
        let args = Args::try_parse_from(["ledger-node", "--mine-attempts", "3"]).unwrap();
        assert_eq!(NodeConfig::from(args).mine_attempts, 3);
    }

    #[test]
    fn peers_accept_comma_separated_list() {
        let args = Args::parse_from([
            "ledger-node",
            "--port",
            "8001",
            "--peers",
            "http://localhost:8000,http://localhost:8002",
            "--node-id",
            "node-b",
        ]);
        let config = NodeConfig::from(args);
        assert_eq!(config.node_id, "node-b");
        assert_eq!(
            config.initial_peers,
            ["http://localhost:8000", "http://localhost:8002"]
        );
        assert_eq!(config.self_url(), "http://localhost:8001");
    }
}
