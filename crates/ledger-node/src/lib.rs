//! HTTP ledger node: shared state, peer transport and routes.

pub mod api;
pub mod config;
pub mod error;
pub mod node;
pub mod peer;
pub mod state;

pub use api::router;
pub use config::NodeConfig;
pub use error::ApiError;
pub use node::Node;
pub use peer::HttpTransport;
