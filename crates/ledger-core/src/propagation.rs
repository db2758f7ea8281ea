//! One-hop forwarding of mutating requests.
//!
//! A request that arrives without the [`PEER_ORIGIN_HEADER`] came from a
//! client and is forwarded once to every registered peer, tagged with the
//! header. Tagged requests are applied locally and never forwarded, so a
//! request travels at most one hop from the node that first received it.
//! Registrations reach nodes further away only as they are re-registered.

use crate::{registry::NodeRegistry, NodesRequest};

/// Header carrying the sender's node id on node-to-node requests.
pub const PEER_ORIGIN_HEADER: &str = "node-uuid";

/// `true` when the request carries no (or an empty) peer-origin marker.
pub fn should_propagate(origin: Option<&str>) -> bool {
    origin.is_none_or(str::is_empty)
}

/// Registration body sent to each peer: every node we know plus ourselves,
/// so the receiver learns about us too.
pub fn registration_payload(registry: &NodeRegistry, self_url: &str) -> NodesRequest {
    let mut nodes = registry.list().to_vec();
    nodes.push(self_url.to_string());
    NodesRequest { nodes }
}
