//! The seam between the core and whatever carries requests to other nodes.

use crate::{error::PeerError, Block, Transaction};
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Body of `GET /chain`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChainResponse {
    pub chain: Vec<Block>,
    pub length: usize,
}

impl ChainResponse {
    pub fn new(chain: Vec<Block>) -> Self {
        let length = chain.len();
        Self { chain, length }
    }
}

/// Body of `POST /nodes/register`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NodesRequest {
    #[serde(default, alias = "nodes")]
    pub nodes: Vec<String>,
}

/// Outbound calls a node makes to its peers. `peer` is a base URL as stored
/// in the registry.
///
/// Implementations that forward mutating requests (`forward_*`,
/// `request_resolve`) must mark them as peer-originated so the receiver does
/// not forward them again.
pub trait PeerTransport: Send + Sync {
    fn fetch_chain(
        &self,
        peer: &str,
    ) -> impl Future<Output = Result<ChainResponse, PeerError>> + Send;

    fn forward_transaction(
        &self,
        peer: &str,
        tx: &Transaction,
    ) -> impl Future<Output = Result<(), PeerError>> + Send;

    fn forward_nodes(
        &self,
        peer: &str,
        nodes: &NodesRequest,
    ) -> impl Future<Output = Result<(), PeerError>> + Send;

    fn request_resolve(&self, peer: &str) -> impl Future<Output = Result<(), PeerError>> + Send;
}
