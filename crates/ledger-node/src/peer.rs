use ledger_core::{
    propagation::PEER_ORIGIN_HEADER, ChainResponse, NodesRequest, PeerError, PeerTransport,
    Transaction,
};
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;

/// [`PeerTransport`] over HTTP. Every request carries the local node id in
/// the peer-origin header, and every call is bounded by the client timeout.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    http: Client,
    node_id: String,
}

impl HttpTransport {
    pub fn new(node_id: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            node_id: node_id.into(),
        })
    }

    async fn send(&self, peer: &str, request: RequestBuilder) -> Result<Response, PeerError> {
        let response = request
            .header(PEER_ORIGIN_HEADER, &self.node_id)
            .send()
            .await
            .map_err(|e| PeerError::Transport {
                peer: peer.to_string(),
                reason: e.to_string(),
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(PeerError::Status {
                peer: peer.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

impl PeerTransport for HttpTransport {
    async fn fetch_chain(&self, peer: &str) -> Result<ChainResponse, PeerError> {
        let response = self
            .send(peer, self.http.get(format!("{peer}/chain")))
            .await?;
        response
            .json::<ChainResponse>()
            .await
            .map_err(|e| PeerError::Decode {
                peer: peer.to_string(),
                reason: e.to_string(),
            })
    }

    async fn forward_transaction(&self, peer: &str, tx: &Transaction) -> Result<(), PeerError> {
        self.send(peer, self.http.post(format!("{peer}/transactions/new")).json(tx))
            .await?;
        Ok(())
    }

    async fn forward_nodes(&self, peer: &str, nodes: &NodesRequest) -> Result<(), PeerError> {
        self.send(peer, self.http.post(format!("{peer}/nodes/register")).json(nodes))
            .await?;
        Ok(())
    }

    async fn request_resolve(&self, peer: &str) -> Result<(), PeerError> {
        self.send(peer, self.http.get(format!("{peer}/nodes/resolve")))
            .await?;
        Ok(())
    }
}
