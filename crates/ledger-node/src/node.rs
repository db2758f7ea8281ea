use crate::{config::NodeConfig, error::ApiError, state::NodeState};
use ledger_core::{
    pow::find_proof,
    propagation::{registration_payload, should_propagate},
    select_longest, Block, ChainResponse, ConsensusResolver, PeerTransport, Transaction,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// A running node: its state aggregate, identity and a way to reach peers.
///
/// The state lock is held only for in-memory changes. Proof search and all
/// peer traffic happen with the lock released.
pub struct Node<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    config: NodeConfig,
    state: RwLock<NodeState>,
    transport: T,
}

impl<T> Clone for Node<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: PeerTransport> Node<T> {
    pub fn new(config: NodeConfig, transport: T) -> Self {
        let state = NodeState::new(config.port);
        Self {
            inner: Arc::new(Inner {
                config,
                state: RwLock::new(state),
                transport,
            }),
        }
    }

    pub fn node_id(&self) -> &str {
        &self.inner.config.node_id
    }

    pub async fn chain(&self) -> ChainResponse {
        let state = self.inner.state.read().await;
        ChainResponse::new(state.ledger.chain().to_vec())
    }

    pub async fn pending(&self) -> Vec<Transaction> {
        self.inner.state.read().await.ledger.pending().to_vec()
    }

    pub async fn peers(&self) -> Vec<String> {
        self.inner.state.read().await.registry.list().to_vec()
    }

    /// Search for the next proof and seal the pending pool, plus the mining
    /// reward, into a new block. Peers are then asked to resolve.
    ///
    /// If the chain moves while the proof is being searched for (another
    /// block mined or a longer chain adopted), the search restarts from the
    /// new head, at most `mine_attempts` times in all.
    pub async fn mine(&self) -> Result<Block, ApiError> {
        let attempts = self.inner.config.mine_attempts;
        let mut sealed = None;
        for attempt in 1..=attempts {
            let (last_proof, previous_hash) = {
                let state = self.inner.state.read().await;
                let head = state.ledger.head();
                (head.proof.clone(), head.hash())
            };

            let proof = tokio::task::spawn_blocking(move || find_proof(&last_proof)).await?;

            let mut state = self.inner.state.write().await;
            sealed = state.seal_block(self.node_id(), proof, previous_hash);
            if sealed.is_some() {
                break;
            }
            debug!(attempt, "head moved during proof search, retrying");
        }

        let Some(block) = sealed else {
            warn!(attempts, "giving up on mining, chain kept moving");
            return Err(ApiError::Busy { attempts });
        };
        info!(index = block.index, proof = %block.proof, "mined block");

        for peer in self.peers().await {
            if let Err(err) = self.inner.transport.request_resolve(&peer).await {
                warn!(%peer, error = %err, "request to resolve chain failed");
            }
        }

        Ok(block)
    }

    /// Queue `tx` locally and, unless it came from a peer, forward it to
    /// every registered peer once. Returns the index of the block it will
    /// land in.
    pub async fn submit_transaction(&self, tx: Transaction, origin: Option<&str>) -> u64 {
        let (index, peers) = {
            let mut state = self.inner.state.write().await;
            let index = state
                .ledger
                .add_transaction(tx.sender.clone(), tx.recipient.clone(), tx.amount);
            (index, state.registry.list().to_vec())
        };

        if should_propagate(origin) {
            for peer in &peers {
                if let Err(err) = self.inner.transport.forward_transaction(peer, &tx).await {
                    warn!(%peer, error = %err, "forwarding transaction failed");
                }
            }
        }

        index
    }

    /// Register `urls` and, unless the request came from a peer, send every
    /// peer our full list plus our own URL. Returns how many URLs were new.
    pub async fn register_nodes(&self, urls: &[String], origin: Option<&str>) -> usize {
        let self_url = self.inner.config.self_url();
        let (added, peers, payload) = {
            let mut state = self.inner.state.write().await;
            let added = urls
                .iter()
                .filter(|url| state.registry.register(url))
                .count();
            let payload = registration_payload(&state.registry, &self_url);
            (added, state.registry.list().to_vec(), payload)
        };

        if should_propagate(origin) {
            for peer in &peers {
                if let Err(err) = self.inner.transport.forward_nodes(peer, &payload).await {
                    warn!(%peer, error = %err, "forwarding registration failed");
                }
            }
        }

        added
    }

    /// Register peers without announcing them, e.g. seed peers at startup.
    pub async fn seed_peers(&self, urls: &[String]) -> usize {
        let mut state = self.inner.state.write().await;
        urls.iter().filter(|url| state.registry.register(url)).count()
    }

    /// Adopt the longest valid chain among the peers if it beats ours.
    ///
    /// Peer chains are fetched without the lock and validated on the
    /// blocking pool.
    pub async fn resolve_conflicts(&self) -> Result<bool, ApiError> {
        let (peers, local_len) = {
            let state = self.inner.state.read().await;
            (state.registry.list().to_vec(), state.ledger.len())
        };

        let candidates = ConsensusResolver::new(&self.inner.transport)
            .fetch_candidates(&peers, local_len)
            .await;
        let best = if candidates.is_empty() {
            None
        } else {
            tokio::task::spawn_blocking(move || select_longest(candidates, local_len)).await?
        };

        let replaced = match best {
            Some(chain) => {
                let mut state = self.inner.state.write().await;
                // the chain may have grown while peers were being queried
                chain.len() > state.ledger.len() && state.ledger.replace_chain(chain)
            }
            None => false,
        };

        if replaced {
            info!(node = %self.node_id(), "chain replaced");
        } else {
            info!(node = %self.node_id(), "chain not replaced");
        }
        Ok(replaced)
    }
}
