//! Longest-valid-chain resolution against the registered peers.
//!
//! Fetching chains over the transport is async; choosing among them
//! ([`select_longest`]) validates every contender and is CPU-bound.

use crate::{
    error::PeerError, transport::PeerTransport, validation::validate_chain, Block, ChainResponse,
};
use tracing::{info, warn};

/// A chain fetched from `peer` that is longer than the local one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub peer: String,
    pub chain: Vec<Block>,
}

pub struct ConsensusResolver<'a, T> {
    transport: &'a T,
}

impl<'a, T: PeerTransport> ConsensusResolver<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Ask each peer, in order, for its chain and return the best candidate
    /// that should replace a local chain of `local_len` blocks.
    ///
    /// Validation runs on the calling thread; see [`select_longest`].
    pub async fn resolve(&self, peers: &[String], local_len: usize) -> Option<Vec<Block>> {
        let candidates = self.fetch_candidates(peers, local_len).await;
        select_longest(candidates, local_len)
    }

    /// Fetch every peer's chain, in peer order, keeping those longer than
    /// `local_len`. Unreachable or misbehaving peers are logged and skipped.
    pub async fn fetch_candidates(&self, peers: &[String], local_len: usize) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        for peer in peers {
            match self.fetch(peer).await {
                Ok(response) if response.length > local_len => candidates.push(Candidate {
                    peer: peer.clone(),
                    chain: response.chain,
                }),
                Ok(_) => {}
                Err(err) => warn!(%peer, error = %err, "unable to retrieve chain from peer"),
            }
        }
        candidates
    }

    async fn fetch(&self, peer: &str) -> Result<ChainResponse, PeerError> {
        let response = self.transport.fetch_chain(peer).await?;
        // the reported length drives the comparison, so it has to describe the payload
        if response.length != response.chain.len() {
            return Err(PeerError::LengthMismatch {
                peer: peer.to_string(),
                reported: response.length,
                actual: response.chain.len(),
            });
        }
        Ok(response)
    }
}

/// Pick the chain that should replace a local chain of `local_len` blocks.
///
/// Candidates are considered in order. One must be strictly longer than
/// everything seen so far and pass validation, so the first to reach a new
/// maximum wins ties. Chains that cannot win are never validated.
pub fn select_longest(candidates: Vec<Candidate>, local_len: usize) -> Option<Vec<Block>> {
    let mut best_len = local_len;
    let mut best = None;

    for Candidate { peer, chain } in candidates {
        if chain.len() <= best_len {
            continue;
        }
        if let Err(err) = validate_chain(&chain) {
            warn!(%peer, length = chain.len(), error = %err, "rejected peer chain");
            continue;
        }
        info!(%peer, length = chain.len(), "found longer valid chain");
        best_len = chain.len();
        best = Some(chain);
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Ledger;
    use crate::pow::find_proof;

    fn chain_of(blocks: usize, tag: &str) -> Vec<Block> {
        let mut ledger = Ledger::genesis();
        while ledger.len() < blocks {
            ledger.add_transaction(tag, "miner", 1);
            let proof = find_proof(&ledger.head().proof);
            let previous_hash = ledger.head().hash();
            ledger.append_block(proof, previous_hash);
        }
        ledger.chain().to_vec()
    }

    fn candidate(peer: &str, chain: Vec<Block>) -> Candidate {
        Candidate {
            peer: peer.to_string(),
            chain,
        }
    }

    #[test]
    fn nothing_to_select() {
        assert_eq!(select_longest(Vec::new(), 1), None);
    }

    #[test]
    fn not_longer_than_local_is_ignored() {
        let chain = chain_of(3, "b");
        assert_eq!(select_longest(vec![candidate("b", chain)], 3), None);
    }

    #[test]
    fn first_of_equal_length_wins() {
        let first = chain_of(3, "b");
        let second = chain_of(3, "c");
        let picked = select_longest(
            vec![candidate("b", first.clone()), candidate("c", second)],
            1,
        );
        assert_eq!(picked, Some(first));
    }

    #[test]
    fn invalid_longest_falls_back_to_valid_shorter() {
        let mut forged = chain_of(5, "b");
        forged[3].previous_hash = "ff".repeat(32);
        let honest = chain_of(3, "c");
        let picked = select_longest(
            vec![candidate("b", forged), candidate("c", honest.clone())],
            1,
        );
        assert_eq!(picked, Some(honest));
    }

    #[test]
    fn later_strictly_longer_replaces_earlier() {
        let shorter = chain_of(2, "b");
        let longer = chain_of(4, "c");
        let picked = select_longest(
            vec![candidate("b", shorter), candidate("c", longer.clone())],
            1,
        );
        assert_eq!(picked, Some(longer));
    }
}
