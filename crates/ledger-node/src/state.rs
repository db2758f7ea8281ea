use ledger_core::{
    constants::{MINING_REWARD, REWARD_SENDER},
    Block, Ledger, NodeRegistry,
};

/// Everything a node mutates, kept behind one lock so chain, pending pool and
/// peer list always change together.
#[derive(Debug)]
pub struct NodeState {
    pub ledger: Ledger,
    pub registry: NodeRegistry,
}

impl NodeState {
    pub fn new(local_port: u16) -> Self {
        Self {
            ledger: Ledger::genesis(),
            registry: NodeRegistry::new(local_port),
        }
    }

    /// Reward `miner` and seal the pending pool on top of `previous_hash`.
    ///
    /// Returns `None`, changing nothing, when `previous_hash` is no longer
    /// the hash of the head.
    pub fn seal_block(
        &mut self,
        miner: &str,
        proof: String,
        previous_hash: String,
    ) -> Option<Block> {
        if self.ledger.head().hash() != previous_hash {
            return None;
        }
        self.ledger
            .add_transaction(REWARD_SENDER, miner, MINING_REWARD);
        Some(self.ledger.append_block(proof, previous_hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_core::{pow::find_proof, validation::is_valid_chain, Transaction};

    #[test]
    fn seal_block_rewards_miner() {
        let mut state = NodeState::new(8000);
        state.ledger.add_transaction("alice", "bob", 2);
        let head = state.ledger.head().clone();

        let block = state
            .seal_block("node-a", find_proof(&head.proof), head.hash())
            .unwrap();

        assert_eq!(
            block.transactions,
            [
                Transaction::new("alice", "bob", 2),
                Transaction::new("0", "node-a", 1),
            ]
        );
        assert!(is_valid_chain(state.ledger.chain()));
    }

    #[test]
    fn seal_block_on_stale_head_changes_nothing() {
        let mut state = NodeState::new(8000);
        let stale = state.ledger.head().clone();
        state
            .seal_block("node-a", find_proof(&stale.proof), stale.hash())
            .unwrap();
        state.ledger.add_transaction("alice", "bob", 2);

        let sealed = state.seal_block("node-a", find_proof(&stale.proof), stale.hash());

        assert_eq!(sealed, None);
        assert_eq!(state.ledger.len(), 2);
        assert_eq!(state.ledger.pending(), [Transaction::new("alice", "bob", 2)]);
    }
}
