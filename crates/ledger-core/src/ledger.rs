use crate::{constants::GENESIS_PROOF, unix_now, zero_hash, Block, Transaction};
use std::mem;
use tracing::info;

/// The local chain plus the pool of transactions waiting for the next block.
///
/// `Ledger` is a plain value; callers serialize access (the node keeps it
/// behind a single lock together with its peer registry).
#[derive(Clone, Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    pending: Vec<Transaction>,
}

impl Ledger {
    /// A ledger holding only the genesis block.
    pub fn genesis() -> Self {
        Self {
            chain: vec![genesis_block()],
            pending: Vec::new(),
        }
    }

    /// Queue a transaction and return the index of the block it will land in.
    pub fn add_transaction(
        &mut self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: i64,
    ) -> u64 {
        self.pending
            .push(Transaction::new(sender, recipient, amount));
        info!(pending = self.pending.len(), "added new transaction");
        self.head().index + 1
    }

    /// Seal the pending pool into a new block and append it.
    pub fn append_block(&mut self, proof: String, previous_hash: String) -> Block {
        let block = Block {
            index: self.chain.len() as u64 + 1,
            timestamp: unix_now(),
            transactions: mem::take(&mut self.pending),
            proof,
            previous_hash,
        };
        self.chain.push(block.clone());
        info!(index = block.index, txs = block.transactions.len(), "new block added");
        block
    }

    pub fn head(&self) -> &Block {
        // `genesis` seeds one block and `replace_chain` refuses empty chains
        debug_assert!(!self.is_empty());
        &self.chain[self.chain.len() - 1]
    }

    /// Swap in `chain` wholesale. An empty chain is ignored and `false` is returned.
    pub fn replace_chain(&mut self, chain: Vec<Block>) -> bool {
        if chain.is_empty() {
            return false;
        }
        self.chain = chain;
        true
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }
}

/// The first block of every chain. Its timestamp is fixed at 0 so every node
/// derives the same genesis hash.
pub fn genesis_block() -> Block {
    Block {
        index: 1,
        timestamp: 0,
        transactions: vec![],
        proof: GENESIS_PROOF.to_string(),
        previous_hash: zero_hash(),
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::genesis()
    }
}
