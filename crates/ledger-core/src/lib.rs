pub mod constants;
pub mod consensus;
pub mod error;
pub mod ledger;
pub mod pow;
pub mod propagation;
pub mod registry;
pub mod transport;
pub mod validation;

use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

pub use consensus::{select_longest, Candidate, ConsensusResolver};
pub use error::{ChainError, PeerError};
pub use ledger::Ledger;
pub use registry::NodeRegistry;
pub use transport::{ChainResponse, NodesRequest, PeerTransport};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Transaction {
    #[serde(alias = "sender")]
    pub sender: String,
    #[serde(alias = "recipient")]
    pub recipient: String,
    #[serde(alias = "amount")]
    pub amount: i64,
}

impl Transaction {
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>, amount: i64) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Block {
    pub index: u64,
    pub timestamp: u64,
    pub transactions: Vec<Transaction>,
    pub proof: String,
    pub previous_hash: String,
}

impl Block {
    /// Compact JSON with lexicographically sorted keys. Two nodes holding the
    /// same field values always produce the same bytes.
    pub fn canonical_json(&self) -> String {
        let txs: Vec<serde_json::Value> = self
            .transactions
            .iter()
            .map(|t| {
                json!({
                    "Amount": t.amount,
                    "Recipient": t.recipient,
                    "Sender": t.sender,
                })
            })
            .collect();
        json!({
            "Index": self.index,
            "PreviousHash": self.previous_hash,
            "Proof": self.proof,
            "Timestamp": self.timestamp,
            "Transactions": txs,
        })
        .to_string()
    }

    /// Lowercase hex SHA-256 of [`Block::canonical_json`].
    pub fn hash(&self) -> String {
        sha256_hex(self.canonical_json().as_bytes())
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Seconds since the unix epoch; 0 if the clock is before it.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Hex encoding of 32 zero bytes, the genesis block's predecessor hash.
pub fn zero_hash() -> String {
    hex::encode([0u8; constants::HASH_SIZE])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_block() -> Block {
        Block {
            index: 2,
            timestamp: 1_600_000_200,
            transactions: vec![
                Transaction::new("alice", "bob", 10),
                Transaction::new("bob", "charlie", 5),
            ],
            proof: "7".to_string(),
            previous_hash: zero_hash(),
        }
    }

    #[test]
    fn zero_hash_is_64_zero_digits() {
        let h = zero_hash();
        assert_eq!(h.len(), constants::HASH_HEX_SIZE);
        assert!(h.chars().all(|c| c == '0'));
    }

    #[test]
    fn sha256_hex_known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn canonical_json_sorts_keys_without_whitespace() {
        let block = Block {
            index: 1,
            timestamp: 1_600_000_000,
            transactions: vec![Transaction::new("a", "b", 3)],
            proof: "1".to_string(),
            previous_hash: "00".to_string(),
        };
        let expected = r#"{"Index":1,"PreviousHash":"00","Proof":"1","Timestamp":1600000000,"Transactions":[{"Amount":3,"Recipient":"b","Sender":"a"}]}"#;
        assert_eq!(block.canonical_json(), expected);
    }

    #[test]
    fn block_hash_consistency() {
        let block = sample_block();
        let hash1 = block.hash();
        let hash2 = block.clone().hash();
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), constants::HASH_HEX_SIZE);
        assert!(hash1.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn block_hash_survives_wire_round_trip() {
        let block = sample_block();
        let json = serde_json::to_string_pretty(&block).unwrap();
        let decoded: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(block.hash(), decoded.hash());
    }

    #[test]
    fn block_hash_changes_with_proof() {
        let mut block = sample_block();
        let before = block.hash();
        block.proof.push('1');
        assert_ne!(before, block.hash());
    }

    #[test]
    fn block_hash_depends_on_transaction_order() {
        let block = sample_block();
        let mut swapped = block.clone();
        swapped.transactions.reverse();
        assert_ne!(block.hash(), swapped.hash());
    }

    #[test]
    fn transaction_serialization_example() {
        let tx = Transaction::new("Alice", "Bob", 10);
        let json = serde_json::to_string(&tx).unwrap();
        let expected_json = r#"{"Sender":"Alice","Recipient":"Bob","Amount":10}"#;
        assert_eq!(json, expected_json);
        let deserialized: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(tx, deserialized);
    }

    #[test]
    fn transaction_accepts_lowercase_field_names() {
        let tx: Transaction =
            serde_json::from_str(r#"{"sender":"Alice","recipient":"Bob","amount":-4}"#).unwrap();
        assert_eq!(tx, Transaction::new("Alice", "Bob", -4));
        // still written with the wire names
        assert_eq!(
            serde_json::to_string(&tx).unwrap(),
            r#"{"Sender":"Alice","Recipient":"Bob","Amount":-4}"#
        );
    }

    #[test]
    fn transaction_inequality_different_amount() {
        let tx1 = Transaction::new("Alice", "Bob", 10);
        let tx2 = Transaction::new("Alice", "Bob", 20);
        assert_ne!(tx1, tx2);
    }

    #[test]
    fn block_serialization_uses_pascal_case() {
        let json = serde_json::to_value(sample_block()).unwrap();
        assert_eq!(json["Index"], 2);
        assert_eq!(json["Proof"], "7");
        assert_eq!(json["PreviousHash"], zero_hash());
        assert_eq!(json["Transactions"][1]["Recipient"], "charlie");
    }
}
