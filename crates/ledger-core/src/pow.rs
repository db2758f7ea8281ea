//! Proof-of-work puzzle.
//!
//! A proof `q` is valid for the predecessor proof `p` when the hex SHA-256 of
//! the concatenation `p ++ q` ends in [`POW_TARGET_CHAR`]. That is roughly one
//! candidate in sixteen, so the search is cheap and exists only to rate-limit
//! block creation.

use crate::{constants::POW_TARGET_CHAR, sha256_hex};
use tracing::debug;

/// Hex SHA-256 of `last_proof ++ proof`.
pub fn proof_hash(last_proof: &str, proof: &str) -> String {
    let mut guess = String::with_capacity(last_proof.len() + proof.len());
    guess.push_str(last_proof);
    guess.push_str(proof);
    sha256_hex(guess.as_bytes())
}

pub fn is_valid_proof(last_proof: &str, proof: &str) -> bool {
    proof_hash(last_proof, proof).ends_with(POW_TARGET_CHAR)
}

/// Search `0, 1, 2, ...` in order and return the first candidate accepted by
/// [`is_valid_proof`]. Blocks the calling thread until a proof is found.
pub fn find_proof(last_proof: &str) -> String {
    let mut candidate: u64 = 0;
    loop {
        let proof = candidate.to_string();
        if is_valid_proof(last_proof, &proof) {
            debug!(last_proof, proof = %proof, attempts = candidate + 1, "proof found");
            return proof;
        }
        candidate += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_proof_known_answers() {
        assert_eq!(find_proof("1"), "33");
        assert_eq!(find_proof("100"), "10");
        assert_eq!(
            proof_hash("1", "33"),
            "d2f483672c0239f6d7dd3c9ecee6deacbcd59185855625902a8b1c1a3bd67440"
        );
    }

    #[test]
    fn find_proof_returns_first_match() {
        for last in ["1", "33", "abc", ""] {
            let proof = find_proof(last);
            assert!(is_valid_proof(last, &proof));
            let found: u64 = proof.parse().unwrap();
            for smaller in 0..found {
                assert!(
                    !is_valid_proof(last, &smaller.to_string()),
                    "{smaller} is a smaller valid proof for {last:?}"
                );
            }
        }
    }

    #[test]
    fn is_valid_proof_is_deterministic() {
        for q in 0..64u32 {
            let q = q.to_string();
            assert_eq!(is_valid_proof("1", &q), is_valid_proof("1", &q));
        }
    }

    #[test]
    fn is_valid_proof_checks_last_hex_digit() {
        assert!(is_valid_proof("1", "33"));
        assert!(!is_valid_proof("1", "32"));
    }

    #[test]
    fn find_proof_is_deterministic() {
        assert_eq!(find_proof("42"), find_proof("42"));
    }
}
