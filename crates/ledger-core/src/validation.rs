use crate::{error::ChainError, pow::is_valid_proof, Block};
use rayon::prelude::*;

/// Check every link `chain[i-1] -> chain[i]` for `i >= 1`. The first block is
/// trusted; every node seeds the same genesis.
///
/// Links are checked in parallel, but the reported failure is always the
/// lowest failing position, the same one a sequential scan would stop at.
pub fn validate_chain(chain: &[Block]) -> Result<(), ChainError> {
    match (1..chain.len())
        .into_par_iter()
        .find_map_first(|i| check_link(&chain[i - 1], &chain[i]).err())
    {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

pub fn is_valid_chain(chain: &[Block]) -> bool {
    validate_chain(chain).is_ok()
}

fn check_link(prev: &Block, block: &Block) -> Result<(), ChainError> {
    if block.previous_hash != prev.hash() {
        return Err(ChainError::BrokenLink { index: block.index });
    }
    if !is_valid_proof(&prev.proof, &block.proof) {
        return Err(ChainError::InvalidProof { index: block.index });
    }
    Ok(())
}
