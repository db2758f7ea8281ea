use thiserror::Error;

/// Why a block sequence failed validation. `index` is the 1-based `Index`
/// of the offending block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("block {index} does not link to the hash of its predecessor")]
    BrokenLink { index: u64 },

    #[error("block {index} carries an invalid proof")]
    InvalidProof { index: u64 },
}

/// Failures talking to another node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeerError {
    #[error("request to {peer} failed: {reason}")]
    Transport { peer: String, reason: String },

    #[error("{peer} answered with status {status}")]
    Status { peer: String, status: u16 },

    #[error("could not decode response from {peer}: {reason}")]
    Decode { peer: String, reason: String },

    #[error("{peer} reported length {reported} but sent {actual} blocks")]
    LengthMismatch {
        peer: String,
        reported: usize,
        actual: usize,
    },
}
