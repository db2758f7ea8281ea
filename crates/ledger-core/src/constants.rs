pub const HASH_SIZE: usize = 32;
pub const HASH_HEX_SIZE: usize = HASH_SIZE * 2;
pub const GENESIS_PROOF: &str = "1";
/// Final hex digit a proof hash must end with.
pub const POW_TARGET_CHAR: char = '0';
pub const REWARD_SENDER: &str = "0";
pub const MINING_REWARD: i64 = 1;
