//! Chain module.
//!
mod evm_client;
pub use evm_client::EvmChainReader;

use crate::interfaces::error::ChainError;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

/// Read-only view of an ERC-721 collection contract.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChainReader: Send + Sync {
    async fn total_supply(&self) -> Result<u64, ChainError>;

    async fn token_uri(&self, token_id: u64) -> Result<String, ChainError>;
}

/// Number of tokens a run works on: the reported supply, clamped to `cap`.
pub fn working_token_count(reported_supply: u64, cap: u64) -> u64 {
    reported_supply.min(cap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_clamp_supply_to_cap() {
        assert_eq!(working_token_count(1000, 5), 5);
        assert_eq!(working_token_count(u64::MAX, 5), 5);
    }

    #[test]
    fn should_keep_supply_below_cap() {
        assert_eq!(working_token_count(3, 5), 3);
        assert_eq!(working_token_count(0, 5), 0);
    }
}
