use crate::interfaces::error::ChainError;
use sha3::{Digest, Keccak256};
use std::fmt;

const ADDRESS_LEN: usize = 20;

/// A 20-byte EVM contract address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContractAddress([u8; ADDRESS_LEN]);

impl ContractAddress {
    /// Parses a hex address, with or without `0x`.
    ///
    /// Single-case input is accepted as is. Mixed-case input must carry a
    /// valid EIP-55 checksum.
    pub fn parse(value: &str) -> Result<Self, ChainError> {
        let trimmed = value.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.len() != ADDRESS_LEN * 2 {
            return Err(ChainError::InvalidAddress(format!(
                "{}: expected {} hex digits, got {}",
                value,
                ADDRESS_LEN * 2,
                digits.len()
            )));
        }

        let bytes = hex::decode(digits)
            .map_err(|e| ChainError::InvalidAddress(format!("{}: {}", value, e)))?;
        let mut raw = [0u8; ADDRESS_LEN];
        raw.copy_from_slice(&bytes);
        let address = Self(raw);

        let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
        if has_lower && has_upper && &address.to_checksum()[2..] != digits {
            return Err(ChainError::InvalidAddress(format!(
                "{}: bad EIP-55 checksum",
                value
            )));
        }

        Ok(address)
    }

    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let hash = Keccak256::digest(lower.as_bytes());

        let mut checksummed = String::with_capacity(2 + lower.len());
        checksummed.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = if i % 2 == 0 {
                hash[i / 2] >> 4
            } else {
                hash[i / 2] & 0x0f
            };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                checksummed.push(c.to_ascii_uppercase());
            } else {
                checksummed.push(c);
            }
        }
        checksummed
    }
}

impl fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}
