//! Minimal ABI codec for the two read-only ERC-721 calls we issue.
//!
use crate::interfaces::error::ChainError;

/// `keccak256("totalSupply()")[..4]`
pub const TOTAL_SUPPLY_SELECTOR: [u8; 4] = [0x18, 0x16, 0x0d, 0xdd];
/// `keccak256("tokenURI(uint256)")[..4]`
pub const TOKEN_URI_SELECTOR: [u8; 4] = [0xc8, 0x7b, 0x56, 0xdd];

const WORD: usize = 32;

fn encode_call(selector: [u8; 4], args: &[u64]) -> String {
    let mut data = Vec::with_capacity(4 + args.len() * WORD);
    data.extend_from_slice(&selector);
    for arg in args {
        data.extend_from_slice(&[0u8; WORD - 8]);
        data.extend_from_slice(&arg.to_be_bytes());
    }
    format!("0x{}", hex::encode(data))
}

pub fn encode_total_supply_call() -> String {
    encode_call(TOTAL_SUPPLY_SELECTOR, &[])
}

pub fn encode_token_uri_call(token_id: u64) -> String {
    encode_call(TOKEN_URI_SELECTOR, &[token_id])
}

pub fn decode_hex(data: &str) -> Result<Vec<u8>, ChainError> {
    let digits = data.strip_prefix("0x").unwrap_or(data);
    hex::decode(digits).map_err(|e| ChainError::Decode(format!("invalid hex payload: {}", e)))
}

fn word_at(data: &[u8], offset: usize) -> Result<&[u8], ChainError> {
    offset
        .checked_add(WORD)
        .and_then(|end| data.get(offset..end))
        .ok_or_else(|| {
            ChainError::Decode(format!(
                "payload of {} bytes too short for a word at offset {}",
                data.len(),
                offset
            ))
        })
}

fn word_to_usize(word: &[u8]) -> Result<usize, ChainError> {
    if word[..WORD - 8].iter().any(|b| *b != 0) {
        return Err(ChainError::Decode("word does not fit in 64 bits".to_string()));
    }
    let mut low = [0u8; 8];
    low.copy_from_slice(&word[WORD - 8..]);
    usize::try_from(u64::from_be_bytes(low))
        .map_err(|_| ChainError::Decode("word does not fit in usize".to_string()))
}

/// Decodes a `uint256` return value. Values wider than 64 bits saturate.
pub fn decode_uint256(data: &[u8]) -> Result<u64, ChainError> {
    let word = word_at(data, 0)?;
    if word[..WORD - 8].iter().any(|b| *b != 0) {
        return Ok(u64::MAX);
    }
    let mut low = [0u8; 8];
    low.copy_from_slice(&word[WORD - 8..]);
    Ok(u64::from_be_bytes(low))
}

/// Decodes a single dynamic `string` return value.
pub fn decode_string(data: &[u8]) -> Result<String, ChainError> {
    let offset = word_to_usize(word_at(data, 0)?)?;
    let length = word_to_usize(word_at(data, offset)?)?;
    let start = offset + WORD;
    let bytes = start
        .checked_add(length)
        .and_then(|end| data.get(start..end))
        .ok_or_else(|| {
            ChainError::Decode(format!(
                "string of {} bytes overruns payload of {} bytes",
                length,
                data.len()
            ))
        })?;

    String::from_utf8(bytes.to_vec())
        .map_err(|e| ChainError::Decode(format!("string is not valid UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_string_return(value: &str) -> Vec<u8> {
        let mut data = vec![0u8; WORD];
        data[WORD - 1] = 0x20;
        let mut length = vec![0u8; WORD - 8];
        length.extend_from_slice(&(value.len() as u64).to_be_bytes());
        data.extend_from_slice(&length);
        data.extend_from_slice(value.as_bytes());
        let padding = (WORD - value.len() % WORD) % WORD;
        data.extend(std::iter::repeat(0u8).take(padding));
        data
    }

    #[test]
    fn should_encode_total_supply_call() {
        assert_eq!(encode_total_supply_call(), "0x18160ddd");
    }

    #[test]
    fn should_encode_token_uri_call_with_padded_id() {
        let data = encode_token_uri_call(258);
        assert_eq!(data.len(), 2 + 8 + 64);
        assert!(data.starts_with("0xc87b56dd"));
        assert!(data.ends_with("0102"));
    }

    #[test]
    fn should_decode_uint256() {
        let data = decode_hex(
            "0x00000000000000000000000000000000000000000000000000000000000003e8",
        )
        .unwrap();
        assert_eq!(decode_uint256(&data).unwrap(), 1000);
    }

    #[test]
    fn should_saturate_wide_uint256() {
        let mut data = vec![0u8; WORD];
        data[0] = 1;
        assert_eq!(decode_uint256(&data).unwrap(), u64::MAX);
    }

    #[test]
    fn should_reject_empty_uint256() {
        assert!(decode_uint256(&[]).is_err());
    }

    #[test]
    fn should_decode_string() {
        let uri = "https://api.example.com/metadata/collection/0.json";
        let data = encode_string_return(uri);
        assert_eq!(decode_string(&data).unwrap(), uri);
    }

    #[test]
    fn should_decode_empty_string() {
        let data = encode_string_return("");
        assert_eq!(decode_string(&data).unwrap(), "");
    }

    #[test]
    fn should_reject_truncated_string() {
        let mut data = encode_string_return("ipfs://bafy/0");
        data.truncate(WORD * 2 + 3);
        assert!(matches!(decode_string(&data), Err(ChainError::Decode(_))));
    }
}
