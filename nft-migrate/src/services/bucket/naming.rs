use super::{BucketName, MAX_BUCKET_NAME_LEN};
use crate::interfaces::error::StoreError;
use rand::Rng;

const SUFFIX_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const SUFFIX_LEN: usize = 3;
const FALLBACK_STEM: &str = "nft";

/// `<first word of display_name>-<3 random [a-z0-9]>`, lower-cased.
///
/// Characters a bucket name cannot hold are dropped from the word.
pub fn derive_bucket_name<R: Rng>(
    display_name: &str,
    rng: &mut R,
) -> Result<BucketName, StoreError> {
    let first_word = display_name.split_whitespace().next().unwrap_or("");
    let mut stem: String = first_word
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect();
    stem.truncate(MAX_BUCKET_NAME_LEN - SUFFIX_LEN - 1);
    let stem = stem.trim_matches('-');
    let stem = if stem.is_empty() { FALLBACK_STEM } else { stem };

    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| SUFFIX_CHARSET[rng.gen_range(0..SUFFIX_CHARSET.len())] as char)
        .collect();

    BucketName::new(&format!("{}-{}", stem, suffix))
}
