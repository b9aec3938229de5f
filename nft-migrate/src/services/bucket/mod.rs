//! Bucket module.
//!
mod gnfd_cmd;
mod naming;
pub use gnfd_cmd::GnfdCmdStore;
pub use naming::derive_bucket_name;

use crate::interfaces::error::StoreError;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::fmt;
use std::path::PathBuf;

const MIN_BUCKET_NAME_LEN: usize = 3;
pub const MAX_BUCKET_NAME_LEN: usize = 63;

/// A validated, lower-cased Greenfield bucket name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketName(String);

impl BucketName {
    pub fn new(name: &str) -> Result<Self, StoreError> {
        let name = name.to_lowercase();
        let len = name.len();
        if !(MIN_BUCKET_NAME_LEN..=MAX_BUCKET_NAME_LEN).contains(&len) {
            return Err(StoreError::InvalidBucketName(format!(
                "{}: length must be between {} and {}, got {}",
                name, MIN_BUCKET_NAME_LEN, MAX_BUCKET_NAME_LEN, len
            )));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(StoreError::InvalidBucketName(format!(
                "{}: only lowercase letters, numbers and '-' are allowed",
                name
            )));
        }
        if name.starts_with('-') || name.ends_with('-') {
            return Err(StoreError::InvalidBucketName(format!(
                "{}: must start and end with a letter or number",
                name
            )));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `gnfd://<bucket>`
    pub fn uri(&self) -> String {
        format!("gnfd://{}", self.0)
    }
}

impl fmt::Display for BucketName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Public access URL of an object: `<base_url>/view/<bucket>/<object>`.
///
/// Pure naming convention, valid before the object is even uploaded.
pub fn public_url(
    base_url: &str,
    bucket: &BucketName,
    object_name: &str,
) -> Result<String, StoreError> {
    if object_name.is_empty() {
        return Err(StoreError::InvalidObjectName(
            "object name is empty".to_string(),
        ));
    }
    Ok(format!(
        "{}/view/{}/{}",
        base_url.trim_end_matches('/'),
        bucket,
        object_name
    ))
}

/// Destination storage for the migrated collection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BucketStore: Send + Sync {
    async fn create_bucket(&self, bucket: &BucketName) -> Result<(), StoreError>;

    /// Uploads every file in one batch under public-read visibility. Objects
    /// are named after the files' base names.
    async fn upload_files(&self, bucket: &BucketName, files: &[PathBuf]) -> Result<(), StoreError>;

    fn public_url(&self, bucket: &BucketName, object_name: &str) -> Result<String, StoreError>;
}
