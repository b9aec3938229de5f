mod manager;
pub use manager::MigrationManager;

use crate::interfaces::token::TokenRecord;
use crate::services::bucket::BucketName;
use crate::services::rewriter::RewriteSummary;
use std::collections::BTreeMap;

/// Outcome of one completed migration run.
#[derive(Debug, Clone)]
pub struct MigrationReport {
    pub bucket: BucketName,
    pub reported_supply: u64,
    pub working_count: u64,
    pub tokens: BTreeMap<u64, TokenRecord>,
    pub media_uploaded: usize,
    pub metadata_uploaded: usize,
    pub rewrite: RewriteSummary,
}

impl MigrationReport {
    pub fn fetched(&self) -> usize {
        self.tokens.values().filter(|t| t.is_fetched()).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &TokenRecord> {
        self.tokens.values().filter(|t| t.failure.is_some())
    }
}
