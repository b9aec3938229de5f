use super::MigrationReport;
use crate::interfaces::error::{MigrationError, TokenError};
use crate::interfaces::token::TokenRecord;
use crate::services::bucket::{derive_bucket_name, BucketName, BucketStore};
use crate::services::chain::{working_token_count, ChainReader};
use crate::services::fetcher::{metadata_file_name, AssetFetcher, FetchedAsset};
use crate::services::rewriter::rewrite_metadata;
use crate::services::staging::StagingArea;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::{info, warn};

/// Sequences a collection migration: fetch every token, create the bucket,
/// upload media, rewrite metadata, upload metadata.
pub struct MigrationManager<C: ChainReader, B: BucketStore> {
    chain: C,
    store: B,
    fetcher: AssetFetcher,
    staging: StagingArea,
    max_tokens: u64,
}

impl<C: ChainReader, B: BucketStore> MigrationManager<C, B> {
    pub fn new(
        chain: C,
        store: B,
        fetcher: AssetFetcher,
        staging: StagingArea,
        max_tokens: u64,
    ) -> Self {
        Self {
            chain,
            store,
            fetcher,
            staging,
            max_tokens,
        }
    }

    pub async fn run(&self) -> Result<MigrationReport, MigrationError> {
        let reported_supply = self.chain.total_supply().await?;
        let working_count = working_token_count(reported_supply, self.max_tokens);
        info!("total supply: {}", reported_supply);
        if working_count < reported_supply {
            info!(
                "Collection capped to the first {} of {} tokens",
                working_count, reported_supply
            );
        }

        let mut tokens = self.collect_tokens(working_count).await;

        let display_name = tokens
            .values()
            .find_map(|t| t.display_name())
            .ok_or(MigrationError::NoTokenFetched)?;
        let bucket = derive_bucket_name(display_name, &mut rand::thread_rng())?;
        info!("bucket name: {}", bucket);

        self.store.create_bucket(&bucket).await?;

        let media_uploaded = self.publish_media(&bucket).await?;
        let rewrite = rewrite_metadata(&self.staging, &self.store, &bucket, &mut tokens)?;
        let metadata_uploaded = self.publish_metadata(&bucket, &mut tokens).await?;

        Ok(MigrationReport {
            bucket,
            reported_supply,
            working_count,
            tokens,
            media_uploaded,
            metadata_uploaded,
            rewrite,
        })
    }

    async fn collect_tokens(&self, working_count: u64) -> BTreeMap<u64, TokenRecord> {
        let mut tokens = BTreeMap::new();
        let mut used_names = HashSet::new();

        for token_id in 0..working_count {
            let mut record = TokenRecord::new(token_id);
            match self.fetch_token(&mut record, &mut used_names).await {
                Ok(asset) => {
                    info!(
                        "Token ID: {}, Name: {}, Image: {}",
                        token_id, asset.document.name, asset.document.image
                    );
                    record.document = Some(asset.document);
                    record.metadata_path = Some(asset.metadata_path);
                    record.media_path = asset.media_path;
                }
                Err(e) => {
                    warn!("Token ID: {} skipped: {}", token_id, e);
                    record.failure = Some(e.to_string());
                }
            }
            tokens.insert(token_id, record);
        }

        tokens
    }

    async fn fetch_token(
        &self,
        record: &mut TokenRecord,
        used_names: &mut HashSet<String>,
    ) -> Result<FetchedAsset, TokenError> {
        let token_id = record.token_id;
        let uri = self.chain.token_uri(token_id).await?;
        info!("get the nft token URI: {} token-id {}", uri, token_id);
        record.metadata_uri = Some(uri.clone());

        let extension = self.staging.metadata_extension();
        let natural_name = metadata_file_name(token_id, &uri, extension)?;
        let file_name = unique_file_name(&natural_name, token_id, extension, used_names);
        if file_name != natural_name {
            warn!(
                "Token ID: {} shares its metadata file name, staged as {}",
                token_id, file_name
            );
        }

        let asset = self
            .fetcher
            .fetch(&self.staging, token_id, &uri, &file_name)
            .await?;
        used_names.insert(file_name);
        Ok(asset)
    }

    async fn publish_media(&self, bucket: &BucketName) -> Result<usize, MigrationError> {
        let media = self.staging.list_media()?;
        if media.is_empty() {
            warn!("No media staged, skipping media upload");
            return Ok(0);
        }

        self.store.upload_files(bucket, &media).await?;
        Ok(media.len())
    }

    async fn publish_metadata(
        &self,
        bucket: &BucketName,
        tokens: &mut BTreeMap<u64, TokenRecord>,
    ) -> Result<usize, MigrationError> {
        let metadata = self.staging.list_metadata()?;
        if metadata.is_empty() {
            warn!("No metadata staged, skipping metadata upload");
            return Ok(0);
        }

        self.store.upload_files(bucket, &metadata).await?;

        for path in &metadata {
            let Some(object_name) = file_name_of(path) else {
                continue;
            };
            let url = self.store.public_url(bucket, &object_name)?;
            info!("generate json url on greenfield: {}", url);

            if let Some(record) = tokens
                .values_mut()
                .find(|t| t.metadata_path.as_deref() == Some(path.as_path()))
            {
                record.remote_metadata_url = Some(url);
            }
        }

        Ok(metadata.len())
    }
}

/// `file_name` if no earlier token took it, else `<stem>_<id>.<ext>`, then
/// `<stem>_<id>_<n>.<ext>` until a free name turns up.
fn unique_file_name(
    file_name: &str,
    token_id: u64,
    extension: &str,
    used_names: &HashSet<String>,
) -> String {
    if !used_names.contains(file_name) {
        return file_name.to_string();
    }

    let suffix = format!(".{}", extension);
    let stem = file_name.strip_suffix(&suffix).unwrap_or(file_name);
    let mut candidate = format!("{}_{}{}", stem, token_id, suffix);
    let mut n = 1u64;
    while used_names.contains(&candidate) {
        candidate = format!("{}_{}_{}{}", stem, token_id, n, suffix);
        n += 1;
    }
    candidate
}

fn file_name_of(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
}
