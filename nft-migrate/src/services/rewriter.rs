use crate::interfaces::error::MigrationError;
use crate::interfaces::token::TokenRecord;
use crate::services::bucket::{BucketName, BucketStore};
use crate::services::staging::StagingArea;
use std::collections::BTreeMap;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteSummary {
    pub rewritten: usize,
    pub skipped: usize,
}

/// Points every staged metadata document at its media's public URL.
///
/// Must only run once the media batch is in the bucket. Tokens without a
/// staged media file keep their original `image` value.
pub fn rewrite_metadata<B: BucketStore + ?Sized>(
    staging: &StagingArea,
    store: &B,
    bucket: &BucketName,
    records: &mut BTreeMap<u64, TokenRecord>,
) -> Result<RewriteSummary, MigrationError> {
    let mut summary = RewriteSummary::default();

    for record in records.values_mut() {
        let Some(metadata_path) = record.metadata_path.clone() else {
            continue;
        };

        let media_file = match &record.media_path {
            Some(media_path) if media_path.is_file() => media_path.file_name(),
            _ => None,
        };
        let Some(media_file) = media_file.map(|name| name.to_string_lossy().into_owned()) else {
            debug!(
                "Token {} has no staged media, {} keeps its original image",
                record.token_id,
                metadata_path.display()
            );
            summary.skipped += 1;
            continue;
        };

        let url = store.public_url(bucket, &media_file)?;
        let mut document = staging.read_document(&metadata_path)?;
        document.image = url.clone();
        staging.write_document(&metadata_path, &document)?;

        info!("generate image url on greenfield: {}", url);
        record.document = Some(document);
        record.remote_media_url = Some(url);
        summary.rewritten += 1;
    }

    Ok(summary)
}
