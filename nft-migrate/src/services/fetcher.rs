use crate::interfaces::error::FetchError;
use crate::interfaces::token::MetadataDocument;
use crate::services::staging::StagingArea;
use reqwest::{Client, Url};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Result of a successful metadata fetch. `media_path` is `None` when the
/// media download failed.
#[derive(Debug, Clone)]
pub struct FetchedAsset {
    pub token_id: u64,
    pub document: MetadataDocument,
    pub metadata_path: PathBuf,
    pub media_path: Option<PathBuf>,
}

/// Staged file name for a token's metadata document: the last path segment
/// of its URI, with the metadata extension appended when missing.
pub fn metadata_file_name(token_id: u64, uri: &str, extension: &str) -> Result<String, FetchError> {
    let url = Url::parse(uri).map_err(|e| FetchError::InvalidUri {
        uri: uri.to_string(),
        reason: e.to_string(),
    })?;
    let segment = url
        .path_segments()
        .and_then(|segments| segments.last())
        .unwrap_or("");
    let suffix = format!(".{}", extension);

    Ok(if segment.is_empty() {
        format!("{}{}", token_id, suffix)
    } else if segment.ends_with(&suffix) {
        segment.to_string()
    } else {
        format!("{}{}", segment, suffix)
    })
}

pub struct AssetFetcher {
    client: Client,
}

impl Default for AssetFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Downloads the metadata document behind `uri` and the media it points
    /// to, staging both. Only the metadata part can fail the fetch.
    pub async fn fetch(
        &self,
        staging: &StagingArea,
        token_id: u64,
        uri: &str,
        metadata_file: &str,
    ) -> Result<FetchedAsset, FetchError> {
        let response = self.client.get(uri).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: uri.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let document: MetadataDocument = serde_json::from_slice(&body)?;

        let metadata_path = staging.metadata_path(metadata_file);
        staging.write_bytes(&metadata_path, &body)?;
        debug!(
            "Metadata of token {} staged at {}",
            token_id,
            metadata_path.display()
        );

        let media_path = self.fetch_media(staging, token_id, &document.image).await;

        Ok(FetchedAsset {
            token_id,
            document,
            metadata_path,
            media_path,
        })
    }

    async fn fetch_media(
        &self,
        staging: &StagingArea,
        token_id: u64,
        media_url: &str,
    ) -> Option<PathBuf> {
        let response = match self.client.get(media_url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Media of token {} not downloaded ({}): {}", token_id, media_url, e);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!(
                "Media of token {} not downloaded ({}): status {}",
                token_id,
                media_url,
                response.status()
            );
            return None;
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Media of token {} not downloaded ({}): {}", token_id, media_url, e);
                return None;
            }
        };

        let path = staging.media_path(token_id);
        match staging.write_bytes(&path, &bytes) {
            Ok(()) => Some(path),
            Err(e) => {
                warn!("Media of token {} could not be staged: {}", token_id, e);
                None
            }
        }
    }
}
