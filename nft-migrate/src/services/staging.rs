use crate::interfaces::error::StagingError;
use crate::interfaces::token::MetadataDocument;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Local directory holding the downloaded media and metadata files of a run.
///
/// Listings always rescan the directory, so files rewritten in place are
/// picked up by the next upload pass.
#[derive(Debug, Clone)]
pub struct StagingArea {
    root: PathBuf,
    media_prefix: String,
    metadata_extension: String,
}

impl StagingArea {
    pub fn new(
        root: impl Into<PathBuf>,
        media_prefix: &str,
        metadata_extension: &str,
    ) -> Result<Self, StagingError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            media_prefix: media_prefix.to_string(),
            metadata_extension: metadata_extension.to_string(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn metadata_extension(&self) -> &str {
        &self.metadata_extension
    }

    pub fn media_file_name(&self, token_id: u64) -> String {
        format!("{}_{}", self.media_prefix, token_id)
    }

    pub fn media_path(&self, token_id: u64) -> PathBuf {
        self.root.join(self.media_file_name(token_id))
    }

    pub fn metadata_path(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    fn is_metadata_name(&self, name: &str) -> bool {
        name.strip_suffix(self.metadata_extension.as_str())
            .map_or(false, |stem| stem.ends_with('.'))
    }

    fn is_media_name(&self, name: &str) -> bool {
        name.strip_prefix(self.media_prefix.as_str())
            .map_or(false, |rest| rest.starts_with('_'))
            && !self.is_metadata_name(name)
    }

    pub fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<(), StagingError> {
        fs::write(path, bytes)?;
        trace!("Staged {} bytes at {}", bytes.len(), path.display());
        Ok(())
    }

    pub fn read_document(&self, path: &Path) -> Result<MetadataDocument, StagingError> {
        let content = fs::read(path)?;
        serde_json::from_slice(&content).map_err(|source| StagingError::Document {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overwrites the whole file with the serialized document.
    pub fn write_document(
        &self,
        path: &Path,
        document: &MetadataDocument,
    ) -> Result<(), StagingError> {
        let content = serde_json::to_vec(document).map_err(|source| StagingError::Document {
            path: path.to_path_buf(),
            source,
        })?;
        self.write_bytes(path, &content)
    }

    pub fn list_media(&self) -> Result<Vec<PathBuf>, StagingError> {
        self.list(|name| self.is_media_name(name))
    }

    pub fn list_metadata(&self) -> Result<Vec<PathBuf>, StagingError> {
        self.list(|name| self.is_metadata_name(name))
    }

    fn list<F>(&self, keep: F) -> Result<Vec<PathBuf>, StagingError>
    where
        F: Fn(&str) -> bool,
    {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if keep(name) {
                    files.push(entry.path());
                }
            }
        }
        files.sort();
        Ok(files)
    }
}
