use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("Invalid contract address: {0}")]
    InvalidAddress(String),
    #[error("Chain endpoint unreachable: {0}")]
    Unreachable(String),
    #[error("JSON-RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("Chain endpoint answered with HTTP status {0}")]
    Status(u16),
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Decoding error: {0}")]
    Decode(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StagingError {
    #[error("Staging I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid metadata document {}: {source}", .path.display())]
    Document {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Invalid URI {uri}: {reason}")]
    InvalidUri { uri: String, reason: String },
    #[error("GET {url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Parsing error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Staging(#[from] StagingError),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid bucket name: {0}")]
    InvalidBucketName(String),
    #[error("Invalid object name: {0}")]
    InvalidObjectName(String),
    #[error("Nothing to upload into bucket {0}")]
    EmptyBatch(String),
    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("{operation} failed with exit status {status:?}: {stderr}")]
    CommandFailed {
        operation: &'static str,
        status: Option<i32>,
        stderr: String,
    },
}

/// Failure of a single token. Recorded on the token, never fatal for the run.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error(transparent)]
    Chain(#[from] ChainError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error(transparent)]
    Chain(#[from] ChainError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Staging(#[from] StagingError),
    #[error("No token metadata could be fetched, the bucket cannot be named")]
    NoTokenFetched,
}
