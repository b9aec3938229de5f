use super::{public_url, BucketName, BucketStore};
use crate::interfaces::error::StoreError;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, info};

const PUBLIC_READ: &str = "public-read";

/// `BucketStore` driving the `gnfd-cmd` Greenfield client as a subprocess.
pub struct GnfdCmdStore {
    program: PathBuf,
    config_path: PathBuf,
    password_path: PathBuf,
    sp_base_url: String,
}

impl GnfdCmdStore {
    pub fn new(
        program: PathBuf,
        config_path: PathBuf,
        password_path: PathBuf,
        sp_base_url: String,
    ) -> Self {
        Self {
            program,
            config_path,
            password_path,
            sp_base_url,
        }
    }

    async fn run(&self, operation: &'static str, args: Vec<OsString>) -> Result<(), StoreError> {
        debug!("Running {} {:?}", self.program.display(), args);

        let output = Command::new(&self.program)
            .arg("-c")
            .arg(&self.config_path)
            .arg("-p")
            .arg(&self.password_path)
            .args(&args)
            .output()
            .await
            .map_err(|source| StoreError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            debug!("{} output: {}", operation, stdout.trim());
        }

        if !output.status.success() {
            return Err(StoreError::CommandFailed {
                operation,
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl BucketStore for GnfdCmdStore {
    async fn create_bucket(&self, bucket: &BucketName) -> Result<(), StoreError> {
        info!("Creating bucket {}", bucket.uri());
        self.run(
            "bucket create",
            vec!["bucket".into(), "create".into(), bucket.uri().into()],
        )
        .await
    }

    async fn upload_files(&self, bucket: &BucketName, files: &[PathBuf]) -> Result<(), StoreError> {
        if files.is_empty() {
            return Err(StoreError::EmptyBatch(bucket.to_string()));
        }
        info!("Uploading {} file(s) to {}", files.len(), bucket.uri());

        let mut args: Vec<OsString> = vec![
            "object".into(),
            "put".into(),
            "--visibility".into(),
            PUBLIC_READ.into(),
        ];
        args.extend(files.iter().map(|file| file.as_os_str().to_os_string()));
        args.push(bucket.uri().into());

        self.run("object put", args).await
    }

    fn public_url(&self, bucket: &BucketName, object_name: &str) -> Result<String, StoreError> {
        public_url(&self.sp_base_url, bucket, object_name)
    }
}
