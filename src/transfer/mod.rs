//! Transfer engine.
//!
//! Uploads one local file to one destination key, or prints what it would
//! do in dry-run mode. Existing objects are always overwritten.

pub mod s3;

use crate::cli::OutputManager;
use crate::error::{PublishError, Result, TransportError};
use crate::keys::s3_uri;
use crate::session::CallerIdentity;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Object store operations needed for publication
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Write the full content of `local_path` to `bucket/key`, replacing any existing object
    async fn put_file(
        &self,
        bucket: &str,
        key: &str,
        local_path: &Path,
    ) -> std::result::Result<(), TransportError>;

    /// Resolve the identity of the caller
    async fn caller_identity(&self) -> std::result::Result<CallerIdentity, TransportError>;
}

/// What happened to a single planned upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Object written
    Uploaded,
    /// Dry run: nothing written
    DryRunSkipped,
}

/// Record of one upload, used for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    /// Local source file
    pub local_path: PathBuf,
    /// Destination bucket
    pub bucket: String,
    /// Destination key
    pub key: String,
    /// Outcome
    pub outcome: UploadOutcome,
}

impl UploadResult {
    /// `s3://bucket/key`
    pub fn destination(&self) -> String {
        s3_uri(&self.bucket, &self.key)
    }
}

/// Upload `local_path` to `bucket/key`, or only report it when `dry_run` is set.
///
/// Transport failures become [`PublishError::TransferFailed`]; there is no retry.
pub async fn upload<S: RemoteStore + ?Sized>(
    store: &S,
    local_path: &Path,
    bucket: &str,
    key: &str,
    dry_run: bool,
    output: &OutputManager,
) -> Result<UploadResult> {
    let destination = s3_uri(bucket, key);

    if dry_run {
        output.println(&format!(
            "[DRY-RUN] upload: {} -> {}",
            local_path.display(),
            destination
        ))?;
        return Ok(UploadResult {
            local_path: local_path.to_path_buf(),
            bucket: bucket.to_string(),
            key: key.to_string(),
            outcome: UploadOutcome::DryRunSkipped,
        });
    }

    log::debug!("Uploading {} -> {}", local_path.display(), destination);
    store
        .put_file(bucket, key, local_path)
        .await
        .map_err(|source| PublishError::TransferFailed {
            local_path: local_path.to_path_buf(),
            destination: destination.clone(),
            source,
        })?;

    let name = local_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unknown>");
    output.success(&format!("Uploaded: {} -> {}", name, destination))?;

    Ok(UploadResult {
        local_path: local_path.to_path_buf(),
        bucket: bucket.to_string(),
        key: key.to_string(),
        outcome: UploadOutcome::Uploaded,
    })
}
