//! AWS SDK backed [`RemoteStore`].
//!
//! Small files go up with a single `PutObject` streamed from disk. Files
//! above [`MULTIPART_THRESHOLD`] use multipart upload, read in
//! [`MULTIPART_PART_SIZE`] chunks so memory stays bounded.

use super::RemoteStore;
use crate::error::TransportError;
use crate::session::CallerIdentity;
use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{CompletedMultipartUpload, CompletedPart};
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Files larger than this use multipart upload
pub const MULTIPART_THRESHOLD: u64 = 16 * 1024 * 1024;

/// Part size for multipart uploads (S3 minimum is 5 MiB)
pub const MULTIPART_PART_SIZE: u64 = 8 * 1024 * 1024;

/// S3 + STS clients sharing one resolved SDK configuration
#[derive(Debug, Clone)]
pub struct S3Store {
    s3: aws_sdk_s3::Client,
    sts: aws_sdk_sts::Client,
}

impl S3Store {
    /// Build clients from a loaded SDK configuration
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            s3: aws_sdk_s3::Client::new(sdk_config),
            sts: aws_sdk_sts::Client::new(sdk_config),
        }
    }

    async fn put_single(
        &self,
        bucket: &str,
        key: &str,
        local_path: &Path,
    ) -> Result<(), TransportError> {
        let body = ByteStream::from_path(local_path).await?;

        self.s3
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .content_type(content_type_for(local_path))
            .send()
            .await?;

        Ok(())
    }

    async fn put_multipart(
        &self,
        bucket: &str,
        key: &str,
        local_path: &Path,
        file_size: u64,
    ) -> Result<(), TransportError> {
        let create = self
            .s3
            .create_multipart_upload()
            .bucket(bucket)
            .key(key)
            .content_type(content_type_for(local_path))
            .send()
            .await?;

        let upload_id = create
            .upload_id()
            .ok_or("CreateMultipartUpload returned no upload_id")?
            .to_string();

        match self
            .put_parts(bucket, key, local_path, file_size, &upload_id)
            .await
        {
            Ok(parts) => {
                let completed = CompletedMultipartUpload::builder()
                    .set_parts(Some(parts))
                    .build();

                self.s3
                    .complete_multipart_upload()
                    .bucket(bucket)
                    .key(key)
                    .upload_id(&upload_id)
                    .multipart_upload(completed)
                    .send()
                    .await?;

                Ok(())
            }
            Err(e) => {
                log::warn!("multipart upload of {} failed, aborting: {}", key, e);
                if let Err(abort_err) = self
                    .s3
                    .abort_multipart_upload()
                    .bucket(bucket)
                    .key(key)
                    .upload_id(&upload_id)
                    .send()
                    .await
                {
                    log::warn!("abort of multipart upload {} failed: {}", upload_id, abort_err);
                }
                Err(e)
            }
        }
    }

    async fn put_parts(
        &self,
        bucket: &str,
        key: &str,
        local_path: &Path,
        file_size: u64,
        upload_id: &str,
    ) -> Result<Vec<CompletedPart>, TransportError> {
        let mut file = tokio::fs::File::open(local_path).await?;
        let mut parts = Vec::new();

        for range in part_ranges(file_size, MULTIPART_PART_SIZE) {
            let mut buf = vec![0u8; range.len as usize];
            file.read_exact(&mut buf).await?;

            let part = self
                .s3
                .upload_part()
                .bucket(bucket)
                .key(key)
                .upload_id(upload_id)
                .part_number(range.number)
                .body(ByteStream::from(buf))
                .send()
                .await?;

            parts.push(completed_part(key, range.number, part.e_tag())?);

            log::debug!(
                "{}: part {} done, {}/{} bytes",
                key,
                range.number,
                range.offset + range.len,
                file_size
            );
        }

        Ok(parts)
    }
}

#[async_trait]
impl RemoteStore for S3Store {
    async fn put_file(
        &self,
        bucket: &str,
        key: &str,
        local_path: &Path,
    ) -> Result<(), TransportError> {
        let file_size = tokio::fs::metadata(local_path).await?.len();

        if uses_multipart(file_size) {
            log::info!(
                "Pushing {} -> s3://{}/{} ({} bytes, multipart)",
                local_path.display(),
                bucket,
                key,
                file_size
            );
            self.put_multipart(bucket, key, local_path, file_size).await
        } else {
            log::info!(
                "Pushing {} -> s3://{}/{} ({} bytes)",
                local_path.display(),
                bucket,
                key,
                file_size
            );
            self.put_single(bucket, key, local_path).await
        }
    }

    async fn caller_identity(&self) -> Result<CallerIdentity, TransportError> {
        let ident = self.sts.get_caller_identity().send().await?;

        Ok(CallerIdentity {
            arn: ident.arn().unwrap_or("unknown").to_string(),
            account: ident.account().unwrap_or("unknown").to_string(),
        })
    }
}

/// One multipart chunk: 1-based part number and its byte range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartRange {
    /// S3 part number, starting at 1
    pub number: i32,
    /// Offset of the first byte
    pub offset: u64,
    /// Number of bytes
    pub len: u64,
}

/// Split `file_size` bytes into consecutive parts of at most `part_size` bytes
pub fn part_ranges(file_size: u64, part_size: u64) -> Vec<PartRange> {
    let mut ranges = Vec::new();
    if part_size == 0 {
        return ranges;
    }

    let mut offset = 0;
    let mut number = 1;
    while offset < file_size {
        let len = (file_size - offset).min(part_size);
        ranges.push(PartRange {
            number,
            offset,
            len,
        });
        offset += len;
        number += 1;
    }
    ranges
}

/// Record an uploaded part; S3 needs every part's ETag to complete the upload
fn completed_part(
    key: &str,
    number: i32,
    e_tag: Option<&str>,
) -> Result<CompletedPart, TransportError> {
    let e_tag = e_tag
        .filter(|tag| !tag.is_empty())
        .ok_or_else(|| format!("UploadPart {} of {} returned no ETag", number, key))?;

    Ok(CompletedPart::builder()
        .e_tag(e_tag)
        .part_number(number)
        .build())
}

/// Whether a file of `file_size` bytes goes up as a multipart upload
pub fn uses_multipart(file_size: u64) -> bool {
    file_size > MULTIPART_THRESHOLD
}

/// MIME type for a published artifact
pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => "application/json",
        _ => "application/octet-stream",
    }
}
