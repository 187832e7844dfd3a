//! Destination planning.
//!
//! The full list of uploads is computed before any transfer. Dry runs print
//! this list; real runs execute it, so both always agree.

use crate::artifacts::{ArtifactKind, ArtifactSet};
use crate::config::{LATEST, PublishConfig};
use crate::keys::{compose_key, s3_uri};
use std::path::PathBuf;

/// One (artifact, destination) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedUpload {
    /// Artifact type
    pub kind: ArtifactKind,
    /// Local source file
    pub local_path: PathBuf,
    /// Destination bucket
    pub bucket: String,
    /// Destination key
    pub key: String,
}

impl PlannedUpload {
    /// `s3://bucket/key`
    pub fn destination(&self) -> String {
        s3_uri(&self.bucket, &self.key)
    }
}

/// Ordered uploads for one release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishPlan {
    version: String,
    latest_prefix: String,
    version_prefix: String,
    uploads: Vec<PlannedUpload>,
}

impl PublishPlan {
    /// Plan every artifact against `latest` then `<version>`
    pub fn new(config: &PublishConfig, artifacts: &ArtifactSet, version: &str) -> Self {
        let latest_prefix = compose_key([config.base_prefix.as_str(), LATEST]);
        let version_prefix = compose_key([config.base_prefix.as_str(), version]);

        let mut uploads = Vec::new();
        for artifact in artifacts {
            for prefix in [&latest_prefix, &version_prefix] {
                uploads.push(PlannedUpload {
                    kind: artifact.kind,
                    local_path: artifact.local_path.clone(),
                    bucket: config.bucket.clone(),
                    key: compose_key([prefix.as_str(), artifact.file_name.as_str()]),
                });
            }
        }

        Self {
            version: version.to_string(),
            latest_prefix,
            version_prefix,
            uploads,
        }
    }

    /// Release version
    pub fn version(&self) -> &str {
        &self.version
    }

    /// `<base>/latest`
    pub fn latest_prefix(&self) -> &str {
        &self.latest_prefix
    }

    /// `<base>/<version>`
    pub fn version_prefix(&self) -> &str {
        &self.version_prefix
    }

    /// Uploads in execution order
    pub fn uploads(&self) -> &[PlannedUpload] {
        &self.uploads
    }
}
