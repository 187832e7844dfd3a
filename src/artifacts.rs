//! Local artifact discovery and verification.
//!
//! All required files are checked before any remote activity. The first
//! failure stops publication.

use crate::config::PublishConfig;
use crate::error::{NotFoundReason, PublishError, Result};
use std::path::{Path, PathBuf};

/// Fail with [`PublishError::NotFound`] unless `path` is an existing regular file
pub fn ensure_file(path: &Path) -> Result<()> {
    match std::fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => Ok(()),
        Ok(_) => Err(PublishError::NotFound {
            path: path.to_path_buf(),
            reason: NotFoundReason::NotAFile,
        }),
        Err(_) => Err(PublishError::NotFound {
            path: path.to_path_buf(),
            reason: NotFoundReason::Missing,
        }),
    }
}

/// Which build output an artifact is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// `build_info.json`
    BuildInfo,
    /// Application firmware image
    Firmware,
    /// Storage (SPIFFS) partition image
    Storage,
}

impl ArtifactKind {
    /// Short human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ArtifactKind::BuildInfo => "build info",
            ArtifactKind::Firmware => "firmware",
            ArtifactKind::Storage => "storage",
        }
    }
}

/// A local file and the name it is published under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Build output type
    pub kind: ArtifactKind,
    /// Absolute local path
    pub local_path: PathBuf,
    /// File name at each destination prefix
    pub file_name: String,
}

/// The fixed, ordered set of files every release publishes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSet {
    artifacts: [Artifact; 3],
}

impl ArtifactSet {
    /// Locate the artifacts under `<project_root>/<build_dir>`
    pub fn locate(project_root: &Path, config: &PublishConfig) -> Self {
        let build_dir = project_root.join(&config.build_dir);
        let artifact = |kind, name: &str| Artifact {
            kind,
            local_path: build_dir.join(name),
            file_name: name.to_string(),
        };

        Self {
            artifacts: [
                artifact(ArtifactKind::BuildInfo, &config.build_info_name),
                artifact(ArtifactKind::Firmware, &config.firmware_name),
                artifact(ArtifactKind::Storage, &config.storage_name),
            ],
        }
    }

    /// Artifacts in publication order
    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter()
    }

    /// Check every artifact, stopping at the first missing one
    pub fn verify(&self) -> Result<()> {
        for artifact in &self.artifacts {
            ensure_file(&artifact.local_path)?;

            let size = std::fs::metadata(&artifact.local_path)?.len();
            if size == 0 {
                log::warn!(
                    "{} artifact is empty (0 bytes): {}",
                    artifact.kind.label(),
                    artifact.local_path.display()
                );
            } else {
                log::debug!(
                    "Verified {} ({} bytes)",
                    artifact.local_path.display(),
                    size
                );
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ArtifactSet {
    type Item = &'a Artifact;
    type IntoIter = std::slice::Iter<'a, Artifact>;

    fn into_iter(self) -> Self::IntoIter {
        self.artifacts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ensure_file(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            PublishError::NotFound {
                reason: NotFoundReason::NotAFile,
                ..
            }
        ));
    }

    #[test]
    fn missing_path_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = ensure_file(&dir.path().join("nope.bin")).unwrap_err();
        assert!(matches!(
            err,
            PublishError::NotFound {
                reason: NotFoundReason::Missing,
                ..
            }
        ));
    }

    #[test]
    fn set_is_ordered_metadata_firmware_storage() {
        let set = ArtifactSet::locate(Path::new("/proj"), &PublishConfig::default());
        let kinds: Vec<_> = set.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            [ArtifactKind::BuildInfo, ArtifactKind::Firmware, ArtifactKind::Storage]
        );
        let storage = set.iter().last().unwrap();
        assert_eq!(storage.local_path, Path::new("/proj/build/storage.bin"));
        assert_eq!(storage.file_name, "storage.bin");
    }

    #[test]
    fn verify_stops_at_first_missing() {
        let dir = tempfile::tempdir().unwrap();
        let build = dir.path().join("build");
        std::fs::create_dir(&build).unwrap();
        std::fs::write(build.join("build_info.json"), "{}").unwrap();
        std::fs::write(build.join("ESPRelayBoard.bin"), b"\x00\x01").unwrap();

        let set = ArtifactSet::locate(dir.path(), &PublishConfig::default());
        match set.verify() {
            Err(PublishError::NotFound { path, .. }) => {
                assert!(path.ends_with("storage.bin"))
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }
}
