//! Shared fixtures: an in-memory object store and a project tree builder.

#![allow(dead_code)]

use async_trait::async_trait;
use firmware_publisher::error::TransportError;
use firmware_publisher::{CallerIdentity, Connector, PublishConfig, RemoteStore, SessionSettings};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const FIRMWARE: &str = "fw.bin";

#[derive(Debug, Default)]
struct State {
    objects: BTreeMap<(String, String), Vec<u8>>,
    attempts: Vec<String>,
    connects: Vec<SessionSettings>,
    fail_on_attempt: Option<usize>,
    identity_unavailable: bool,
}

/// Object store that keeps everything in memory and shares state across clones
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    /// Fail the `n`th upload attempt (1-based)
    pub fn fail_on_attempt(&self, n: usize) {
        self.state.lock().unwrap().fail_on_attempt = Some(n);
    }

    pub fn deny_identity(&self) {
        self.state.lock().unwrap().identity_unavailable = true;
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.state
            .lock()
            .unwrap()
            .objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    pub fn objects(&self) -> BTreeMap<(String, String), Vec<u8>> {
        self.state.lock().unwrap().objects.clone()
    }

    pub fn attempts(&self) -> Vec<String> {
        self.state.lock().unwrap().attempts.clone()
    }

    pub fn connects(&self) -> Vec<SessionSettings> {
        self.state.lock().unwrap().connects.clone()
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn put_file(
        &self,
        bucket: &str,
        key: &str,
        local_path: &Path,
    ) -> Result<(), TransportError> {
        let should_fail = {
            let mut state = self.state.lock().unwrap();
            state.attempts.push(key.to_string());
            state.fail_on_attempt == Some(state.attempts.len())
        };
        if should_fail {
            return Err("simulated connection reset".into());
        }

        let bytes = tokio::fs::read(local_path).await?;
        self.state
            .lock()
            .unwrap()
            .objects
            .insert((bucket.to_string(), key.to_string()), bytes);
        Ok(())
    }

    async fn caller_identity(&self) -> Result<CallerIdentity, TransportError> {
        if self.state.lock().unwrap().identity_unavailable {
            return Err("AccessDenied: sts:GetCallerIdentity".into());
        }
        Ok(CallerIdentity {
            arn: "arn:aws:iam::123456789012:user/publisher".to_string(),
            account: "123456789012".to_string(),
        })
    }
}

/// Connector handing out clones of one [`MemoryStore`]
#[derive(Debug, Clone, Default)]
pub struct MemoryConnector {
    pub store: MemoryStore,
}

#[async_trait]
impl Connector for MemoryConnector {
    type Store = MemoryStore;

    async fn connect(&self, settings: &SessionSettings) -> MemoryStore {
        self.store
            .state
            .lock()
            .unwrap()
            .connects
            .push(settings.clone());
        self.store.clone()
    }
}

pub fn test_config() -> PublishConfig {
    PublishConfig {
        bucket: "B".to_string(),
        base_prefix: "P/".to_string(),
        firmware_name: FIRMWARE.to_string(),
        ..PublishConfig::default()
    }
}

/// Project tree with `build/` populated
pub struct Project {
    pub dir: TempDir,
}

impl Project {
    pub fn with_version(version: &str) -> Self {
        let project = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        std::fs::create_dir(project.build_dir()).unwrap();
        project.write_build_file(
            "build_info.json",
            format!(r#"{{"DEVICE_SW_VERSION_NUM": "{}", "BUILD_TIME": "now"}}"#, version).as_bytes(),
        );
        project.write_build_file(FIRMWARE, b"\xe9firmware-image");
        project.write_build_file("storage.bin", b"spiffs-image");
        project
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn build_dir(&self) -> PathBuf {
        self.dir.path().join("build")
    }

    pub fn write_build_file(&self, name: &str, content: &[u8]) {
        std::fs::write(self.build_dir().join(name), content).unwrap();
    }

    pub fn remove_build_file(&self, name: &str) {
        std::fs::remove_file(self.build_dir().join(name)).unwrap();
    }
}
