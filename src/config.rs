//! Publication configuration.
//!
//! Destination bucket, base prefix and artifact names are plain values
//! handed to the orchestrator, so tests and alternate products can swap them.

/// Default distribution bucket
pub const DEFAULT_BUCKET: &str = "dist-repo-public";

/// Default base prefix (S3 keys do not start with `/`)
pub const DEFAULT_BASE_PREFIX: &str = "firmware/ESPRelayBoard/";

/// Default AWS profile used when `AWS_PROFILE` is unset
pub const DEFAULT_PROFILE: &str = "ESPRelayBoard-repo";

/// Environment variable supplying the default profile name
pub const PROFILE_ENV_VAR: &str = "AWS_PROFILE";

/// Environment override for the destination bucket
pub const BUCKET_ENV_VAR: &str = "FIRMWARE_PUBLISH_BUCKET";

/// Environment override for the base prefix
pub const PREFIX_ENV_VAR: &str = "FIRMWARE_PUBLISH_PREFIX";

/// Name of the latest destination tree
pub const LATEST: &str = "latest";

/// Immutable settings for one publication run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishConfig {
    /// Destination bucket
    pub bucket: String,
    /// Prefix under which `latest/` and `<version>/` live
    pub base_prefix: String,
    /// Build output directory, relative to the project root
    pub build_dir: String,
    /// Build metadata document file name
    pub build_info_name: String,
    /// Firmware image file name
    pub firmware_name: String,
    /// Storage partition image file name
    pub storage_name: String,
    /// Required version field in the build metadata document
    pub version_field: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            bucket: DEFAULT_BUCKET.to_string(),
            base_prefix: DEFAULT_BASE_PREFIX.to_string(),
            build_dir: "build".to_string(),
            build_info_name: "build_info.json".to_string(),
            firmware_name: "ESPRelayBoard.bin".to_string(),
            storage_name: "storage.bin".to_string(),
            version_field: crate::build_info::VERSION_FIELD.to_string(),
        }
    }
}

impl PublishConfig {
    /// Create config from environment variables with fallback to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create config from an arbitrary variable lookup.
    ///
    /// Blank values are ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut config = Self::default();
        if let Some(bucket) = non_blank(BUCKET_ENV_VAR) {
            config.bucket = bucket.trim().to_string();
        }
        if let Some(prefix) = non_blank(PREFIX_ENV_VAR) {
            config.base_prefix = prefix;
        }
        config
    }
}

/// Per-invocation options, typically from the command line
#[derive(Debug, Clone, Default)]
pub struct PublishOptions {
    /// Project (source) root
    pub project_root: std::path::PathBuf,
    /// Document to read the version from, instead of `<build_dir>/<build_info_name>`
    pub build_info_override: Option<std::path::PathBuf>,
    /// Named credential profile
    pub profile: Option<String>,
    /// Region override
    pub region: Option<String>,
    /// Plan and print, but write nothing remotely
    pub dry_run: bool,
}
