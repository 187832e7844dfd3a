//! Command line argument parsing and validation.

use crate::config::{DEFAULT_PROFILE, PROFILE_ENV_VAR, PublishOptions};
use crate::error::CliError;
use clap::Parser;
use std::path::PathBuf;

/// Upload firmware build artifacts to S3
#[derive(Parser, Debug)]
#[command(
    name = "firmware_publisher",
    version,
    about = "Upload firmware build artifacts to S3",
    long_about = "Upload build/build_info.json, the firmware image and build/storage.bin to
s3://<bucket>/<prefix>/latest/ and s3://<bucket>/<prefix>/<DEVICE_SW_VERSION_NUM>/.

Usage:
  firmware_publisher .
  firmware_publisher ~/src/ESPRelayBoard --dry-run
  firmware_publisher . --profile release --region eu-central-1"
)]
pub struct Args {
    /// Source folder root (project root)
    #[arg(index = 1, value_name = "SOURCE_ROOT")]
    pub source_root: PathBuf,

    /// Path to build_info.json used for the version (default: <SOURCE_ROOT>/build/build_info.json)
    #[arg(long, value_name = "PATH")]
    pub build_info: Option<PathBuf>,

    /// AWS profile name to use
    #[arg(short = 'p', long, value_name = "NAME", env = PROFILE_ENV_VAR, default_value = DEFAULT_PROFILE)]
    pub profile: String,

    /// AWS region; if omitted, uses profile/env/default resolution
    #[arg(long, value_name = "NAME")]
    pub region: Option<String>,

    /// Print what would be uploaded without uploading
    #[arg(long)]
    pub dry_run: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), CliError> {
        if self.source_root.as_os_str().is_empty() {
            return Err(CliError::InvalidArguments {
                reason: "Source root is required".to_string(),
            });
        }
        if let Some(ref path) = self.build_info {
            if path.as_os_str().is_empty() {
                return Err(CliError::InvalidArguments {
                    reason: "--build-info must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Per-run options for the publisher
    pub fn to_options(&self) -> PublishOptions {
        PublishOptions {
            project_root: self.source_root.clone(),
            build_info_override: self.build_info.clone(),
            profile: Some(self.profile.clone()),
            region: self.region.clone(),
            dry_run: self.dry_run,
        }
    }
}
