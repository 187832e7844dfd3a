//! # Firmware Publisher
//!
//! Publishes firmware build artifacts to an S3 distribution bucket.
//!
//! Each run uploads three files from `<project>/build/`:
//!
//! - `build_info.json`
//! - the firmware image (`ESPRelayBoard.bin` by default)
//! - `storage.bin`
//!
//! to two sibling trees under the base prefix:
//!
//! - `<prefix>/latest/`
//! - `<prefix>/<DEVICE_SW_VERSION_NUM>/`
//!
//! Uploads run one at a time and always overwrite, so a failed run can be
//! repeated from scratch.
//!
//! ## Usage
//!
//! ```bash
//! firmware_publisher .                      # publish from the current project
//! firmware_publisher . --dry-run            # print destinations only
//! firmware_publisher . -p release-profile   # use a named AWS profile
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod artifacts;
pub mod build_info;
pub mod cli;
pub mod config;
pub mod error;
pub mod keys;
pub mod paths;
pub mod publish;
pub mod session;
pub mod transfer;

pub use artifacts::{Artifact, ArtifactKind, ArtifactSet, ensure_file};
pub use build_info::BuildInfo;
pub use config::{PublishConfig, PublishOptions};
pub use error::{CliError, PublishError, Result};
pub use keys::compose_key;
pub use publish::{PublishPlan, PublishReport, Publisher};
pub use session::{AwsConnector, CallerIdentity, Connector, IdentityCheck, SessionSettings};
pub use transfer::{RemoteStore, UploadOutcome, UploadResult};
