//! Session and identity resolution against the remote store.
//!
//! Building a session never fails: credentials are resolved lazily by the
//! SDK, and the first upload is the real authorization check. The STS
//! identity lookup is diagnostic only.

use crate::transfer::RemoteStore;
use crate::transfer::s3::S3Store;
use async_trait::async_trait;
use aws_config::profile::ProfileFileCredentialsProvider;
use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Profile and region used to build a session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSettings {
    /// Named credential profile; `None` uses the default credential chain
    pub profile: Option<String>,
    /// Region override; `None` uses profile/environment resolution
    pub region: Option<String>,
}

impl SessionSettings {
    /// Create settings, treating blank strings as unset
    pub fn new(profile: Option<String>, region: Option<String>) -> Self {
        let non_blank = |v: Option<String>| {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        };
        Self {
            profile: non_blank(profile),
            region: non_blank(region),
        }
    }
}

/// Caller identity as reported by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    /// Principal ARN
    pub arn: String,
    /// Account ID
    pub account: String,
}

/// Outcome of the best-effort identity self-check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityCheck {
    /// Identity resolved
    Verified(CallerIdentity),
    /// Lookup failed; publication continues regardless
    Unavailable(String),
}

/// Builds authenticated store handles
#[async_trait]
pub trait Connector: Send + Sync {
    /// Store handle produced by this connector
    type Store: RemoteStore;

    /// Resolve a session bound to `settings`
    async fn connect(&self, settings: &SessionSettings) -> Self::Store;
}

/// Ask the store who we are, downgrading any failure to [`IdentityCheck::Unavailable`]
pub async fn check_identity<S: RemoteStore + ?Sized>(store: &S) -> IdentityCheck {
    match store.caller_identity().await {
        Ok(identity) => IdentityCheck::Verified(identity),
        Err(e) => {
            log::debug!("caller identity lookup failed: {:?}", e);
            IdentityCheck::Unavailable(e.to_string())
        }
    }
}

/// Connector backed by the AWS SDK default configuration chain
#[derive(Debug, Clone, Default)]
pub struct AwsConnector;

impl AwsConnector {
    /// Resolve the SDK configuration for `settings`.
    ///
    /// A named profile replaces the whole default credential chain, so
    /// `AWS_ACCESS_KEY_ID` and friends cannot override it. The profile name is
    /// also handed to the config loader so its region still applies.
    pub async fn load_config(&self, settings: &SessionSettings) -> SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(ref profile) = settings.profile {
            log::debug!("Using AWS profile '{}'", profile);
            let credentials = ProfileFileCredentialsProvider::builder()
                .profile_name(profile)
                .build();
            loader = loader.profile_name(profile).credentials_provider(credentials);
        }
        if let Some(ref region) = settings.region {
            log::debug!("Using AWS region override '{}'", region);
            loader = loader.region(Region::new(region.clone()));
        }

        loader.load().await
    }
}

#[async_trait]
impl Connector for AwsConnector {
    type Store = S3Store;

    async fn connect(&self, settings: &SessionSettings) -> S3Store {
        let sdk_config = self.load_config(settings).await;
        S3Store::new(&sdk_config)
    }
}
