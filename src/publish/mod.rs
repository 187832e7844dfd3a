//! Publication orchestrator.
//!
//! Linear pipeline: resolve paths, validate local files, read the version,
//! plan destinations, open a session, then upload each artifact to `latest`
//! and `<version>` in a fixed order. Any error halts the run; objects already
//! written stay in place and are overwritten by the next run.

mod plan;

pub use plan::{PlannedUpload, PublishPlan};

use crate::artifacts::{ArtifactSet, ensure_file};
use crate::build_info::BuildInfo;
use crate::cli::OutputManager;
use crate::config::{PublishConfig, PublishOptions};
use crate::error::Result;
use crate::paths::resolve_path;
use crate::session::{Connector, IdentityCheck, SessionSettings, check_identity};
use crate::transfer::{UploadResult, upload};

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct PublishReport {
    /// Published version identifier
    pub version: String,
    /// Identity self-check outcome
    pub identity: IdentityCheck,
    /// Uploads in execution order
    pub uploads: Vec<UploadResult>,
}

/// Drives one publication run against a store produced by `C`
pub struct Publisher<C: Connector> {
    config: PublishConfig,
    connector: C,
    output: OutputManager,
}

impl<C: Connector> Publisher<C> {
    /// Create a publisher with default console output
    pub fn new(config: PublishConfig, connector: C) -> Self {
        Self::with_output(config, connector, OutputManager::new(false))
    }

    /// Create a publisher writing to `output`
    pub fn with_output(config: PublishConfig, connector: C, output: OutputManager) -> Self {
        Self {
            config,
            connector,
            output,
        }
    }

    /// Validate inputs and compute the destinations without touching the network
    pub fn prepare(&self, options: &PublishOptions) -> Result<PublishPlan> {
        let project_root = resolve_path(&options.project_root)?;
        log::debug!("Project root: {}", project_root.display());

        let artifacts = ArtifactSet::locate(&project_root, &self.config);
        let build_info_path = match options.build_info_override {
            Some(ref path) => resolve_path(path)?,
            None => project_root
                .join(&self.config.build_dir)
                .join(&self.config.build_info_name),
        };

        // The override only selects the version source; uploads always
        // come from the build directory.
        ensure_file(&build_info_path)?;
        artifacts.verify()?;

        let build_info = BuildInfo::load_with_field(&build_info_path, &self.config.version_field)?;
        log::info!(
            "Version {} from {}",
            build_info.version(),
            build_info_path.display()
        );

        Ok(PublishPlan::new(&self.config, &artifacts, build_info.version()))
    }

    /// Run the full publication
    pub async fn run(&self, options: &PublishOptions) -> Result<PublishReport> {
        let plan = self.prepare(options)?;

        self.output.info(&format!("Version: {}", plan.version()))?;
        self.output.indent(&format!(
            "Destinations: s3://{}/{{{}, {}}}",
            self.config.bucket,
            plan.latest_prefix(),
            plan.version_prefix()
        ))?;

        let settings = SessionSettings::new(options.profile.clone(), options.region.clone());
        let store = self.connector.connect(&settings).await;

        let identity = check_identity(&store).await;
        match identity {
            IdentityCheck::Verified(ref ident) => {
                self.output
                    .info(&format!("AWS identity: {} (account {})", ident.arn, ident.account))?;
            }
            IdentityCheck::Unavailable(ref reason) => {
                self.output.warn(&format!(
                    "Note: couldn't call STS get_caller_identity (continuing): {}",
                    reason
                ))?;
            }
        }

        let mut uploads = Vec::with_capacity(plan.uploads().len());
        for planned in plan.uploads() {
            let result = upload(
                &store,
                &planned.local_path,
                &planned.bucket,
                &planned.key,
                options.dry_run,
                &self.output,
            )
            .await?;
            uploads.push(result);
        }

        self.output.success("Done.")?;

        Ok(PublishReport {
            version: plan.version().to_string(),
            identity,
            uploads,
        })
    }
}
