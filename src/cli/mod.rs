//! Command line interface for firmware_publisher.

mod args;
mod output;

pub use args::Args;
pub use output::OutputManager;

use crate::config::PublishConfig;
use crate::error::Result;
use crate::publish::Publisher;
use crate::session::AwsConnector;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(args).await
}

/// Execute a publication run for parsed arguments, returning the exit code
pub async fn execute(args: Args) -> Result<i32> {
    let output = OutputManager::new(false);

    if let Err(validation_error) = args.validate() {
        output.error(&validation_error.to_string());
        return Ok(1);
    }

    let options = args.to_options();
    if options.dry_run {
        output.warn("Dry run: nothing will be uploaded")?;
    }

    let publisher = Publisher::with_output(PublishConfig::from_env(), AwsConnector, output.clone());
    match publisher.run(&options).await {
        Ok(report) => {
            log::info!(
                "Published version {} ({} destination(s))",
                report.version,
                report.uploads.len()
            );
            Ok(0)
        }
        Err(e) => {
            output.error(&e.to_string());

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                output.println("\n💡 Recovery suggestions:")?;
                for suggestion in suggestions {
                    output.indent(&suggestion)?;
                }
            }

            Ok(1)
        }
    }
}
