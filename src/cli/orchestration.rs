//! Command dispatch
//!
//! Keeps argument parsing in `main` and the command logic in the library.
//! The pipeline gateway is built here, only for the `sagemaker` command, and
//! passed down to the handlers.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::charts;
use crate::cli::{Cli, Commands, SagemakerArgs};
use crate::config::{self, ChartsConfig, Config};
use crate::gateway::{PipelineGateway, SageMakerGateway};
use crate::pipelines::{self, PipelineOutcome, PipelineRequest};
use crate::store;
use crate::ui;
use crate::version::{self, VersionTag};

/// Runs the parsed command line to completion.
pub async fn dispatch(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Version { filename, message } => {
            run_version(&filename, &message)?;
        }
        Commands::UpdateCharts {
            filename,
            chart_version,
        } => {
            let config = load_config(config_path)?;
            run_update_charts(&filename, &chart_version, &config.charts)?;
        }
        Commands::Sagemaker(args) => {
            let config = load_config(config_path)?;
            ui::display_status(&format!(
                "Running sagemaker {} for '{}'",
                args.choice.as_str(),
                args.name
            ));
            let gateway = SageMakerGateway::from_env(&config.aws).await;
            let outcome = run_sagemaker(&gateway, args).await?;
            ui::display_result(&outcome.to_json()?);
        }
    }

    Ok(())
}

// Loaded per command; `version` runs without any configuration.
fn load_config(path: Option<&str>) -> Result<Config> {
    let config = config::load_config(path).context("loading configuration")?;
    debug!(?config, "configuration loaded");
    Ok(config)
}

/// Bumps the tag stored in `filename` according to `message`.
///
/// Prints the new tag, writes it back, then confirms the write.
pub fn run_version(filename: &Path, message: &str) -> Result<VersionTag> {
    let current = store::read(filename)
        .with_context(|| format!("reading version from {}", filename.display()))?;

    let kind = version::classify_directive(message);
    let next = version::bump(current, kind)
        .with_context(|| format!("bumping version from {}", filename.display()))?;
    debug!(%current, %next, ?kind, "computed version bump");

    ui::display_result(&next.to_string());
    store::write(filename, &next)
        .with_context(|| format!("writing version to {}", filename.display()))?;
    ui::display_success(&format!("Saved to {}", filename.display()));

    Ok(next)
}

/// Sets the chart version in `filename`.
pub fn run_update_charts(filename: &Path, version: &str, settings: &ChartsConfig) -> Result<()> {
    charts::update_chart_file(filename, version, settings.update_app_version)
        .with_context(|| format!("updating chart {}", filename.display()))?;
    ui::display_success(&format!(
        "Updated {} with version {}",
        filename.display(),
        version
    ));
    Ok(())
}

/// Runs a `sagemaker` invocation against `gateway`.
pub async fn run_sagemaker<G>(gateway: &G, args: SagemakerArgs) -> Result<PipelineOutcome>
where
    G: PipelineGateway + ?Sized,
{
    let request = PipelineRequest::from(args);
    let outcome = pipelines::run_pipeline_action(gateway, &request)
        .await
        .with_context(|| format!("sagemaker {} '{}'", request.action.as_str(), request.name))?;
    Ok(outcome)
}
