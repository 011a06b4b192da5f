//! Pipeline command handlers.
//!
//! Each action is a single gateway call, except `list`, which fans out to the
//! executions of every pipeline and the parameters of every execution.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Result, UtilityError};
use crate::gateway::{PipelineGateway, PipelineParameter};

/// Operation requested by `utility sagemaker --choice`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PipelineAction {
    Start,
    Create,
    Delete,
    Update,
    List,
}

impl PipelineAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineAction::Start => "start",
            PipelineAction::Create => "create",
            PipelineAction::Delete => "delete",
            PipelineAction::Update => "update",
            PipelineAction::List => "list",
        }
    }
}

/// Everything a pipeline action may need, decoupled from clap.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineRequest {
    pub action: PipelineAction,
    pub name: String,
    pub role_arn: String,
    pub definition_file: Option<PathBuf>,
    pub parameters: Vec<PipelineParameter>,
}

/// An execution with its parameters collapsed into a map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExecutionListing {
    pub pipeline_execution_arn: Option<String>,
    pub pipeline_execution_display_name: Option<String>,
    pub pipeline_execution_status: Option<String>,
    pub pipeline_parameters: BTreeMap<String, String>,
}

/// A pipeline with all of its (first page of) executions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PipelineListing {
    pub pipeline_arn: Option<String>,
    pub role_arn: Option<String>,
    pub pipeline_display_name: Option<String>,
    pub pipeline_execution_summaries: Vec<ExecutionListing>,
}

/// Reshaped result of a pipeline action, printed as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PipelineOutcome {
    Pipeline {
        #[serde(rename = "PipelineArn")]
        pipeline_arn: Option<String>,
    },
    Execution {
        #[serde(rename = "PipelineExecutionArn")]
        execution_arn: Option<String>,
    },
    Listing(Vec<PipelineListing>),
}

impl PipelineOutcome {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Parses a `KEY=VALUE` pipeline parameter, splitting on the first `=`.
pub fn parse_parameter(raw: &str) -> Result<PipelineParameter> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok(PipelineParameter::new(name.trim(), value))
        }
        _ => Err(UtilityError::parse(format!(
            "invalid parameter '{}', expected KEY=VALUE",
            raw
        ))),
    }
}

fn read_definition(request: &PipelineRequest) -> Result<String> {
    let path = request.definition_file.as_ref().ok_or_else(|| {
        UtilityError::config(format!(
            "a pipeline definition file (--filename) is required to {} a pipeline",
            request.action.as_str()
        ))
    })?;
    debug!(path = %path.display(), "reading pipeline definition");
    Ok(fs::read_to_string(path)?)
}

/// Runs one pipeline action against `gateway`.
pub async fn run_pipeline_action<G>(
    gateway: &G,
    request: &PipelineRequest,
) -> Result<PipelineOutcome>
where
    G: PipelineGateway + ?Sized,
{
    info!(action = request.action.as_str(), pipeline = %request.name, "running pipeline action");

    let outcome = match request.action {
        PipelineAction::Create => {
            let definition = read_definition(request)?;
            let pipeline_arn = gateway
                .create_pipeline(&request.name, &definition, &request.role_arn)
                .await?;
            PipelineOutcome::Pipeline { pipeline_arn }
        }
        PipelineAction::Update => {
            let definition = read_definition(request)?;
            let pipeline_arn = gateway
                .update_pipeline(&request.name, &definition, &request.role_arn)
                .await?;
            PipelineOutcome::Pipeline { pipeline_arn }
        }
        PipelineAction::Start => {
            let execution_arn = gateway
                .start_pipeline_execution(&request.name, &request.parameters)
                .await?;
            PipelineOutcome::Execution { execution_arn }
        }
        PipelineAction::Delete => {
            let pipeline_arn = gateway.delete_pipeline(&request.name).await?;
            PipelineOutcome::Pipeline { pipeline_arn }
        }
        PipelineAction::List => {
            PipelineOutcome::Listing(list_pipelines_with_executions(gateway).await?)
        }
    };

    Ok(outcome)
}

/// Lists every pipeline together with its executions and their parameters.
///
/// Calls are issued one after another; the first failure aborts the listing.
pub async fn list_pipelines_with_executions<G>(gateway: &G) -> Result<Vec<PipelineListing>>
where
    G: PipelineGateway + ?Sized,
{
    let pipelines = gateway.list_pipelines().await?;
    let mut listings = Vec::with_capacity(pipelines.len());

    for pipeline in pipelines {
        let mut executions = Vec::new();

        match pipeline.lookup_name() {
            Some(name) => {
                for execution in gateway.list_pipeline_executions(name).await? {
                    let pipeline_parameters = match execution.execution_arn.as_deref() {
                        Some(arn) => gateway
                            .list_pipeline_parameters_for_execution(arn)
                            .await?
                            .into_iter()
                            .map(|p| (p.name, p.value))
                            .collect(),
                        None => BTreeMap::new(),
                    };

                    executions.push(ExecutionListing {
                        pipeline_execution_arn: execution.execution_arn,
                        pipeline_execution_display_name: execution.display_name,
                        pipeline_execution_status: execution.status,
                        pipeline_parameters,
                    });
                }
            }
            None => warn!(
                arn = ?pipeline.pipeline_arn,
                "pipeline has no name, skipping executions"
            ),
        }

        listings.push(PipelineListing {
            pipeline_arn: pipeline.pipeline_arn,
            role_arn: pipeline.role_arn,
            pipeline_display_name: pipeline.display_name,
            pipeline_execution_summaries: executions,
        });
    }

    debug!(count = listings.len(), "listed pipelines");
    Ok(listings)
}
