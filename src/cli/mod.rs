//! Command-line argument model.
//!
//! `orchestration` turns a parsed [`Cli`] into calls on the library.

pub mod orchestration;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::gateway::PipelineParameter;
use crate::pipelines::{parse_parameter, PipelineAction, PipelineRequest};

#[derive(Debug, Parser)]
#[command(
    name = "utility",
    version,
    about = "Utility functions for automation"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Custom configuration file path")]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable debug logging on stderr")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// SageMaker pipeline helper functions
    Sagemaker(SagemakerArgs),

    /// Version bump based on major, minor, and patch releases
    Version {
        /// File holding the current version tag
        filename: PathBuf,
        /// Release message; mentions of "major" or "minor" select the bump
        message: String,
    },

    /// Update Chart.yaml with a new version
    UpdateCharts {
        /// Path to the chart file
        filename: PathBuf,
        /// New chart version, with or without a leading 'v'
        #[arg(value_name = "VERSION")]
        chart_version: String,
    },
}

#[derive(Debug, Args)]
pub struct SagemakerArgs {
    #[arg(short, long, help = "Pipeline name")]
    pub name: String,

    #[arg(short, long = "rolearn", help = "Pipeline execution role ARN")]
    pub role_arn: String,

    #[arg(short, long, help = "Pipeline definition file")]
    pub filename: Option<PathBuf>,

    #[arg(
        short,
        long = "parameter",
        value_parser = parse_parameter,
        help = "Pipeline hyperparameter as KEY=VALUE, repeatable"
    )]
    pub parameters: Vec<PipelineParameter>,

    #[arg(short, long, value_enum, ignore_case = true, help = "Pipeline operation")]
    pub choice: PipelineAction,
}

impl From<SagemakerArgs> for PipelineRequest {
    fn from(args: SagemakerArgs) -> Self {
        PipelineRequest {
            action: args.choice,
            name: args.name,
            role_arn: args.role_arn,
            definition_file: args.filename,
            parameters: args.parameters,
        }
    }
}
