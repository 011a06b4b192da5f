//! Pipeline service abstraction layer
//!
//! This module provides a trait-based abstraction over the remote pipeline
//! service, allowing the command handlers to run against the real service or
//! against an in-memory double in tests.
//!
//! # Overview
//!
//! The primary abstraction is the [PipelineGateway] trait. The concrete
//! implementations include:
//!
//! - [sagemaker::SageMakerGateway]: AWS SageMaker Pipelines via `aws-sdk-sagemaker`
//! - [mock::MockGateway]: An in-memory implementation for testing
//!
//! Gateways are built by the command dispatcher and handed to the handlers in
//! [crate::pipelines]; nothing in the crate holds a process-wide client.

pub mod mock;
pub mod sagemaker;

pub use mock::MockGateway;
pub use sagemaker::SageMakerGateway;

use async_trait::async_trait;

use crate::error::Result;

/// A named parameter passed to, or recorded for, a pipeline execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineParameter {
    pub name: String,
    pub value: String,
}

impl PipelineParameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        PipelineParameter {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Summary of a pipeline as returned by the service
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PipelineSummary {
    pub pipeline_name: Option<String>,
    pub pipeline_arn: Option<String>,
    pub role_arn: Option<String>,
    pub display_name: Option<String>,
}

impl PipelineSummary {
    /// Identifier accepted by the per-pipeline calls: the name, else the display name.
    pub fn lookup_name(&self) -> Option<&str> {
        self.pipeline_name
            .as_deref()
            .or(self.display_name.as_deref())
    }
}

/// Summary of a single pipeline execution
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExecutionSummary {
    pub execution_arn: Option<String>,
    pub display_name: Option<String>,
    pub status: Option<String>,
}

/// Operations the command handlers need from the pipeline service.
///
/// ## Error Handling
///
/// Every method maps service and transport failures to
/// [crate::error::UtilityError::Remote] carrying the service's message. No
/// method retries.
///
/// ## Implementations
///
/// - [SageMakerGateway](sagemaker::SageMakerGateway): the real service
/// - [MockGateway](mock::MockGateway): test double
#[async_trait]
pub trait PipelineGateway: Send + Sync {
    /// Create a pipeline from a JSON definition.
    ///
    /// # Returns
    /// * `Ok(Some(arn))` - ARN of the new pipeline, when the service reports it
    async fn create_pipeline(
        &self,
        name: &str,
        definition: &str,
        role_arn: &str,
    ) -> Result<Option<String>>;

    /// Replace the definition and role of an existing pipeline.
    async fn update_pipeline(
        &self,
        name: &str,
        definition: &str,
        role_arn: &str,
    ) -> Result<Option<String>>;

    /// Start an execution of `name` with the given parameters.
    ///
    /// # Returns
    /// * `Ok(Some(arn))` - ARN of the started execution
    async fn start_pipeline_execution(
        &self,
        name: &str,
        parameters: &[PipelineParameter],
    ) -> Result<Option<String>>;

    /// Delete a pipeline, returning its ARN.
    async fn delete_pipeline(&self, name: &str) -> Result<Option<String>>;

    /// First page of pipelines in the account and region.
    async fn list_pipelines(&self) -> Result<Vec<PipelineSummary>>;

    /// First page of executions of pipeline `name`.
    async fn list_pipeline_executions(&self, name: &str) -> Result<Vec<ExecutionSummary>>;

    /// Parameters an execution was started with.
    async fn list_pipeline_parameters_for_execution(
        &self,
        execution_arn: &str,
    ) -> Result<Vec<PipelineParameter>>;
}
