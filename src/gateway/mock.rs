use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::{Result, UtilityError};
use crate::gateway::{ExecutionSummary, PipelineGateway, PipelineParameter, PipelineSummary};

const MOCK_ARN_PREFIX: &str = "arn:aws:sagemaker:us-east-1:000000000000";

/// A call received by [MockGateway]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    CreatePipeline {
        name: String,
        definition: String,
        role_arn: String,
    },
    UpdatePipeline {
        name: String,
        definition: String,
        role_arn: String,
    },
    StartPipelineExecution {
        name: String,
        parameters: Vec<PipelineParameter>,
    },
    DeletePipeline {
        name: String,
    },
    ListPipelines,
    ListPipelineExecutions {
        name: String,
    },
    ListPipelineParameters {
        execution_arn: String,
    },
}

/// In-memory gateway for testing without the remote service
///
/// Serves canned listings, records every call, and fails the operations it
/// was told to fail.
pub struct MockGateway {
    pipelines: Vec<PipelineSummary>,
    executions: HashMap<String, Vec<ExecutionSummary>>,
    parameters: HashMap<String, Vec<PipelineParameter>>,
    failures: HashMap<&'static str, String>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockGateway {
    /// Create a new empty mock gateway
    pub fn new() -> Self {
        MockGateway {
            pipelines: Vec::new(),
            executions: HashMap::new(),
            parameters: HashMap::new(),
            failures: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Add a pipeline to the listing
    pub fn add_pipeline(&mut self, summary: PipelineSummary) {
        self.pipelines.push(summary);
    }

    /// Add an execution under the pipeline named `pipeline`
    pub fn add_execution(&mut self, pipeline: impl Into<String>, execution: ExecutionSummary) {
        self.executions
            .entry(pipeline.into())
            .or_default()
            .push(execution);
    }

    /// Set the parameters reported for an execution
    pub fn set_parameters(
        &mut self,
        execution_arn: impl Into<String>,
        parameters: Vec<PipelineParameter>,
    ) {
        self.parameters.insert(execution_arn.into(), parameters);
    }

    /// Make `operation` (a trait method name) fail with `message`
    pub fn fail_on(&mut self, operation: &'static str, message: impl Into<String>) {
        self.failures.insert(operation, message.into());
    }

    /// Calls received so far, oldest first
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock_calls().clone()
    }

    fn lock_calls(&self) -> MutexGuard<'_, Vec<RecordedCall>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, operation: &'static str, call: RecordedCall) -> Result<()> {
        self.lock_calls().push(call);
        match self.failures.get(operation) {
            Some(message) => Err(UtilityError::remote(message.clone())),
            None => Ok(()),
        }
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PipelineGateway for MockGateway {
    async fn create_pipeline(
        &self,
        name: &str,
        definition: &str,
        role_arn: &str,
    ) -> Result<Option<String>> {
        self.record(
            "create_pipeline",
            RecordedCall::CreatePipeline {
                name: name.to_string(),
                definition: definition.to_string(),
                role_arn: role_arn.to_string(),
            },
        )?;
        Ok(Some(format!("{}:pipeline/{}", MOCK_ARN_PREFIX, name.to_lowercase())))
    }

    async fn update_pipeline(
        &self,
        name: &str,
        definition: &str,
        role_arn: &str,
    ) -> Result<Option<String>> {
        self.record(
            "update_pipeline",
            RecordedCall::UpdatePipeline {
                name: name.to_string(),
                definition: definition.to_string(),
                role_arn: role_arn.to_string(),
            },
        )?;
        Ok(Some(format!("{}:pipeline/{}", MOCK_ARN_PREFIX, name.to_lowercase())))
    }

    async fn start_pipeline_execution(
        &self,
        name: &str,
        parameters: &[PipelineParameter],
    ) -> Result<Option<String>> {
        self.record(
            "start_pipeline_execution",
            RecordedCall::StartPipelineExecution {
                name: name.to_string(),
                parameters: parameters.to_vec(),
            },
        )?;
        Ok(Some(format!(
            "{}:pipeline/{}/execution/mock",
            MOCK_ARN_PREFIX,
            name.to_lowercase()
        )))
    }

    async fn delete_pipeline(&self, name: &str) -> Result<Option<String>> {
        self.record(
            "delete_pipeline",
            RecordedCall::DeletePipeline {
                name: name.to_string(),
            },
        )?;
        Ok(Some(format!("{}:pipeline/{}", MOCK_ARN_PREFIX, name.to_lowercase())))
    }

    async fn list_pipelines(&self) -> Result<Vec<PipelineSummary>> {
        self.record("list_pipelines", RecordedCall::ListPipelines)?;
        Ok(self.pipelines.clone())
    }

    async fn list_pipeline_executions(&self, name: &str) -> Result<Vec<ExecutionSummary>> {
        self.record(
            "list_pipeline_executions",
            RecordedCall::ListPipelineExecutions {
                name: name.to_string(),
            },
        )?;
        Ok(self.executions.get(name).cloned().unwrap_or_default())
    }

    async fn list_pipeline_parameters_for_execution(
        &self,
        execution_arn: &str,
    ) -> Result<Vec<PipelineParameter>> {
        self.record(
            "list_pipeline_parameters_for_execution",
            RecordedCall::ListPipelineParameters {
                execution_arn: execution_arn.to_string(),
            },
        )?;
        Ok(self.parameters.get(execution_arn).cloned().unwrap_or_default())
    }
}
