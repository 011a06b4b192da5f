use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_sdk_sagemaker::config::Region;
use aws_sdk_sagemaker::error::DisplayErrorContext;
use aws_sdk_sagemaker::types::Parameter;
use aws_sdk_sagemaker::Client;
use tracing::debug;

use crate::config::AwsConfig;
use crate::error::{Result, UtilityError};
use crate::gateway::{ExecutionSummary, PipelineGateway, PipelineParameter, PipelineSummary};

/// SageMaker Pipelines behind our gateway interface
pub struct SageMakerGateway {
    client: Client,
}

impl SageMakerGateway {
    /// Build a client from the process environment.
    ///
    /// Credentials come from the standard AWS provider chain (environment
    /// variables first). The region comes from the environment and falls back
    /// to `settings.region`.
    pub async fn from_env(settings: &AwsConfig) -> Self {
        let mut region = RegionProviderChain::default_provider();
        if let Some(fallback) = &settings.region {
            region = region.or_else(Region::new(fallback.clone()));
        }

        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region);
        if let Some(endpoint_url) = &settings.endpoint_url {
            debug!(%endpoint_url, "using custom pipeline service endpoint");
            loader = loader.endpoint_url(endpoint_url.as_str());
        }

        let sdk_config = loader.load().await;
        debug!(region = ?sdk_config.region(), "pipeline service client ready");
        SageMakerGateway {
            client: Client::new(&sdk_config),
        }
    }
}

fn remote_error<E: std::error::Error>(operation: &str, err: E) -> UtilityError {
    UtilityError::remote(format!("{} failed: {}", operation, DisplayErrorContext(err)))
}

#[async_trait]
impl PipelineGateway for SageMakerGateway {
    async fn create_pipeline(
        &self,
        name: &str,
        definition: &str,
        role_arn: &str,
    ) -> Result<Option<String>> {
        let output = self
            .client
            .create_pipeline()
            .pipeline_name(name)
            .pipeline_definition(definition)
            .role_arn(role_arn)
            .send()
            .await
            .map_err(|e| remote_error("CreatePipeline", e))?;

        Ok(output.pipeline_arn().map(str::to_string))
    }

    async fn update_pipeline(
        &self,
        name: &str,
        definition: &str,
        role_arn: &str,
    ) -> Result<Option<String>> {
        let output = self
            .client
            .update_pipeline()
            .pipeline_name(name)
            .pipeline_definition(definition)
            .role_arn(role_arn)
            .send()
            .await
            .map_err(|e| remote_error("UpdatePipeline", e))?;

        Ok(output.pipeline_arn().map(str::to_string))
    }

    async fn start_pipeline_execution(
        &self,
        name: &str,
        parameters: &[PipelineParameter],
    ) -> Result<Option<String>> {
        let mut request = self.client.start_pipeline_execution().pipeline_name(name);
        for parameter in parameters {
            request = request.pipeline_parameters(to_sdk_parameter(parameter));
        }

        let output = request
            .send()
            .await
            .map_err(|e| remote_error("StartPipelineExecution", e))?;

        Ok(output.pipeline_execution_arn().map(str::to_string))
    }

    async fn delete_pipeline(&self, name: &str) -> Result<Option<String>> {
        let output = self
            .client
            .delete_pipeline()
            .pipeline_name(name)
            .send()
            .await
            .map_err(|e| remote_error("DeletePipeline", e))?;

        Ok(output.pipeline_arn().map(str::to_string))
    }

    async fn list_pipelines(&self) -> Result<Vec<PipelineSummary>> {
        let output = self
            .client
            .list_pipelines()
            .send()
            .await
            .map_err(|e| remote_error("ListPipelines", e))?;

        Ok(output
            .pipeline_summaries()
            .iter()
            .map(|summary| PipelineSummary {
                pipeline_name: summary.pipeline_name().map(str::to_string),
                pipeline_arn: summary.pipeline_arn().map(str::to_string),
                role_arn: summary.role_arn().map(str::to_string),
                display_name: summary.pipeline_display_name().map(str::to_string),
            })
            .collect())
    }

    async fn list_pipeline_executions(&self, name: &str) -> Result<Vec<ExecutionSummary>> {
        let output = self
            .client
            .list_pipeline_executions()
            .pipeline_name(name)
            .send()
            .await
            .map_err(|e| remote_error("ListPipelineExecutions", e))?;

        Ok(output
            .pipeline_execution_summaries()
            .iter()
            .map(|summary| ExecutionSummary {
                execution_arn: summary.pipeline_execution_arn().map(str::to_string),
                display_name: summary
                    .pipeline_execution_display_name()
                    .map(str::to_string),
                status: summary
                    .pipeline_execution_status()
                    .map(|status| status.as_str().to_string()),
            })
            .collect())
    }

    async fn list_pipeline_parameters_for_execution(
        &self,
        execution_arn: &str,
    ) -> Result<Vec<PipelineParameter>> {
        let output = self
            .client
            .list_pipeline_parameters_for_execution()
            .pipeline_execution_arn(execution_arn)
            .send()
            .await
            .map_err(|e| remote_error("ListPipelineParametersForExecution", e))?;

        Ok(output
            .pipeline_parameters()
            .iter()
            .filter_map(from_sdk_parameter)
            .collect())
    }
}

fn to_sdk_parameter(parameter: &PipelineParameter) -> Parameter {
    Parameter::builder()
        .name(&parameter.name)
        .value(&parameter.value)
        .build()
}

/// Entries without a name are dropped; a missing value reads as empty.
fn from_sdk_parameter(parameter: &Parameter) -> Option<PipelineParameter> {
    let name = parameter.name().filter(|name| !name.is_empty())?;
    Some(PipelineParameter::new(
        name,
        parameter.value().unwrap_or_default(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_keeps_operation_and_message() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "connect timed out");
        let err = remote_error("ListPipelines", io);
        let msg = err.to_string();
        assert!(msg.contains("ListPipelines failed"));
        assert!(msg.contains("connect timed out"));
    }

    #[test]
    fn test_sdk_parameter_carries_name_and_value() {
        let parameter = to_sdk_parameter(&PipelineParameter::new("epochs", "10"));
        assert_eq!(parameter.name(), Some("epochs"));
        assert_eq!(parameter.value(), Some("10"));
    }

    #[test]
    fn test_listed_parameter_without_value_reads_as_empty() {
        let parameter = Parameter::builder().name("lr").build();
        assert_eq!(
            from_sdk_parameter(&parameter),
            Some(PipelineParameter::new("lr", ""))
        );
    }

    #[test]
    fn test_listed_parameter_without_name_is_skipped() {
        let parameter = Parameter::builder().value("orphan").build();
        assert_eq!(from_sdk_parameter(&parameter), None);

        let round_trip = from_sdk_parameter(&to_sdk_parameter(&PipelineParameter::new("k", "v")));
        assert_eq!(round_trip, Some(PipelineParameter::new("k", "v")));
    }
}
