use std::future::Future;

use aws_config::SdkConfig;
use aws_sdk_iam::operation::get_role::GetRoleError;
use aws_sdk_lambda::error::{DisplayErrorContext, SdkError};
use aws_sdk_lambda::operation::get_function::GetFunctionError;
use aws_sdk_lambda::operation::list_layer_versions::ListLayerVersionsError;
use lambda_deploy_core::contract::LayerVersion;

use crate::adapters::lookup::{LookupError, ResourceKind};
use crate::adapters::provider::{FunctionSource, FunctionSummary, LayerVersionSource, RoleSource};
use crate::config::{load_sdk_config, AwsCredentials};

/// Lambda and IAM clients built once per run and shared by every lookup.
#[derive(Debug, Clone)]
pub struct AwsProvider {
    lambda_client: aws_sdk_lambda::Client,
    iam_client: aws_sdk_iam::Client,
}

impl AwsProvider {
    pub fn from_config(config: &SdkConfig) -> Self {
        Self {
            lambda_client: aws_sdk_lambda::Client::new(config),
            iam_client: aws_sdk_iam::Client::new(config),
        }
    }

    pub async fn load(credentials: Option<&AwsCredentials>) -> Self {
        let config = load_sdk_config(credentials).await;
        Self::from_config(&config)
    }
}

// Requires a multi-thread runtime; the binaries run under `#[tokio::main]`.
fn block_on<F: Future>(future: F) -> F::Output {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

impl LayerVersionSource for AwsProvider {
    fn latest_layer_version(&self, layer_name: &str) -> Result<LayerVersion, LookupError> {
        let output = block_on(
            self.lambda_client
                .list_layer_versions()
                .layer_name(layer_name)
                .max_items(1)
                .send(),
        )
        .map_err(|error| list_layer_versions_failure(layer_name, error))?;

        let Some(entry) = output.layer_versions().first() else {
            return Err(LookupError::not_found(ResourceKind::Layer, layer_name));
        };

        let arn = entry
            .layer_version_arn()
            .filter(|arn| !arn.is_empty())
            .ok_or_else(|| {
                LookupError::provider(
                    ResourceKind::Layer,
                    layer_name,
                    "listing entry has no LayerVersionArn",
                )
            })?;

        Ok(LayerVersion {
            version: entry.version(),
            arn: arn.to_string(),
        })
    }
}

impl RoleSource for AwsProvider {
    fn role_arn(&self, role_name: &str) -> Result<String, LookupError> {
        let output = block_on(self.iam_client.get_role().role_name(role_name).send())
            .map_err(|error| get_role_failure(role_name, error))?;

        let Some(role) = output.role() else {
            return Err(LookupError::provider(
                ResourceKind::Role,
                role_name,
                "Role was not in the response",
            ));
        };

        if role.arn().is_empty() {
            return Err(LookupError::provider(
                ResourceKind::Role,
                role_name,
                "role payload has an empty Arn",
            ));
        }

        Ok(role.arn().to_string())
    }
}

impl FunctionSource for AwsProvider {
    fn get_function(&self, function_name: &str) -> Result<FunctionSummary, LookupError> {
        let output = block_on(
            self.lambda_client
                .get_function()
                .function_name(function_name)
                .send(),
        )
        .map_err(|error| get_function_failure(function_name, error))?;

        let configuration = output.configuration().ok_or_else(|| {
            LookupError::provider(
                ResourceKind::Function,
                function_name,
                "response has no Configuration",
            )
        })?;

        Ok(FunctionSummary {
            function_name: configuration
                .function_name()
                .unwrap_or_default()
                .to_string(),
            function_arn: configuration.function_arn().map(str::to_string),
        })
    }
}

fn list_layer_versions_failure(
    layer_name: &str,
    error: SdkError<ListLayerVersionsError>,
) -> LookupError {
    if error
        .as_service_error()
        .is_some_and(ListLayerVersionsError::is_resource_not_found_exception)
    {
        return LookupError::not_found(ResourceKind::Layer, layer_name);
    }
    LookupError::provider(
        ResourceKind::Layer,
        layer_name,
        DisplayErrorContext(&error).to_string(),
    )
}

fn get_function_failure(function_name: &str, error: SdkError<GetFunctionError>) -> LookupError {
    if error
        .as_service_error()
        .is_some_and(GetFunctionError::is_resource_not_found_exception)
    {
        return LookupError::not_found(ResourceKind::Function, function_name);
    }
    LookupError::provider(
        ResourceKind::Function,
        function_name,
        DisplayErrorContext(&error).to_string(),
    )
}

fn get_role_failure(
    role_name: &str,
    error: aws_sdk_iam::error::SdkError<GetRoleError>,
) -> LookupError {
    if error
        .as_service_error()
        .is_some_and(GetRoleError::is_no_such_entity_exception)
    {
        return LookupError::not_found(ResourceKind::Role, role_name);
    }
    LookupError::provider(
        ResourceKind::Role,
        role_name,
        aws_sdk_iam::error::DisplayErrorContext(&error).to_string(),
    )
}
