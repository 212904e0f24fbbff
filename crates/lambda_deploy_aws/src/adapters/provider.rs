use lambda_deploy_core::contract::LayerVersion;

use crate::adapters::lookup::LookupError;

pub trait LayerVersionSource {
    /// Newest version of `layer_name`, as ordered by the provider.
    fn latest_layer_version(&self, layer_name: &str) -> Result<LayerVersion, LookupError>;
}

pub trait RoleSource {
    fn role_arn(&self, role_name: &str) -> Result<String, LookupError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSummary {
    pub function_name: String,
    pub function_arn: Option<String>,
}

pub trait FunctionSource {
    fn get_function(&self, function_name: &str) -> Result<FunctionSummary, LookupError>;
}
