#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use lambda_deploy_aws::adapters::lookup::{LookupError, ResourceKind};
use lambda_deploy_aws::adapters::provider::{
    FunctionSource, FunctionSummary, LayerVersionSource, RoleSource,
};
use lambda_deploy_core::contract::{DescriptorRequest, LayerVersion, Tags};
use lambda_deploy_core::naming::function_name_from_identifier;

pub const ACCOUNT_ID: &str = "157648923453";
pub const ROLE_NAME: &str = "Data_Lambda_Full_Access";
pub const ROLE_ARN: &str = "arn:aws:iam::157648923453:role/Data_Lambda_Full_Access";
pub const REQUESTS_ARN: &str = "arn:aws:lambda:us-east-2:157648923453:layer:requests:13";
pub const JSONSCHEMA_ARN: &str = "arn:aws:lambda:us-east-2:157648923453:layer:jsonschema:3";

/// In-memory stand-in for Lambda and IAM that records every call.
#[derive(Default)]
pub struct FakeProvider {
    layers: HashMap<String, LayerVersion>,
    roles: HashMap<String, String>,
    functions: HashMap<String, String>,
    reject_credentials: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    /// Account seeded with the `requests` and `jsonschema` layers, one role and
    /// one function.
    pub fn seeded() -> Self {
        Self::default()
            .with_layer("requests", 13, REQUESTS_ARN)
            .with_layer("jsonschema", 3, JSONSCHEMA_ARN)
            .with_role(ROLE_NAME, ROLE_ARN)
            .with_function("data_domotz_api")
    }

    pub fn with_layer(mut self, name: &str, version: i64, arn: &str) -> Self {
        self.layers.insert(
            name.to_string(),
            LayerVersion {
                version,
                arn: arn.to_string(),
            },
        );
        self
    }

    pub fn with_role(mut self, name: &str, arn: &str) -> Self {
        self.roles.insert(name.to_string(), arn.to_string());
        self
    }

    pub fn with_function(mut self, name: &str) -> Self {
        self.functions.insert(
            name.to_string(),
            format!("arn:aws:lambda:us-east-2:{ACCOUNT_ID}:function:{name}"),
        );
        self
    }

    /// Every call fails the way an invalid key pair does.
    pub fn with_rejected_credentials(mut self) -> Self {
        self.reject_credentials = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("poisoned mutex").clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("poisoned mutex").push(call);
    }

    fn credential_failure(&self, resource: ResourceKind, name: &str) -> Option<LookupError> {
        self.reject_credentials.then(|| {
            LookupError::provider(
                resource,
                name,
                "UnrecognizedClientException: The security token included in the request is invalid",
            )
        })
    }
}

impl LayerVersionSource for FakeProvider {
    fn latest_layer_version(&self, layer_name: &str) -> Result<LayerVersion, LookupError> {
        self.record(format!("list_layer_versions:{layer_name}"));
        if let Some(error) = self.credential_failure(ResourceKind::Layer, layer_name) {
            return Err(error);
        }
        self.layers
            .get(layer_name)
            .cloned()
            .ok_or_else(|| LookupError::not_found(ResourceKind::Layer, layer_name))
    }
}

impl RoleSource for FakeProvider {
    fn role_arn(&self, role_name: &str) -> Result<String, LookupError> {
        self.record(format!("get_role:{role_name}"));
        if let Some(error) = self.credential_failure(ResourceKind::Role, role_name) {
            return Err(error);
        }
        self.roles
            .get(role_name)
            .cloned()
            .ok_or_else(|| LookupError::not_found(ResourceKind::Role, role_name))
    }
}

impl FunctionSource for FakeProvider {
    fn get_function(&self, function_name: &str) -> Result<FunctionSummary, LookupError> {
        self.record(format!("get_function:{function_name}"));
        if let Some(error) = self.credential_failure(ResourceKind::Function, function_name) {
            return Err(error);
        }
        // Lambda accepts names and ARNs but always reports the bare name.
        let name = function_name_from_identifier(function_name);
        self.functions
            .get(name)
            .map(|arn| FunctionSummary {
                function_name: name.to_string(),
                function_arn: Some(arn.clone()),
            })
            .ok_or_else(|| LookupError::not_found(ResourceKind::Function, function_name))
    }
}

pub fn request_with_layers(layers: &[&str]) -> DescriptorRequest {
    DescriptorRequest {
        function_name: "testFunc".to_string(),
        runtime: "python3.7".to_string(),
        handler: "modulename.function_handler".to_string(),
        description: None,
        timeout: None,
        memory_size: None,
        publish: false,
        role_name: ROLE_NAME.to_string(),
        layer_names: layers.iter().map(|layer| layer.to_string()).collect(),
        tags: Tags::new(),
        vpc_subnet_ids: Vec::new(),
        vpc_security_group_ids: Vec::new(),
    }
}
