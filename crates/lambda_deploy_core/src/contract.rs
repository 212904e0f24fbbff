use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

pub const DEFAULT_TIMEOUT_SECONDS: u32 = 3;
pub const DEFAULT_MEMORY_SIZE_MB: u32 = 128;
pub const DEFAULT_REGION: &str = "us-east-2";

pub type Tags = BTreeMap<String, String>;

/// Unresolved input of a descriptor build, as collected from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptorRequest {
    pub function_name: String,
    pub runtime: String,
    pub handler: String,
    pub description: Option<String>,
    pub timeout: Option<u32>,
    pub memory_size: Option<u32>,
    pub publish: bool,
    pub role_name: String,
    pub layer_names: Vec<String>,
    pub tags: Tags,
    pub vpc_subnet_ids: Vec<String>,
    pub vpc_security_group_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDescriptorRequest {
    pub function_name: String,
    pub runtime: String,
    pub handler: String,
    pub description: String,
    pub timeout: u32,
    pub memory_size: u32,
    pub publish: bool,
    pub role_name: String,
    pub layer_names: Vec<String>,
    pub tags: Tags,
    pub vpc_subnet_ids: Vec<String>,
    pub vpc_security_group_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LayerVersion {
    pub version: i64,
    pub arn: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct VpcConfig {
    pub subnet_ids: Vec<String>,
    pub security_group_ids: Vec<String>,
}

/// Input document for `aws lambda create-function --cli-input-json`.
///
/// Field order is the serialized key order. `Layers` and `Tags` are left out
/// of the document when empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct DeploymentDescriptor {
    pub function_name: String,
    pub runtime: String,
    pub role: String,
    pub handler: String,
    pub description: String,
    pub timeout: u32,
    pub memory_size: u32,
    pub publish: bool,
    pub vpc_config: VpcConfig,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub layers: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: Tags,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn default_description(function_name: &str) -> String {
    format!("Lambda function: {function_name}")
}

pub fn normalize_request(
    payload: DescriptorRequest,
) -> Result<NormalizedDescriptorRequest, ValidationError> {
    let function_name = required_field("function_name", &payload.function_name)?;
    let runtime = required_field("runtime", &payload.runtime)?;
    let handler = required_field("handler", &payload.handler)?;
    let role_name = required_field("role_name", &payload.role_name)?;

    let description = match payload.description.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => default_description(&function_name),
    };

    let timeout = payload.timeout.unwrap_or(DEFAULT_TIMEOUT_SECONDS);
    if timeout == 0 {
        return Err(ValidationError::new("timeout must be a positive integer"));
    }

    let memory_size = payload.memory_size.unwrap_or(DEFAULT_MEMORY_SIZE_MB);
    if memory_size == 0 {
        return Err(ValidationError::new(
            "memory_size must be a positive integer",
        ));
    }

    let mut layer_names = Vec::with_capacity(payload.layer_names.len());
    for (position, name) in payload.layer_names.iter().enumerate() {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::new(format!(
                "layer name at position {position} cannot be empty"
            )));
        }
        layer_names.push(trimmed.to_string());
    }

    for key in payload.tags.keys() {
        if key.trim().is_empty() {
            return Err(ValidationError::new("tag keys must be non-empty strings"));
        }
    }

    Ok(NormalizedDescriptorRequest {
        function_name,
        runtime,
        handler,
        description,
        timeout,
        memory_size,
        publish: payload.publish,
        role_name,
        layer_names,
        tags: payload.tags,
        vpc_subnet_ids: non_blank(payload.vpc_subnet_ids),
        vpc_security_group_ids: non_blank(payload.vpc_security_group_ids),
    })
}

fn required_field(name: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(format!("{name} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

fn non_blank(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

pub fn descriptor_fingerprint(descriptor: &DeploymentDescriptor) -> serde_json::Result<String> {
    let mut hasher = Sha256::new();
    hasher.update(stable_contract_json(descriptor)?);
    Ok(format!("{:x}", hasher.finalize()))
}

pub fn stable_contract_json(value: impl Serialize) -> serde_json::Result<String> {
    serde_json::to_string(&value)
}
