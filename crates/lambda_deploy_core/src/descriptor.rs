use crate::contract::{DeploymentDescriptor, NormalizedDescriptorRequest, VpcConfig};

pub fn assemble_descriptor(
    request: &NormalizedDescriptorRequest,
    role_arn: impl Into<String>,
    layer_arns: Vec<String>,
) -> DeploymentDescriptor {
    DeploymentDescriptor {
        function_name: request.function_name.clone(),
        runtime: request.runtime.clone(),
        role: role_arn.into(),
        handler: request.handler.clone(),
        description: request.description.clone(),
        timeout: request.timeout,
        memory_size: request.memory_size,
        publish: request.publish,
        vpc_config: VpcConfig {
            subnet_ids: request.vpc_subnet_ids.clone(),
            security_group_ids: request.vpc_security_group_ids.clone(),
        },
        layers: layer_arns,
        tags: request.tags.clone(),
    }
}

/// Compact form, written to the output file.
pub fn render_descriptor(descriptor: &DeploymentDescriptor) -> serde_json::Result<String> {
    serde_json::to_string(descriptor)
}

/// Indented form, printed before the file is written.
pub fn render_descriptor_pretty(descriptor: &DeploymentDescriptor) -> serde_json::Result<String> {
    serde_json::to_string_pretty(descriptor)
}
