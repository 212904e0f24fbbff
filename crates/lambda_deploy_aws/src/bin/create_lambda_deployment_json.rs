use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use lambda_deploy_aws::adapters::aws::AwsProvider;
use lambda_deploy_aws::config::CredentialArgs;
use lambda_deploy_aws::handlers::descriptor::{build_descriptor, load_tags, write_descriptor};
use lambda_deploy_aws::handlers::function_exists::{check_function_exists, FunctionExistence};
use lambda_deploy_aws::logging::init_tracing;
use lambda_deploy_core::contract::{
    DescriptorRequest, Tags, DEFAULT_MEMORY_SIZE_MB, DEFAULT_TIMEOUT_SECONDS,
};
use lambda_deploy_core::descriptor::render_descriptor_pretty;
use tracing::{info, warn};

/// Create the JSON document taken by `aws lambda create-function --cli-input-json`,
/// resolving the role ARN and the latest version of every layer.
#[derive(Debug, Parser)]
#[command(name = "create_lambda_deployment_json")]
struct Cli {
    /// The name of the Lambda function
    #[arg(long)]
    function: String,
    /// The handler within the function that executes, as <module_name>.<handler>
    #[arg(long)]
    handler: String,
    /// The runtime for the function, e.g. python3.12
    #[arg(long)]
    runtime: String,
    /// The name of the IAM role the function assumes
    #[arg(long)]
    role: String,
    /// The description for the function
    #[arg(long)]
    description: Option<String>,
    /// The timeout value in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    timeout: u32,
    /// The memory size for the function in MB
    #[arg(long, default_value_t = DEFAULT_MEMORY_SIZE_MB)]
    memory: u32,
    /// Publish a new version
    #[arg(long)]
    publish: bool,
    /// Layer name(s), resolved to their latest version in the order given
    #[arg(long, num_args = 1.., required = true)]
    layers: Vec<String>,
    /// VPC subnets to associate with the function
    #[arg(long, num_args = 1..)]
    vpc_subnets: Vec<String>,
    /// VPC security groups to associate with the function
    #[arg(long, num_args = 1..)]
    vpc_security_groups: Vec<String>,
    /// JSON file with tags
    #[arg(long)]
    tags: Option<PathBuf>,
    #[command(flatten)]
    credentials: CredentialArgs,
    /// Where to write the descriptor
    #[arg(long)]
    output: PathBuf,
}

impl Cli {
    fn descriptor_request(&self, tags: Tags) -> DescriptorRequest {
        DescriptorRequest {
            function_name: self.function.clone(),
            runtime: self.runtime.clone(),
            handler: self.handler.clone(),
            description: self.description.clone(),
            timeout: Some(self.timeout),
            memory_size: Some(self.memory),
            publish: self.publish,
            role_name: self.role.clone(),
            layer_names: self.layers.clone(),
            tags,
            vpc_subnet_ids: self.vpc_subnets.clone(),
            vpc_security_group_ids: self.vpc_security_groups.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing().map_err(|error| anyhow::anyhow!(error))?;

    let tags = match &cli.tags {
        Some(path) => load_tags(path)?,
        None => Tags::new(),
    };

    let provider = AwsProvider::load(cli.credentials.credentials().as_ref()).await;
    let descriptor = build_descriptor(cli.descriptor_request(tags), &provider, &provider)?;

    let pretty = render_descriptor_pretty(&descriptor).context("failed to render descriptor")?;
    println!("{pretty}");
    write_descriptor(&descriptor, &cli.output)?;

    match check_function_exists(&provider, &descriptor.function_name) {
        FunctionExistence::Found => info!(
            component = "descriptor_cli",
            event = "target_exists",
            function = %descriptor.function_name,
            "Function already exists; apply with update-function-configuration"
        ),
        FunctionExistence::NotFound => info!(
            component = "descriptor_cli",
            event = "target_missing",
            function = %descriptor.function_name,
            "Function does not exist yet; apply with create-function"
        ),
        FunctionExistence::Error { reason } => warn!(
            component = "descriptor_cli",
            event = "target_check_failed",
            function = %descriptor.function_name,
            reason = %reason
        ),
    }

    Ok(())
}
