use clap::Parser;
use lambda_deploy_aws::adapters::aws::AwsProvider;
use lambda_deploy_aws::config::CredentialArgs;
use lambda_deploy_aws::handlers::function_exists::check_function_exists;
use lambda_deploy_aws::logging::init_tracing;

/// Check whether a Lambda function exists. Prints 1 (exists), 0 (does not
/// exist) or -1 (the lookup failed).
#[derive(Debug, Parser)]
#[command(name = "check_lambda_function_exists")]
struct Cli {
    /// Name of the function to check
    #[arg(long)]
    function: String,
    #[command(flatten)]
    credentials: CredentialArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing().map_err(|error| anyhow::anyhow!(error))?;

    let provider = AwsProvider::load(cli.credentials.credentials().as_ref()).await;
    println!("{}", check_function_exists(&provider, &cli.function).code());
    Ok(())
}
