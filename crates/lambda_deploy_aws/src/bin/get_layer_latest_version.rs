use clap::Parser;
use lambda_deploy_aws::adapters::aws::AwsProvider;
use lambda_deploy_aws::handlers::layer_version::render_layer_lookup;
use lambda_deploy_aws::logging::init_tracing;

/// Get the latest version number for a lambda layer, using the default AWS
/// credential chain.
#[derive(Debug, Parser)]
#[command(name = "get_layer_latest_version")]
struct Cli {
    /// Layer name
    #[arg(long)]
    layer: String,
    /// Return the full ARN
    #[arg(long)]
    arn: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing().map_err(|error| anyhow::anyhow!(error))?;

    let provider = AwsProvider::load(None).await;
    println!("{}", render_layer_lookup(&provider, &cli.layer, cli.arn));
    Ok(())
}
