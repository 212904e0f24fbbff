use std::fmt;

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::Credentials;
use clap::Args;
use lambda_deploy_core::contract::DEFAULT_REGION;

const CREDENTIALS_PROVIDER_NAME: &str = "lambda_deploy_cli";

/// Explicit key pair plus region. Without one, the default provider chain is used.
#[derive(Clone, PartialEq, Eq)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
}

impl AwsCredentials {
    /// Both keys must be present; anything less falls back to ambient credentials.
    pub fn from_flags(access: Option<&str>, secret: Option<&str>, region: &str) -> Option<Self> {
        let access = access.map(str::trim).filter(|value| !value.is_empty())?;
        let secret = secret.map(str::trim).filter(|value| !value.is_empty())?;
        let region = match region.trim() {
            "" => DEFAULT_REGION,
            value => value,
        };

        Some(Self {
            access_key_id: access.to_string(),
            secret_access_key: secret.to_string(),
            region: region.to_string(),
        })
    }
}

impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("region", &self.region)
            .finish()
    }
}

/// Credential flags shared by the binaries that accept explicit keys.
#[derive(Debug, Clone, Args)]
pub struct CredentialArgs {
    /// AWS access key ID
    #[arg(long)]
    pub access: Option<String>,
    /// AWS secret access key
    #[arg(long)]
    pub secret: Option<String>,
    /// AWS region, applied together with explicit keys
    #[arg(long, default_value = DEFAULT_REGION)]
    pub region: String,
}

impl CredentialArgs {
    pub fn credentials(&self) -> Option<AwsCredentials> {
        AwsCredentials::from_flags(self.access.as_deref(), self.secret.as_deref(), &self.region)
    }
}

pub async fn load_sdk_config(credentials: Option<&AwsCredentials>) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if let Some(credentials) = credentials {
        loader = loader
            .credentials_provider(Credentials::new(
                credentials.access_key_id.clone(),
                credentials.secret_access_key.clone(),
                None,
                None,
                CREDENTIALS_PROVIDER_NAME,
            ))
            .region(Region::new(credentials.region.clone()));
    }

    loader.load().await
}
