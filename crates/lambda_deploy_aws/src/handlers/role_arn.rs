use lambda_deploy_core::contract::ValidationError;
use tracing::{info, warn};

use crate::adapters::lookup::LookupError;
use crate::adapters::provider::RoleSource;

pub fn resolve_role_arn(source: &dyn RoleSource, role_name: &str) -> Result<String, LookupError> {
    let role_name = role_name.trim();
    if role_name.is_empty() {
        return Err(ValidationError::new("Role name not defined").into());
    }

    info!(
        component = "role_resolver",
        event = "role_lookup_started",
        role = role_name,
        "Getting the role"
    );
    let arn = source.role_arn(role_name)?;
    info!(
        component = "role_resolver",
        event = "role_resolved",
        role = role_name,
        arn = %arn
    );
    Ok(arn)
}

/// Role ARN, or an empty string when it cannot be resolved. The cause is only logged.
pub fn role_arn_or_empty(source: &dyn RoleSource, role_name: Option<&str>) -> String {
    match resolve_role_arn(source, role_name.unwrap_or_default()) {
        Ok(arn) => arn,
        Err(error) => {
            warn!(
                component = "role_resolver",
                event = "role_lookup_failed",
                role = role_name.unwrap_or_default(),
                error = %error,
                "There was an error in getting the ARN"
            );
            String::new()
        }
    }
}
