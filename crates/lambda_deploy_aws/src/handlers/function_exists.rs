use lambda_deploy_core::naming::function_name_matches;
use tracing::{error, info};

use crate::adapters::provider::FunctionSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionExistence {
    Found,
    NotFound,
    Error { reason: String },
}

impl FunctionExistence {
    /// Code printed by `check_lambda_function_exists`.
    pub fn code(&self) -> i8 {
        match self {
            Self::Found => 1,
            Self::NotFound => 0,
            Self::Error { .. } => -1,
        }
    }
}

pub fn check_function_exists(
    source: &dyn FunctionSource,
    function_name: &str,
) -> FunctionExistence {
    let function_name = function_name.trim();
    if function_name.is_empty() {
        return report_error("function name cannot be empty".to_string());
    }

    match source.get_function(function_name) {
        Ok(summary) if function_name_matches(function_name, &summary.function_name) => {
            info!(
                component = "function_checker",
                event = "function_found",
                function = function_name,
                arn = summary.function_arn.as_deref().unwrap_or_default(),
                "Found the function"
            );
            FunctionExistence::Found
        }
        Ok(summary) => {
            info!(
                component = "function_checker",
                event = "function_name_mismatch",
                function = function_name,
                returned = %summary.function_name,
                "Could not find the function"
            );
            FunctionExistence::NotFound
        }
        Err(error) if error.is_not_found() => {
            info!(
                component = "function_checker",
                event = "function_not_found",
                function = function_name,
                "Could not find the function"
            );
            FunctionExistence::NotFound
        }
        Err(error) => report_error(error.to_string()),
    }
}

fn report_error(reason: String) -> FunctionExistence {
    error!(
        component = "function_checker",
        event = "function_lookup_failed",
        reason = %reason,
        "There was an exception"
    );
    FunctionExistence::Error { reason }
}
