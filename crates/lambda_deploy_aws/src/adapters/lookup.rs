use std::fmt;

use lambda_deploy_core::contract::ValidationError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Layer,
    Role,
    Function,
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Layer => "layer",
            Self::Role => "IAM role",
            Self::Function => "function",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single failed provider lookup.
///
/// `NotFound` is the only variant a caller may treat as an answer; the others
/// mean the question could not be asked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("{resource} '{name}' was not found")]
    NotFound { resource: ResourceKind, name: String },
    #[error("{resource} '{name}' lookup failed: {message}")]
    Provider {
        resource: ResourceKind,
        name: String,
        message: String,
    },
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl LookupError {
    pub fn not_found(resource: ResourceKind, name: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            name: name.into(),
        }
    }

    pub fn provider(
        resource: ResourceKind,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Provider {
            resource,
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
