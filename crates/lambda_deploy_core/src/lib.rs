//! Lambda deployment descriptor domain primitives.
//!
//! This crate owns request validation, descriptor assembly and the JSON
//! contract written for `create-function`. It intentionally excludes AWS SDK
//! concerns; lookups against Lambda and IAM live in `lambda_deploy_aws`.

pub mod contract;
pub mod descriptor;
pub mod naming;
pub mod tags;
