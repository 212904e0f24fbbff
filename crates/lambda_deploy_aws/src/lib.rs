//! AWS-backed lookups and command-line handlers for Lambda deployment tooling.
//!
//! This crate owns SDK integration (Lambda and IAM clients behind narrow
//! provider traits), credential loading, logging setup, and the handlers
//! behind the `get_layer_latest_version`, `check_lambda_function_exists` and
//! `create_lambda_deployment_json` binaries. Descriptor contracts live in
//! `lambda_deploy_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod logging;
