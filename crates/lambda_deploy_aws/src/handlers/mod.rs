pub mod descriptor;
pub mod function_exists;
pub mod layer_version;
pub mod role_arn;
