use lambda_deploy_core::contract::{LayerVersion, ValidationError};
use tracing::{info, warn};

use crate::adapters::lookup::LookupError;
use crate::adapters::provider::LayerVersionSource;

pub const LAYER_VERSION_SENTINEL: i64 = -1;

pub fn resolve_latest_layer_version(
    source: &dyn LayerVersionSource,
    layer_name: &str,
) -> Result<LayerVersion, LookupError> {
    let layer_name = layer_name.trim();
    if layer_name.is_empty() {
        return Err(ValidationError::new("Layer name not present").into());
    }

    info!(
        component = "layer_resolver",
        event = "layer_lookup_started",
        layer = layer_name,
        "Getting the layer ARN"
    );
    let version = source.latest_layer_version(layer_name)?;
    info!(
        component = "layer_resolver",
        event = "layer_resolved",
        layer = layer_name,
        version = version.version,
        arn = %version.arn
    );
    Ok(version)
}

/// Version number, or `-1` when the layer cannot be resolved.
pub fn latest_version_or_sentinel(source: &dyn LayerVersionSource, layer_name: &str) -> i64 {
    match resolve_latest_layer_version(source, layer_name) {
        Ok(version) => version.version,
        Err(error) => {
            log_lookup_failure(layer_name, &error);
            LAYER_VERSION_SENTINEL
        }
    }
}

/// Version ARN, or an empty string when the layer cannot be resolved.
pub fn latest_arn_or_empty(source: &dyn LayerVersionSource, layer_name: &str) -> String {
    match resolve_latest_layer_version(source, layer_name) {
        Ok(version) => version.arn,
        Err(error) => {
            log_lookup_failure(layer_name, &error);
            String::new()
        }
    }
}

/// Text printed by `get_layer_latest_version`: the version number or ARN on
/// success, `-1` on any failure.
pub fn render_layer_lookup(
    source: &dyn LayerVersionSource,
    layer_name: &str,
    as_arn: bool,
) -> String {
    if !as_arn {
        return latest_version_or_sentinel(source, layer_name).to_string();
    }
    match latest_arn_or_empty(source, layer_name) {
        arn if arn.is_empty() => LAYER_VERSION_SENTINEL.to_string(),
        arn => arn,
    }
}

fn log_lookup_failure(layer_name: &str, error: &LookupError) {
    warn!(
        component = "layer_resolver",
        event = "layer_lookup_failed",
        layer = layer_name,
        not_found = error.is_not_found(),
        error = %error,
        "There was an error getting the layer version"
    );
}

#[cfg(test)]
mod tests {
    use crate::adapters::lookup::ResourceKind;

    use super::*;

    struct SingleLayer;

    impl LayerVersionSource for SingleLayer {
        fn latest_layer_version(&self, layer_name: &str) -> Result<LayerVersion, LookupError> {
            if layer_name == "requests" {
                Ok(LayerVersion {
                    version: 13,
                    arn: "arn:aws:lambda:us-east-2:157648923453:layer:requests:13".to_string(),
                })
            } else {
                Err(LookupError::not_found(ResourceKind::Layer, layer_name))
            }
        }
    }

    #[test]
    fn known_layer_resolves_both_forms() {
        assert_eq!(latest_version_or_sentinel(&SingleLayer, "requests"), 13);
        assert_eq!(
            latest_arn_or_empty(&SingleLayer, "requests"),
            "arn:aws:lambda:us-east-2:157648923453:layer:requests:13"
        );
    }

    #[test]
    fn unknown_layer_yields_sentinels() {
        assert_eq!(latest_version_or_sentinel(&SingleLayer, "incorrectLayer"), -1);
        assert_eq!(latest_arn_or_empty(&SingleLayer, "incorrectLayer"), "");
        assert_eq!(render_layer_lookup(&SingleLayer, "incorrectLayer", true), "-1");
    }

    #[test]
    fn blank_layer_name_is_a_validation_error() {
        let error = resolve_latest_layer_version(&SingleLayer, "  ").expect_err("should fail");
        assert!(matches!(error, LookupError::Validation(_)));
    }
}
