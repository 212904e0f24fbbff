use std::fs;
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use lambda_deploy_core::contract::{
    descriptor_fingerprint, normalize_request, DeploymentDescriptor, DescriptorRequest, Tags,
    ValidationError,
};
use lambda_deploy_core::descriptor::{assemble_descriptor, render_descriptor};
use lambda_deploy_core::tags::parse_tags;
use thiserror::Error;
use tracing::{error, info};

use crate::adapters::lookup::LookupError;
use crate::adapters::provider::{LayerVersionSource, RoleSource};
use crate::handlers::layer_version::resolve_latest_layer_version;
use crate::handlers::role_arn::resolve_role_arn;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid descriptor input: {0}")]
    Validation(#[from] ValidationError),
    #[error("could not resolve role '{role}': {source}")]
    RoleResolution {
        role: String,
        #[source]
        source: LookupError,
    },
    #[error("could not resolve layer '{layer}': {source}")]
    LayerResolution {
        layer: String,
        #[source]
        source: LookupError,
    },
    #[error("could not read tag file {path}: {source}")]
    TagFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid tag file {path}: {source}")]
    Tags {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
    #[error("failed to serialize descriptor: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("failed to write descriptor to {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub fn load_tags(path: &Path) -> Result<Tags, BuildError> {
    let text = fs::read_to_string(path).map_err(|source| BuildError::TagFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_tags(&text).map_err(|source| BuildError::Tags {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves the role, then every layer in order, and assembles the descriptor.
/// The first unresolved reference aborts the build.
pub fn build_descriptor(
    request: DescriptorRequest,
    roles: &dyn RoleSource,
    layers: &dyn LayerVersionSource,
) -> Result<DeploymentDescriptor, BuildError> {
    let normalized = normalize_request(request).inspect_err(|error| {
        error!(
            component = "descriptor_builder",
            event = "validation_failed",
            error = %error
        );
    })?;

    let role_arn = resolve_role_arn(roles, &normalized.role_name).map_err(|source| {
        error!(
            component = "descriptor_builder",
            event = "role_resolution_failed",
            role = %normalized.role_name,
            error = %source
        );
        BuildError::RoleResolution {
            role: normalized.role_name.clone(),
            source,
        }
    })?;

    let mut layer_arns = Vec::with_capacity(normalized.layer_names.len());
    for layer_name in &normalized.layer_names {
        let version = resolve_latest_layer_version(layers, layer_name).map_err(|source| {
            error!(
                component = "descriptor_builder",
                event = "layer_resolution_failed",
                layer = %layer_name,
                resolved_before_failure = layer_arns.len(),
                error = %source
            );
            BuildError::LayerResolution {
                layer: layer_name.clone(),
                source,
            }
        })?;
        layer_arns.push(version.arn);
    }

    info!(
        component = "descriptor_builder",
        event = "descriptor_assembled",
        function = %normalized.function_name,
        layers = layer_arns.len(),
        tags = normalized.tags.len()
    );
    Ok(assemble_descriptor(&normalized, role_arn, layer_arns))
}

/// Writes the compact document next to `path` and renames it into place.
/// A replaced file keeps its mode; a new one gets the umask default.
/// Returns the document fingerprint.
pub fn write_descriptor(
    descriptor: &DeploymentDescriptor,
    path: &Path,
) -> Result<String, BuildError> {
    let rendered = render_descriptor(descriptor)?;
    let fingerprint = descriptor_fingerprint(descriptor)?;
    let output_error = |source: std::io::Error| BuildError::Output {
        path: path.to_path_buf(),
        source,
    };

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut builder = tempfile::Builder::new();
    if let Some(permissions) = new_file_permissions() {
        builder.permissions(permissions);
    }
    let mut staged = builder.tempfile_in(directory).map_err(output_error)?;
    if let Ok(existing) = fs::metadata(path) {
        staged
            .as_file()
            .set_permissions(existing.permissions())
            .map_err(output_error)?;
    }
    staged.write_all(rendered.as_bytes()).map_err(output_error)?;
    staged.flush().map_err(output_error)?;
    staged
        .persist(path)
        .map_err(|error| output_error(error.error))?;

    info!(
        component = "descriptor_builder",
        event = "descriptor_written",
        path = %path.display(),
        bytes = rendered.len(),
        sha256 = %fingerprint
    );
    Ok(fingerprint)
}

// Same mode `fs::write` asks for; the process umask still applies.
#[cfg(unix)]
fn new_file_permissions() -> Option<fs::Permissions> {
    Some(fs::Permissions::from_mode(0o666))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<fs::Permissions> {
    None
}

#[cfg(test)]
mod tests {
    use crate::adapters::lookup::ResourceKind;

    use super::*;

    #[test]
    fn load_tags_reports_missing_file() {
        let directory = tempfile::tempdir().expect("tempdir should be created");
        let path = directory.path().join("missing.json");

        let error = load_tags(&path).expect_err("missing file should fail");
        assert!(matches!(error, BuildError::TagFile { .. }));
    }

    #[test]
    fn load_tags_rejects_non_string_values() {
        let directory = tempfile::tempdir().expect("tempdir should be created");
        let path = directory.path().join("tags.json");
        fs::write(&path, r#"{"team": ["data"]}"#).expect("tag file should be written");

        let error = load_tags(&path).expect_err("list value should fail");
        assert!(error.to_string().contains("Tag 'team' must have a string value"));
    }

    fn sample_descriptor() -> DeploymentDescriptor {
        DeploymentDescriptor {
            function_name: "f".to_string(),
            runtime: "python3.12".to_string(),
            role: "arn:aws:iam::123456789012:role/r".to_string(),
            handler: "app.handler".to_string(),
            description: "Lambda function: f".to_string(),
            timeout: 3,
            memory_size: 128,
            publish: false,
            vpc_config: Default::default(),
            layers: Vec::new(),
            tags: Tags::new(),
        }
    }

    #[test]
    fn write_descriptor_replaces_existing_file() {
        let directory = tempfile::tempdir().expect("tempdir should be created");
        let path = directory.path().join("deployment.json");
        fs::write(&path, "stale").expect("stale file should be written");

        write_descriptor(&sample_descriptor(), &path).expect("descriptor should be written");
        let written = fs::read_to_string(&path).expect("descriptor should be readable");
        assert!(written.starts_with("{\"FunctionName\":\"f\""));
        assert_eq!(
            fs::read_dir(directory.path())
                .expect("directory should be listed")
                .count(),
            1
        );
    }

    #[test]
    fn write_descriptor_returns_fingerprint_of_written_document() {
        let directory = tempfile::tempdir().expect("tempdir should be created");
        let path = directory.path().join("deployment.json");
        let descriptor = sample_descriptor();

        let fingerprint =
            write_descriptor(&descriptor, &path).expect("descriptor should be written");
        assert_eq!(fingerprint.len(), 64);
        assert_eq!(Some(fingerprint), descriptor_fingerprint(&descriptor).ok());
    }

    #[cfg(unix)]
    #[test]
    fn new_descriptor_gets_the_same_mode_as_a_plain_write() {
        let directory = tempfile::tempdir().expect("tempdir should be created");
        let path = directory.path().join("deployment.json");
        let plain = directory.path().join("plain.json");
        fs::write(&plain, "{}").expect("plain file should be written");

        write_descriptor(&sample_descriptor(), &path).expect("descriptor should be written");

        let mode = |path: &Path| {
            fs::metadata(path)
                .expect("file should exist")
                .permissions()
                .mode()
                & 0o777
        };
        assert_eq!(mode(&path), mode(&plain));
    }

    #[cfg(unix)]
    #[test]
    fn replaced_descriptor_keeps_existing_mode() {
        let directory = tempfile::tempdir().expect("tempdir should be created");
        let path = directory.path().join("deployment.json");
        fs::write(&path, "stale").expect("stale file should be written");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640))
            .expect("mode should be set");

        write_descriptor(&sample_descriptor(), &path).expect("descriptor should be written");

        let mode = fs::metadata(&path)
            .expect("descriptor should exist")
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[test]
    fn layer_failure_message_names_the_layer() {
        struct Roles;
        impl RoleSource for Roles {
            fn role_arn(&self, role_name: &str) -> Result<String, LookupError> {
                Ok(format!("arn:aws:iam::123456789012:role/{role_name}"))
            }
        }

        struct MissingLayers;
        impl LayerVersionSource for MissingLayers {
            fn latest_layer_version(
                &self,
                layer_name: &str,
            ) -> Result<lambda_deploy_core::contract::LayerVersion, LookupError> {
                Err(LookupError::not_found(ResourceKind::Layer, layer_name))
            }
        }

        let request = DescriptorRequest {
            function_name: "f".to_string(),
            runtime: "python3.12".to_string(),
            handler: "app.handler".to_string(),
            role_name: "r".to_string(),
            layer_names: vec!["requests".to_string()],
            ..Default::default()
        };

        let error = build_descriptor(request, &Roles, &MissingLayers)
            .expect_err("missing layer should abort");
        assert_eq!(
            error.to_string(),
            "could not resolve layer 'requests': layer 'requests' was not found"
        );
    }
}
