//! Project configuration loader for resource accessor generation.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::assembler::RenderOptions;

/// File name searched for next to the crate manifest.
pub const DEFAULT_CONFIG_FILE: &str = "resources.config.json";

/// Discoverable configuration describing where resources live and how accessors are named.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Root namespace stripped from resource names and used for the enclosing modules.
    pub root_namespace: String,
    /// Relative path from the manifest directory to the bundled resources.
    pub resources_dir: String,
    /// Regular expressions matched against `/` separated relative paths to skip during discovery.
    pub exclude_patterns: Vec<String>,
    /// Name of the struct holding the accessor functions.
    pub container_name: String,
    /// Name of the flat identifier enum.
    pub enum_name: String,
    /// Path of the loader function the generated code resolves bytes through.
    pub loader_path: String,
    /// File name of the generated Rust source.
    pub output_file: String,
    /// File name of the JSON correspondence manifest.
    pub manifest_file: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let options = RenderOptions::default();
        Self {
            root_namespace: String::new(),
            resources_dir: "resources".into(),
            exclude_patterns: vec![r"(^|/)\.".into(), r"~$".into()],
            container_name: options.container_name,
            enum_name: options.enum_name,
            loader_path: options.loader_path,
            output_file: "resources.rs".into(),
            manifest_file: "resources.json".into(),
        }
    }
}

impl GeneratorConfig {
    /// Attempt to load configuration from the provided directory.
    ///
    /// When the configuration file does not exist or fails to parse we fall back to default
    /// values so downstream callers can continue operating with sensible assumptions.
    pub fn discover(manifest_dir: &Path) -> Self {
        let candidate = manifest_dir.join(DEFAULT_CONFIG_FILE);
        Self::from_path(&candidate).unwrap_or_default()
    }

    /// Read configuration from a specific JSON file.
    pub fn from_path(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        match serde_json::from_str(&content) {
            Ok(config) => Some(config),
            Err(err) => {
                tracing::warn!("ignoring invalid config {}: {}", path.display(), err);
                None
            }
        }
    }

    /// Naming options handed to the source assembler.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            container_name: self.container_name.clone(),
            enum_name: self.enum_name.clone(),
            loader_path: self.loader_path.clone(),
        }
    }

    /// Absolute path of the resources directory.
    pub fn resources_dir_path(&self, manifest_dir: &Path) -> PathBuf {
        manifest_dir.join(&self.resources_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn falls_back_to_defaults_without_a_file() {
        let dir = tempdir().unwrap();
        assert_eq!(GeneratorConfig::discover(dir.path()), GeneratorConfig::default());
    }

    #[test]
    fn falls_back_to_defaults_for_invalid_json() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "{ not json").unwrap();
        assert_eq!(GeneratorConfig::discover(dir.path()), GeneratorConfig::default());
    }

    #[test]
    fn partial_files_keep_remaining_defaults() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            r#"{"rootNamespace": "MyApp", "enumName": "Asset", "resourcesDir": "assets"}"#,
        )
        .unwrap();

        let config = GeneratorConfig::discover(dir.path());
        assert_eq!(config.root_namespace, "MyApp");
        assert_eq!(config.enum_name, "Asset");
        assert_eq!(config.container_name, "Resources");
        assert_eq!(config.resources_dir_path(dir.path()), dir.path().join("assets"));

        let options = config.render_options();
        assert_eq!(options.enum_name, "Asset");
        assert_eq!(options.loader_path, "crate::load_resource");
    }
}
