//! Data structures produced while generating resource accessors.

use serde::{Deserialize, Serialize};

use crate::sanitize::sanitize;

/// The external facts driving one generation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct GenerationInput {
  /// Exact lookup keys of the bundled resources. Order is preserved and duplicates are kept.
  pub resource_names: Vec<String>,
  /// Project root namespace, possibly empty.
  pub root_namespace: String,
  /// Known `/` separated paths, parallel to `resource_names`.
  ///
  /// Missing or `None` entries fall back to deriving the path from the dotted name.
  pub logical_paths: Vec<Option<String>>,
}

impl GenerationInput {
  /// Build an input from any collection of names.
  pub fn new<I, S>(resource_names: I, root_namespace: impl Into<String>) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      resource_names: resource_names.into_iter().map(Into::into).collect(),
      root_namespace: root_namespace.into(),
      logical_paths: Vec::new(),
    }
  }

  /// Append a name whose path form is unknown.
  pub fn push_name(&mut self, resource_name: impl Into<String>) {
    self.resource_names.push(resource_name.into());
    self.logical_paths.resize(self.resource_names.len(), None);
  }

  /// Append a name together with its real relative path.
  pub fn push_with_path(&mut self, resource_name: impl Into<String>, logical_path: &str) {
    self.push_name(resource_name);
    if let Some(slot) = self.logical_paths.last_mut() {
      *slot = Some(logical_path.replace('\\', "/"));
    }
  }

  /// Resource items for every name, in input order.
  pub fn items(&self) -> Vec<ResourceItem> {
    self
      .resource_names
      .iter()
      .enumerate()
      .map(|(index, name)| match self.logical_paths.get(index) {
        Some(Some(path)) => ResourceItem::with_logical_path(name, path, &self.root_namespace),
        _ => ResourceItem::new(name, &self.root_namespace),
      })
      .collect()
  }
}

/// One bundled resource together with the identifier generated for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceItem {
  logical_path: String,
  identifier: String,
  resource_name: String,
}

impl ResourceItem {
  /// Derive the item for a raw resource name, guessing its path from the name.
  pub fn new(resource_name: &str, root_namespace: &str) -> Self {
    Self::with_logical_path(
      resource_name,
      &logical_path(resource_name, root_namespace),
      root_namespace,
    )
  }

  /// Build the item for a resource whose `/` separated path is already known.
  pub fn with_logical_path(resource_name: &str, logical_path: &str, root_namespace: &str) -> Self {
    Self {
      logical_path: logical_path.to_string(),
      identifier: sanitize(resource_name, root_namespace),
      resource_name: resource_name.to_string(),
    }
  }

  /// Path-shaped name used for grouping, always separated by `/`.
  pub fn logical_path(&self) -> &str {
    &self.logical_path
  }

  /// Identifier used in the flat accessor surface.
  pub fn identifier(&self) -> &str {
    &self.identifier
  }

  /// Key handed to the resource loader at run time.
  pub fn resource_name(&self) -> &str {
    &self.resource_name
  }

  /// Final segment of the logical path.
  pub fn file_name(&self) -> &str {
    self
      .logical_path
      .rsplit_once('/')
      .map_or(self.logical_path.as_str(), |(_, name)| name)
  }

  /// Identifier used inside the item's directory group.
  pub fn group_identifier(&self, root_namespace: &str) -> String {
    sanitize(self.file_name(), root_namespace)
  }
}

/// Convert a resource name into a `/` separated path.
///
/// Names that already contain path separators keep their directories. Dotted manifest names
/// lose the root namespace prefix and treat every segment before the trailing `stem.ext` pair
/// as a directory.
pub fn logical_path(resource_name: &str, root_namespace: &str) -> String {
  if resource_name.contains(['/', '\\']) {
    return resource_name.replace('\\', "/");
  }

  let prefix = format!("{root_namespace}.");
  let relative = resource_name
    .strip_prefix(prefix.as_str())
    .unwrap_or(resource_name);

  let segments: Vec<&str> = relative.split('.').collect();
  if segments.len() <= 2 {
    return relative.to_string();
  }

  let (directories, file) = segments.split_at(segments.len() - 2);
  format!("{}/{}", directories.join("/"), file.join("."))
}

/// Rendered source produced by one successful generation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSource {
  /// File name the source is intended to be written to.
  pub file_name: String,
  /// Complete generated text.
  pub text: String,
}

/// Serializable correspondence between resource names and generated identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceManifest {
  /// Root namespace the identifiers were generated relative to.
  pub root_namespace: String,
  /// One record per input resource, in input order.
  pub resources: Vec<ResourceRecord>,
}

/// Single row of the [`ResourceManifest`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRecord {
  /// Exact lookup key.
  pub resource_name: String,
  /// Variant of the flat identifier enum.
  pub identifier: String,
  /// Directory group key, absent for root level resources.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub group: Option<String>,
  /// Variant of the group enum, absent for root level resources.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub group_identifier: Option<String>,
}

impl ResourceManifest {
  /// Build the manifest for a list of items.
  pub fn from_items(items: &[ResourceItem], root_namespace: &str) -> Self {
    let resources = items
      .iter()
      .map(|item| {
        let group = item
          .logical_path()
          .rsplit_once('/')
          .map(|(directory, _)| directory.to_string());
        ResourceRecord {
          resource_name: item.resource_name().to_string(),
          identifier: item.identifier().to_string(),
          group_identifier: group
            .as_ref()
            .map(|_| item.group_identifier(root_namespace)),
          group,
        }
      })
      .collect();

    Self {
      root_namespace: root_namespace.to_string(),
      resources,
    }
  }
}
