//! Directory scanning that turns bundled files into manifest resource names.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use regex::Regex;
use thiserror::Error;

/// Errors raised while discovering resources on disk.
#[derive(Error, Debug)]
pub enum DiscoveryError {
  /// Failed to read a directory.
  #[error("failed to read {}: {source}", path.display())]
  Io {
    /// Directory that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// An exclude pattern is not a valid regular expression.
  #[error("invalid exclude pattern `{pattern}`: {source}")]
  Pattern {
    /// Offending pattern.
    pattern: String,
    /// Source regex error.
    source: regex::Error,
  },
}

/// Exclusion rules applied to `/` separated paths relative to the resources directory.
#[derive(Debug, Clone, Default)]
pub struct ResourceFilter {
  patterns: Vec<Regex>,
}

impl ResourceFilter {
  /// Compile a list of exclude patterns.
  pub fn from_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Self, DiscoveryError> {
    let patterns = patterns
      .iter()
      .map(|pattern| {
        Regex::new(pattern.as_ref()).map_err(|source| DiscoveryError::Pattern {
          pattern: pattern.as_ref().to_string(),
          source,
        })
      })
      .collect::<Result<Vec<_>, _>>()?;
    Ok(Self { patterns })
  }

  /// Returns `true` when the relative path should not be bundled.
  pub fn is_excluded(&self, relative_path: &str) -> bool {
    self
      .patterns
      .iter()
      .any(|pattern| pattern.is_match(relative_path))
  }
}

/// A file found on disk, named the way the loader will look it up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredResource {
  /// Dotted manifest name.
  pub resource_name: String,
  /// `/` separated path relative to the resources directory.
  pub relative_path: String,
}

/// Walk `dir` and return one resource per file, in sorted path order.
///
/// A file at `sub/data.json` is named `Root.sub.data.json` for root namespace `Root`, or
/// `sub.data.json` when the namespace is empty. A missing directory yields no resources.
pub fn collect_resources(
  dir: &Path,
  root_namespace: &str,
  filter: &ResourceFilter,
) -> Result<Vec<DiscoveredResource>, DiscoveryError> {
  let mut relative_paths = Vec::new();
  match collect_files_recursively(dir, "", filter, &mut relative_paths) {
    Err(DiscoveryError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
      tracing::debug!("resources directory {} does not exist", dir.display());
      return Ok(Vec::new());
    }
    result => result?,
  }

  Ok(
    relative_paths
      .into_iter()
      .map(|relative_path| DiscoveredResource {
        resource_name: manifest_name(root_namespace, &relative_path),
        relative_path,
      })
      .collect(),
  )
}

/// Dotted manifest name for a `/` separated relative path.
pub fn manifest_name(root_namespace: &str, relative_path: &str) -> String {
  let dotted = relative_path.replace('/', ".");
  if root_namespace.is_empty() {
    dotted
  } else {
    format!("{root_namespace}.{dotted}")
  }
}

fn collect_files_recursively(
  dir: &Path,
  relative_root: &str,
  filter: &ResourceFilter,
  files: &mut Vec<String>,
) -> Result<(), DiscoveryError> {
  let read_error = |source| DiscoveryError::Io {
    path: dir.to_path_buf(),
    source,
  };

  let mut entries = fs::read_dir(dir)
    .map_err(read_error)?
    .collect::<Result<Vec<_>, _>>()
    .map_err(read_error)?;
  entries.sort_by_key(|entry| entry.file_name());

  for entry in entries {
    let file_name = entry.file_name();
    let name_str = file_name.to_string_lossy();
    let relative = if relative_root.is_empty() {
      name_str.to_string()
    } else {
      format!("{relative_root}/{name_str}")
    };

    if filter.is_excluded(&relative) {
      tracing::debug!("excluding {relative}");
      continue;
    }

    let file_type = entry.file_type().map_err(read_error)?;
    if file_type.is_dir() {
      collect_files_recursively(&entry.path(), &relative, filter, files)?;
    } else if file_type.is_file() {
      tracing::debug!("discovered {relative}");
      files.push(relative);
    }
  }

  Ok(())
}
