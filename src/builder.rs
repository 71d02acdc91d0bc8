//! Build script integration: discover resources, generate accessors and write them to `OUT_DIR`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::{DEFAULT_CONFIG_FILE, GeneratorConfig};
use crate::diagnostics::Diagnostic;
use crate::discovery::{ResourceFilter, collect_resources};
use crate::generator::ResourceGenerator;
use crate::models::{GeneratedSource, GenerationInput, ResourceManifest};

/// Paths and configuration describing one build script invocation.
#[derive(Debug, Clone)]
pub struct BuildContext<'a> {
  /// Directory containing the consuming crate's `Cargo.toml`.
  pub manifest_dir: &'a Path,
  /// Directory generated files are written into.
  pub out_dir: PathBuf,
  /// Generator configuration.
  pub config: GeneratorConfig,
}

impl<'a> BuildContext<'a> {
  /// Context for `manifest_dir` with configuration discovered next to it.
  pub fn discover(manifest_dir: &'a Path, out_dir: impl Into<PathBuf>) -> Self {
    Self {
      manifest_dir,
      out_dir: out_dir.into(),
      config: GeneratorConfig::discover(manifest_dir),
    }
  }
}

/// Files produced by a successful generation pass.
#[derive(Debug, Clone)]
pub struct GeneratedArtifacts {
  /// Rust source defining the accessors and identifier enums.
  pub source: GeneratedSource,
  /// Resource name to identifier correspondence serialised as prettified JSON.
  pub manifest_json: String,
}

/// Result of one build pass, successful or not.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
  /// Generated files, absent when there was nothing to generate or generation failed.
  pub artifacts: Option<GeneratedArtifacts>,
  /// Diagnostic reported by a failed generation pass.
  pub diagnostic: Option<Diagnostic>,
  /// File system paths that should trigger rerunning the build script when changed.
  pub rerun_paths: Vec<PathBuf>,
}

/// High-level helper driving resource accessor generation from a build script.
pub struct ResourceBuilder<'a> {
  context: BuildContext<'a>,
}

impl<'a> ResourceBuilder<'a> {
  /// Create a builder for the provided build context.
  pub fn new(context: BuildContext<'a>) -> Self {
    Self { context }
  }

  /// Discover resources and generate the accessor artifacts.
  ///
  /// Generation failures are returned inside the outcome rather than as an error; only
  /// discovery and serialisation problems abort the build.
  pub fn build(&self) -> Result<BuildOutcome> {
    let config = &self.context.config;
    let resources_dir = config.resources_dir_path(self.context.manifest_dir);
    let filter = ResourceFilter::from_patterns(&config.exclude_patterns)?;
    let resources = collect_resources(&resources_dir, &config.root_namespace, &filter)?;

    let rerun_paths = vec![
      resources_dir,
      self.context.manifest_dir.join(DEFAULT_CONFIG_FILE),
    ];

    let mut input = GenerationInput {
      root_namespace: config.root_namespace.clone(),
      ..GenerationInput::default()
    };
    for resource in resources {
      input.push_with_path(resource.resource_name, &resource.relative_path);
    }
    let generator = ResourceGenerator::with_options(config.render_options())
      .with_file_name(config.output_file.clone());

    let (artifacts, diagnostic) = match generator.generate(&input) {
      Ok(Some(source)) => (Some(self.artifacts_for(&input, source)?), None),
      Ok(None) => (None, None),
      Err(diagnostic) => (None, Some(diagnostic)),
    };

    Ok(BuildOutcome {
      artifacts,
      diagnostic,
      rerun_paths,
    })
  }

  /// Write generated artifacts into the output directory, returning the written paths.
  ///
  /// A pass without artifacts removes the outputs of any earlier pass so nothing stale is
  /// left to be included.
  pub fn write_outputs(&self, outcome: &BuildOutcome) -> Result<Vec<PathBuf>> {
    let out_dir = &self.context.out_dir;
    let config = &self.context.config;
    let manifest_path = out_dir.join(&config.manifest_file);

    let Some(artifacts) = &outcome.artifacts else {
      remove_if_present(&out_dir.join(&config.output_file))?;
      remove_if_present(&manifest_path)?;
      return Ok(Vec::new());
    };

    fs::create_dir_all(out_dir)
      .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let source_path = out_dir.join(&artifacts.source.file_name);
    write_if_changed(&source_path, &artifacts.source.text)?;
    write_if_changed(&manifest_path, &artifacts.manifest_json)?;

    Ok(vec![source_path, manifest_path])
  }

  /// Build, write outputs and print the cargo directives for a build script.
  pub fn run(&self) -> Result<BuildOutcome> {
    let outcome = self.build()?;
    self.write_outputs(&outcome)?;
    for line in cargo_directives(&outcome) {
      println!("{line}");
    }
    Ok(outcome)
  }

  fn artifacts_for(
    &self,
    input: &GenerationInput,
    source: GeneratedSource,
  ) -> Result<GeneratedArtifacts> {
    let manifest = ResourceManifest::from_items(&input.items(), &input.root_namespace);
    let manifest_json =
      serde_json::to_string_pretty(&manifest).context("failed to serialise resource manifest")?;

    Ok(GeneratedArtifacts {
      source,
      manifest_json,
    })
  }
}

/// Cargo directives describing rerun triggers and any generation diagnostic.
pub fn cargo_directives(outcome: &BuildOutcome) -> Vec<String> {
  let mut lines: Vec<String> = outcome
    .rerun_paths
    .iter()
    .map(|path| format!("cargo:rerun-if-changed={}", path.display()))
    .collect();

  if let Some(diagnostic) = &outcome.diagnostic {
    lines.extend(
      diagnostic
        .to_string()
        .lines()
        .map(|line| format!("cargo:warning={line}")),
    );
  }

  lines
}

fn remove_if_present(path: &Path) -> Result<()> {
  match fs::remove_file(path) {
    Ok(()) => {
      tracing::debug!("removed stale output {}", path.display());
      Ok(())
    }
    Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
    Err(err) => Err(err).with_context(|| format!("failed to remove {}", path.display())),
  }
}

fn write_if_changed(path: &Path, contents: &str) -> Result<()> {
  if fs::read_to_string(path).is_ok_and(|existing| existing == contents) {
    return Ok(());
  }
  fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}
