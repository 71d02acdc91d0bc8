//! Orchestrates one generation pass from raw resource names to rendered source.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::assembler::{RenderOptions, render};
use crate::diagnostics::{Diagnostic, GenerationError};
use crate::grouping::PathGroups;
use crate::models::{GeneratedSource, GenerationInput, ResourceItem};

/// Default name of the generated source file.
pub const DEFAULT_OUTPUT_FILE: &str = "resources.rs";

/// Seam between the orchestrator and the text assembler.
pub trait SourceRenderer {
  /// Render source for the prepared items and groups.
  fn render(
    &self,
    items: &[ResourceItem],
    groups: &PathGroups<'_>,
    root_namespace: &str,
  ) -> Result<String, GenerationError>;
}

/// Renderer emitting Rust accessor source.
#[derive(Debug, Clone, Default)]
pub struct RustSourceRenderer {
  options: RenderOptions,
}

impl RustSourceRenderer {
  /// Create a renderer using the provided naming options.
  pub fn new(options: RenderOptions) -> Self {
    Self { options }
  }
}

impl SourceRenderer for RustSourceRenderer {
  fn render(
    &self,
    items: &[ResourceItem],
    groups: &PathGroups<'_>,
    root_namespace: &str,
  ) -> Result<String, GenerationError> {
    render(items, groups, root_namespace, &self.options)
  }
}

/// Entry point turning a [`GenerationInput`] into a [`GeneratedSource`].
#[derive(Debug, Clone)]
pub struct ResourceGenerator<R = RustSourceRenderer> {
  renderer: R,
  file_name: String,
}

impl Default for ResourceGenerator {
  fn default() -> Self {
    Self::with_options(RenderOptions::default())
  }
}

impl ResourceGenerator {
  /// Create a Rust source generator with the provided naming options.
  pub fn with_options(options: RenderOptions) -> Self {
    Self::new(RustSourceRenderer::new(options))
  }
}

impl<R: SourceRenderer> ResourceGenerator<R> {
  /// Create a generator around a renderer.
  pub fn new(renderer: R) -> Self {
    Self {
      renderer,
      file_name: DEFAULT_OUTPUT_FILE.to_string(),
    }
  }

  /// Override the file name attached to the generated source.
  pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
    self.file_name = file_name.into();
    self
  }

  /// Run one generation pass.
  ///
  /// Returns `Ok(None)` when there is nothing to generate. Any error or panic raised while
  /// building the output is reported as a single [`Diagnostic`] and never escapes.
  pub fn generate(&self, input: &GenerationInput) -> Result<Option<GeneratedSource>, Diagnostic> {
    if input.resource_names.is_empty() {
      tracing::debug!("no resources supplied, skipping generation");
      return Ok(None);
    }

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.assemble(input)))
      .unwrap_or_else(|payload| Err(GenerationError::Panicked(panic_message(payload.as_ref()))));

    match outcome {
      Ok(text) => Ok(Some(GeneratedSource {
        file_name: self.file_name.clone(),
        text,
      })),
      Err(error) => {
        let diagnostic = Diagnostic::from_error(&error);
        tracing::error!(code = diagnostic.code, "{}", diagnostic.message);
        Err(diagnostic)
      }
    }
  }

  fn assemble(&self, input: &GenerationInput) -> Result<String, GenerationError> {
    let root_namespace = input.root_namespace.as_str();
    tracing::debug!(
      root_namespace,
      count = input.resource_names.len(),
      "generating resource accessors"
    );

    let items = input.items();
    for item in &items {
      tracing::debug!(
        resource = item.resource_name(),
        identifier = item.identifier(),
        logical_path = item.logical_path(),
        "derived resource identifier"
      );
    }

    let groups = PathGroups::from_items(&items);
    self.renderer.render(&items, &groups, root_namespace)
  }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
  if let Some(message) = payload.downcast_ref::<&str>() {
    (*message).to_string()
  } else if let Some(message) = payload.downcast_ref::<String>() {
    message.clone()
  } else {
    "unknown panic".to_string()
  }
}
