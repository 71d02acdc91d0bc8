//! Error types raised during generation and the diagnostics reported for them.

use std::fmt;

use thiserror::Error;

/// Failures raised while assembling accessor source.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum GenerationError {
  /// A resource name sanitised to an empty identifier.
  #[error("resource `{resource_name}` produced an empty {scope} identifier")]
  EmptyIdentifier {
    /// Resource that could not be named.
    resource_name: String,
    /// Enumeration the identifier was destined for.
    scope: String,
  },

  /// Writing into the output buffer failed.
  #[error("failed to format generated source")]
  Format(#[from] fmt::Error),

  /// A panic was caught at the generator boundary.
  #[error("generation panicked: {0}")]
  Panicked(String),
}

impl GenerationError {
  /// Stable code identifying the failure kind.
  pub fn code(&self) -> &'static str {
    match self {
      Self::EmptyIdentifier { .. } => "RA0002",
      Self::Format(_) => "RA0003",
      Self::Panicked(_) => "RA0001",
    }
  }
}

/// Severity attached to a [`Diagnostic`].
///
/// Generation either succeeds silently or fails, so only the error level exists today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
  /// Generation produced no output.
  Error,
}

impl fmt::Display for Severity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Error => f.write_str("error"),
    }
  }
}

/// Reported outcome of a failed generation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
  /// Severity of the report.
  pub severity: Severity,
  /// Stable diagnostic code.
  pub code: &'static str,
  /// Human readable description of the failure.
  pub message: String,
  /// Chain of underlying causes, outermost first.
  pub trace: Vec<String>,
}

impl Diagnostic {
  /// Error level diagnostic describing a generation failure and its causes.
  pub fn from_error(error: &GenerationError) -> Self {
    let mut trace = Vec::new();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
      trace.push(cause.to_string());
      source = cause.source();
    }

    Self {
      severity: Severity::Error,
      code: error.code(),
      message: error.to_string(),
      trace,
    }
  }
}

impl fmt::Display for Diagnostic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}: {}", self.severity, self.code, self.message)?;
    for cause in &self.trace {
      write!(f, "\n  caused by: {cause}")?;
    }
    Ok(())
  }
}
