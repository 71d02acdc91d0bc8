//! Line oriented buffer that tracks brace depth for generated source.

use std::fmt::{self, Write as _};

const INDENT_WIDTH: usize = 4;

/// Accumulates generated lines at the current nesting depth.
#[derive(Debug, Default)]
pub(crate) struct SourceWriter {
  buffer: String,
  depth: usize,
}

impl SourceWriter {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  /// Write one line at the current depth.
  pub(crate) fn line(&mut self, text: impl fmt::Display) -> fmt::Result {
    writeln!(
      self.buffer,
      "{:indent$}{}",
      "",
      text,
      indent = self.depth * INDENT_WIDTH
    )
  }

  /// Write an empty line without trailing whitespace.
  pub(crate) fn blank(&mut self) -> fmt::Result {
    self.buffer.write_char('\n')
  }

  /// Write `text {` and indent the following lines.
  pub(crate) fn open(&mut self, text: impl fmt::Display) -> fmt::Result {
    self.line(format_args!("{text} {{"))?;
    self.depth += 1;
    Ok(())
  }

  /// Dedent and write the closing brace followed by `suffix`.
  pub(crate) fn close(&mut self, suffix: &str) -> fmt::Result {
    self.depth = self.depth.saturating_sub(1);
    self.line(format_args!("}}{suffix}"))
  }

  pub(crate) fn finish(self) -> String {
    self.buffer
  }
}

/// Render a string as an escaped Rust string literal.
pub(crate) fn literal(value: &str) -> String {
  format!("{value:?}")
}
