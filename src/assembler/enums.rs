//! Identifier enumerations emitted after the container.

use std::fmt;

use super::writer::{SourceWriter, literal};

const ENUM_DERIVES: &str = "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]";

/// One enum listing `(identifier, resource name)` entries, each documented with its name.
pub(crate) fn render_identifier_enum(
  out: &mut SourceWriter,
  enum_name: &str,
  summary: &str,
  entries: &[(&str, &str)],
) -> fmt::Result {
  out.line(format_args!("#[doc = {}]", literal(summary)))?;
  out.line("#[allow(non_camel_case_types)]")?;
  out.line(ENUM_DERIVES)?;
  out.open(format_args!("pub enum {enum_name}"))?;
  for (identifier, resource_name) in entries {
    out.line(format_args!("#[doc = {}]", literal(resource_name)))?;
    out.line(format_args!("{identifier},"))?;
  }
  out.close("")
}
