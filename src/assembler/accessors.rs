//! Accessor functions rendered inside the container `impl` block.

use std::fmt;

use super::writer::{SourceWriter, literal};

pub(crate) const STREAM_TYPE: &str = "::std::io::Cursor<&'static [u8]>";
pub(crate) const READER_TYPE: &str = "::std::io::BufReader<::std::io::Cursor<&'static [u8]>>";

/// Stream and reader accessors named after a single resource identifier.
pub(crate) fn render_item_accessors(
  out: &mut SourceWriter,
  identifier: &str,
  resource_name: &str,
) -> fmt::Result {
  let name_literal = literal(resource_name);

  out.line(format_args!(
    "#[doc = {}]",
    literal(&format!("Opens `{resource_name}` as a byte stream."))
  ))?;
  out.open(format_args!(
    "pub fn {identifier}() -> ::std::io::Result<{STREAM_TYPE}>"
  ))?;
  out.line(format_args!("Self::open_resource({name_literal})"))?;
  out.close("")?;
  out.blank()?;

  out.line(format_args!(
    "#[doc = {}]",
    literal(&format!("Opens `{resource_name}` as a buffered text reader."))
  ))?;
  out.open(format_args!(
    "pub fn {identifier}_reader() -> ::std::io::Result<{READER_TYPE}>"
  ))?;
  out.line(format_args!(
    "Self::open_resource({name_literal}).map(::std::io::BufReader::new)"
  ))?;
  out.close("")?;
  out.blank()
}

/// Name resolver plus stream and reader dispatchers for one identifier enum.
///
/// `prefix` is empty for the flat surface and `<group>_` for group surfaces.
pub(crate) fn render_lookup_surface(
  out: &mut SourceWriter,
  enum_name: &str,
  prefix: &str,
  entries: &[(&str, &str)],
) -> fmt::Result {
  out.line(format_args!(
    "/// Resource name for a [`{enum_name}`] identifier."
  ))?;
  out.open(format_args!(
    "pub fn {prefix}resource_name(id: {enum_name}) -> &'static str"
  ))?;
  out.open("match id")?;
  for (identifier, resource_name) in entries {
    out.line(format_args!(
      "{enum_name}::{identifier} => {},",
      literal(resource_name)
    ))?;
  }
  out.line(format_args!(
    "_ => unreachable!(\"unknown {enum_name} identifier\"),"
  ))?;
  out.close("")?;
  out.close("")?;
  out.blank()?;

  out.line(format_args!(
    "/// Opens the resource behind a [`{enum_name}`] identifier as a byte stream."
  ))?;
  out.open(format_args!(
    "pub fn {prefix}stream(id: {enum_name}) -> ::std::io::Result<{STREAM_TYPE}>"
  ))?;
  out.line(format_args!(
    "Self::open_resource(Self::{prefix}resource_name(id))"
  ))?;
  out.close("")?;
  out.blank()?;

  out.line(format_args!(
    "/// Opens the resource behind a [`{enum_name}`] identifier as a buffered text reader."
  ))?;
  out.open(format_args!(
    "pub fn {prefix}reader(id: {enum_name}) -> ::std::io::Result<{READER_TYPE}>"
  ))?;
  out.line(format_args!(
    "Self::{prefix}stream(id).map(::std::io::BufReader::new)"
  ))?;
  out.close("")?;
  out.blank()
}

/// Private helper every accessor funnels through.
pub(crate) fn render_loader_bridge(out: &mut SourceWriter, loader_path: &str) -> fmt::Result {
  out.open(format_args!(
    "fn open_resource(name: &str) -> ::std::io::Result<{STREAM_TYPE}>"
  ))?;
  out.line(format_args!("{loader_path}(name).map(::std::io::Cursor::new)"))?;
  out.close("")
}
