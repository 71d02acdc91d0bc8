//! Deterministic rendering of typed resource accessors as Rust source.
//!
//! The output is laid out in a fixed order: the namespace modules, the container struct with
//! per-resource accessors, the flat lookup surface, one lookup surface per directory group, and
//! finally the flat identifier enum followed by one enum per group. Identical inputs always
//! produce byte-identical text.

mod accessors;
mod enums;
mod writer;

use crate::diagnostics::GenerationError;
use crate::grouping::PathGroups;
use crate::models::ResourceItem;
use crate::sanitize::sanitize;

use accessors::{render_item_accessors, render_loader_bridge, render_lookup_surface};
use enums::render_identifier_enum;
use writer::SourceWriter;

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "// Generated at build time by resource_accessors. Do not edit.";

/// Names used by the rendered source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
  /// Name of the struct holding the accessor functions.
  pub container_name: String,
  /// Name of the flat identifier enum.
  pub enum_name: String,
  /// Path of a `fn(&str) -> std::io::Result<&'static [u8]>` resolving resource bytes.
  pub loader_path: String,
}

impl Default for RenderOptions {
  fn default() -> Self {
    Self {
      container_name: "Resources".into(),
      enum_name: "ResourceId".into(),
      loader_path: "crate::load_resource".into(),
    }
  }
}

/// Group-scoped identifiers resolved ahead of rendering.
struct GroupSurface<'a> {
  enum_name: String,
  key: &'a str,
  entries: Vec<(String, &'a str)>,
}

impl GroupSurface<'_> {
  fn borrowed_entries(&self) -> Vec<(&str, &str)> {
    self
      .entries
      .iter()
      .map(|(identifier, name)| (identifier.as_str(), *name))
      .collect()
  }
}

/// Render the accessor source for the items and their directory groups.
pub fn render(
  items: &[ResourceItem],
  groups: &PathGroups<'_>,
  root_namespace: &str,
  options: &RenderOptions,
) -> Result<String, GenerationError> {
  let flat: Vec<(&str, &str)> = items
    .iter()
    .map(|item| (item.identifier(), item.resource_name()))
    .collect();
  for (identifier, resource_name) in &flat {
    ensure_identifier(identifier, resource_name, &options.enum_name)?;
  }
  let surfaces = group_surfaces(groups, root_namespace)?;

  let mut out = SourceWriter::new();
  out.line(GENERATED_HEADER)?;
  out.blank()?;

  let modules = namespace_modules(root_namespace);
  for module in &modules {
    out.line("#[allow(non_snake_case)]")?;
    out.open(format_args!("pub mod {module}"))?;
  }

  out.line("/// Typed accessors for the bundled resources.")?;
  out.line(format_args!("pub struct {};", options.container_name))?;
  out.blank()?;
  out.line("#[allow(dead_code, non_snake_case, unreachable_patterns)]")?;
  out.open(format_args!("impl {}", options.container_name))?;

  for (identifier, resource_name) in &flat {
    render_item_accessors(&mut out, identifier, resource_name)?;
  }

  render_lookup_surface(&mut out, &options.enum_name, "", &flat)?;

  for surface in &surfaces {
    let prefix = format!("{}_", surface.enum_name);
    render_lookup_surface(
      &mut out,
      &surface.enum_name,
      &prefix,
      &surface.borrowed_entries(),
    )?;
  }

  render_loader_bridge(&mut out, &options.loader_path)?;
  out.close("")?;
  out.blank()?;

  render_identifier_enum(
    &mut out,
    &options.enum_name,
    "Identifiers of every bundled resource.",
    &flat,
  )?;

  for surface in &surfaces {
    out.blank()?;
    render_identifier_enum(
      &mut out,
      &surface.enum_name,
      &format!("Identifiers of the resources under `{}`.", surface.key),
      &surface.borrowed_entries(),
    )?;
  }

  for _ in &modules {
    out.close("")?;
  }

  Ok(out.finish())
}

fn group_surfaces<'a>(
  groups: &PathGroups<'a>,
  root_namespace: &str,
) -> Result<Vec<GroupSurface<'a>>, GenerationError> {
  groups
    .named()
    .map(|(key, members)| {
      let enum_name = sanitize(key, "");
      let entries = members
        .iter()
        .map(|item| {
          let identifier = item.group_identifier(root_namespace);
          ensure_identifier(&identifier, item.resource_name(), &enum_name)?;
          Ok((identifier, item.resource_name()))
        })
        .collect::<Result<Vec<_>, GenerationError>>()?;
      Ok(GroupSurface {
        enum_name,
        key,
        entries,
      })
    })
    .collect()
}

fn ensure_identifier(
  identifier: &str,
  resource_name: &str,
  scope: &str,
) -> Result<(), GenerationError> {
  if identifier.is_empty() {
    return Err(GenerationError::EmptyIdentifier {
      resource_name: resource_name.to_string(),
      scope: scope.to_string(),
    });
  }
  Ok(())
}

/// Module names enclosing the generated items, outermost first.
fn namespace_modules(root_namespace: &str) -> Vec<String> {
  root_namespace
    .split('.')
    .filter(|segment| !segment.is_empty())
    .map(|segment| sanitize(segment, ""))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn render_names(names: &[&str], root_namespace: &str) -> Result<String, GenerationError> {
    let items: Vec<ResourceItem> = names
      .iter()
      .map(|name| ResourceItem::new(name, root_namespace))
      .collect();
    let groups = PathGroups::from_items(&items);
    render(&items, &groups, root_namespace, &RenderOptions::default())
  }

  #[test]
  fn renders_flat_and_grouped_surfaces() {
    let source = render_names(&["MyApp.icon.png", "MyApp.sub.data.json"], "MyApp").unwrap();

    let expected = r##"// Generated at build time by resource_accessors. Do not edit.

#[allow(non_snake_case)]
pub mod MyApp {
    /// Typed accessors for the bundled resources.
    pub struct Resources;

    #[allow(dead_code, non_snake_case, unreachable_patterns)]
    impl Resources {
        #[doc = "Opens `MyApp.icon.png` as a byte stream."]
        pub fn icon_png() -> ::std::io::Result<::std::io::Cursor<&'static [u8]>> {
            Self::open_resource("MyApp.icon.png")
        }

        #[doc = "Opens `MyApp.icon.png` as a buffered text reader."]
        pub fn icon_png_reader() -> ::std::io::Result<::std::io::BufReader<::std::io::Cursor<&'static [u8]>>> {
            Self::open_resource("MyApp.icon.png").map(::std::io::BufReader::new)
        }

        #[doc = "Opens `MyApp.sub.data.json` as a byte stream."]
        pub fn sub_data_json() -> ::std::io::Result<::std::io::Cursor<&'static [u8]>> {
            Self::open_resource("MyApp.sub.data.json")
        }

        #[doc = "Opens `MyApp.sub.data.json` as a buffered text reader."]
        pub fn sub_data_json_reader() -> ::std::io::Result<::std::io::BufReader<::std::io::Cursor<&'static [u8]>>> {
            Self::open_resource("MyApp.sub.data.json").map(::std::io::BufReader::new)
        }

        /// Resource name for a [`ResourceId`] identifier.
        pub fn resource_name(id: ResourceId) -> &'static str {
            match id {
                ResourceId::icon_png => "MyApp.icon.png",
                ResourceId::sub_data_json => "MyApp.sub.data.json",
                _ => unreachable!("unknown ResourceId identifier"),
            }
        }

        /// Opens the resource behind a [`ResourceId`] identifier as a byte stream.
        pub fn stream(id: ResourceId) -> ::std::io::Result<::std::io::Cursor<&'static [u8]>> {
            Self::open_resource(Self::resource_name(id))
        }

        /// Opens the resource behind a [`ResourceId`] identifier as a buffered text reader.
        pub fn reader(id: ResourceId) -> ::std::io::Result<::std::io::BufReader<::std::io::Cursor<&'static [u8]>>> {
            Self::stream(id).map(::std::io::BufReader::new)
        }

        /// Resource name for a [`sub`] identifier.
        pub fn sub_resource_name(id: sub) -> &'static str {
            match id {
                sub::data_json => "MyApp.sub.data.json",
                _ => unreachable!("unknown sub identifier"),
            }
        }

        /// Opens the resource behind a [`sub`] identifier as a byte stream.
        pub fn sub_stream(id: sub) -> ::std::io::Result<::std::io::Cursor<&'static [u8]>> {
            Self::open_resource(Self::sub_resource_name(id))
        }

        /// Opens the resource behind a [`sub`] identifier as a buffered text reader.
        pub fn sub_reader(id: sub) -> ::std::io::Result<::std::io::BufReader<::std::io::Cursor<&'static [u8]>>> {
            Self::sub_stream(id).map(::std::io::BufReader::new)
        }

        fn open_resource(name: &str) -> ::std::io::Result<::std::io::Cursor<&'static [u8]>> {
            crate::load_resource(name).map(::std::io::Cursor::new)
        }
    }

    #[doc = "Identifiers of every bundled resource."]
    #[allow(non_camel_case_types)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum ResourceId {
        #[doc = "MyApp.icon.png"]
        icon_png,
        #[doc = "MyApp.sub.data.json"]
        sub_data_json,
    }

    #[doc = "Identifiers of the resources under `sub`."]
    #[allow(non_camel_case_types)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum sub {
        #[doc = "MyApp.sub.data.json"]
        data_json,
    }
}
"##;

    assert_eq!(source, expected);
  }

  #[test]
  fn empty_namespace_renders_without_modules() {
    let source = render_names(&["logo.svg"], "").unwrap();

    assert!(source.contains("\npub struct Resources;\n"));
    assert!(source.contains("\n    pub fn logo_svg() -> "));
    assert!(!source.contains("pub mod"));
  }

  #[test]
  fn dotted_namespace_nests_modules() {
    let source = render_names(&["Acme.Tools.a.txt"], "Acme.Tools").unwrap();

    assert!(source.contains("pub mod Acme {\n    #[allow(non_snake_case)]\n    pub mod Tools {"));
    assert!(source.contains("ResourceId::a_txt => \"Acme.Tools.a.txt\","));
    assert!(source.ends_with("    }\n}\n"));
  }

  #[test]
  fn nested_directories_use_sanitised_group_names() {
    let source = render_names(&["App.img.icons.x.png", "App.img.icons.y.png"], "App").unwrap();

    assert!(source.contains("pub fn img_icons_resource_name(id: img_icons) -> &'static str"));
    assert!(source.contains("img_icons::x_png => \"App.img.icons.x.png\","));
    assert!(source.contains("#[doc = \"Identifiers of the resources under `img/icons`.\"]"));
    assert_eq!(source.matches("pub enum ").count(), 2);
  }

  #[test]
  fn duplicate_names_are_rendered_independently() {
    let source = render_names(&["App.a.txt", "App.a.txt"], "App").unwrap();

    assert_eq!(source.matches("pub fn a_txt() ->").count(), 2);
    assert_eq!(source.matches("#[doc = \"App.a.txt\"]\n        a_txt,").count(), 2);
  }

  #[test]
  fn escapes_resource_names_in_literals() {
    let source = render_names(&["say \"hi\".txt"], "").unwrap();

    assert!(source.contains(r#"ResourceId::say__hi__txt => "say \"hi\".txt","#));
  }

  #[test]
  fn rejects_names_without_identifier_characters() {
    let error = render_names(&["App."], "App").unwrap_err();

    assert!(matches!(
      error,
      GenerationError::EmptyIdentifier { ref resource_name, ref scope }
        if resource_name == "App." && scope == "ResourceId"
    ));
  }

  #[test]
  fn rendering_is_deterministic() {
    let names = ["App.z.txt", "App.b.c.txt", "App.a.txt"];
    assert_eq!(render_names(&names, "App").unwrap(), render_names(&names, "App").unwrap());
  }
}
