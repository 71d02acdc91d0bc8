//! Command-line front end for generating resource accessors.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::Level;

use resource_accessors::{
  GenerationInput, GeneratorConfig, ResourceFilter, ResourceGenerator, ResourceManifest,
  collect_resources,
};

/// Generate typed Rust accessors for a set of bundled resources.
#[derive(Parser, Debug)]
#[command(name = "resource-accessors", author, version, about, long_about = None)]
struct Args {
  /// Resource names to generate accessors for.
  names: Vec<String>,

  /// File listing one resource name per line.
  #[arg(long, value_name = "FILE")]
  names_file: Option<PathBuf>,

  /// Directory whose files are bundled as resources.
  #[arg(long, value_name = "DIR")]
  dir: Option<PathBuf>,

  /// Root namespace stripped from names; overrides the configuration file.
  #[arg(long)]
  root_namespace: Option<String>,

  /// Configuration file; defaults to `resources.config.json` in the current directory.
  #[arg(long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Write the generated source here instead of stdout.
  #[arg(short, long, value_name = "FILE")]
  output: Option<PathBuf>,

  /// Also write the JSON name/identifier manifest.
  #[arg(long, value_name = "FILE")]
  manifest: Option<PathBuf>,

  /// Enable debug logging of derived identifiers.
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> Result<()> {
  let args = Args::parse();

  tracing_subscriber::fmt()
    .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
    .with_writer(io::stderr)
    .init();

  let config = load_config(args.config.as_deref())?;
  let input = gather_input(&args, &config)?;

  let generator = ResourceGenerator::with_options(config.render_options())
    .with_file_name(config.output_file.clone());
  let source = match generator.generate(&input) {
    Ok(Some(source)) => source,
    Ok(None) => {
      tracing::warn!("no resources found, nothing generated");
      return Ok(());
    }
    Err(diagnostic) => bail!("{diagnostic}"),
  };

  match &args.output {
    Some(path) => fs::write(path, &source.text)
      .with_context(|| format!("failed to write {}", path.display()))?,
    None => io::stdout()
      .write_all(source.text.as_bytes())
      .context("failed to write generated source to stdout")?,
  }

  if let Some(path) = &args.manifest {
    let manifest = ResourceManifest::from_items(&input.items(), &input.root_namespace);
    fs::write(path, serde_json::to_string_pretty(&manifest)?)
      .with_context(|| format!("failed to write {}", path.display()))?;
  }

  Ok(())
}

fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
  match path {
    Some(path) => GeneratorConfig::from_path(path)
      .with_context(|| format!("failed to load configuration from {}", path.display())),
    None => Ok(GeneratorConfig::discover(Path::new("."))),
  }
}

/// Merge positional names, the names file and a scanned directory into one input.
///
/// Names from the command line and the names file carry no path, so their groups are derived
/// from the dotted name; scanned files keep their real relative path.
fn gather_input(args: &Args, config: &GeneratorConfig) -> Result<GenerationInput> {
  let root_namespace = args
    .root_namespace
    .clone()
    .unwrap_or_else(|| config.root_namespace.clone());
  let mut input = GenerationInput::new(args.names.iter().cloned(), root_namespace);

  if let Some(path) = &args.names_file {
    let content = fs::read_to_string(path)
      .with_context(|| format!("failed to read {}", path.display()))?;
    content
      .lines()
      .map(str::trim_end)
      .filter(|line| !line.is_empty())
      .for_each(|line| input.push_name(line));
  }

  if let Some(dir) = &args.dir {
    let filter = ResourceFilter::from_patterns(&config.exclude_patterns)?;
    for resource in collect_resources(dir, &input.root_namespace, &filter)? {
      input.push_with_path(resource.resource_name, &resource.relative_path);
    }
  }

  Ok(input)
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
  }

  fn parse(args: &[&str]) -> Args {
    Args::try_parse_from(std::iter::once("resource-accessors").chain(args.iter().copied()))
      .unwrap()
  }

  #[test]
  fn merges_positional_names_names_file_and_directory() -> Result<()> {
    let temp = tempdir()?;
    let root = temp.path();
    let names_file = root.join("names.txt");
    write_file(&names_file, "MyApp.sub.data.json  \r\n\n   \nMyApp.b.txt\n");
    write_file(&root.join("assets/jquery.min.js"), "js");

    let names_arg = names_file.to_string_lossy().to_string();
    let dir_arg = root.join("assets").to_string_lossy().to_string();
    let args = parse(&[
      "MyApp.icon.png",
      "--names-file",
      &names_arg,
      "--dir",
      &dir_arg,
      "--root-namespace",
      "MyApp",
    ]);

    let input = gather_input(&args, &GeneratorConfig::default())?;
    assert_eq!(input.root_namespace, "MyApp");
    assert_eq!(input.resource_names, vec![
      "MyApp.icon.png",
      "MyApp.sub.data.json",
      "MyApp.b.txt",
      "MyApp.jquery.min.js",
    ]);

    let paths: Vec<String> = input
      .items()
      .iter()
      .map(|item| item.logical_path().to_string())
      .collect();
    assert_eq!(paths, vec!["icon.png", "sub/data.json", "b.txt", "jquery.min.js"]);
    Ok(())
  }

  #[test]
  fn root_namespace_falls_back_to_configuration() -> Result<()> {
    let config = GeneratorConfig {
      root_namespace: "FromConfig".into(),
      ..GeneratorConfig::default()
    };

    let input = gather_input(&parse(&["FromConfig.a.txt"]), &config)?;
    assert_eq!(input.root_namespace, "FromConfig");
    assert_eq!(input.resource_names, vec!["FromConfig.a.txt"]);
    Ok(())
  }

  #[test]
  fn missing_names_file_is_an_error() {
    let temp = tempdir().unwrap();
    let missing = temp.path().join("absent.txt").to_string_lossy().to_string();
    let args = parse(&["--names-file", &missing]);
    assert!(gather_input(&args, &GeneratorConfig::default()).is_err());
  }

  #[test]
  fn explicit_config_must_parse() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("broken.json");
    write_file(&path, "{ not json");

    assert!(load_config(Some(&path)).is_err());
    assert!(load_config(Some(&temp.path().join("absent.json"))).is_err());

    write_file(&path, r#"{"enumName": "Asset"}"#);
    assert_eq!(load_config(Some(&path)).unwrap().enum_name, "Asset");
  }
}
