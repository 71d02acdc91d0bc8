#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod assembler;
pub mod builder;
pub mod config;
pub mod diagnostics;
pub mod discovery;
pub mod generator;
pub mod grouping;
pub mod models;
pub mod sanitize;

pub use assembler::RenderOptions;
pub use builder::{BuildContext, BuildOutcome, GeneratedArtifacts, ResourceBuilder};
pub use config::GeneratorConfig;
pub use diagnostics::{Diagnostic, GenerationError, Severity};
pub use discovery::{DiscoveredResource, DiscoveryError, ResourceFilter, collect_resources};
pub use generator::{ResourceGenerator, RustSourceRenderer, SourceRenderer};
pub use models::{GeneratedSource, GenerationInput, ResourceItem, ResourceManifest};
pub use sanitize::sanitize;
