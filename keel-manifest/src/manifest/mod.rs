//! Manifest types and parsing for keel.toml files.

mod file;
mod generator;
mod parse;
mod types;
mod validate;

pub use file::KeelToml;
pub use generator::GeneratorConfig;
use keel_model::InterfaceDescription;
pub use parse::parse_manifest;
use serde::Deserialize;
pub use types::{MemberEntry, TypeEntry};
pub use validate::ParseContext;

/// Root manifest for keel.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Generator settings
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Value interfaces, in generation order
    #[serde(default)]
    pub types: Vec<TypeEntry>,
}

impl Manifest {
    /// Describe every declared interface for the generator.
    pub fn interfaces(&self) -> Vec<InterfaceDescription> {
        self.types.iter().map(TypeEntry::interface).collect()
    }

    /// Find a type by qualified name.
    pub fn get_type(&self, name: &str) -> Option<&TypeEntry> {
        self.types.iter().find(|entry| entry.name == name)
    }
}
