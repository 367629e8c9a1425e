// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;

pub use error::{Error, Result, SourceContext};
pub use manifest::{
    GeneratorConfig, KeelToml, Manifest, MemberEntry, ParseContext, TypeEntry, parse_manifest,
};
