//! Core utilities and types for the keel value-type generator.
//!
//! This crate provides the naming rules shared by the model and the code
//! generator, and the scoped output lifecycle used when writing generated
//! sources.

mod file;
mod naming;

// Output lifecycle
pub use file::{DirFiler, Filer, SourceFile};
// Name utilities
pub use naming::{
    JAVA_LANG, package_of, package_path, qualified_name, simple_name, source_path, strip_java_lang,
};
