//! Builder and value class synthesis for the keel generator.
//!
//! Given a [`TypeDescriptor`](keel_model::TypeDescriptor), [`synthesize`]
//! produces a [`GenerationPlan`]: the ordered emission instructions for a
//! `<Type>Builder` class and its nested immutable `Value`. A plan is replayed
//! into any [`SourceEmitter`]; [`JavaWriter`] renders it as Java source.
//!
//! # Module Organization
//!
//! - [`builder`] - Indented text building blocks (CodeBuilder, Indent)
//! - [`emit`] - Emission instructions and the emitter contract
//! - [`dispatch`] - Per-kind equals, hashCode and toString rules
//! - [`synthesize`] - Plan synthesis for one type
//! - [`processor`] - Batch generation with per-type failure isolation
//! - [`testing`] - Test utilities (feature-gated)

pub mod builder;
pub mod diagnostic;
pub mod dispatch;
pub mod emit;
mod error;
mod java_writer;
pub mod processor;
pub mod synthesize;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use builder::{CodeBuilder, Indent};
pub use diagnostic::{Diagnostic, Severity};
pub use emit::{
    Annotation, FieldDecl, GenerationPlan, Instruction, MethodDecl, Modifier, Modifiers, Param,
    SourceEmitter, TypeDecl,
};
pub use error::GenerationError;
pub use java_writer::JavaWriter;
pub use processor::{Processor, ProcessReport, TypeOutcome};
pub use synthesize::{GENERATED_ANNOTATION, GENERATOR_NAME, SynthesisOptions, synthesize};
