//! Reference evaluator for generated value classes.
//!
//! Runs the equality, hashing and string rules of a generated value with Java
//! semantics, so properties of the generated code can be checked without a
//! JVM.

mod error;
mod instance;
pub mod numeric;
mod value;

pub use error::RuntimeError;
pub use instance::{ValueBuilder, ValueInstance};
pub use value::{ArrayRef, JavaValue, arrays_equals, arrays_hash, arrays_to_string};
