//! Descriptor types for the keel value-type generator.
//!
//! This crate defines what the generator consumes: the description of a
//! value interface as supplied by a frontend, and the ordered field model
//! extracted from it.
//!
//! # Architecture
//!
//! ```text
//! keel.toml → keel-manifest (parsing) → InterfaceDescription
//!           → keel-model (extraction) → TypeDescriptor → keel-codegen
//! ```

mod descriptor;
mod extract;
mod interface;
mod kind;

pub use descriptor::{FieldDescriptor, TypeDescriptor, VALUE_CLASS};
pub use extract::{
    NameClash, OBJECT_METHODS, UnsupportedFieldShape, check_accessor_shapes, check_member_names,
    describe_type, extract_fields,
};
pub use interface::{InterfaceDescription, Member, MemberKind};
pub use kind::{FloatKind, IntegralKind, TypeKind};
