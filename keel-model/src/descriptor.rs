//! Field and type descriptors consumed by the synthesizer.

use keel_core::{qualified_name, strip_java_lang};
use serde::Serialize;

use crate::TypeKind;

/// Name of the nested class holding the immutable value.
pub const VALUE_CLASS: &str = "Value";

/// One accessor of a value interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Accessor and field name.
    pub name: String,
    /// Kind selecting the equals, hashCode and toString rules.
    pub type_kind: TypeKind,
    /// Type as written in generated code (`java.lang.` stripped).
    pub type_name: String,
}

impl FieldDescriptor {
    /// Create a descriptor, classifying the type from its name.
    pub fn new(name: impl Into<String>, type_name: &str) -> Self {
        let type_name = strip_java_lang(type_name.trim());
        Self {
            name: name.into(),
            type_kind: TypeKind::classify(type_name),
            type_name: type_name.to_string(),
        }
    }

    /// Create a descriptor with an explicit kind.
    pub fn with_kind(
        name: impl Into<String>,
        type_kind: TypeKind,
        type_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            type_kind,
            type_name: type_name.into(),
        }
    }

    /// Element type of an array field (e.g., "int" for "int[]").
    pub fn element_type(&self) -> Option<&str> {
        self.type_name.trim_end().strip_suffix("[]").map(str::trim_end)
    }
}

/// The value interface being implemented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    /// Package name; empty for the default package.
    pub package_name: String,
    /// Simple name of the interface.
    pub simple_name: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    pub fn new(
        package_name: impl Into<String>,
        simple_name: impl Into<String>,
        fields: Vec<FieldDescriptor>,
    ) -> Self {
        Self {
            package_name: package_name.into(),
            simple_name: simple_name.into(),
            fields,
        }
    }

    /// Simple name of the generated builder (e.g., "FooBuilder").
    pub fn builder_name(&self) -> String {
        format!("{}Builder", self.simple_name)
    }

    /// Fully qualified name of the interface.
    pub fn qualified_name(&self) -> String {
        qualified_name(&self.package_name, &self.simple_name)
    }

    /// Fully qualified name of the generated builder.
    pub fn qualified_builder_name(&self) -> String {
        qualified_name(&self.package_name, &self.builder_name())
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Position of a field in declaration order.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Returns true if any field has the given kind.
    pub fn has_kind(&self, predicate: impl Fn(TypeKind) -> bool) -> bool {
        self.fields.iter().any(|f| predicate(f.type_kind))
    }
}
