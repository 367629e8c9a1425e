//! Interface descriptions supplied by a discovery frontend.

use keel_core::{package_of, simple_name};
use serde::{Deserialize, Serialize};

/// Kind of an interface member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    /// A callable member.
    #[default]
    Method,
    /// A constant.
    Field,
    /// A nested type.
    Type,
}

/// One member of an interface, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub name: String,
    pub kind: MemberKind,
    pub is_static: bool,
    /// Return type for methods, declared type for constants.
    pub return_type: String,
    /// Parameter types of a method.
    pub parameters: Vec<String>,
}

impl Member {
    /// An instance method without parameters.
    pub fn accessor(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Method,
            is_static: false,
            return_type: return_type.into(),
            parameters: Vec::new(),
        }
    }

    /// Mark the member static.
    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Set the member kind.
    pub fn with_kind(mut self, kind: MemberKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the parameter types.
    pub fn with_parameters(mut self, parameters: Vec<String>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Returns true for members that become fields of the value.
    pub fn is_instance_method(&self) -> bool {
        self.kind == MemberKind::Method && !self.is_static
    }
}

/// A value interface: its qualified name and ordered members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceDescription {
    pub qualified_name: String,
    pub members: Vec<Member>,
}

impl InterfaceDescription {
    pub fn new(qualified_name: impl Into<String>, members: Vec<Member>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            members,
        }
    }

    /// Package part of the qualified name.
    pub fn package_name(&self) -> &str {
        package_of(&self.qualified_name)
    }

    /// Simple name of the interface.
    pub fn simple_name(&self) -> &str {
        simple_name(&self.qualified_name)
    }
}
