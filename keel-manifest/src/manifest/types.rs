use keel_model::{InterfaceDescription, Member, MemberKind};
use serde::Deserialize;

/// One `[[types]]` entry: a value interface to generate a builder for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeEntry {
    /// Qualified interface name, e.g. "io.example.Foobar"
    pub name: String,

    /// Members in declaration order
    #[serde(default)]
    pub members: Vec<MemberEntry>,
}

/// One `[[types.members]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemberEntry {
    pub name: String,

    /// Return type of a method, declared type of a constant
    #[serde(rename = "type")]
    pub ty: String,

    #[serde(default)]
    pub kind: MemberKind,

    #[serde(default, rename = "static")]
    pub is_static: bool,

    /// Parameter types of a method
    #[serde(default)]
    pub params: Vec<String>,
}

impl TypeEntry {
    /// Describe the interface for the generator.
    pub fn interface(&self) -> InterfaceDescription {
        let members = self.members.iter().map(MemberEntry::member).collect();
        InterfaceDescription::new(&self.name, members)
    }
}

impl MemberEntry {
    pub fn member(&self) -> Member {
        let member = Member::accessor(&self.name, &self.ty)
            .with_kind(self.kind)
            .with_parameters(self.params.clone());
        if self.is_static {
            member.with_static()
        } else {
            member
        }
    }

    /// Key identifying the member among its siblings of the same kind.
    pub(crate) fn signature(&self) -> String {
        match self.kind {
            MemberKind::Method => format!("method {}({})", self.name, self.params.join(", ")),
            MemberKind::Field => format!("field {}", self.name),
            MemberKind::Type => format!("type {}", self.name),
        }
    }
}
