//! Field extraction from interface descriptions.

use thiserror::Error;

use crate::{FieldDescriptor, InterfaceDescription, TypeDescriptor, VALUE_CLASS};

/// Methods of `java.lang.Object` that no accessor may be named after.
pub const OBJECT_METHODS: &[&str] = &[
    "clone", "equals", "finalize", "getClass", "hashCode", "notify", "notifyAll", "toString",
    "wait",
];

/// A method that cannot be read as a zero-argument accessor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{member}' in {type_name} is not an accessor: it declares parameters ({})", .parameters.join(", "))]
pub struct UnsupportedFieldShape {
    pub type_name: String,
    pub member: String,
    pub parameters: Vec<String>,
}

/// A name in the interface that the generated source would declare twice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{name}' in {type_name} clashes with {clashes_with}")]
pub struct NameClash {
    pub type_name: String,
    pub name: String,
    pub clashes_with: String,
}

/// Enumerate the fields of an interface.
///
/// Every non-static method becomes a field named after it, typed by its
/// return type, in declaration order. Constants, nested types and static
/// methods are skipped. Parameter lists are not inspected here; see
/// [`check_accessor_shapes`].
pub fn extract_fields(interface: &InterfaceDescription) -> Vec<FieldDescriptor> {
    interface
        .members
        .iter()
        .filter(|member| member.is_instance_method())
        .map(|member| FieldDescriptor::new(member.name.clone(), &member.return_type))
        .collect()
}

/// Split the qualified name and extract the fields.
pub fn describe_type(interface: &InterfaceDescription) -> TypeDescriptor {
    TypeDescriptor::new(
        interface.package_name(),
        interface.simple_name(),
        extract_fields(interface),
    )
}

/// Reject instance methods that take parameters.
///
/// Returns the first offending member in declaration order.
pub fn check_accessor_shapes(
    interface: &InterfaceDescription,
) -> Result<(), UnsupportedFieldShape> {
    match interface
        .members
        .iter()
        .find(|member| member.is_instance_method() && !member.parameters.is_empty())
    {
        Some(member) => Err(UnsupportedFieldShape {
            type_name: interface.qualified_name.clone(),
            member: member.name.clone(),
            parameters: member.parameters.clone(),
        }),
        None => Ok(()),
    }
}

/// Reject names that collide with members of the generated source.
///
/// The interface may not be called like the nested value class, and no
/// accessor may be named after a method of `java.lang.Object`.
pub fn check_member_names(interface: &InterfaceDescription) -> Result<(), NameClash> {
    if interface.simple_name() == VALUE_CLASS {
        return Err(NameClash {
            type_name: interface.qualified_name.clone(),
            name: VALUE_CLASS.to_string(),
            clashes_with: "the nested value class".to_string(),
        });
    }

    match interface
        .members
        .iter()
        .find(|member| {
            member.is_instance_method() && OBJECT_METHODS.contains(&member.name.as_str())
        })
    {
        Some(member) => Err(NameClash {
            type_name: interface.qualified_name.clone(),
            name: member.name.clone(),
            clashes_with: format!("java.lang.Object.{}()", member.name),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IntegralKind, Member, MemberKind, TypeKind};

    fn foobar() -> InterfaceDescription {
        InterfaceDescription::new(
            "io.example.Foobar",
            vec![
                Member::accessor("bar", "int"),
                Member::accessor("create", "io.example.Foobar").with_static(),
                Member::accessor("DEFAULT_NAME", "java.lang.String").with_kind(MemberKind::Field),
                Member::accessor("foo", "java.lang.String"),
                Member::accessor("Nested", "").with_kind(MemberKind::Type),
            ],
        )
    }

    #[test]
    fn test_extract_keeps_instance_methods_in_order() {
        let fields = extract_fields(&foobar());
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["bar", "foo"]);
        assert_eq!(fields[0].type_kind, TypeKind::Integral(IntegralKind::Int));
        assert_eq!(fields[1].type_name, "String");
    }

    #[test]
    fn test_extract_ignores_parameters() {
        let interface = InterfaceDescription::new(
            "Foo",
            vec![Member::accessor("bar", "int").with_parameters(vec!["int".into()])],
        );
        assert_eq!(extract_fields(&interface).len(), 1);
    }

    #[test]
    fn test_describe_type() {
        let ty = describe_type(&foobar());
        assert_eq!(ty.package_name, "io.example");
        assert_eq!(ty.simple_name, "Foobar");
        assert_eq!(ty.fields.len(), 2);
    }

    #[test]
    fn test_describe_type_default_package() {
        let ty = describe_type(&InterfaceDescription::new("Foo", vec![]));
        assert_eq!(ty.package_name, "");
        assert_eq!(ty.simple_name, "Foo");
        assert!(ty.fields.is_empty());
    }

    #[test]
    fn test_check_accessor_shapes() {
        assert!(check_accessor_shapes(&foobar()).is_ok());

        let interface = InterfaceDescription::new(
            "io.example.Foo",
            vec![
                Member::accessor("bar", "int"),
                Member::accessor("of", "io.example.Foo")
                    .with_static()
                    .with_parameters(vec!["int".into()]),
                Member::accessor("plus", "int").with_parameters(vec!["int".into(), "long".into()]),
            ],
        );
        let err = check_accessor_shapes(&interface).unwrap_err();
        assert_eq!(err.member, "plus");
        assert_eq!(
            err.to_string(),
            "'plus' in io.example.Foo is not an accessor: it declares parameters (int, long)"
        );
    }

    #[test]
    fn test_check_member_names() {
        assert!(check_member_names(&foobar()).is_ok());

        for name in ["hashCode", "toString", "equals", "getClass"] {
            let interface = InterfaceDescription::new(
                "io.example.Foo",
                vec![Member::accessor("bar", "int"), Member::accessor(name, "int")],
            );
            let err = check_member_names(&interface).unwrap_err();
            assert_eq!(err.name, name);
            assert_eq!(
                err.to_string(),
                format!("'{name}' in io.example.Foo clashes with java.lang.Object.{name}()")
            );
        }
    }

    #[test]
    fn test_static_object_method_names_are_allowed() {
        let interface = InterfaceDescription::new(
            "io.example.Foo",
            vec![
                Member::accessor("toString", "java.lang.String").with_static(),
                Member::accessor("hashCode", "int").with_kind(MemberKind::Field),
            ],
        );
        assert!(check_member_names(&interface).is_ok());
    }

    #[test]
    fn test_interface_named_like_value_class() {
        let interface = InterfaceDescription::new("io.example.Value", vec![]);
        let err = check_member_names(&interface).unwrap_err();
        assert_eq!(err.name, "Value");
        assert_eq!(
            err.to_string(),
            "'Value' in io.example.Value clashes with the nested value class"
        );
    }
}
