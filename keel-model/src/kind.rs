//! Semantic type kinds of value fields.

use serde::Serialize;

/// Integral primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegralKind {
    Byte,
    Short,
    Char,
    Int,
    Long,
}

impl IntegralKind {
    /// Get the Java keyword for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            IntegralKind::Byte => "byte",
            IntegralKind::Short => "short",
            IntegralKind::Char => "char",
            IntegralKind::Int => "int",
            IntegralKind::Long => "long",
        }
    }

    /// Returns true for the 64-bit kind, whose hash folds high and low words.
    pub fn is_wide(&self) -> bool {
        matches!(self, IntegralKind::Long)
    }
}

/// Floating-point primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FloatKind {
    Float,
    Double,
}

impl FloatKind {
    /// Get the Java keyword for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            FloatKind::Float => "float",
            FloatKind::Double => "double",
        }
    }

    /// Name of the boxed class providing `compare` (e.g., "Float").
    pub fn boxed(&self) -> &'static str {
        match self {
            FloatKind::Float => "Float",
            FloatKind::Double => "Double",
        }
    }
}

/// The kind of a field's type, which selects its equals, hashCode and
/// toString rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Integral(IntegralKind),
    Boolean,
    FloatingPoint(FloatKind),
    Array,
    Reference,
    /// No value at all. Never valid for a field; kept so that an accessor
    /// declared as `void` is reported instead of misclassified.
    Void,
}

impl TypeKind {
    /// Classify a type as written in the source (e.g., "int", "String[]", "java.util.List<String>").
    pub fn classify(type_name: &str) -> Self {
        let name = type_name.trim();
        if name.ends_with("[]") {
            return TypeKind::Array;
        }
        match name {
            "byte" => TypeKind::Integral(IntegralKind::Byte),
            "short" => TypeKind::Integral(IntegralKind::Short),
            "char" => TypeKind::Integral(IntegralKind::Char),
            "int" => TypeKind::Integral(IntegralKind::Int),
            "long" => TypeKind::Integral(IntegralKind::Long),
            "boolean" => TypeKind::Boolean,
            "float" => TypeKind::FloatingPoint(FloatKind::Float),
            "double" => TypeKind::FloatingPoint(FloatKind::Double),
            "void" => TypeKind::Void,
            _ => TypeKind::Reference,
        }
    }

    /// Returns true for primitive kinds (stored by value, never null).
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            TypeKind::Integral(_) | TypeKind::Boolean | TypeKind::FloatingPoint(_)
        )
    }

    /// Returns true for kinds that may hold `null`.
    pub fn is_nullable(&self) -> bool {
        matches!(self, TypeKind::Array | TypeKind::Reference)
    }
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeKind::Integral(kind) => write!(f, "{}", kind.as_str()),
            TypeKind::Boolean => write!(f, "boolean"),
            TypeKind::FloatingPoint(kind) => write!(f, "{}", kind.as_str()),
            TypeKind::Array => write!(f, "array"),
            TypeKind::Reference => write!(f, "reference"),
            TypeKind::Void => write!(f, "void"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_primitives() {
        assert_eq!(TypeKind::classify("int"), TypeKind::Integral(IntegralKind::Int));
        assert_eq!(TypeKind::classify("char"), TypeKind::Integral(IntegralKind::Char));
        assert_eq!(TypeKind::classify("long"), TypeKind::Integral(IntegralKind::Long));
        assert_eq!(TypeKind::classify("boolean"), TypeKind::Boolean);
        assert_eq!(
            TypeKind::classify("double"),
            TypeKind::FloatingPoint(FloatKind::Double)
        );
    }

    #[test]
    fn test_classify_arrays_and_references() {
        assert_eq!(TypeKind::classify("int[]"), TypeKind::Array);
        assert_eq!(TypeKind::classify("String[][]"), TypeKind::Array);
        assert_eq!(TypeKind::classify("String"), TypeKind::Reference);
        assert_eq!(TypeKind::classify("Integer"), TypeKind::Reference);
        assert_eq!(TypeKind::classify("java.util.List<String>"), TypeKind::Reference);
        assert_eq!(TypeKind::classify(" int "), TypeKind::Integral(IntegralKind::Int));
    }

    #[test]
    fn test_classify_void() {
        assert_eq!(TypeKind::classify("void"), TypeKind::Void);
        assert!(!TypeKind::Void.is_primitive());
        assert!(!TypeKind::Void.is_nullable());
    }

    #[test]
    fn test_display() {
        assert_eq!(TypeKind::Integral(IntegralKind::Short).to_string(), "short");
        assert_eq!(TypeKind::FloatingPoint(FloatKind::Float).to_string(), "float");
        assert_eq!(TypeKind::Array.to_string(), "array");
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&TypeKind::Integral(IntegralKind::Long)).unwrap();
        assert_eq!(json, r#"{"integral":"long"}"#);
        let json = serde_json::to_string(&TypeKind::Reference).unwrap();
        assert_eq!(json, r#""reference""#);
    }
}
