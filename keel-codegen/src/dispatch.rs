//! Per-kind code generation rules.
//!
//! Each behavior of the generated value is one total function over
//! [`TypeKind`]: [`equality_test`], [`hash_contribution`] and
//! [`string_render`]. Field `f` of the receiver is read as `this.f`, so
//! the locals of the generated methods (`o`, `value`, `result`, `temp`) never
//! shadow a field, and is compared against `value.f` of the other instance.

use keel_model::{FieldDescriptor, FloatKind, IntegralKind, TypeDescriptor, TypeKind};

use crate::GenerationError;

/// Local of the generated `hashCode` holding a folded double.
pub const HASH_TEMP: &str = "temp";

/// How one field feeds the running hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashContribution {
    /// Statement run before the accumulation, if any.
    pub setup: Option<String>,
    /// Expression added to `31 * result`.
    pub expr: String,
}

impl HashContribution {
    fn expr(expr: String) -> Self {
        Self { setup: None, expr }
    }

    /// The accumulation statement.
    pub fn statement(&self) -> String {
        format!("result = 31 * result + {}", self.expr)
    }
}

fn unsupported(ty: &TypeDescriptor, field: &FieldDescriptor) -> GenerationError {
    GenerationError::UnsupportedTypeKind {
        type_name: ty.qualified_name(),
        field: field.name.clone(),
        field_type: field.type_name.clone(),
    }
}

/// Condition that holds when `field` differs between `this` and `value`.
pub fn equality_test(ty: &TypeDescriptor, field: &FieldDescriptor) -> Result<String, GenerationError> {
    let name = &field.name;
    match field.type_kind {
        TypeKind::Integral(_) | TypeKind::Boolean => Ok(format!("this.{0} != value.{0}", name)),
        // compare() orders -0.0 below 0.0 and NaN equal to itself
        TypeKind::FloatingPoint(kind) => Ok(format!(
            "{}.compare(value.{1}, this.{1}) != 0",
            kind.boxed(),
            name
        )),
        TypeKind::Array => Ok(format!("!Arrays.equals(this.{0}, value.{0})", name)),
        TypeKind::Reference => Ok(format!(
            "this.{0} != null ? !this.{0}.equals(value.{0}) : value.{0} != null",
            name
        )),
        TypeKind::Void => Err(unsupported(ty, field)),
    }
}

/// Contribution of `field` to the generated hash code.
pub fn hash_contribution(
    ty: &TypeDescriptor,
    field: &FieldDescriptor,
) -> Result<HashContribution, GenerationError> {
    let this = format!("this.{}", field.name);
    let contribution = match field.type_kind {
        TypeKind::Integral(kind) if kind.is_wide() => {
            HashContribution::expr(format!("(int) ({0} ^ ({0} >>> 32))", this))
        }
        TypeKind::Integral(IntegralKind::Int) => HashContribution::expr(this),
        TypeKind::Integral(_) => HashContribution::expr(format!("(int) {}", this)),
        TypeKind::Boolean => HashContribution::expr(format!("({} ? 1 : 0)", this)),
        TypeKind::FloatingPoint(FloatKind::Float) => HashContribution::expr(format!(
            "({0} != +0.0f ? Float.floatToIntBits({0}) : 0)",
            this
        )),
        TypeKind::FloatingPoint(FloatKind::Double) => HashContribution {
            setup: Some(format!("{} = Double.doubleToLongBits({})", HASH_TEMP, this)),
            expr: format!("(int) ({0} ^ ({0} >>> 32))", HASH_TEMP),
        },
        TypeKind::Array => {
            HashContribution::expr(format!("({0} != null ? Arrays.hashCode({0}) : 0)", this))
        }
        TypeKind::Reference => {
            HashContribution::expr(format!("({0} != null ? {0}.hashCode() : 0)", this))
        }
        TypeKind::Void => return Err(unsupported(ty, field)),
    };
    Ok(contribution)
}

/// Expression rendering `field` inside the generated `toString`.
pub fn string_render(ty: &TypeDescriptor, field: &FieldDescriptor) -> Result<String, GenerationError> {
    match field.type_kind {
        TypeKind::Array => Ok(format!("Arrays.toString({})", field.name)),
        TypeKind::Integral(_)
        | TypeKind::Boolean
        | TypeKind::FloatingPoint(_)
        | TypeKind::Reference => Ok(field.name.clone()),
        TypeKind::Void => Err(unsupported(ty, field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(type_name: &str) -> (String, HashContribution, String) {
        let field = FieldDescriptor::new("x", type_name);
        let ty = TypeDescriptor::new("io.example", "Foo", vec![field.clone()]);
        (
            equality_test(&ty, &field).unwrap(),
            hash_contribution(&ty, &field).unwrap(),
            string_render(&ty, &field).unwrap(),
        )
    }

    #[test]
    fn test_int_rules() {
        let (eq, hash, render) = check("int");
        assert_eq!(eq, "this.x != value.x");
        assert_eq!(hash.statement(), "result = 31 * result + this.x");
        assert_eq!(render, "x");
    }

    #[test]
    fn test_narrow_integral_rules() {
        for ty in ["byte", "short", "char"] {
            let (eq, hash, _) = check(ty);
            assert_eq!(eq, "this.x != value.x");
            assert_eq!(hash.expr, "(int) this.x");
        }
    }

    #[test]
    fn test_long_folds_words() {
        let (_, hash, _) = check("long");
        assert_eq!(hash.expr, "(int) (this.x ^ (this.x >>> 32))");
        assert!(hash.setup.is_none());
    }

    #[test]
    fn test_boolean_rules() {
        let (eq, hash, _) = check("boolean");
        assert_eq!(eq, "this.x != value.x");
        assert_eq!(hash.expr, "(this.x ? 1 : 0)");
    }

    #[test]
    fn test_float_rules() {
        let (eq, hash, render) = check("float");
        assert_eq!(eq, "Float.compare(value.x, this.x) != 0");
        assert_eq!(hash.expr, "(this.x != +0.0f ? Float.floatToIntBits(this.x) : 0)");
        assert_eq!(render, "x");
    }

    #[test]
    fn test_double_rules() {
        let (eq, hash, _) = check("double");
        assert_eq!(eq, "Double.compare(value.x, this.x) != 0");
        assert_eq!(hash.setup.as_deref(), Some("temp = Double.doubleToLongBits(this.x)"));
        assert_eq!(hash.statement(), "result = 31 * result + (int) (temp ^ (temp >>> 32))");
    }

    #[test]
    fn test_array_rules() {
        let (eq, hash, render) = check("byte[]");
        assert_eq!(eq, "!Arrays.equals(this.x, value.x)");
        assert_eq!(hash.expr, "(this.x != null ? Arrays.hashCode(this.x) : 0)");
        assert_eq!(render, "Arrays.toString(x)");
    }

    #[test]
    fn test_reference_rules() {
        let (eq, hash, render) = check("java.lang.String");
        assert_eq!(eq, "this.x != null ? !this.x.equals(value.x) : value.x != null");
        assert_eq!(hash.expr, "(this.x != null ? this.x.hashCode() : 0)");
        assert_eq!(render, "x");
    }

    #[test]
    fn test_fields_named_like_locals_are_qualified() {
        let fields = vec![
            FieldDescriptor::new("value", "java.lang.String"),
            FieldDescriptor::new("o", "int"),
            FieldDescriptor::new("result", "int"),
            FieldDescriptor::new("temp", "double"),
        ];
        let ty = TypeDescriptor::new("p", "Shadowed", fields.clone());

        assert_eq!(
            equality_test(&ty, &fields[0]).unwrap(),
            "this.value != null ? !this.value.equals(value.value) : value.value != null"
        );
        assert_eq!(equality_test(&ty, &fields[1]).unwrap(), "this.o != value.o");
        assert_eq!(
            hash_contribution(&ty, &fields[2]).unwrap().statement(),
            "result = 31 * result + this.result"
        );
        assert_eq!(
            hash_contribution(&ty, &fields[3]).unwrap().setup.as_deref(),
            Some("temp = Double.doubleToLongBits(this.temp)")
        );
    }

    #[test]
    fn test_void_is_rejected_by_every_rule() {
        let field = FieldDescriptor::new("run", "void");
        let ty = TypeDescriptor::new("io.example", "Task", vec![field.clone()]);

        for err in [
            equality_test(&ty, &field).unwrap_err(),
            hash_contribution(&ty, &field).unwrap_err(),
            string_render(&ty, &field).unwrap_err(),
        ] {
            match err {
                GenerationError::UnsupportedTypeKind {
                    type_name,
                    field,
                    field_type,
                } => {
                    assert_eq!(type_name, "io.example.Task");
                    assert_eq!(field, "run");
                    assert_eq!(field_type, "void");
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }
}
