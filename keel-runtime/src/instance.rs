//! Evaluation of a generated builder and its value class.
//!
//! [`ValueBuilder`] and [`ValueInstance`] behave like `<Type>Builder` and its
//! nested `Value` for one [`TypeDescriptor`]: setters store without copying,
//! `build` snapshots the current fields, and `equals`, `hashCode` and
//! `toString` apply the per-kind rule of each field in declaration order.

use std::{cmp::Ordering, rc::Rc};

use keel_model::{FieldDescriptor, FloatKind, IntegralKind, TypeDescriptor, TypeKind};

use crate::{
    RuntimeError,
    numeric::{double_compare, double_to_long_bits, float_compare, float_to_int_bits, fold_long},
    value::{JavaValue, arrays_equals, arrays_hash, arrays_to_string},
};

/// Mutable builder state; unset fields hold Java defaults.
#[derive(Debug, Clone)]
pub struct ValueBuilder {
    ty: Rc<TypeDescriptor>,
    slots: Vec<JavaValue>,
}

impl ValueBuilder {
    /// Create a builder for `ty`.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::UnsupportedKind`] if a field has no value semantics.
    pub fn new(ty: TypeDescriptor) -> Result<Self, RuntimeError> {
        let slots = ty
            .fields
            .iter()
            .map(|field| default_value(&ty, field))
            .collect::<Result<_, _>>()?;
        Ok(Self {
            ty: Rc::new(ty),
            slots,
        })
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.ty
    }

    /// The fluent setter of `field`. The value is stored as is.
    pub fn set(&mut self, field: &str, value: JavaValue) -> Result<&mut Self, RuntimeError> {
        let index = self
            .ty
            .field_index(field)
            .ok_or_else(|| RuntimeError::UnknownField {
                type_name: self.ty.qualified_name(),
                field: field.to_string(),
            })?;
        check_assignable(&self.ty, &self.ty.fields[index], &value)?;
        self.slots[index] = value;
        Ok(self)
    }

    /// `build()`: a new instance holding the current field values.
    pub fn build(&self) -> Rc<ValueInstance> {
        Rc::new(ValueInstance {
            ty: Rc::clone(&self.ty),
            slots: self.slots.clone(),
        })
    }
}

/// An immutable generated value.
#[derive(Debug)]
pub struct ValueInstance {
    ty: Rc<TypeDescriptor>,
    slots: Vec<JavaValue>,
}

impl ValueInstance {
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.ty
    }

    /// The accessor of `field`.
    pub fn get(&self, field: &str) -> Option<&JavaValue> {
        self.ty.field_index(field).map(|index| &self.slots[index])
    }

    /// `equals(Object o)`.
    pub fn java_equals(&self, other: &JavaValue) -> bool {
        let other = match other {
            JavaValue::Value(other) => other,
            _ => return false,
        };
        if std::ptr::eq(self, Rc::as_ptr(other)) {
            return true;
        }
        if self.ty.qualified_name() != other.ty.qualified_name() {
            return false;
        }
        self.ty
            .fields
            .iter()
            .zip(self.slots.iter().zip(&other.slots))
            .all(|(field, (mine, theirs))| !differs(field.type_kind, mine, theirs))
    }

    /// `hashCode()`.
    pub fn hash_code(&self) -> i32 {
        self.ty
            .fields
            .iter()
            .zip(&self.slots)
            .fold(0i32, |result, (field, slot)| {
                result
                    .wrapping_mul(31)
                    .wrapping_add(hash_contribution(field.type_kind, slot))
            })
    }

    /// `toString()`.
    pub fn to_java_string(&self) -> String {
        let rendered: Vec<String> = self
            .ty
            .fields
            .iter()
            .zip(&self.slots)
            .map(|(field, slot)| format!("{}={}", field.name, render(field.type_kind, slot)))
            .collect();
        format!("{}{{{}}}", self.ty.simple_name, rendered.join(", "))
    }
}

/// The mismatch test of a field.
fn differs(kind: TypeKind, mine: &JavaValue, theirs: &JavaValue) -> bool {
    match (kind, mine, theirs) {
        (TypeKind::FloatingPoint(FloatKind::Float), JavaValue::Float(a), JavaValue::Float(b)) => {
            float_compare(*b, *a) != Ordering::Equal
        }
        (TypeKind::FloatingPoint(FloatKind::Double), JavaValue::Double(a), JavaValue::Double(b)) => {
            double_compare(*b, *a) != Ordering::Equal
        }
        (TypeKind::Integral(_) | TypeKind::Boolean, a, b) => !a.object_equals(b),
        (TypeKind::Array, a, b) => !arrays_equals(a, b),
        (_, JavaValue::Null, b) => !b.is_null(),
        (_, a, b) => !a.object_equals(b),
    }
}

/// The hash contribution of a field.
fn hash_contribution(kind: TypeKind, slot: &JavaValue) -> i32 {
    match (kind, slot) {
        (TypeKind::Integral(IntegralKind::Long), JavaValue::Long(v)) => fold_long(*v),
        // -0.0f compares equal to +0.0f and contributes 0 as well
        (TypeKind::FloatingPoint(FloatKind::Float), JavaValue::Float(v)) => {
            if *v != 0.0 {
                float_to_int_bits(*v)
            } else {
                0
            }
        }
        (TypeKind::FloatingPoint(FloatKind::Double), JavaValue::Double(v)) => {
            fold_long(double_to_long_bits(*v))
        }
        (TypeKind::Boolean, JavaValue::Boolean(v)) => *v as i32,
        (TypeKind::Array, slot) => arrays_hash(slot),
        (_, slot) => slot.object_hash(),
    }
}

/// The `toString` rendering of a field.
fn render(kind: TypeKind, slot: &JavaValue) -> String {
    match kind {
        TypeKind::Array => arrays_to_string(slot),
        _ => slot.to_string(),
    }
}

fn default_value(ty: &TypeDescriptor, field: &FieldDescriptor) -> Result<JavaValue, RuntimeError> {
    let value = match field.type_kind {
        TypeKind::Integral(IntegralKind::Byte) => JavaValue::Byte(0),
        TypeKind::Integral(IntegralKind::Short) => JavaValue::Short(0),
        TypeKind::Integral(IntegralKind::Char) => JavaValue::Char(0),
        TypeKind::Integral(IntegralKind::Int) => JavaValue::Int(0),
        TypeKind::Integral(IntegralKind::Long) => JavaValue::Long(0),
        TypeKind::FloatingPoint(FloatKind::Float) => JavaValue::Float(0.0),
        TypeKind::FloatingPoint(FloatKind::Double) => JavaValue::Double(0.0),
        TypeKind::Boolean => JavaValue::Boolean(false),
        TypeKind::Array | TypeKind::Reference => JavaValue::Null,
        TypeKind::Void => {
            return Err(RuntimeError::UnsupportedKind {
                type_name: ty.qualified_name(),
                field: field.name.clone(),
                field_type: field.type_name.clone(),
            });
        }
    };
    Ok(value)
}

fn check_assignable(
    ty: &TypeDescriptor,
    field: &FieldDescriptor,
    value: &JavaValue,
) -> Result<(), RuntimeError> {
    let assignable = match (field.type_kind, value) {
        (TypeKind::Integral(IntegralKind::Byte), JavaValue::Byte(_))
        | (TypeKind::Integral(IntegralKind::Short), JavaValue::Short(_))
        | (TypeKind::Integral(IntegralKind::Char), JavaValue::Char(_))
        | (TypeKind::Integral(IntegralKind::Int), JavaValue::Int(_))
        | (TypeKind::Integral(IntegralKind::Long), JavaValue::Long(_))
        | (TypeKind::FloatingPoint(FloatKind::Float), JavaValue::Float(_))
        | (TypeKind::FloatingPoint(FloatKind::Double), JavaValue::Double(_))
        | (TypeKind::Boolean, JavaValue::Boolean(_))
        | (TypeKind::Array, JavaValue::Array(_) | JavaValue::Null) => true,
        (TypeKind::Reference, JavaValue::Array(_)) => false,
        (TypeKind::Reference, _) => true,
        _ => false,
    };
    if assignable {
        Ok(())
    } else {
        Err(RuntimeError::KindMismatch {
            type_name: ty.qualified_name(),
            field: field.name.clone(),
            expected: field.type_kind,
            found: value.type_name(),
        })
    }
}
