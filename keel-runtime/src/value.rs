//! Java values held by the fields of an evaluated instance.

use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    instance::ValueInstance,
    numeric::{double_to_long_bits, double_to_string, float_to_int_bits, float_to_string, fold_long, string_hash},
};

/// A shared, mutable Java array. Clones alias the same storage.
pub type ArrayRef = Rc<RefCell<Vec<JavaValue>>>;

/// A Java primitive or reference.
///
/// Primitives stored in a reference field behave as their boxed wrapper.
#[derive(Debug, Clone)]
pub enum JavaValue {
    Byte(i8),
    Short(i16),
    Char(u16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Boolean(bool),
    Null,
    String(Rc<str>),
    Array(ArrayRef),
    Value(Rc<ValueInstance>),
}

impl JavaValue {
    pub fn string(text: &str) -> Self {
        JavaValue::String(Rc::from(text))
    }

    /// A new array holding `elements`.
    pub fn array(elements: Vec<JavaValue>) -> Self {
        JavaValue::Array(Rc::new(RefCell::new(elements)))
    }

    pub fn char(c: char) -> Self {
        let mut units = [0u16; 2];
        JavaValue::Char(c.encode_utf16(&mut units)[0])
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JavaValue::Null)
    }

    /// Name of the primitive type or the runtime class.
    pub fn type_name(&self) -> &'static str {
        match self {
            JavaValue::Byte(_) => "byte",
            JavaValue::Short(_) => "short",
            JavaValue::Char(_) => "char",
            JavaValue::Int(_) => "int",
            JavaValue::Long(_) => "long",
            JavaValue::Float(_) => "float",
            JavaValue::Double(_) => "double",
            JavaValue::Boolean(_) => "boolean",
            JavaValue::Null => "null",
            JavaValue::String(_) => "String",
            JavaValue::Array(_) => "array",
            JavaValue::Value(_) => "Value",
        }
    }

    /// Reference identity (`==` on references, value equality on primitives).
    pub fn same(&self, other: &JavaValue) -> bool {
        match (self, other) {
            (JavaValue::Null, JavaValue::Null) => true,
            (JavaValue::String(a), JavaValue::String(b)) => Rc::ptr_eq(a, b),
            (JavaValue::Array(a), JavaValue::Array(b)) => Rc::ptr_eq(a, b),
            (JavaValue::Value(a), JavaValue::Value(b)) => Rc::ptr_eq(a, b),
            _ => self.object_equals(other),
        }
    }

    /// `Object.equals` of the value, primitives treated as their wrappers.
    ///
    /// Arrays compare by identity, as `Object.equals` does for them.
    pub fn object_equals(&self, other: &JavaValue) -> bool {
        match (self, other) {
            (JavaValue::Byte(a), JavaValue::Byte(b)) => a == b,
            (JavaValue::Short(a), JavaValue::Short(b)) => a == b,
            (JavaValue::Char(a), JavaValue::Char(b)) => a == b,
            (JavaValue::Int(a), JavaValue::Int(b)) => a == b,
            (JavaValue::Long(a), JavaValue::Long(b)) => a == b,
            (JavaValue::Float(a), JavaValue::Float(b)) => float_to_int_bits(*a) == float_to_int_bits(*b),
            (JavaValue::Double(a), JavaValue::Double(b)) => {
                double_to_long_bits(*a) == double_to_long_bits(*b)
            }
            (JavaValue::Boolean(a), JavaValue::Boolean(b)) => a == b,
            (JavaValue::String(a), JavaValue::String(b)) => a == b,
            (JavaValue::Array(a), JavaValue::Array(b)) => Rc::ptr_eq(a, b),
            (JavaValue::Value(a), _) => a.java_equals(other),
            _ => false,
        }
    }

    /// `Object.hashCode` of a non-null value, primitives treated as their wrappers.
    pub fn object_hash(&self) -> i32 {
        match self {
            JavaValue::Byte(v) => *v as i32,
            JavaValue::Short(v) => *v as i32,
            JavaValue::Char(v) => *v as i32,
            JavaValue::Int(v) => *v,
            JavaValue::Long(v) => fold_long(*v),
            JavaValue::Float(v) => float_to_int_bits(*v),
            JavaValue::Double(v) => fold_long(double_to_long_bits(*v)),
            JavaValue::Boolean(v) => {
                if *v {
                    1231
                } else {
                    1237
                }
            }
            JavaValue::Null => 0,
            JavaValue::String(text) => string_hash(text),
            // identity hash: stable for the lifetime of the array
            JavaValue::Array(array) => Rc::as_ptr(array) as usize as i32,
            JavaValue::Value(value) => value.hash_code(),
        }
    }
}

/// `Arrays.equals`: same length and pairwise-equal elements; two nulls are equal.
pub fn arrays_equals(a: &JavaValue, b: &JavaValue) -> bool {
    match (a, b) {
        (JavaValue::Null, JavaValue::Null) => true,
        (JavaValue::Array(a), JavaValue::Array(b)) => {
            if Rc::ptr_eq(a, b) {
                return true;
            }
            let (a, b) = (a.borrow(), b.borrow());
            a.len() == b.len()
                && a.iter().zip(b.iter()).all(|(x, y)| match (x, y) {
                    (JavaValue::Null, JavaValue::Null) => true,
                    (JavaValue::Null, _) | (_, JavaValue::Null) => false,
                    (x, y) => x.object_equals(y),
                })
        }
        _ => false,
    }
}

/// `Arrays.hashCode`.
pub fn arrays_hash(array: &JavaValue) -> i32 {
    match array {
        JavaValue::Array(elements) => elements
            .borrow()
            .iter()
            .fold(1i32, |hash, element| hash.wrapping_mul(31).wrapping_add(element.object_hash())),
        _ => 0,
    }
}

/// `Arrays.toString`.
pub fn arrays_to_string(array: &JavaValue) -> String {
    match array {
        JavaValue::Array(elements) => {
            let rendered: Vec<String> = elements.borrow().iter().map(JavaValue::to_string).collect();
            format!("[{}]", rendered.join(", "))
        }
        _ => "null".to_string(),
    }
}

/// `String.valueOf`.
impl fmt::Display for JavaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JavaValue::Byte(v) => write!(f, "{}", v),
            JavaValue::Short(v) => write!(f, "{}", v),
            JavaValue::Char(v) => {
                let c = char::decode_utf16([*v]).next().and_then(|r| r.ok());
                write!(f, "{}", c.unwrap_or(char::REPLACEMENT_CHARACTER))
            }
            JavaValue::Int(v) => write!(f, "{}", v),
            JavaValue::Long(v) => write!(f, "{}", v),
            JavaValue::Float(v) => f.write_str(&float_to_string(*v)),
            JavaValue::Double(v) => f.write_str(&double_to_string(*v)),
            JavaValue::Boolean(v) => write!(f, "{}", v),
            JavaValue::Null => f.write_str("null"),
            JavaValue::String(text) => f.write_str(text),
            JavaValue::Array(array) => write!(f, "[@{:x}", Rc::as_ptr(array) as usize),
            JavaValue::Value(value) => f.write_str(&value.to_java_string()),
        }
    }
}

impl From<Rc<ValueInstance>> for JavaValue {
    fn from(value: Rc<ValueInstance>) -> Self {
        JavaValue::Value(value)
    }
}
