use keel_model::TypeKind;
use thiserror::Error;

/// Errors from evaluating a generated value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("{type_name} has no field '{field}'")]
    UnknownField { type_name: String, field: String },

    #[error("field '{field}' of {type_name} is {expected}, cannot hold a {found}")]
    KindMismatch {
        type_name: String,
        field: String,
        expected: TypeKind,
        found: &'static str,
    },

    #[error("field '{field}' of {type_name} has type '{field_type}', which has no value semantics")]
    UnsupportedKind {
        type_name: String,
        field: String,
        field_type: String,
    },
}
