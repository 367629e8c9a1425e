use std::io;

use keel_model::{NameClash, UnsupportedFieldShape};
use thiserror::Error;

/// Failure to generate one type.
///
/// Every variant names the type it belongs to; generation of other types is
/// not affected.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    UnsupportedFieldShape(#[from] UnsupportedFieldShape),

    #[error(transparent)]
    NameClash(#[from] NameClash),

    #[error(
        "field '{field}' of {type_name} has type '{field_type}', which has no equals/hashCode/toString rule"
    )]
    UnsupportedTypeKind {
        type_name: String,
        field: String,
        field_type: String,
    },

    #[error("failed to write generated source for {type_name}")]
    Emission {
        type_name: String,
        #[source]
        source: io::Error,
    },
}

impl GenerationError {
    /// Qualified name of the type whose generation failed.
    pub fn type_name(&self) -> &str {
        match self {
            GenerationError::UnsupportedFieldShape(shape) => &shape.type_name,
            GenerationError::NameClash(clash) => &clash.type_name,
            GenerationError::UnsupportedTypeKind { type_name, .. } => type_name,
            GenerationError::Emission { type_name, .. } => type_name,
        }
    }

    /// The generation step that failed.
    pub fn phase(&self) -> &'static str {
        match self {
            GenerationError::UnsupportedFieldShape(_) | GenerationError::NameClash(_) => "extract",
            GenerationError::UnsupportedTypeKind { .. } => "synthesize",
            GenerationError::Emission { .. } => "emit",
        }
    }

    /// Message including every underlying cause.
    pub fn detail(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}
