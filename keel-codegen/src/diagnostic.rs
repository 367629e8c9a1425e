//! Diagnostics reported for a generation run.

use serde::Serialize;

use crate::GenerationError;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Generation of the type failed.
    Error,
    /// The type was generated or skipped, but something deserves attention.
    Warning,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A message about one type of a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Step that produced the diagnostic ("extract", "synthesize", "emit").
    pub phase: String,
    pub message: String,
    /// Qualified name of the type concerned.
    pub location: Option<String>,
}

impl Diagnostic {
    pub fn error(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            phase: phase.into(),
            message: message.into(),
            location: None,
        }
    }

    pub fn warning(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            phase: phase.into(),
            message: message.into(),
            location: None,
        }
    }

    /// Attach the type the diagnostic is about.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl From<&GenerationError> for Diagnostic {
    fn from(err: &GenerationError) -> Self {
        Diagnostic::error(err.phase(), err.detail()).at(err.type_name())
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " (at {})", loc)?;
        }
        Ok(())
    }
}
