//! Validation context and utilities for manifest parsing.

use std::sync::Arc;

use miette::SourceSpan;

use crate::{Result, error::SourceContext};

/// Validation context that carries source information.
///
/// Nested contexts share the source and record the path to the entry being
/// validated, e.g. the type a member belongs to.
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    source: Arc<SourceContext>,
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut path = self.path.clone();
        path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path,
        }
    }

    /// Describe `kind` for error messages, e.g. "member of 'io.example.Foo'".
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} of '{}'", kind, self.path.join("."))
        }
    }

    /// Span of the `occurrence`-th `name = "<value>"` entry.
    pub fn find_span(&self, value: &str, occurrence: usize) -> Option<SourceSpan> {
        find_name_spans(self.source.src(), value)
            .into_iter()
            .nth(occurrence)
    }

    /// Validate a simple Java identifier.
    pub fn validate_identifier(&self, name: &str, kind: &str) -> Result<()> {
        self.check_segment(name, name, kind)
    }

    /// Validate a dotted Java name; every segment must be an identifier.
    pub fn validate_qualified_name(&self, name: &str, kind: &str) -> Result<()> {
        for segment in name.split('.') {
            self.check_segment(segment, name, kind)?;
        }
        Ok(())
    }

    fn check_segment(&self, segment: &str, name: &str, kind: &str) -> Result<()> {
        let span = self.find_span(name, 0);

        if is_java_keyword(segment) {
            return Err(self.source.reserved_keyword_error(
                segment,
                self.context_for(kind),
                span,
            ));
        }

        if let Some(reason) = identifier_problem(segment) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                span,
            ));
        }

        Ok(())
    }
}

/// Java reserved words, including the literals and `_`.
pub(crate) const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try",
    "void", "volatile", "while",
    // literals
    "true", "false", "null",
    "_",
];

pub(crate) fn is_java_keyword(name: &str) -> bool {
    JAVA_KEYWORDS.contains(&name)
}

/// Returns why `name` is not a Java identifier, or `None` if it is one.
pub(crate) fn identifier_problem(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();
    match chars.next() {
        None => return Some("name cannot be empty"),
        Some(c) if c.is_ascii_digit() => return Some("name cannot start with a digit"),
        Some(c) if !is_identifier_start(c) => {
            return Some("name must start with a letter, '_' or '$'");
        }
        Some(_) => {}
    }
    if chars.any(|c| !is_identifier_part(c)) {
        return Some("name contains invalid characters");
    }
    None
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_identifier_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Spans of every `name = "<value>"` entry in the TOML source, in order.
pub(crate) fn find_name_spans(src: &str, value: &str) -> Vec<SourceSpan> {
    let mut spans = Vec::new();
    for quote in ['"', '\''] {
        let pattern = format!("name = {quote}{value}{quote}");
        // The value starts after `name = "` (8 characters)
        spans.extend(
            src.match_indices(&pattern)
                .map(|(pos, _)| SourceSpan::from((pos + 8, value.len()))),
        );
    }
    spans.sort_by_key(|span| span.offset());
    spans
}
