//! Manifest parsing from files and strings.

use std::{collections::HashSet, path::Path, str::FromStr};

use super::{Manifest, validate::ParseContext};
use crate::{Error, Result, error::SourceContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "keel.toml")
    }
}

impl Manifest {
    /// Parse a keel.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a keel.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, content, filename)?;
    Ok(manifest)
}

fn validate_manifest(manifest: &Manifest, src: &str, filename: &str) -> Result<()> {
    let ctx = ParseContext::new(src, filename);
    let source = ctx.source_context();

    if manifest.generator.generated && manifest.generator.name.trim().is_empty() {
        return Err(source.validation_error(
            "generator name cannot be empty while generated = true",
            None,
        ));
    }

    if manifest.generator.generated {
        ctx.validate_qualified_name(&manifest.generator.annotation, "annotation")?;
    }

    let mut names = HashSet::new();
    for entry in &manifest.types {
        ctx.validate_qualified_name(&entry.name, "type")?;
        if !names.insert(entry.name.as_str()) {
            return Err(duplicate(&ctx, &entry.name, &entry.name, "type"));
        }

        let type_ctx = ctx.push(&entry.name);
        let mut signatures = HashSet::new();
        for member in &entry.members {
            type_ctx.validate_identifier(&member.name, "member")?;
            if member.ty.trim().is_empty() {
                return Err(source.validation_error(
                    format!("member '{}' of '{}' has no type", member.name, entry.name),
                    type_ctx.find_span(&member.name, 0),
                ));
            }
            if member.params.iter().any(|param| param.trim().is_empty()) {
                return Err(source.validation_error(
                    format!("member '{}' of '{}' has an empty parameter type", member.name, entry.name),
                    type_ctx.find_span(&member.name, 0),
                ));
            }
            if !signatures.insert(member.signature()) {
                return Err(duplicate(&type_ctx, &member.name, &member.signature(), "member"));
            }
        }
    }

    for entry in &manifest.types {
        let builder = format!("{}Builder", entry.name);
        if names.contains(builder.as_str()) {
            return Err(source.validation_error(
                format!(
                    "the builder generated for '{}' would replace type '{}'",
                    entry.name, builder
                ),
                ctx.find_span(&builder, 0),
            ));
        }
    }

    Ok(())
}

/// Error for a second declaration of `name`, pointing at both when they can be found.
fn duplicate(ctx: &ParseContext<'_>, name: &str, label: &str, kind: &str) -> Box<Error> {
    let source = ctx.source_context();
    match (ctx.find_span(name, 0), ctx.find_span(name, 1)) {
        (Some(first), Some(second)) => {
            source.duplicate_error(label, ctx.context_for(kind), first, second)
        }
        (first, _) => source.validation_error(
            format!("duplicate {} '{}'", ctx.context_for(kind), label),
            first,
        ),
    }
}
