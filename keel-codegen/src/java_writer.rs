//! Java source rendering of emission instructions.

use std::io::{self, Write};

use crate::{
    builder::{CodeBuilder, Indent},
    emit::{Annotation, FieldDecl, MethodDecl, Modifiers, Param, SourceEmitter, TypeDecl},
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Scope {
    Type(String),
    Method,
    Constructor,
    ControlFlow,
}

impl Scope {
    fn describe(&self) -> &'static str {
        match self {
            Scope::Type(_) => "type",
            Scope::Method => "method",
            Scope::Constructor => "constructor",
            Scope::ControlFlow => "control flow",
        }
    }
}

/// Emitter writing Java source text to an [`io::Write`].
///
/// Every call is written through to the underlying writer. Unbalanced
/// `end_*` calls fail with [`io::ErrorKind::InvalidInput`].
///
/// # Example
///
/// ```
/// use keel_codegen::{JavaWriter, Modifier, Modifiers, SourceEmitter, TypeDecl};
///
/// let mut out = Vec::new();
/// let mut writer = JavaWriter::new(&mut out);
/// writer.begin_type(&TypeDecl::class("Foo", Modifiers::of(&[Modifier::Public]))).unwrap();
/// writer.end_type().unwrap();
/// writer.finish().unwrap();
///
/// assert_eq!(String::from_utf8(out).unwrap(), "public class Foo {\n}\n");
/// ```
pub struct JavaWriter<W: Write> {
    out: W,
    code: CodeBuilder,
    scopes: Vec<Scope>,
}

impl<W: Write> JavaWriter<W> {
    /// Create a writer with the default indentation.
    pub fn new(out: W) -> Self {
        Self::with_indent(out, Indent::default())
    }

    pub fn with_indent(out: W, indent: Indent) -> Self {
        Self {
            out,
            code: CodeBuilder::new(indent),
            scopes: Vec::new(),
        }
    }

    /// Check that every scope was closed and return the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(scope) = self.scopes.last() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("unclosed {} at end of output", scope.describe()),
            ));
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn flush_code(&mut self) -> io::Result<()> {
        let text = self.code.take();
        self.out.write_all(text.as_bytes())
    }

    fn open(&mut self, header: &str, scope: Scope) -> io::Result<()> {
        self.code.push_line(&format!("{} {{", header)).push_indent();
        self.scopes.push(scope);
        self.flush_code()
    }

    fn close(&mut self, expected: &'static str) -> io::Result<()> {
        match self.scopes.pop() {
            Some(scope) if scope.describe() == expected => {
                self.code.push_dedent().push_line("}");
                self.flush_code()
            }
            Some(scope) => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("cannot end {} inside {}", expected, scope.describe()),
            )),
            None => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("cannot end {} outside of any scope", expected),
            )),
        }
    }

    fn enclosing_type(&self) -> Option<&str> {
        self.scopes.iter().rev().find_map(|scope| match scope {
            Scope::Type(name) => Some(name.as_str()),
            _ => None,
        })
    }
}

fn with_modifiers(modifiers: &Modifiers, rest: &str) -> String {
    if modifiers.is_empty() {
        rest.to_string()
    } else {
        format!("{} {}", modifiers, rest)
    }
}

fn join_params(params: &[Param]) -> String {
    params
        .iter()
        .map(Param::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl<W: Write> SourceEmitter for JavaWriter<W> {
    fn emit_package(&mut self, package: &str) -> io::Result<()> {
        self.code.push_line(&format!("package {};", package));
        self.flush_code()
    }

    fn emit_imports(&mut self, imports: &[String]) -> io::Result<()> {
        let mut sorted: Vec<&String> = imports.iter().collect();
        sorted.sort();
        sorted.dedup();
        for import in sorted {
            self.code.push_line(&format!("import {};", import));
        }
        self.flush_code()
    }

    fn emit_annotation(&mut self, annotation: &Annotation) -> io::Result<()> {
        self.code.push_line(&annotation.to_string());
        self.flush_code()
    }

    fn begin_type(&mut self, decl: &TypeDecl) -> io::Result<()> {
        let mut header = with_modifiers(&decl.modifiers, &format!("{} {}", decl.kind, decl.name));
        if let Some(extends) = &decl.extends {
            header.push_str(&format!(" extends {}", extends));
        }
        if !decl.implements.is_empty() {
            header.push_str(&format!(" implements {}", decl.implements.join(", ")));
        }
        self.open(&header, Scope::Type(decl.name.clone()))
    }

    fn end_type(&mut self) -> io::Result<()> {
        self.close("type")
    }

    fn emit_field(&mut self, field: &FieldDecl) -> io::Result<()> {
        let line = with_modifiers(&field.modifiers, &format!("{} {};", field.ty, field.name));
        self.code.push_line(&line);
        self.flush_code()
    }

    fn begin_constructor(&mut self, modifiers: &Modifiers, params: &[Param]) -> io::Result<()> {
        let name = self
            .enclosing_type()
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, "constructor outside of a type")
            })?
            .to_string();
        let header = with_modifiers(modifiers, &format!("{}({})", name, join_params(params)));
        self.open(&header, Scope::Constructor)
    }

    fn end_constructor(&mut self) -> io::Result<()> {
        self.close("constructor")
    }

    fn begin_method(&mut self, method: &MethodDecl) -> io::Result<()> {
        let header = with_modifiers(
            &method.modifiers,
            &format!(
                "{} {}({})",
                method.return_type,
                method.name,
                join_params(&method.params)
            ),
        );
        self.open(&header, Scope::Method)
    }

    fn end_method(&mut self) -> io::Result<()> {
        self.close("method")
    }

    fn emit_statement(&mut self, statement: &str) -> io::Result<()> {
        self.code.push_wrapped(&format!("{};", statement));
        self.flush_code()
    }

    fn begin_control_flow(&mut self, control: &str) -> io::Result<()> {
        self.open(control, Scope::ControlFlow)
    }

    fn end_control_flow(&mut self) -> io::Result<()> {
        self.close("control flow")
    }

    fn emit_empty_line(&mut self) -> io::Result<()> {
        self.code.push_blank();
        self.flush_code()
    }
}
