//! Structural emission instructions.
//!
//! A [`GenerationPlan`] is an ordered list of [`Instruction`]s. Plans are
//! produced by the synthesizer and replayed into a [`SourceEmitter`], which
//! owns all concrete syntax.

use std::{collections::BTreeSet, fmt, io};

/// A declaration modifier.
///
/// Variants are ordered as they are written in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Static,
    Final,
}

impl Modifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Abstract => "abstract",
            Modifier::Static => "static",
            Modifier::Final => "final",
        }
    }
}

/// A set of modifiers, rendered in canonical order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modifiers(BTreeSet<Modifier>);

impl Modifiers {
    /// Build a modifier set from a list.
    pub fn of(modifiers: &[Modifier]) -> Self {
        Self(modifiers.iter().copied().collect())
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        self.0.contains(&modifier)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, modifier) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(modifier.as_str())?;
        }
        Ok(())
    }
}

/// An annotation with optional arguments.
///
/// Argument values are source expressions and are emitted verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub name: String,
    pub arguments: Vec<(String, String)>,
}

impl Annotation {
    /// An annotation without arguments (e.g., `@Override`).
    pub fn marker(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    /// An annotation with a single `value` argument (e.g., `@Generated("keel")`).
    pub fn value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::marker(name).with_argument("value", value)
    }

    pub fn with_argument(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.arguments.push((key.into(), value.into()));
        self
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)?;
        match self.arguments.as_slice() {
            [] => Ok(()),
            [(key, value)] if key == "value" => write!(f, "({})", value),
            arguments => {
                f.write_str("(")?;
                for (i, (key, value)) in arguments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{} = {}", key, value)?;
                }
                f.write_str(")")
            }
        }
    }
}

/// A method or constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub annotations: Vec<Annotation>,
    pub ty: String,
    pub name: String,
}

impl Param {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            annotations: Vec::new(),
            ty: ty.into(),
            name: name.into(),
        }
    }

    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for annotation in &self.annotations {
            write!(f, "{} ", annotation)?;
        }
        write!(f, "{} {}", self.ty, self.name)
    }
}

/// A type declaration header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    /// Declaration keyword (e.g., "class").
    pub kind: &'static str,
    pub modifiers: Modifiers,
    pub extends: Option<String>,
    pub implements: Vec<String>,
}

impl TypeDecl {
    /// A class declaration.
    pub fn class(name: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            name: name.into(),
            kind: "class",
            modifiers,
            extends: None,
            implements: Vec::new(),
        }
    }

    pub fn implementing(mut self, interface: impl Into<String>) -> Self {
        self.implements.push(interface.into());
        self
    }
}

/// A field declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub ty: String,
    pub name: String,
    pub modifiers: Modifiers,
}

/// A method declaration header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    pub return_type: String,
    pub name: String,
    pub modifiers: Modifiers,
    pub params: Vec<Param>,
}

impl MethodDecl {
    pub fn new(return_type: impl Into<String>, name: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            return_type: return_type.into(),
            name: name.into(),
            modifiers,
            params: Vec::new(),
        }
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }
}

/// Receiver of structural emission calls.
///
/// Calls arrive in a well-nested order: every `begin_*` is matched by the
/// corresponding `end_*`.
pub trait SourceEmitter {
    fn emit_package(&mut self, package: &str) -> io::Result<()>;
    fn emit_imports(&mut self, imports: &[String]) -> io::Result<()>;
    fn emit_annotation(&mut self, annotation: &Annotation) -> io::Result<()>;
    fn begin_type(&mut self, decl: &TypeDecl) -> io::Result<()>;
    fn end_type(&mut self) -> io::Result<()>;
    fn emit_field(&mut self, field: &FieldDecl) -> io::Result<()>;
    fn begin_constructor(&mut self, modifiers: &Modifiers, params: &[Param]) -> io::Result<()>;
    fn end_constructor(&mut self) -> io::Result<()>;
    fn begin_method(&mut self, method: &MethodDecl) -> io::Result<()>;
    fn end_method(&mut self) -> io::Result<()>;
    fn emit_statement(&mut self, statement: &str) -> io::Result<()>;
    fn begin_control_flow(&mut self, control: &str) -> io::Result<()>;
    fn end_control_flow(&mut self) -> io::Result<()>;
    fn emit_empty_line(&mut self) -> io::Result<()>;
}

/// One structural emission instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Package(String),
    Imports(Vec<String>),
    Annotation(Annotation),
    BeginType(TypeDecl),
    EndType,
    Field(FieldDecl),
    BeginConstructor {
        modifiers: Modifiers,
        params: Vec<Param>,
    },
    EndConstructor,
    BeginMethod(MethodDecl),
    EndMethod,
    Statement(String),
    BeginControlFlow(String),
    EndControlFlow,
    EmptyLine,
}

impl Instruction {
    /// Forward this instruction to an emitter.
    pub fn apply<E: SourceEmitter + ?Sized>(&self, emitter: &mut E) -> io::Result<()> {
        match self {
            Instruction::Package(package) => emitter.emit_package(package),
            Instruction::Imports(imports) => emitter.emit_imports(imports),
            Instruction::Annotation(annotation) => emitter.emit_annotation(annotation),
            Instruction::BeginType(decl) => emitter.begin_type(decl),
            Instruction::EndType => emitter.end_type(),
            Instruction::Field(field) => emitter.emit_field(field),
            Instruction::BeginConstructor { modifiers, params } => {
                emitter.begin_constructor(modifiers, params)
            }
            Instruction::EndConstructor => emitter.end_constructor(),
            Instruction::BeginMethod(method) => emitter.begin_method(method),
            Instruction::EndMethod => emitter.end_method(),
            Instruction::Statement(statement) => emitter.emit_statement(statement),
            Instruction::BeginControlFlow(control) => emitter.begin_control_flow(control),
            Instruction::EndControlFlow => emitter.end_control_flow(),
            Instruction::EmptyLine => emitter.emit_empty_line(),
        }
    }
}

/// Ordered emission instructions for one generated source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationPlan {
    instructions: Vec<Instruction>,
}

impl GenerationPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an instruction.
    pub fn push(&mut self, instruction: Instruction) -> &mut Self {
        self.instructions.push(instruction);
        self
    }

    pub fn package(&mut self, package: impl Into<String>) -> &mut Self {
        self.push(Instruction::Package(package.into()))
    }

    pub fn imports(&mut self, imports: Vec<String>) -> &mut Self {
        self.push(Instruction::Imports(imports))
    }

    pub fn annotation(&mut self, annotation: Annotation) -> &mut Self {
        self.push(Instruction::Annotation(annotation))
    }

    pub fn begin_type(&mut self, decl: TypeDecl) -> &mut Self {
        self.push(Instruction::BeginType(decl))
    }

    pub fn end_type(&mut self) -> &mut Self {
        self.push(Instruction::EndType)
    }

    pub fn field(&mut self, ty: impl Into<String>, name: impl Into<String>, modifiers: Modifiers) -> &mut Self {
        self.push(Instruction::Field(FieldDecl {
            ty: ty.into(),
            name: name.into(),
            modifiers,
        }))
    }

    pub fn begin_constructor(&mut self, modifiers: Modifiers, params: Vec<Param>) -> &mut Self {
        self.push(Instruction::BeginConstructor { modifiers, params })
    }

    pub fn end_constructor(&mut self) -> &mut Self {
        self.push(Instruction::EndConstructor)
    }

    pub fn begin_method(&mut self, method: MethodDecl) -> &mut Self {
        self.push(Instruction::BeginMethod(method))
    }

    pub fn end_method(&mut self) -> &mut Self {
        self.push(Instruction::EndMethod)
    }

    pub fn statement(&mut self, statement: impl Into<String>) -> &mut Self {
        self.push(Instruction::Statement(statement.into()))
    }

    pub fn begin_control_flow(&mut self, control: impl Into<String>) -> &mut Self {
        self.push(Instruction::BeginControlFlow(control.into()))
    }

    pub fn end_control_flow(&mut self) -> &mut Self {
        self.push(Instruction::EndControlFlow)
    }

    /// Emit `control { statement; }`.
    pub fn guard(&mut self, control: impl Into<String>, statement: impl Into<String>) -> &mut Self {
        self.begin_control_flow(control)
            .statement(statement)
            .end_control_flow()
    }

    pub fn empty_line(&mut self) -> &mut Self {
        self.push(Instruction::EmptyLine)
    }

    /// Replay every instruction, in order, into an emitter.
    ///
    /// Stops at the first emitter failure.
    pub fn replay<E: SourceEmitter + ?Sized>(&self, emitter: &mut E) -> io::Result<()> {
        for instruction in &self.instructions {
            instruction.apply(emitter)?;
        }
        Ok(())
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// All statements of the plan, in order.
    pub fn statements(&self) -> impl Iterator<Item = &str> {
        self.instructions.iter().filter_map(|i| match i {
            Instruction::Statement(s) => Some(s.as_str()),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

/// Recording emitter: captures calls as instructions.
impl SourceEmitter for GenerationPlan {
    fn emit_package(&mut self, package: &str) -> io::Result<()> {
        self.package(package);
        Ok(())
    }

    fn emit_imports(&mut self, imports: &[String]) -> io::Result<()> {
        self.imports(imports.to_vec());
        Ok(())
    }

    fn emit_annotation(&mut self, annotation: &Annotation) -> io::Result<()> {
        self.annotation(annotation.clone());
        Ok(())
    }

    fn begin_type(&mut self, decl: &TypeDecl) -> io::Result<()> {
        GenerationPlan::begin_type(self, decl.clone());
        Ok(())
    }

    fn end_type(&mut self) -> io::Result<()> {
        GenerationPlan::end_type(self);
        Ok(())
    }

    fn emit_field(&mut self, field: &FieldDecl) -> io::Result<()> {
        self.push(Instruction::Field(field.clone()));
        Ok(())
    }

    fn begin_constructor(&mut self, modifiers: &Modifiers, params: &[Param]) -> io::Result<()> {
        GenerationPlan::begin_constructor(self, modifiers.clone(), params.to_vec());
        Ok(())
    }

    fn end_constructor(&mut self) -> io::Result<()> {
        GenerationPlan::end_constructor(self);
        Ok(())
    }

    fn begin_method(&mut self, method: &MethodDecl) -> io::Result<()> {
        GenerationPlan::begin_method(self, method.clone());
        Ok(())
    }

    fn end_method(&mut self) -> io::Result<()> {
        GenerationPlan::end_method(self);
        Ok(())
    }

    fn emit_statement(&mut self, statement: &str) -> io::Result<()> {
        self.statement(statement);
        Ok(())
    }

    fn begin_control_flow(&mut self, control: &str) -> io::Result<()> {
        GenerationPlan::begin_control_flow(self, control);
        Ok(())
    }

    fn end_control_flow(&mut self) -> io::Result<()> {
        GenerationPlan::end_control_flow(self);
        Ok(())
    }

    fn emit_empty_line(&mut self) -> io::Result<()> {
        self.empty_line();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_canonical_order() {
        let modifiers = Modifiers::of(&[Modifier::Final, Modifier::Static, Modifier::Private]);
        assert_eq!(modifiers.to_string(), "private static final");
        assert!(modifiers.contains(Modifier::Static));
        assert!(Modifiers::default().is_empty());
    }

    #[test]
    fn test_annotation_display() {
        assert_eq!(Annotation::marker("Override").to_string(), "@Override");
        assert_eq!(
            Annotation::value("Generated", "\"keel\"").to_string(),
            "@Generated(\"keel\")"
        );
        let annotation = Annotation::marker("Range")
            .with_argument("min", "0")
            .with_argument("max", "9");
        assert_eq!(annotation.to_string(), "@Range(min = 0, max = 9)");
    }

    #[test]
    fn test_param_display() {
        let param = Param::new("int", "bar").annotated(Annotation::value("JsonProperty", "\"bar\""));
        assert_eq!(param.to_string(), "@JsonProperty(\"bar\") int bar");
        assert_eq!(Param::new("String", "foo").to_string(), "String foo");
    }

    #[test]
    fn test_replay_into_recorder_is_identity() {
        let mut plan = GenerationPlan::new();
        plan.package("io.example")
            .imports(vec!["java.util.Arrays".into()])
            .begin_type(TypeDecl::class("FooBuilder", Modifiers::of(&[Modifier::Public])))
            .field("int", "bar", Modifiers::of(&[Modifier::Private]))
            .begin_constructor(Modifiers::default(), vec![Param::new("int", "bar")])
            .statement("this.bar = bar")
            .end_constructor()
            .begin_method(MethodDecl::new("int", "bar", Modifiers::of(&[Modifier::Public])))
            .guard("if (bar < 0)", "return 0")
            .statement("return bar")
            .end_method()
            .empty_line()
            .end_type();

        let mut recorded = GenerationPlan::new();
        plan.replay(&mut recorded).unwrap();
        assert_eq!(recorded, plan);
        assert_eq!(
            plan.statements().collect::<Vec<_>>(),
            ["this.bar = bar", "return 0", "return bar"]
        );
    }
}
