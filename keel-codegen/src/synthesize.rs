//! Builder and value class synthesis.
//!
//! [`synthesize`] turns a [`TypeDescriptor`] into the plan of one source
//! file: a public final `<Type>Builder` with one fluent setter per field and a
//! `build()` method, enclosing a private static final `Value` class that
//! implements the interface with accessors, `equals`, `hashCode` and
//! `toString`. Field order is declaration order everywhere.

use keel_core::{package_of, simple_name};
use keel_model::{FieldDescriptor, FloatKind, TypeDescriptor, TypeKind, VALUE_CLASS};

use crate::{
    GenerationError,
    dispatch::{HASH_TEMP, equality_test, hash_contribution, string_render},
    emit::{Annotation, GenerationPlan, MethodDecl, Modifier, Modifiers, Param, TypeDecl},
};

/// Default value of the `@Generated` annotation.
pub const GENERATOR_NAME: &str = "keel";

/// Default `@Generated` annotation type, part of the JDK since Java 9.
pub const GENERATED_ANNOTATION: &str = "javax.annotation.processing.Generated";

const ARRAYS: &str = "java.util.Arrays";
const JSON_CREATOR: &str = "com.fasterxml.jackson.annotation.JsonCreator";
const JSON_PROPERTY: &str = "com.fasterxml.jackson.annotation.JsonProperty";

/// Knobs of the generated shape that do not affect value semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisOptions {
    /// Value of `@Generated` on the builder; `None` omits the annotation.
    pub generated_annotation: Option<String>,
    /// Qualified name of the `@Generated` annotation type.
    pub generated_class: String,
    /// Annotate the value for Jackson (`@JsonCreator` constructor, `@JsonProperty` accessors).
    pub jackson: bool,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            generated_annotation: Some(GENERATOR_NAME.to_string()),
            generated_class: GENERATED_ANNOTATION.to_string(),
            jackson: false,
        }
    }
}

impl SynthesisOptions {
    pub fn without_generated(mut self) -> Self {
        self.generated_annotation = None;
        self
    }

    pub fn with_jackson(mut self, jackson: bool) -> Self {
        self.jackson = jackson;
        self
    }

    /// Use another `@Generated` annotation type (e.g., "javax.annotation.Generated" before Java 9).
    pub fn with_generated_class(mut self, class: impl Into<String>) -> Self {
        self.generated_class = class.into();
        self
    }
}

/// Produce the generation plan of `<Type>Builder`.
///
/// Deterministic: the same descriptor and options always yield the same plan.
///
/// # Errors
///
/// Returns [`GenerationError::UnsupportedTypeKind`] for a field whose kind has
/// no equals/hashCode/toString rule.
pub fn synthesize(
    ty: &TypeDescriptor,
    options: &SynthesisOptions,
) -> Result<GenerationPlan, GenerationError> {
    let mut synthesizer = Synthesizer {
        ty,
        options,
        plan: GenerationPlan::new(),
    };
    synthesizer.run()?;
    Ok(synthesizer.plan)
}

fn modifiers(list: &[Modifier]) -> Modifiers {
    Modifiers::of(list)
}

fn java_string(text: &str) -> String {
    let mut literal = String::with_capacity(text.len() + 2);
    literal.push('"');
    for c in text.chars() {
        match c {
            '"' => literal.push_str("\\\""),
            '\\' => literal.push_str("\\\\"),
            '\n' => literal.push_str("\\n"),
            c => literal.push(c),
        }
    }
    literal.push('"');
    literal
}

struct Synthesizer<'a> {
    ty: &'a TypeDescriptor,
    options: &'a SynthesisOptions,
    plan: GenerationPlan,
}

impl Synthesizer<'_> {
    fn fields(&self) -> &[FieldDescriptor] {
        &self.ty.fields
    }

    fn run(&mut self) -> Result<(), GenerationError> {
        self.emit_header();

        let builder = TypeDecl::class(
            self.ty.builder_name(),
            modifiers(&[Modifier::Public, Modifier::Final]),
        );
        self.plan.begin_type(builder);
        self.emit_fields(&[Modifier::Private]);
        self.emit_setters();
        self.emit_build();
        self.emit_value()?;
        self.plan.end_type();
        Ok(())
    }

    fn imports(&self) -> Vec<String> {
        let mut imports = Vec::new();
        if self.ty.has_kind(|kind| kind == TypeKind::Array) {
            imports.push(ARRAYS.to_string());
        }
        let generated = &self.options.generated_class;
        if self.options.generated_annotation.is_some() && !package_of(generated).is_empty() {
            imports.push(generated.clone());
        }
        imports
    }

    fn emit_header(&mut self) {
        if !self.ty.package_name.is_empty() {
            self.plan.package(self.ty.package_name.clone()).empty_line();
        }
        let imports = self.imports();
        if !imports.is_empty() {
            self.plan.imports(imports).empty_line();
        }
        if let Some(name) = &self.options.generated_annotation {
            let annotation = simple_name(&self.options.generated_class);
            self.plan
                .annotation(Annotation::value(annotation, java_string(name)));
        }
    }

    fn emit_fields(&mut self, field_modifiers: &[Modifier]) {
        if self.fields().is_empty() {
            return;
        }
        self.plan.empty_line();
        for field in &self.ty.fields {
            self.plan
                .field(&field.type_name, &field.name, modifiers(field_modifiers));
        }
    }

    fn emit_setters(&mut self) {
        let builder_name = self.ty.builder_name();
        for field in &self.ty.fields {
            let setter = MethodDecl::new(&builder_name, &field.name, modifiers(&[Modifier::Public]))
                .param(Param::new(&field.type_name, &field.name));
            self.plan
                .empty_line()
                .begin_method(setter)
                .statement(format!("this.{0} = {0}", field.name))
                .statement("return this")
                .end_method();
        }
    }

    fn emit_build(&mut self) {
        let arguments: Vec<&str> = self.fields().iter().map(|f| f.name.as_str()).collect();
        let statement = format!("return new {}({})", VALUE_CLASS, arguments.join(", "));
        self.plan
            .empty_line()
            .begin_method(MethodDecl::new(
                &self.ty.simple_name,
                "build",
                modifiers(&[Modifier::Public]),
            ))
            .statement(statement)
            .end_method();
    }

    fn emit_value(&mut self) -> Result<(), GenerationError> {
        let value = TypeDecl::class(
            VALUE_CLASS,
            modifiers(&[Modifier::Private, Modifier::Static, Modifier::Final]),
        )
        .implementing(&self.ty.simple_name);

        self.plan.empty_line().begin_type(value);
        self.emit_fields(&[Modifier::Private, Modifier::Final]);
        self.emit_constructor();
        self.emit_accessors();
        self.emit_equals()?;
        self.emit_hash_code()?;
        self.emit_to_string()?;
        self.plan.end_type();
        Ok(())
    }

    fn emit_constructor(&mut self) {
        let params: Vec<Param> = self
            .fields()
            .iter()
            .map(|field| {
                let param = Param::new(&field.type_name, &field.name);
                if self.options.jackson {
                    param.annotated(Annotation::value(JSON_PROPERTY, java_string(&field.name)))
                } else {
                    param
                }
            })
            .collect();

        self.plan.empty_line();
        if self.options.jackson {
            self.plan.annotation(Annotation::marker(JSON_CREATOR));
        }
        self.plan
            .begin_constructor(modifiers(&[Modifier::Private]), params);
        for field in &self.ty.fields {
            self.plan.statement(format!("this.{0} = {0}", field.name));
        }
        self.plan.end_constructor();
    }

    fn emit_accessors(&mut self) {
        for field in &self.ty.fields {
            self.plan.empty_line();
            if self.options.jackson {
                self.plan.annotation(Annotation::marker(JSON_PROPERTY));
            }
            self.plan
                .annotation(Annotation::marker("Override"))
                .begin_method(MethodDecl::new(
                    &field.type_name,
                    &field.name,
                    modifiers(&[Modifier::Public]),
                ))
                .statement(format!("return {}", field.name))
                .end_method();
        }
    }

    fn emit_equals(&mut self) -> Result<(), GenerationError> {
        let equals = MethodDecl::new("boolean", "equals", modifiers(&[Modifier::Public]))
            .param(Param::new("Object", "o"));
        self.plan
            .empty_line()
            .annotation(Annotation::marker("Override"))
            .begin_method(equals)
            .guard("if (this == o)", "return true")
            .guard("if (o == null || getClass() != o.getClass())", "return false");

        if !self.fields().is_empty() {
            self.plan
                .empty_line()
                .statement(format!("final {0} value = ({0}) o", VALUE_CLASS))
                .empty_line();
            for field in &self.ty.fields {
                let mismatch = equality_test(self.ty, field)?;
                self.plan
                    .guard(format!("if ({})", mismatch), "return false");
            }
        }

        self.plan
            .empty_line()
            .statement("return true")
            .end_method();
        Ok(())
    }

    fn emit_hash_code(&mut self) -> Result<(), GenerationError> {
        self.plan
            .empty_line()
            .annotation(Annotation::marker("Override"))
            .begin_method(MethodDecl::new("int", "hashCode", modifiers(&[Modifier::Public])))
            .statement("int result = 0");
        if self
            .ty
            .has_kind(|kind| kind == TypeKind::FloatingPoint(FloatKind::Double))
        {
            self.plan.statement(format!("long {}", HASH_TEMP));
        }
        for field in &self.ty.fields {
            let contribution = hash_contribution(self.ty, field)?;
            if let Some(setup) = &contribution.setup {
                self.plan.statement(setup.clone());
            }
            self.plan.statement(contribution.statement());
        }
        self.plan.statement("return result").end_method();
        Ok(())
    }

    fn emit_to_string(&mut self) -> Result<(), GenerationError> {
        let mut statement = format!("return \"{}{{\" +\n", self.ty.simple_name);
        for (i, field) in self.ty.fields.iter().enumerate() {
            let separator = if i == 0 { "" } else { ", " };
            let rendered = string_render(self.ty, field)?;
            statement.push_str(&format!(
                "\"{}{}=\" + {} +\n",
                separator, field.name, rendered
            ));
        }
        statement.push_str("'}'");

        self.plan
            .empty_line()
            .annotation(Annotation::marker("Override"))
            .begin_method(MethodDecl::new("String", "toString", modifiers(&[Modifier::Public])))
            .statement(statement)
            .end_method();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::Instruction;

    fn foobar() -> TypeDescriptor {
        TypeDescriptor::new(
            "io.example",
            "Foobar",
            vec![
                FieldDescriptor::new("bar", "int"),
                FieldDescriptor::new("foo", "java.lang.String"),
            ],
        )
    }

    #[test]
    fn test_deterministic() {
        let options = SynthesisOptions::default();
        assert_eq!(
            synthesize(&foobar(), &options).unwrap(),
            synthesize(&foobar(), &options).unwrap()
        );
    }

    #[test]
    fn test_header() {
        let plan = synthesize(&foobar(), &SynthesisOptions::default()).unwrap();
        let instructions = plan.instructions();
        assert_eq!(instructions[0], Instruction::Package("io.example".into()));
        assert_eq!(instructions[1], Instruction::EmptyLine);
        assert_eq!(
            instructions[2],
            Instruction::Imports(vec!["javax.annotation.processing.Generated".into()])
        );
        assert_eq!(
            instructions[4],
            Instruction::Annotation(Annotation::value("Generated", "\"keel\""))
        );
        match &instructions[5] {
            Instruction::BeginType(decl) => {
                assert_eq!(decl.name, "FoobarBuilder");
                assert_eq!(decl.modifiers.to_string(), "public final");
            }
            other => panic!("expected builder type, got {other:?}"),
        }
        assert_eq!(instructions.last(), Some(&Instruction::EndType));
    }

    #[test]
    fn test_default_package_and_no_annotation() {
        let ty = TypeDescriptor::new("", "Foo", vec![]);
        let plan = synthesize(&ty, &SynthesisOptions::default().without_generated()).unwrap();
        assert!(matches!(plan.instructions()[0], Instruction::BeginType(_)));
        assert!(
            !plan
                .instructions()
                .iter()
                .any(|i| matches!(i, Instruction::Package(_) | Instruction::Imports(_)))
        );
    }

    #[test]
    fn test_arrays_import_only_with_array_field() {
        let ty = TypeDescriptor::new("p", "Foo", vec![FieldDescriptor::new("xs", "int[]")]);
        let plan = synthesize(&ty, &SynthesisOptions::default()).unwrap();
        assert!(plan.instructions().contains(&Instruction::Imports(vec![
            "java.util.Arrays".into(),
            "javax.annotation.processing.Generated".into(),
        ])));
    }

    #[test]
    fn test_setters_and_build_follow_declaration_order() {
        let plan = synthesize(&foobar(), &SynthesisOptions::default()).unwrap();
        let statements: Vec<_> = plan.statements().collect();
        assert_eq!(&statements[..5], [
            "this.bar = bar",
            "return this",
            "this.foo = foo",
            "return this",
            "return new Value(bar, foo)",
        ]);
    }

    #[test]
    fn test_hash_code_accumulates_in_order() {
        let plan = synthesize(&foobar(), &SynthesisOptions::default()).unwrap();
        let statements: Vec<_> = plan.statements().collect();
        let start = statements
            .iter()
            .position(|s| *s == "int result = 0")
            .unwrap();
        assert_eq!(&statements[start..start + 4], [
            "int result = 0",
            "result = 31 * result + this.bar",
            "result = 31 * result + (this.foo != null ? this.foo.hashCode() : 0)",
            "return result",
        ]);
    }

    #[test]
    fn test_temp_declared_only_for_double() {
        let plan = synthesize(&foobar(), &SynthesisOptions::default()).unwrap();
        assert!(!plan.statements().any(|s| s == "long temp"));

        let ty = TypeDescriptor::new("p", "Point", vec![
            FieldDescriptor::new("x", "double"),
            FieldDescriptor::new("y", "double"),
        ]);
        let plan = synthesize(&ty, &SynthesisOptions::default()).unwrap();
        let statements: Vec<_> = plan.statements().collect();
        assert_eq!(statements.iter().filter(|s| **s == "long temp").count(), 1);
        assert!(statements.contains(&"temp = Double.doubleToLongBits(this.y)"));
    }

    #[test]
    fn test_to_string_statement() {
        let plan = synthesize(&foobar(), &SynthesisOptions::default()).unwrap();
        assert!(plan.statements().any(|s| s
            == "return \"Foobar{\" +\n\"bar=\" + bar +\n\", foo=\" + foo +\n'}'"));
    }

    #[test]
    fn test_to_string_without_fields() {
        let ty = TypeDescriptor::new("p", "Foo", vec![]);
        let plan = synthesize(&ty, &SynthesisOptions::default()).unwrap();
        assert!(plan.statements().any(|s| s == "return \"Foo{\" +\n'}'"));
        assert!(!plan.statements().any(|s| s.starts_with("final Value value")));
        assert!(plan.statements().any(|s| s == "return new Value()"));
    }

    #[test]
    fn test_jackson_annotations() {
        let options = SynthesisOptions::default().with_jackson(true);
        let plan = synthesize(&foobar(), &options).unwrap();
        let constructor = plan
            .instructions()
            .iter()
            .find_map(|i| match i {
                Instruction::BeginConstructor { params, .. } => Some(params),
                _ => None,
            })
            .unwrap();
        assert_eq!(
            constructor[0].to_string(),
            "@com.fasterxml.jackson.annotation.JsonProperty(\"bar\") int bar"
        );
        let creators = plan
            .instructions()
            .iter()
            .filter(|i| {
                **i == Instruction::Annotation(Annotation::marker(JSON_CREATOR))
            })
            .count();
        assert_eq!(creators, 1);
        let properties = plan
            .instructions()
            .iter()
            .filter(|i| {
                **i == Instruction::Annotation(Annotation::marker(JSON_PROPERTY))
            })
            .count();
        assert_eq!(properties, 2);
    }

    #[test]
    fn test_void_field_fails() {
        let ty = TypeDescriptor::new("io.example", "Task", vec![
            FieldDescriptor::new("name", "String"),
            FieldDescriptor::new("run", "void"),
        ]);
        let err = synthesize(&ty, &SynthesisOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::UnsupportedTypeKind { ref field, .. } if field == "run"
        ));
        assert_eq!(err.type_name(), "io.example.Task");
    }

    #[test]
    fn test_generator_name_is_escaped() {
        let options = SynthesisOptions {
            generated_annotation: Some("say \"hi\"".into()),
            ..SynthesisOptions::default()
        };
        let plan = synthesize(&foobar(), &options).unwrap();
        assert!(plan.instructions().contains(&Instruction::Annotation(Annotation::value(
            "Generated",
            "\"say \\\"hi\\\"\""
        ))));
    }

    #[test]
    fn test_legacy_generated_class() {
        let options = SynthesisOptions::default().with_generated_class("javax.annotation.Generated");
        let plan = synthesize(&foobar(), &options).unwrap();
        assert!(plan.instructions().contains(&Instruction::Imports(vec![
            "javax.annotation.Generated".into()
        ])));
        assert!(plan.instructions().contains(&Instruction::Annotation(Annotation::value(
            "Generated",
            "\"keel\""
        ))));
    }

    #[test]
    fn test_generated_class_in_default_package_is_not_imported() {
        let options = SynthesisOptions::default().with_generated_class("Marker");
        let plan = synthesize(&foobar(), &options).unwrap();
        assert!(
            !plan
                .instructions()
                .iter()
                .any(|i| matches!(i, Instruction::Imports(_)))
        );
        assert!(plan.instructions().contains(&Instruction::Annotation(Annotation::value(
            "Marker",
            "\"keel\""
        ))));
    }
}
