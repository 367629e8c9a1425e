//! Snapshot tests for generated builder sources.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use keel_codegen::{Indent, Processor, SynthesisOptions};
use keel_model::{InterfaceDescription, Member};

fn render(interface: &InterfaceDescription, options: SynthesisOptions) -> String {
    Processor::new(options)
        .with_indent(Indent::JAVA)
        .render(interface)
        .expect("Failed to render builder")
}

fn foobar() -> InterfaceDescription {
    InterfaceDescription::new(
        "io.example.Foobar",
        vec![
            Member::accessor("bar", "int"),
            Member::accessor("foo", "java.lang.String"),
        ],
    )
}

#[test]
fn test_foobar_builder() {
    let source = render(&foobar(), SynthesisOptions::default());
    insta::assert_snapshot!("foobar_builder", source);
}

#[test]
fn test_every_kind() {
    let interface = InterfaceDescription::new(
        "io.example.Everything",
        vec![
            Member::accessor("count", "int"),
            Member::accessor("total", "long"),
            Member::accessor("flag", "boolean"),
            Member::accessor("ratio", "float"),
            Member::accessor("weight", "double"),
            Member::accessor("letter", "char"),
            Member::accessor("small", "byte"),
            Member::accessor("medium", "short"),
            Member::accessor("bytes", "byte[]"),
            Member::accessor("name", "java.lang.String"),
        ],
    );
    let source = render(&interface, SynthesisOptions::default());
    insta::assert_snapshot!("every_kind", source);
}

#[test]
fn test_fields_named_like_generated_locals() {
    let interface = InterfaceDescription::new(
        "io.example.Shadowed",
        vec![
            Member::accessor("value", "java.lang.String"),
            Member::accessor("o", "int"),
            Member::accessor("result", "int"),
            Member::accessor("temp", "double"),
        ],
    );
    let source = render(&interface, SynthesisOptions::default());
    insta::assert_snapshot!("shadowed_fields", source);
}

#[test]
fn test_jackson_value() {
    let interface = InterfaceDescription::new(
        "io.example.Point",
        vec![Member::accessor("x", "int"), Member::accessor("y", "int")],
    );
    let options = SynthesisOptions::default()
        .without_generated()
        .with_jackson(true);
    let source = render(&interface, options);
    insta::assert_snapshot!("jackson_value", source);
}

#[test]
fn test_empty_interface_in_default_package() {
    let interface = InterfaceDescription::new("Foo", vec![]);
    let source = render(&interface, SynthesisOptions::default().without_generated());
    insta::assert_snapshot!("empty_default_package", source);
}
