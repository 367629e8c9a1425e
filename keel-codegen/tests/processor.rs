//! Tests for writing builder sources to disk.

use std::fs;

use keel_codegen::{GenerationError, Processor, SynthesisOptions, TypeOutcome};
use keel_core::DirFiler;
use keel_model::{InterfaceDescription, Member, MemberKind};
use tempfile::TempDir;

fn interface(name: &str, members: Vec<Member>) -> InterfaceDescription {
    InterfaceDescription::new(name, members)
}

#[test]
fn test_writes_sources_under_package_dirs() {
    let dir = TempDir::new().unwrap();
    let mut filer = DirFiler::new(dir.path());
    let mut processor = Processor::new(SynthesisOptions::default());

    let report = processor.process(
        &[
            interface("io.example.Foobar", vec![Member::accessor("bar", "int")]),
            interface("Top", vec![]),
        ],
        &mut filer,
    );

    assert!(report.is_success());
    let builder = fs::read_to_string(dir.path().join("io/example/FoobarBuilder.java")).unwrap();
    assert!(builder.contains("public FoobarBuilder bar(int bar) {"));
    let top = fs::read_to_string(dir.path().join("TopBuilder.java")).unwrap();
    assert!(top.starts_with("import javax.annotation.processing.Generated;\n"));
}

#[test]
fn test_static_members_and_constants_are_ignored() {
    let dir = TempDir::new().unwrap();
    let mut filer = DirFiler::new(dir.path());
    let mut processor = Processor::default();

    let members = vec![
        Member::accessor("id", "long"),
        Member::accessor("of", "io.example.Account")
            .with_static()
            .with_parameters(vec!["long".into()]),
        Member::accessor("LIMIT", "int").with_kind(MemberKind::Field),
        Member::accessor("Kind", "io.example.Account.Kind").with_kind(MemberKind::Type),
    ];
    processor
        .process_one(&interface("io.example.Account", members), &mut filer)
        .unwrap();

    let source = fs::read_to_string(dir.path().join("io/example/AccountBuilder.java")).unwrap();
    assert!(source.contains("private long id;"));
    assert!(!source.contains("LIMIT"));
    assert!(!source.contains(" of("));
    assert!(!source.contains("Kind"));
}

#[test]
fn test_failed_type_leaves_no_file() {
    let dir = TempDir::new().unwrap();
    let mut filer = DirFiler::new(dir.path());
    let mut processor = Processor::default();

    let report = processor.process(
        &[interface(
            "io.example.Task",
            vec![Member::accessor("run", "void")],
        )],
        &mut filer,
    );

    let outcome = &report.outcomes[0];
    assert!(matches!(
        outcome,
        TypeOutcome::Failed(GenerationError::UnsupportedTypeKind { .. })
    ));
    assert_eq!(outcome.type_name(), "io.example.Task");
    assert!(!dir.path().join("io/example/TaskBuilder.java").exists());
}

#[test]
fn test_unwritable_destination_fails_only_that_type() {
    let dir = TempDir::new().unwrap();
    // a file where the package directory should go
    fs::write(dir.path().join("blocked"), "").unwrap();
    let mut filer = DirFiler::new(dir.path());
    let mut processor = Processor::default();

    let report = processor.process(
        &[
            interface("blocked.Foo", vec![Member::accessor("a", "int")]),
            interface("open.Bar", vec![Member::accessor("b", "int")]),
        ],
        &mut filer,
    );

    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].type_name(), "blocked.Foo");
    assert_eq!(failures[0].phase(), "emit");
    assert!(dir.path().join("open/BarBuilder.java").exists());
}
