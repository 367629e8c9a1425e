//! Java name utilities shared across the generator.

use std::path::PathBuf;

/// Prefix of the implicitly imported `java.lang` package.
pub const JAVA_LANG: &str = "java.lang.";

/// Join a package and a simple name (e.g., "io.example" + "Foo" -> "io.example.Foo").
///
/// The default (empty) package yields the simple name unchanged.
pub fn qualified_name(package: &str, simple: &str) -> String {
    if package.is_empty() {
        simple.to_string()
    } else {
        format!("{}.{}", package, simple)
    }
}

/// Last segment of a dotted name (e.g., "io.example.Foo" -> "Foo")
pub fn simple_name(qualified: &str) -> &str {
    match qualified.rfind('.') {
        Some(dot) => &qualified[dot + 1..],
        None => qualified,
    }
}

/// Package part of a dotted name (e.g., "io.example.Foo" -> "io.example")
pub fn package_of(qualified: &str) -> &str {
    match qualified.rfind('.') {
        Some(dot) => &qualified[..dot],
        None => "",
    }
}

/// Shorten `java.lang.X` to `X`.
///
/// Only a direct member of `java.lang` is shortened; sub-packages such as
/// `java.lang.reflect.Method` are not implicitly imported and stay qualified.
pub fn strip_java_lang(type_name: &str) -> &str {
    match type_name.strip_prefix(JAVA_LANG) {
        Some(rest) if is_simple_name(rest) => rest,
        _ => type_name,
    }
}

fn is_simple_name(name: &str) -> bool {
    let base = name.split(['[', '<']).next().unwrap_or(name);
    !base.is_empty() && !base.contains('.')
}

/// Directory of a package relative to a source root (e.g., "io.example" -> "io/example")
pub fn package_path(package: &str) -> PathBuf {
    package
        .split('.')
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Source file path of a qualified type relative to a source root.
pub fn source_path(qualified: &str) -> PathBuf {
    package_path(package_of(qualified)).join(format!("{}.java", simple_name(qualified)))
}
