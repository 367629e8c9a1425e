use std::path::PathBuf;

use keel_codegen::{GENERATED_ANNOTATION, GENERATOR_NAME, Indent, SynthesisOptions};
use serde::{Deserialize, Deserializer, de};

/// `[generator]` section of keel.toml.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Value of the `@Generated` annotation
    #[serde(default = "default_name")]
    pub name: String,

    /// Whether builders carry `@Generated`
    #[serde(default = "default_true")]
    pub generated: bool,

    /// Qualified `@Generated` annotation type
    #[serde(default = "default_annotation")]
    pub annotation: String,

    /// Annotate values for Jackson
    #[serde(default)]
    pub jackson: bool,

    /// Indentation of generated sources: a width of 2, 4 or 8, or "tab"
    #[serde(default, deserialize_with = "deserialize_indent")]
    pub indent: Indent,

    /// Root directory of generated sources
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            generated: true,
            annotation: default_annotation(),
            jackson: false,
            indent: Indent::default(),
            output: default_output(),
        }
    }
}

impl GeneratorConfig {
    /// Synthesis options described by this section.
    pub fn synthesis_options(&self) -> SynthesisOptions {
        let options = SynthesisOptions {
            generated_annotation: Some(self.name.clone()),
            generated_class: self.annotation.clone(),
            jackson: self.jackson,
        };
        if self.generated {
            options
        } else {
            options.without_generated()
        }
    }
}

fn default_name() -> String {
    GENERATOR_NAME.to_string()
}

fn default_annotation() -> String {
    GENERATED_ANNOTATION.to_string()
}

fn default_true() -> bool {
    true
}

fn default_output() -> PathBuf {
    PathBuf::from("src/main/java")
}

fn deserialize_indent<'de, D>(deserializer: D) -> std::result::Result<Indent, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawIndent {
        Width(i64),
        Name(String),
    }

    match RawIndent::deserialize(deserializer)? {
        RawIndent::Width(width @ (2 | 4 | 8)) => Ok(Indent::Spaces(width as u8)),
        RawIndent::Width(width) => Err(de::Error::custom(format!(
            "unsupported indent width {width}, expected 2, 4 or 8"
        ))),
        RawIndent::Name(name) if name == "tab" => Ok(Indent::Tab),
        RawIndent::Name(name) => Err(de::Error::custom(format!(
            "unknown indent '{name}', expected a width or \"tab\""
        ))),
    }
}
