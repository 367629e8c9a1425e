//! Batch generation.
//!
//! The [`Processor`] runs extraction, synthesis and emission for each
//! interface in turn. A failure aborts only the type it belongs to and is
//! recorded in the [`ProcessReport`].

use std::io;

use indexmap::IndexSet;
use keel_core::Filer;
use keel_model::{
    InterfaceDescription, TypeDescriptor, check_accessor_shapes, check_member_names, describe_type,
};
use tracing::{debug, info, warn};

use crate::{
    Diagnostic, GenerationError, GenerationPlan, JavaWriter,
    builder::Indent,
    synthesize::{SynthesisOptions, synthesize},
};

/// What happened to one interface.
#[derive(Debug)]
pub enum TypeOutcome {
    /// The builder source was written.
    Written {
        type_name: String,
        builder: String,
        destination: String,
    },
    /// A builder of the same name was already generated in this run.
    Skipped { type_name: String, builder: String },
    /// Generation failed.
    Failed(GenerationError),
}

impl TypeOutcome {
    /// Qualified name of the interface.
    pub fn type_name(&self) -> &str {
        match self {
            TypeOutcome::Written { type_name, .. } => type_name,
            TypeOutcome::Skipped { type_name, .. } => type_name,
            TypeOutcome::Failed(err) => err.type_name(),
        }
    }
}

/// Outcome of a batch, in input order.
#[derive(Debug, Default)]
pub struct ProcessReport {
    pub outcomes: Vec<TypeOutcome>,
}

impl ProcessReport {
    /// Destinations of the written sources.
    pub fn written(&self) -> impl Iterator<Item = &str> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            TypeOutcome::Written { destination, .. } => Some(destination.as_str()),
            _ => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = &GenerationError> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            TypeOutcome::Failed(err) => Some(err),
            _ => None,
        })
    }

    /// Whether every type was generated or deliberately skipped.
    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                TypeOutcome::Failed(err) => Some(Diagnostic::from(err)),
                TypeOutcome::Skipped { type_name, builder } => Some(
                    Diagnostic::warning("emit", format!("{} was already generated", builder))
                        .at(type_name.clone()),
                ),
                TypeOutcome::Written { .. } => None,
            })
            .collect()
    }
}

/// Generates builder sources for a batch of interfaces.
#[derive(Debug, Default)]
pub struct Processor {
    options: SynthesisOptions,
    indent: Indent,
    generated: IndexSet<String>,
}

impl Processor {
    pub fn new(options: SynthesisOptions) -> Self {
        Self {
            options,
            indent: Indent::default(),
            generated: IndexSet::new(),
        }
    }

    /// Set the indentation of written sources.
    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    /// Qualified builder names generated so far, in generation order.
    pub fn generated(&self) -> impl Iterator<Item = &str> {
        self.generated.iter().map(String::as_str)
    }

    /// Check, extract and synthesize one interface without emitting it.
    pub fn plan(
        &self,
        interface: &InterfaceDescription,
    ) -> Result<(TypeDescriptor, GenerationPlan), GenerationError> {
        check_accessor_shapes(interface)?;
        check_member_names(interface)?;
        let ty = describe_type(interface);
        let plan = synthesize(&ty, &self.options)?;
        debug!(
            type_name = %interface.qualified_name,
            fields = ty.fields.len(),
            instructions = plan.len(),
            "synthesized"
        );
        Ok((ty, plan))
    }

    /// Render one interface's builder source to a string.
    pub fn render(&self, interface: &InterfaceDescription) -> Result<String, GenerationError> {
        let (ty, plan) = self.plan(interface)?;
        let emission = |source| GenerationError::Emission {
            type_name: ty.qualified_name(),
            source,
        };
        let mut writer = JavaWriter::with_indent(Vec::new(), self.indent);
        plan.replay(&mut writer).map_err(emission)?;
        let bytes = writer.finish().map_err(emission)?;
        String::from_utf8(bytes).map_err(|e| emission(io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    /// Generate one interface into the filer.
    pub fn process_one<F: Filer>(
        &mut self,
        interface: &InterfaceDescription,
        filer: &mut F,
    ) -> Result<TypeOutcome, GenerationError> {
        let (ty, plan) = self.plan(interface)?;
        let type_name = ty.qualified_name();
        let builder = ty.qualified_builder_name();

        if self.generated.contains(&builder) {
            warn!(type_name = %type_name, builder = %builder, "already generated, skipping");
            return Ok(TypeOutcome::Skipped { type_name, builder });
        }

        let destination = self.emit(&type_name, &builder, &plan, filer)?;
        info!(type_name = %type_name, destination = %destination, "wrote builder");
        self.generated.insert(builder.clone());

        Ok(TypeOutcome::Written {
            type_name,
            builder,
            destination,
        })
    }

    /// Generate every interface, isolating failures per type.
    pub fn process<F: Filer>(
        &mut self,
        interfaces: &[InterfaceDescription],
        filer: &mut F,
    ) -> ProcessReport {
        let mut report = ProcessReport::default();
        for interface in interfaces {
            let outcome = match self.process_one(interface, filer) {
                Ok(outcome) => outcome,
                Err(err) => {
                    warn!(type_name = %err.type_name(), error = %err.detail(), "generation failed");
                    TypeOutcome::Failed(err)
                }
            };
            report.outcomes.push(outcome);
        }
        report
    }

    /// Open the destination, replay the plan and close it.
    ///
    /// The destination is released on every path; a file abandoned midway is
    /// dropped by its guard.
    fn emit<F: Filer>(
        &self,
        type_name: &str,
        builder: &str,
        plan: &GenerationPlan,
        filer: &mut F,
    ) -> Result<String, GenerationError> {
        let emission = |source| GenerationError::Emission {
            type_name: type_name.to_string(),
            source,
        };

        let file = filer.create_source_file(builder).map_err(emission)?;
        let mut writer = JavaWriter::with_indent(file, self.indent);
        plan.replay(&mut writer).map_err(emission)?;
        let file = writer.finish().map_err(emission)?;
        let destination = file.label().to_string();
        file.close().map_err(emission)?;
        Ok(destination)
    }
}
