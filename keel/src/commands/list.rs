use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use keel_manifest::KeelToml;
use keel_model::describe_type;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct ListCommand {
    /// Path to keel.toml (defaults to ./keel.toml)
    #[arg(short, long, default_value = "keel.toml")]
    pub config: PathBuf,
}

impl ListCommand {
    pub fn run(&self) -> Result<()> {
        let keel_toml = KeelToml::open(&self.config).unwrap_or_exit();
        let interfaces = keel_toml.manifest().interfaces();

        if interfaces.is_empty() {
            println!("No types defined");
            return Ok(());
        }

        println!("Types:");
        for interface in &interfaces {
            let ty = describe_type(interface);
            println!("  {} -> {}", ty.qualified_name(), ty.qualified_builder_name());
            for field in &ty.fields {
                println!("    {}: {} ({})", field.name, field.type_name, field.type_kind);
            }
        }

        Ok(())
    }
}
