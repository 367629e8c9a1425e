use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use keel_manifest::KeelToml;

use super::UnwrapOrExit;
use crate::{
    ops::check,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to keel.toml (defaults to ./keel.toml)
    #[arg(short, long, default_value = "keel.toml")]
    pub config: PathBuf,

    /// Print diagnostics as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let keel_toml = KeelToml::open(&self.config).unwrap_or_exit();
        let report = check::run(keel_toml.manifest(), &self.config);

        if self.json {
            let json = serde_json::to_string_pretty(&report).wrap_err("Failed to encode report")?;
            println!("{}", json);
        } else {
            report.render(&mut TerminalOutput::new());
        }

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
