use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use keel_manifest::KeelToml;

use super::UnwrapOrExit;
use crate::{
    ops::generate,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to keel.toml (defaults to ./keel.toml)
    #[arg(short, long, default_value = "keel.toml")]
    pub config: PathBuf,

    /// Source root to write into (overrides [generator] output)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print generated sources without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let keel_toml = KeelToml::open(&self.config).unwrap_or_exit();
        let output = self.output.clone().unwrap_or_else(|| keel_toml.output_dir());

        let report = generate::run(keel_toml.manifest(), &output, self.dry_run)?;
        report.render(&mut TerminalOutput::new());

        if !report.is_success() {
            std::process::exit(1);
        }
        Ok(())
    }
}
