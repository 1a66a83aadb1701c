use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use repogen_codegen::{AlwaysNo, AlwaysYes, Confirm, GenerateOptions};
use repogen_manifest::RepogenToml;

use super::UnwrapOrExit;
use crate::{
    ops,
    prompt::TerminalConfirm,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to repogen.toml (defaults to ./repogen.toml)
    #[arg(short, long, default_value = "repogen.toml")]
    pub config: PathBuf,

    /// Overwrite existing files without asking
    #[arg(short, long, conflicts_with = "no")]
    pub yes: bool,

    /// Keep existing files without asking
    #[arg(short, long)]
    pub no: bool,

    /// Fail when the service provider cannot be patched
    #[arg(long)]
    pub strict: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let config = RepogenToml::open(&self.config).unwrap_or_exit();

        let mut confirm: Box<dyn Confirm> = if self.yes {
            Box::new(AlwaysYes)
        } else if self.no {
            Box::new(AlwaysNo)
        } else {
            Box::new(TerminalConfirm::new(config.root()))
        };

        let options = GenerateOptions {
            strict: self.strict,
        };
        let report = ops::generate(&config, confirm.as_mut(), options).unwrap_or_exit();
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
