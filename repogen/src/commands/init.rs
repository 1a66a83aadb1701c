use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use repogen_manifest::RepogenToml;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct InitCommand {
    /// Project directory (defaults to the current directory)
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Copy the default stubs into the project so they can be customized
    #[arg(long)]
    pub publish_stubs: bool,
}

impl InitCommand {
    pub fn run(&self) -> Result<()> {
        let (path, created) = RepogenToml::write_default(&self.dir).unwrap_or_exit();
        let config = RepogenToml::open(&path).unwrap_or_exit();

        let report = ops::init(&config, created, self.publish_stubs).unwrap_or_exit();
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
