//! CLI commands module.

use anyhow::Result;
use clap::Subcommand;

mod demo;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the self-contained ledger demo
    Demo(demo::DemoArgs),
}

pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Demo(args) => demo::run(args),
    }
}
