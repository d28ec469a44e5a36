//! `copilot-catalog` binary.

use anyhow::Result;
use catalog_cli::Cli;
use catalog_cli::runner::{execute_command, init_logging};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let exit_code = execute_command(cli).await?;

    std::process::exit(exit_code.as_i32());
}
