use std::process::ExitCode;

use clap::Parser;
use kv_cacheable::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Command::Exec(args) => cli::exec::run(args).await,
        Command::Get(args) => cli::get::run(args).await,
    }
}
