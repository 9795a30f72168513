//! Get command - prints the raw JSON stored under a key

use std::process::ExitCode;

use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct GetArgs {
    /// Cache key
    #[arg(long)]
    pub key: String,
}

pub async fn run(args: GetArgs) -> anyhow::Result<ExitCode> {
    let config = super::bootstrap();
    let store = super::open_store(&config.store).await?;

    match store.get_raw(&args.key).await? {
        Some(value) => {
            println!("{}", value);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("No value stored under '{}'", args.key);
            Ok(ExitCode::FAILURE)
        }
    }
}
