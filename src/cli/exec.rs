//! Exec command - caches a command's output under a key

use std::process::ExitCode;

use clap::Args;
use serde::{Deserialize, Serialize};
use tokio::process::Command;

use crate::domain::cache::{CacheDecision, Controller, Producer, PutOptions};
use crate::domain::DomainError;
use crate::infrastructure::services::KvCacheable;

#[derive(Args, Debug, Clone)]
pub struct ExecArgs {
    /// Cache key
    #[arg(long)]
    pub key: String,

    /// Expire the entry after this many seconds
    #[arg(long)]
    pub ttl: Option<u64>,

    /// Expire the entry at this UNIX timestamp (seconds)
    #[arg(long)]
    pub expiration: Option<u64>,

    /// Cache output even when the command exits non-zero
    #[arg(long)]
    pub cache_failures: bool,

    /// Log cache hits and writes
    #[arg(long)]
    pub debug: bool,

    /// Command to run, followed by its arguments
    #[arg(
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

impl ExecArgs {
    /// Per-call put options from the command line
    fn put_options(&self) -> PutOptions {
        PutOptions {
            expiration: self.expiration,
            expiration_ttl: self.ttl,
            ..Default::default()
        }
    }
}

/// Captured result of a command run; this is what gets cached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Caches successful runs, or every run with `cache_failures`
fn output_controller(cache_failures: bool, options: PutOptions) -> Controller<CommandOutput> {
    Controller::from_fn(move |output: &CommandOutput| {
        if output.success() || cache_failures {
            CacheDecision::cache().with_options(options.clone())
        } else {
            CacheDecision::skip()
        }
    })
}

async fn run_command(program: String, args: Vec<String>) -> Result<CommandOutput, DomainError> {
    let output = Command::new(&program)
        .args(&args)
        .output()
        .await
        .map_err(|e| DomainError::producer(format!("Failed to run '{}': {}", program, e)))?;

    Ok(CommandOutput {
        // No code when killed by a signal
        status: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Runs the command through the cache-aside wrapper
pub async fn execute(
    cacheable: &KvCacheable,
    args: &ExecArgs,
) -> Result<CommandOutput, DomainError> {
    let (program, rest) = args
        .command
        .split_first()
        .ok_or_else(|| DomainError::validation("No command given"))?;

    let producer = Producer::from_future(run_command(program.clone(), rest.to_vec()));
    let controller = output_controller(args.cache_failures, args.put_options());

    cacheable.invoke(&args.key, producer, controller).await
}

/// Statuses outside 0..=255 (including signals) exit with 1
fn exit_byte(status: i32) -> u8 {
    u8::try_from(status).unwrap_or(1)
}

pub async fn run(args: ExecArgs) -> anyhow::Result<ExitCode> {
    let config = super::bootstrap();

    let options = config.cache.clone().with_debug(config.cache.debug || args.debug);
    let store = super::open_store(&config.store).await?;
    let cacheable = KvCacheable::with_options(store, options);

    let output = execute(&cacheable, &args).await?;

    print!("{}", output.stdout);
    eprint!("{}", output.stderr);

    Ok(ExitCode::from(exit_byte(output.status)))
}
