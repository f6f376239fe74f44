use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};

use lock_auth::Config;

use crate::commands::{
    AuthorizeCommand, Context, DecryptCommand, EncryptCommand, InspectCommand, KeygenCommand,
    PasswordCommand, ProvisionCommand, SignCommand,
};

/**
    Smart lock authorization tool.

    Settings come from `--config` (YAML) and `LOCK_*` environment variables.
*/
#[derive(Parser)]
#[command(name = "lockctl")]
pub struct Cli {
    /// YAML config file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Deadline in seconds for key generation and signing.
    #[arg(short, long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a key pair.
    Keygen(KeygenCommand),
    /// Encrypt a value with a vault.
    Encrypt(EncryptCommand),
    /// Decrypt a vault ciphertext.
    Decrypt(DecryptCommand),
    /// Sign a message and print the 64-byte R||S signature.
    Sign(SignCommand),
    /// Create and seal key material for a new lock.
    Provision(ProvisionCommand),
    /// Build an authorization message for a stored lock.
    Authorize(AuthorizeCommand),
    /// Decode an authorization message.
    Inspect(InspectCommand),
    /// Hash or verify a password.
    Password(PasswordCommand),
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let Self {
            config,
            timeout,
            command,
        } = self;
        let ctx = || -> Result<Context> {
            let config = Config::load(config.as_deref()).context("failed to load config")?;
            tracing::debug!(?config, "loaded config");
            Ok(Context::new(config, timeout.map(Duration::from_secs)))
        };

        match command {
            Command::Keygen(cmd) => cmd.run(&ctx()?).await,
            Command::Encrypt(cmd) => cmd.run(&ctx()?),
            Command::Decrypt(cmd) => cmd.run(&ctx()?),
            Command::Sign(cmd) => cmd.run(&ctx()?).await,
            Command::Provision(cmd) => cmd.run(&ctx()?).await,
            Command::Authorize(cmd) => cmd.run(&ctx()?).await,
            Command::Inspect(cmd) => cmd.run(&ctx()?),
            Command::Password(cmd) => cmd.run(),
        }
    }
}
