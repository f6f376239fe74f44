use anyhow::{Context as _, Result};
use clap::Args;

use lock_auth::Curve;

use super::{Context, vault_from_args};

/// Key material for a vault other than the configured storage vault.
#[derive(Args)]
struct VaultKeys {
    /// Curve of the key pair. Defaults to the storage curve.
    #[arg(long)]
    curve: Option<Curve>,

    /// Public point (hex).
    #[arg(long)]
    public_key: Option<String>,

    /// Private scalar (hex).
    #[arg(long)]
    private_key: Option<String>,
}

/**
    Encrypt a value. Uses the storage vault unless a key pair is given.
*/
#[derive(Args)]
pub struct EncryptCommand {
    /// Plaintext value.
    value: String,

    #[command(flatten)]
    keys: VaultKeys,
}

impl EncryptCommand {
    pub fn run(self, ctx: &Context) -> Result<()> {
        let vault = vault_from_args(
            ctx,
            self.keys.curve,
            self.keys.public_key.as_deref(),
            self.keys.private_key.as_deref(),
        )?;
        println!("{}", vault.encrypt_value(&self.value));
        Ok(())
    }
}

/**
    Decrypt a hex ciphertext. Uses the storage vault unless a key pair is
    given.
*/
#[derive(Args)]
pub struct DecryptCommand {
    /// Ciphertext (hex).
    ciphertext: String,

    #[command(flatten)]
    keys: VaultKeys,
}

impl DecryptCommand {
    pub fn run(self, ctx: &Context) -> Result<()> {
        let vault = vault_from_args(
            ctx,
            self.keys.curve,
            self.keys.public_key.as_deref(),
            self.keys.private_key.as_deref(),
        )?;
        let value = vault
            .decrypt_value(&self.ciphertext)
            .context("failed to decrypt value")?;
        println!("{value}");
        Ok(())
    }
}
