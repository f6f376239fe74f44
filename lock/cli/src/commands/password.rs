use anyhow::{Result, bail};
use clap::{Args, Subcommand};

/**
    Salted password credentials.
*/
#[derive(Args)]
pub struct PasswordCommand {
    #[command(subcommand)]
    command: PasswordSubcommand,
}

#[derive(Subcommand)]
enum PasswordSubcommand {
    /// Print a salted hash of a password.
    Hash {
        password: String,
    },
    /// Check a password against a stored salted hash.
    Verify {
        password: String,
        stored: String,
    },
}

impl PasswordCommand {
    pub fn run(self) -> Result<()> {
        match self.command {
            PasswordSubcommand::Hash { password } => {
                println!("{}", lock_auth::hash_password(&password));
            }
            PasswordSubcommand::Verify { password, stored } => {
                if !lock_auth::verify_password(&password, stored.trim()) {
                    bail!("password does not match");
                }
                println!("ok");
            }
        }
        Ok(())
    }
}
