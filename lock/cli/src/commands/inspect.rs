use anyhow::{Context as _, Result};
use clap::Args;

use lock_auth::{AuthorizationMessage, Curve};

use super::Context;

/**
    Decode an authorization message, and check its signature if a public
    key is given.
*/
#[derive(Args)]
pub struct InspectCommand {
    /// Message (202 hex characters).
    message: String,

    /// Lock public point (hex) to verify against.
    #[arg(short, long)]
    public_key: Option<String>,

    /// Curve. Defaults to the lock curve.
    #[arg(long)]
    curve: Option<Curve>,
}

impl InspectCommand {
    pub fn run(self, ctx: &Context) -> Result<()> {
        let message = AuthorizationMessage::from_hex(self.message.trim())
            .context("failed to parse authorization message")?;

        println!("User Type:        {}", message.user_type);
        println!("Nonce:            {}", message.nonce());
        println!("Expiry:           {}", message.expiry);
        println!("Security Option:  {:02x}", message.security_option);
        println!("Signature R:      {}", hex::encode(message.signature.r()));
        println!("Signature S:      {}", hex::encode(message.signature.s()));

        if let Some(public_key) = &self.public_key {
            let curve = self.curve.unwrap_or(ctx.config.lock_curve);
            let public_key = hex::decode(public_key.trim()).context("invalid public key hex")?;
            message
                .verify(curve, &public_key)
                .context("signature does not verify")?;
            println!();
            println!("Signature verified ({curve})");
        }

        Ok(())
    }
}
