use anyhow::{Context as _, Result};
use clap::Args;

use lock_auth::Curve;

use super::Context;

/**
    Sign a message (ECDSA-SHA256) with a raw private scalar.
*/
#[derive(Args)]
pub struct SignCommand {
    /// Message to sign, as text.
    message: String,

    /// Private scalar (hex).
    #[arg(short, long)]
    private_key: String,

    /// Curve. Defaults to the lock curve.
    #[arg(long)]
    curve: Option<Curve>,

    /// Verify the signature against this public point (hex) before printing.
    #[arg(long)]
    public_key: Option<String>,
}

impl SignCommand {
    pub async fn run(self, ctx: &Context) -> Result<()> {
        let curve = self.curve.unwrap_or(ctx.config.lock_curve);
        let private_key = hex::decode(self.private_key.trim()).context("invalid private key hex")?;
        let message = self.message.clone().into_bytes();

        let toolkit = ctx.toolkit();
        let signature = ctx
            .run_blocking("sign", move || toolkit.sign(curve, &private_key, &message))
            .await?;

        if let Some(public_key) = &self.public_key {
            let public_key = hex::decode(public_key.trim()).context("invalid public key hex")?;
            signature
                .verify(curve, &public_key, self.message.as_bytes())
                .context("signature does not verify")?;
        }

        println!("{}", signature.to_hex());
        Ok(())
    }
}
