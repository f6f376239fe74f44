use anyhow::Result;
use clap::Args;

use lock_auth::Curve;

use super::Context;

/**
    Generate a key pair with the configured toolkit backend.
*/
#[derive(Args)]
pub struct KeygenCommand {
    /// Curve name (secp256k1, prime256v1). Defaults to the lock curve.
    #[arg(long)]
    curve: Option<Curve>,
}

impl KeygenCommand {
    pub async fn run(self, ctx: &Context) -> Result<()> {
        let curve = self.curve.unwrap_or(ctx.config.lock_curve);
        let toolkit = ctx.toolkit();
        let keys = ctx
            .run_blocking("keygen", move || toolkit.generate(curve))
            .await?;

        println!("Curve:        {curve}");
        println!("Public Key:   {}", keys.public_key_hex());
        println!("Private Key:  {}", keys.private_key_hex());

        Ok(())
    }
}
