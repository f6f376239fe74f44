use std::path::PathBuf;

use anyhow::{Context as _, Result, anyhow};
use clap::Args;

use lock_auth::{Assembler, Expiry, JsonFileStore, fetch_lock};

use super::Context;

/**
    Build a signed authorization message for a provisioned lock.
*/
#[derive(Args)]
pub struct AuthorizeCommand {
    /// Lock MAC id.
    mac_id: String,

    /// JSON record file holding the lock.
    #[arg(short, long)]
    store: PathBuf,

    /// Expiry as a unix timestamp. Omit for no expiry.
    #[arg(short, long)]
    expiry: Option<u32>,

    /// Authorize a guest instead of the owner.
    #[arg(short, long)]
    guest: bool,

    /// Extra information mixed into the encrypted nonce.
    #[arg(short, long, default_value = "")]
    info: String,
}

impl AuthorizeCommand {
    pub async fn run(self, ctx: &Context) -> Result<()> {
        let storage = ctx.storage_vault()?;
        let store = JsonFileStore::new(&self.store);
        let record = fetch_lock(&store, &storage, &self.mac_id)
            .context("failed to read lock store")?
            .ok_or_else(|| anyhow!("lock {} not found in {}", self.mac_id, self.store.display()))?;

        let curve = ctx.config.lock_curve;
        let toolkit = ctx.toolkit();
        let expiry = Expiry::from(self.expiry);
        let is_owner = !self.guest;
        let info = self.info;

        let message = ctx
            .run_blocking("authorize", move || {
                Assembler::new(&storage, toolkit.as_ref(), curve)
                    .assemble(&record, expiry, is_owner, &info)
            })
            .await?;

        println!("{message}");
        Ok(())
    }
}
