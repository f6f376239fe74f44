use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;

use lock_auth::{JsonFileStore, LockStore, provision_lock};

use super::Context;

/**
    Provision a lock: generate its key pair and seal it, together with the
    mac id, under the storage vault.

    Prints the sealed record as JSON, and appends it to `--store` if given.
*/
#[derive(Args)]
pub struct ProvisionCommand {
    /// Lock MAC id.
    mac_id: String,

    /// JSON record file to persist into.
    #[arg(short, long)]
    store: Option<PathBuf>,
}

impl ProvisionCommand {
    pub async fn run(self, ctx: &Context) -> Result<()> {
        let storage = ctx.storage_vault()?;
        let curve = ctx.config.lock_curve;
        let toolkit = ctx.toolkit();
        let mac_id = self.mac_id.clone();

        let record = ctx
            .run_blocking("provision", move || {
                provision_lock(toolkit.as_ref(), &storage, curve, &mac_id)
            })
            .await?;

        if let Some(path) = &self.store {
            JsonFileStore::new(path)
                .persist(&record)
                .with_context(|| format!("failed to persist into {}", path.display()))?;
            eprintln!("Stored lock {} in {}", self.mac_id, path.display());
        }

        println!("{}", serde_json::to_string_pretty(&record)?);
        Ok(())
    }
}
