mod authorize;
mod inspect;
mod keygen;
mod password;
mod provision;
mod sign;
mod vault;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result, bail};

use lock_auth::{AuthError, AuthResult, Config, Curve, Toolkit, Vault};

pub use self::authorize::AuthorizeCommand;
pub use self::inspect::InspectCommand;
pub use self::keygen::KeygenCommand;
pub use self::password::PasswordCommand;
pub use self::provision::ProvisionCommand;
pub use self::sign::SignCommand;
pub use self::vault::{DecryptCommand, EncryptCommand};

/**
    Shared state for one command invocation.
*/
pub struct Context {
    pub config: Config,
    toolkit: Arc<dyn Toolkit>,
    timeout: Option<Duration>,
}

impl Context {
    pub fn new(config: Config, timeout: Option<Duration>) -> Self {
        let toolkit = Arc::from(config.toolkit());
        Self {
            config,
            toolkit,
            timeout,
        }
    }

    pub fn toolkit(&self) -> Arc<dyn Toolkit> {
        Arc::clone(&self.toolkit)
    }

    pub fn storage_vault(&self) -> Result<Vault> {
        self.config
            .storage_vault()
            .context("storage vault is not configured")
    }

    /**
        Run blocking toolkit work off the async runtime, bounded by the
        `--timeout` deadline. An expired deadline is a toolkit timeout.
    */
    pub async fn run_blocking<T, F>(&self, what: &'static str, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce() -> AuthResult<T> + Send + 'static,
    {
        let task = tokio::task::spawn_blocking(f);
        let joined = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, task)
                .await
                .map_err(|_| AuthError::ToolkitTimeout(what.to_string()))?,
            None => task.await,
        };
        let value = joined.with_context(|| format!("{what} task failed"))??;
        Ok(value)
    }
}

/**
    Resolve an explicit key pair given on the command line, or fall back to
    the configured storage vault.
*/
fn vault_from_args(
    ctx: &Context,
    curve: Option<Curve>,
    public_key: Option<&str>,
    private_key: Option<&str>,
) -> Result<Vault> {
    match (public_key, private_key) {
        (Some(public_key), Some(private_key)) => {
            let curve = curve.unwrap_or(ctx.config.storage.curve);
            Ok(Vault::from_hex_keys(curve, public_key, private_key)
                .context("failed to derive vault key")?)
        }
        (None, None) => ctx.storage_vault(),
        _ => bail!("--public-key and --private-key must be given together"),
    }
}
