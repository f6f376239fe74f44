use core::fmt;
use core::str::FromStr;
use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use lock_core::{Curve, ParseError};

use crate::crypto::Vault;
use crate::error::AuthError;
use crate::keys::{NativeToolkit, OpensslToolkit, Toolkit};

pub const ENV_DB_CURVE: &str = "LOCK_DB_CURVE";
pub const ENV_DB_PUBLIC_KEY: &str = "LOCK_DB_PUBLIC_KEY";
pub const ENV_DB_PRIVATE_KEY: &str = "LOCK_DB_PRIVATE_KEY";
pub const ENV_TOOLKIT: &str = "LOCK_TOOLKIT";
pub const ENV_OPENSSL: &str = "LOCK_OPENSSL";
pub const ENV_KEYS_DIR: &str = "LOCK_KEYS_DIR";
pub const ENV_CURVE: &str = "LOCK_CURVE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("missing required setting {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/**
    Runtime configuration.

    Loaded from YAML, then overridden by `LOCK_*` environment variables:

    ```yaml
    storage:
      curve: prime256v1
      public_key: 04ab...
      private_key: 1f2e...
    toolkit:
      backend: openssl
      program: /usr/bin/openssl
      work_dir: /var/lib/lock/keys
    lock_curve: secp256k1
    ```
*/
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub storage: StorageConfig,
    pub toolkit: ToolkitConfig,
    /// Curve of lock device key pairs.
    pub lock_curve: Curve,
}

/**
    Key pair whose ECDH secret keys the storage vault.
*/
#[derive(Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    pub curve: Curve,
    pub public_key: Option<String>,
    pub private_key: Option<String>,
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("curve", &self.curve)
            .field("public_key", &self.public_key)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolkitConfig {
    pub backend: Backend,
    pub program: PathBuf,
    /// Directory for temporary key files, the system temp dir if unset.
    pub work_dir: Option<PathBuf>,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            program: PathBuf::from("openssl"),
            work_dir: None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Native,
    Openssl,
}

impl Backend {
    pub const fn to_name(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Openssl => "openssl",
        }
    }
}

impl FromStr for Backend {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" => Ok(Self::Native),
            "openssl" => Ok(Self::Openssl),
            _ => Err(ParseError {
                kind: "toolkit backend",
                value: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_name())
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /**
        Read the optional config file, then apply environment overrides.
    */
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                Self::from_yaml(&yaml)?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /**
        Override settings from `lookup`, keyed by `LOCK_*` variable name.
        Empty values are ignored.
    */
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(ENV_DB_CURVE) {
            self.storage.curve = parse(ENV_DB_CURVE, &v)?;
        }
        if let Some(v) = get(ENV_DB_PUBLIC_KEY) {
            self.storage.public_key = Some(v);
        }
        if let Some(v) = get(ENV_DB_PRIVATE_KEY) {
            self.storage.private_key = Some(v);
        }
        if let Some(v) = get(ENV_TOOLKIT) {
            self.toolkit.backend = parse(ENV_TOOLKIT, &v)?;
        }
        if let Some(v) = get(ENV_OPENSSL) {
            self.toolkit.program = PathBuf::from(v);
        }
        if let Some(v) = get(ENV_KEYS_DIR) {
            self.toolkit.work_dir = Some(PathBuf::from(v));
        }
        if let Some(v) = get(ENV_CURVE) {
            self.lock_curve = parse(ENV_CURVE, &v)?;
        }
        Ok(())
    }

    /**
        Check everything a lock pipeline needs: storage keys present and
        usable, and an existing work directory if one is set.
    */
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.storage_vault()?;
        if let Some(dir) = &self.toolkit.work_dir {
            if !dir.is_dir() {
                return Err(ConfigError::Invalid {
                    key: "toolkit.work_dir",
                    reason: format!("{} is not a directory", dir.display()),
                });
            }
        }
        Ok(())
    }

    /**
        The vault sealing persisted lock records.
    */
    pub fn storage_vault(&self) -> Result<Vault, ConfigError> {
        let public_key = self
            .storage
            .public_key
            .as_deref()
            .ok_or(ConfigError::Missing("storage.public_key"))?;
        let private_key = self
            .storage
            .private_key
            .as_deref()
            .ok_or(ConfigError::Missing("storage.private_key"))?;

        Vault::from_hex_keys(self.storage.curve, public_key, private_key).map_err(
            |e: AuthError| ConfigError::Invalid {
                key: "storage",
                reason: e.to_string(),
            },
        )
    }

    pub fn toolkit(&self) -> Box<dyn Toolkit> {
        match self.toolkit.backend {
            Backend::Native => Box::new(NativeToolkit),
            Backend::Openssl => Box::new(OpensslToolkit::new(
                &self.toolkit.program,
                self.toolkit.work_dir.clone().unwrap_or_else(env::temp_dir),
            )),
        }
    }
}

fn parse<T: FromStr<Err = ParseError>>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|e: ParseError| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::error::ErrorKind;

    fn storage_keys() -> (String, String) {
        let pair = NativeToolkit.generate(Curve::Prime256v1).unwrap();
        (pair.public_key_hex(), pair.private_key_hex())
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.lock_curve, Curve::Secp256k1);
        assert_eq!(config.storage.curve, Curve::Secp256k1);
        assert_eq!(config.toolkit.backend, Backend::Native);
        assert_eq!(config.toolkit.program, PathBuf::from("openssl"));
        assert!(matches!(
            config.storage_vault().unwrap_err(),
            ConfigError::Missing("storage.public_key")
        ));
    }

    #[test]
    fn parses_yaml() {
        let config = Config::from_yaml(
            "storage:\n  curve: prime256v1\n  public_key: '04aa'\n  private_key: '01'\n\
             toolkit:\n  backend: openssl\n  program: /usr/local/bin/openssl\n\
             lock_curve: secp256k1\n",
        )
        .unwrap();
        assert_eq!(config.storage.curve, Curve::Prime256v1);
        assert_eq!(config.storage.public_key.as_deref(), Some("04aa"));
        assert_eq!(config.toolkit.backend, Backend::Openssl);
        assert_eq!(config.toolkit.program, PathBuf::from("/usr/local/bin/openssl"));
        assert_eq!(config.toolkit.work_dir, None);
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(Config::from_yaml("{}").unwrap(), Config::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            Config::from_yaml("storage:\n  curv: secp256k1\n").unwrap_err(),
            ConfigError::Yaml(_)
        ));
        assert!(Config::from_yaml("toolkit:\n  backend: gpg\n").is_err());
    }

    #[test]
    fn env_overrides_file() {
        let mut config =
            Config::from_yaml("storage:\n  public_key: file\ntoolkit:\n  backend: openssl\n")
                .unwrap();
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_DB_PUBLIC_KEY, "env"),
            (ENV_DB_CURVE, "P-256"),
            (ENV_TOOLKIT, "Native"),
            (ENV_KEYS_DIR, "/tmp/keys"),
            (ENV_CURVE, "prime256v1"),
            (ENV_OPENSSL, ""),
        ]);
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.storage.public_key.as_deref(), Some("env"));
        assert_eq!(config.storage.curve, Curve::Prime256v1);
        assert_eq!(config.toolkit.backend, Backend::Native);
        assert_eq!(config.toolkit.work_dir, Some(PathBuf::from("/tmp/keys")));
        assert_eq!(config.toolkit.program, PathBuf::from("openssl"));
        assert_eq!(config.lock_curve, Curve::Prime256v1);
    }

    #[test]
    fn bad_env_value() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(|key| (key == ENV_CURVE).then(|| "ed25519".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: ENV_CURVE, .. }));
    }

    #[test]
    fn storage_vault_from_keys() {
        let (public_key, private_key) = storage_keys();
        let config = Config {
            storage: StorageConfig {
                curve: Curve::Prime256v1,
                public_key: Some(public_key.clone()),
                private_key: Some(private_key.clone()),
            },
            ..Default::default()
        };
        config.validate().unwrap();

        let expected = Vault::from_hex_keys(Curve::Prime256v1, &public_key, &private_key).unwrap();
        let vault = config.storage_vault().unwrap();
        assert_eq!(vault.encrypt_value("AABB"), expected.encrypt_value("AABB"));
    }

    #[test]
    fn storage_keys_on_wrong_curve() {
        let (public_key, private_key) = storage_keys();
        let config = Config {
            storage: StorageConfig {
                curve: Curve::Secp256k1,
                public_key: Some(public_key),
                private_key: Some(private_key),
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::Invalid { key: "storage", .. }
        ));
    }

    #[test]
    fn missing_work_dir() {
        let (public_key, private_key) = storage_keys();
        let mut config = Config::default();
        config.storage.curve = Curve::Prime256v1;
        config.storage.public_key = Some(public_key);
        config.storage.private_key = Some(private_key);
        config.toolkit.work_dir = Some(PathBuf::from("/nonexistent/lock-keys"));
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::Invalid { key: "toolkit.work_dir", .. }
        ));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lock.yaml");
        std::fs::write(&path, "lock_curve: prime256v1\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        // LOCK_CURVE may be set in the environment running the tests
        if env::var(ENV_CURVE).map_or(true, |v| v.trim().is_empty()) {
            assert_eq!(config.lock_curve, Curve::Prime256v1);
        }

        assert!(matches!(
            Config::load(Some(&dir.path().join("missing.yaml"))).unwrap_err(),
            ConfigError::Io { .. }
        ));
    }

    #[test]
    fn selects_backend() {
        let config = Config::default();
        config.toolkit().generate(Curve::Secp256k1).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.toolkit.backend = Backend::Openssl;
        config.toolkit.program = PathBuf::from("/nonexistent/openssl");
        config.toolkit.work_dir = Some(dir.path().to_path_buf());
        let err = config.toolkit().generate(Curve::Secp256k1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Subprocess);
    }

    #[test]
    fn debug_redacts_private_key() {
        let storage = StorageConfig {
            private_key: Some("deadbeef".into()),
            ..Default::default()
        };
        let shown = format!("{storage:?}");
        assert!(!shown.contains("deadbeef"));
        assert!(shown.contains("redacted"));
    }
}
