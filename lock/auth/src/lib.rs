#![allow(clippy::doc_overindented_list_items)]

mod assembler;
mod config;
mod error;
mod lock;
mod message;
mod store;

pub mod crypto;
pub mod keys;

// Re-export shared lock types from lock-core
pub use lock_core::{
    AUTHORIZATION_HEX_LEN, Curve, Expiry, NONCE_HEX_LEN, ParseError, SIGNATURE_LEN, UserType,
};

pub use self::assembler::Assembler;
pub use self::config::{
    Backend, Config, ConfigError, ENV_CURVE, ENV_DB_CURVE, ENV_DB_PRIVATE_KEY, ENV_DB_PUBLIC_KEY,
    ENV_KEYS_DIR, ENV_OPENSSL, ENV_TOOLKIT, StorageConfig, ToolkitConfig,
};
pub use self::crypto::{Signature, Vault, derive_secret, hash_password, verify_password};
pub use self::error::{AuthError, AuthResult, ErrorKind};
pub use self::keys::{KeyPair, NativeToolkit, OpensslToolkit, Toolkit};
pub use self::lock::{LockRecord, LockSecrets, provision_lock};
pub use self::message::AuthorizationMessage;
pub use self::store::{JsonFileStore, LockStore, MemoryStore, fetch_lock};
