use serde::{Deserialize, Serialize};

use lock_core::Curve;

use crate::crypto::Vault;
use crate::error::{AuthError, AuthResult};
use crate::keys::{KeyPair, Toolkit};

/**
    A provisioned lock as persisted.

    Every field is a storage-vault ciphertext in hex; no plaintext key
    material is ever held in a record.
*/
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockRecord {
    pub mac_id: String,
    pub public_key: String,
    pub private_key: String,
}

/**
    The decrypted contents of a [`LockRecord`].
*/
#[derive(Debug, Clone)]
pub struct LockSecrets {
    pub mac_id: String,
    pub key_pair: KeyPair,
}

impl LockRecord {
    /**
        Decrypt all fields with the storage vault.

        Fails with [`AuthError::EmptyField`] if a field is empty, either as
        stored or after decryption.
    */
    pub fn unseal(&self, storage: &Vault, curve: Curve) -> AuthResult<LockSecrets> {
        let mac_id = open_field(storage, "mac_id", &self.mac_id)?;
        let public_key = open_field(storage, "public_key", &self.public_key)?;
        let private_key = open_field(storage, "private_key", &self.private_key)?;

        Ok(LockSecrets {
            mac_id,
            key_pair: KeyPair::from_hex(curve, &public_key, &private_key)?,
        })
    }
}

fn open_field(storage: &Vault, name: &'static str, sealed: &str) -> AuthResult<String> {
    if sealed.trim().is_empty() {
        return Err(AuthError::EmptyField(name));
    }
    let value = storage.decrypt_value(sealed)?;
    if value.is_empty() {
        return Err(AuthError::EmptyField(name));
    }
    Ok(value)
}

/**
    Generate a key pair for a new lock and seal it, with the mac id, under
    the storage vault.
*/
pub fn provision_lock(
    toolkit: &dyn Toolkit,
    storage: &Vault,
    curve: Curve,
    mac_id: &str,
) -> AuthResult<LockRecord> {
    if mac_id.is_empty() {
        return Err(AuthError::EmptyField("mac_id"));
    }

    let keys = toolkit.generate(curve)?;
    tracing::debug!(%curve, "provisioned lock key pair");

    Ok(LockRecord {
        mac_id: storage.encrypt_value(mac_id),
        public_key: storage.encrypt_value(&keys.public_key_hex()),
        private_key: storage.encrypt_value(&keys.private_key_hex()),
    })
}
