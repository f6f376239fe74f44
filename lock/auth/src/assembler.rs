use lock_core::{Curve, Expiry, SECURITY_OPTION_NONE, UserType};

use crate::crypto::Vault;
use crate::error::AuthResult;
use crate::keys::Toolkit;
use crate::lock::LockRecord;
use crate::message::{AuthorizationMessage, fit_nonce, header};

/**
    Builds signed authorization messages for stored locks.

    Holds only borrowed collaborators, so one assembler can serve any
    number of requests, each an independent pipeline:

    1. unseal the lock record with the storage vault
    2. encrypt `mac_id || other_info` under the lock's own key pair
    3. fit the ciphertext into the nonce field
    4. sign the header with the lock's private key
*/
pub struct Assembler<'a> {
    storage: &'a Vault,
    toolkit: &'a dyn Toolkit,
    curve: Curve,
}

impl<'a> Assembler<'a> {
    pub fn new(storage: &'a Vault, toolkit: &'a dyn Toolkit, curve: Curve) -> Self {
        Self {
            storage,
            toolkit,
            curve,
        }
    }

    pub fn assemble(
        &self,
        lock: &LockRecord,
        expiry: Expiry,
        is_owner: bool,
        other_info: &str,
    ) -> AuthResult<AuthorizationMessage> {
        let secrets = lock.unseal(self.storage, self.curve)?;
        let keys = &secrets.key_pair;

        let lock_vault = Vault::derive(self.curve, keys.public_key(), keys.private_key())?;
        let plaintext = format!("{}{other_info}", secrets.mac_id);
        let nonce = fit_nonce(&lock_vault.encrypt_value(&plaintext));

        let user_type = UserType::from_owner(is_owner);
        let header = header(user_type, &nonce, expiry, SECURITY_OPTION_NONE);
        let signature = self
            .toolkit
            .sign(self.curve, keys.private_key(), header.as_bytes())?;

        tracing::debug!(%user_type, %expiry, curve = %self.curve, "assembled authorization");

        AuthorizationMessage::new(user_type, &nonce, expiry, signature)
    }
}
