use core::fmt;

use aes::Aes256;
use ecb::cipher::{BlockDecryptMut, BlockEncryptMut, KeyInit, block_padding::Pkcs7};

use lock_core::{Curve, SCALAR_LEN};

use crate::crypto::ecdh::derive_secret;
use crate::error::{AuthError, AuthResult};

type Aes256EcbEnc = ecb::Encryptor<Aes256>;
type Aes256EcbDec = ecb::Decryptor<Aes256>;

const BLOCK_LEN: usize = 16;

/**
    Symmetric vault keyed by an ECDH shared secret.

    AES-256-ECB with PKCS#7 padding, the 32-byte shared secret is the AES key.

    There is no IV: equal plaintexts under one key give equal ciphertexts.
    Stored lock records are looked up by their encrypted mac id, and the
    lock firmware's expectations for the nonce field are unknown, so the
    mode is kept. Do not reuse a vault for data where equality leaks matter.
*/
#[derive(Clone)]
pub struct Vault {
    key: [u8; SCALAR_LEN],
}

impl Vault {
    /**
        Create a vault from a raw 32-byte key.
    */
    pub fn new(key: [u8; SCALAR_LEN]) -> Self {
        Self { key }
    }

    /**
        Derive the vault key from a public point and a private scalar.
    */
    pub fn derive(curve: Curve, public_point: &[u8], private_scalar: &[u8]) -> AuthResult<Self> {
        derive_secret(curve, public_point, private_scalar).map(Self::new)
    }

    /**
        Derive the vault key from hex-encoded key material.
    */
    pub fn from_hex_keys(curve: Curve, public_hex: &str, private_hex: &str) -> AuthResult<Self> {
        let public = hex::decode(public_hex.trim()).map_err(|e| AuthError::hex("public key", e))?;
        let private =
            hex::decode(private_hex.trim()).map_err(|e| AuthError::hex("private key", e))?;
        Self::derive(curve, &public, &private)
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> Vec<u8> {
        Aes256EcbEnc::new((&self.key).into()).encrypt_padded_vec_mut::<Pkcs7>(plaintext)
    }

    pub fn decrypt(&self, ciphertext: &[u8]) -> AuthResult<Vec<u8>> {
        if ciphertext.is_empty() || !ciphertext.len().is_multiple_of(BLOCK_LEN) {
            return Err(AuthError::DecryptFailed(format!(
                "ciphertext must be a non-empty multiple of {BLOCK_LEN} bytes, got {}",
                ciphertext.len()
            )));
        }

        Aes256EcbDec::new((&self.key).into())
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| AuthError::DecryptFailed("invalid PKCS#7 padding".into()))
    }

    /**
        Encrypt a text value for storage, returning lowercase hex.
    */
    pub fn encrypt_value(&self, value: &str) -> String {
        hex::encode(self.encrypt(value.as_bytes()))
    }

    /**
        Decrypt a hex ciphertext produced by [`Vault::encrypt_value`].
    */
    pub fn decrypt_value(&self, ciphertext: &str) -> AuthResult<String> {
        let bytes = hex::decode(ciphertext.trim()).map_err(|e| AuthError::hex("ciphertext", e))?;
        String::from_utf8(self.decrypt(&bytes)?)
            .map_err(|_| AuthError::DecryptFailed("plaintext is not UTF-8".into()))
    }
}

impl fmt::Debug for Vault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vault").finish_non_exhaustive()
    }
}
