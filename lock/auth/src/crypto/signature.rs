use core::fmt;

use lock_core::{Curve, SCALAR_LEN, SIGNATURE_LEN, fit_be_bytes};

use crate::crypto::der::normalize_der_signature;
use crate::error::{AuthError, AuthResult};

/**
    ECDSA signature in the lock's fixed 64-byte form.

    Layout:
      [0..32]   R, big-endian, zero-padded
      [32..64]  S, big-endian, zero-padded
*/
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; SIGNATURE_LEN]);

impl Signature {
    pub const fn from_bytes(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    /**
        Build from variable-width big-endian R and S.

        Leading zero bytes are dropped and each component is left-padded to
        32 bytes. Fails if a component has more than 32 significant bytes.
    */
    pub fn from_components(r: &[u8], s: &[u8]) -> AuthResult<Self> {
        let r = fit_component('R', r)?;
        let s = fit_component('S', s)?;
        let mut out = [0u8; SIGNATURE_LEN];
        out[..SCALAR_LEN].copy_from_slice(&r);
        out[SCALAR_LEN..].copy_from_slice(&s);
        Ok(Self(out))
    }

    /**
        Normalize a DER-encoded signature, see [`normalize_der_signature`].
    */
    pub fn from_der(der: &[u8]) -> AuthResult<Self> {
        normalize_der_signature(der)
    }

    /**
        Parse the 128-character hex form.
    */
    pub fn from_hex(s: &str) -> AuthResult<Self> {
        let mut out = [0u8; SIGNATURE_LEN];
        hex::decode_to_slice(s, &mut out).map_err(|e| AuthError::hex("signature", e))?;
        Ok(Self(out))
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    pub fn r(&self) -> &[u8] {
        &self.0[..SCALAR_LEN]
    }

    pub fn s(&self) -> &[u8] {
        &self.0[SCALAR_LEN..]
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /**
        Verify this signature over `message` (ECDSA-SHA256) against a SEC1
        encoded public key.

        secp256k1 verification only accepts low-S signatures, so a high-S
        signature (as OpenSSL may produce) is normalized first.
    */
    pub fn verify(&self, curve: Curve, public_key: &[u8], message: &[u8]) -> AuthResult<()> {
        match curve {
            Curve::Secp256k1 => {
                use k256::ecdsa::{VerifyingKey, signature::Verifier};

                let key = VerifyingKey::from_sec1_bytes(public_key).map_err(|e| {
                    AuthError::InvalidPublicKey {
                        curve: curve.to_name(),
                        reason: e.to_string(),
                    }
                })?;
                let sig = k256::ecdsa::Signature::from_slice(&self.0)
                    .map_err(|_| AuthError::SignatureMismatch)?;
                let sig = sig.normalize_s().unwrap_or(sig);
                key.verify(message, &sig)
                    .map_err(|_| AuthError::SignatureMismatch)
            }
            Curve::Prime256v1 => {
                use p256::ecdsa::{VerifyingKey, signature::Verifier};

                let key = VerifyingKey::from_sec1_bytes(public_key).map_err(|e| {
                    AuthError::InvalidPublicKey {
                        curve: curve.to_name(),
                        reason: e.to_string(),
                    }
                })?;
                let sig = p256::ecdsa::Signature::from_slice(&self.0)
                    .map_err(|_| AuthError::SignatureMismatch)?;
                key.verify(message, &sig)
                    .map_err(|_| AuthError::SignatureMismatch)
            }
        }
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.to_hex())
    }
}

fn fit_component(component: char, bytes: &[u8]) -> AuthResult<[u8; SCALAR_LEN]> {
    fit_be_bytes::<SCALAR_LEN>(bytes).ok_or_else(|| AuthError::SignatureComponentTooLarge {
        component,
        len: bytes.iter().skip_while(|&&b| b == 0).count(),
    })
}
