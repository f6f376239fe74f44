use lock_core::{Curve, SIGNATURE_LEN};
use rand_core::OsRng;

use super::{KeyPair, Toolkit};
use crate::crypto::{Signature, private_scalar};
use crate::error::{AuthError, AuthResult};

/**
    In-process backend on k256 (secp256k1) and p256 (prime256v1).
*/
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeToolkit;

impl Toolkit for NativeToolkit {
    fn generate(&self, curve: Curve) -> AuthResult<KeyPair> {
        use k256::elliptic_curve::sec1::ToEncodedPoint;

        let (public_key, private_key) = match curve {
            Curve::Secp256k1 => {
                let secret = k256::SecretKey::random(&mut OsRng);
                let point = secret.public_key().to_encoded_point(false);
                (point.as_bytes().to_vec(), secret.to_bytes().to_vec())
            }
            Curve::Prime256v1 => {
                let secret = p256::SecretKey::random(&mut OsRng);
                let point = secret.public_key().to_encoded_point(false);
                (point.as_bytes().to_vec(), secret.to_bytes().to_vec())
            }
        };
        tracing::debug!(%curve, "generated native key pair");
        KeyPair::new(curve, public_key, &private_key)
    }

    fn sign(&self, curve: Curve, private_key: &[u8], message: &[u8]) -> AuthResult<Signature> {
        let scalar = private_scalar(curve, private_key)?;
        let mut out = [0u8; SIGNATURE_LEN];
        match curve {
            Curve::Secp256k1 => {
                use k256::ecdsa::{SigningKey, signature::Signer};

                let key = SigningKey::from_slice(&scalar)
                    .map_err(|e| invalid_private(curve, e.to_string()))?;
                let sig: k256::ecdsa::Signature = key
                    .try_sign(message)
                    .map_err(|e| AuthError::SigningFailed(e.to_string()))?;
                out.copy_from_slice(&sig.to_bytes());
            }
            Curve::Prime256v1 => {
                use p256::ecdsa::{SigningKey, signature::Signer};

                let key = SigningKey::from_slice(&scalar)
                    .map_err(|e| invalid_private(curve, e.to_string()))?;
                let sig: p256::ecdsa::Signature = key
                    .try_sign(message)
                    .map_err(|e| AuthError::SigningFailed(e.to_string()))?;
                out.copy_from_slice(&sig.to_bytes());
            }
        }
        Ok(Signature::from_bytes(out))
    }
}

fn invalid_private(curve: Curve, reason: String) -> AuthError {
    AuthError::InvalidPrivateKey {
        curve: curve.to_name(),
        reason,
    }
}
