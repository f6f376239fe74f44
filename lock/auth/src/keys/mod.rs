/*!
    Key material: generation, signing and the on-disk artifacts the
    toolkit backend needs.

    Two backends implement [`Toolkit`]:
    - [`NativeToolkit`] runs k256/p256 in-process (default)
    - [`OpensslToolkit`] drives an `openssl` binary through temp files
*/

use core::fmt;

use lock_core::{Curve, SCALAR_LEN};

use crate::crypto::{Signature, private_scalar};
use crate::error::{AuthError, AuthResult};

mod artifact;
mod dump;
mod native;
mod openssl;

pub use self::artifact::TempArtifact;
pub use self::dump::parse_key_dump;
pub use self::native::NativeToolkit;
pub use self::openssl::OpensslToolkit;

/**
    Generates key pairs and produces normalized signatures.

    Implementations hold no per-call state; each call is an independent
    pipeline and may run concurrently with others.
*/
pub trait Toolkit: Send + Sync {
    /// Generate a fresh key pair on `curve`.
    fn generate(&self, curve: Curve) -> AuthResult<KeyPair>;

    /// ECDSA-SHA256 sign `message` with a raw private scalar.
    fn sign(&self, curve: Curve, private_key: &[u8], message: &[u8]) -> AuthResult<Signature>;
}

/**
    An elliptic-curve key pair in raw form.

    The public key is a SEC1 point (uncompressed from generation), the
    private key a 32-byte big-endian scalar.
*/
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    curve: Curve,
    public_key: Vec<u8>,
    private_key: [u8; SCALAR_LEN],
}

impl KeyPair {
    /**
        Build a key pair from raw components.

        A scalar carrying a leading `00` sign byte is normalized to 32 bytes.
    */
    pub fn new(curve: Curve, public_key: Vec<u8>, private_key: &[u8]) -> AuthResult<Self> {
        if public_key.is_empty() {
            return Err(AuthError::InvalidPublicKey {
                curve: curve.to_name(),
                reason: "empty point".to_string(),
            });
        }
        let private_key = private_scalar(curve, private_key)?;
        Ok(Self {
            curve,
            public_key,
            private_key,
        })
    }

    pub fn from_hex(curve: Curve, public_hex: &str, private_hex: &str) -> AuthResult<Self> {
        let public_key =
            hex::decode(public_hex.trim()).map_err(|e| AuthError::hex("public key", e))?;
        let private_key =
            hex::decode(private_hex.trim()).map_err(|e| AuthError::hex("private key", e))?;
        Self::new(curve, public_key, &private_key)
    }

    pub fn curve(&self) -> Curve {
        self.curve
    }

    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    pub fn private_key(&self) -> &[u8] {
        &self.private_key
    }

    pub fn public_key_hex(&self) -> String {
        hex::encode(&self.public_key)
    }

    pub fn private_key_hex(&self) -> String {
        hex::encode(self.private_key)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("curve", &self.curve)
            .field("public_key", &self.public_key_hex())
            .finish_non_exhaustive()
    }
}
