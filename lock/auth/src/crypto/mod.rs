/*!
    Lock authorization cryptographic operations.

    Asymmetric crypto runs on secp256k1 (k256) or prime256v1 (p256):
    - ECDH shared secrets for storage and nonce encryption keys
    - ECDSA-SHA256 signatures, carried as raw 64-byte R||S

    Symmetric crypto:
    - AES-256-ECB with PKCS#7 padding, keyed by an ECDH shared secret

    Password credentials are salted SHA-256 digests.
*/

mod der;
mod ecdh;
mod password;
mod signature;
mod vault;

pub use self::der::normalize_der_signature;
pub use self::ecdh::derive_secret;
pub use self::password::{SALT_LEN, hash_password, verify_password};
pub use self::signature::Signature;
pub use self::vault::Vault;

pub(crate) use self::ecdh::private_scalar;
