use lock_core::{Curve, SCALAR_LEN, fit_be_bytes};

use crate::error::{AuthError, AuthResult};

/**
    ECDH shared secret: the X-coordinate of `private_scalar * public_point`.

    `public_point` is a SEC1 encoded point (uncompressed `04 || X || Y` as
    produced by key generation, compressed points are accepted too).
    `private_scalar` is big-endian; leading zero bytes are ignored.

    Deterministic: the same inputs always yield the same 32 bytes.
*/
pub fn derive_secret(
    curve: Curve,
    public_point: &[u8],
    private_scalar: &[u8],
) -> AuthResult<[u8; SCALAR_LEN]> {
    let scalar = self::private_scalar(curve, private_scalar)?;
    let mut out = [0u8; SCALAR_LEN];

    match curve {
        Curve::Secp256k1 => {
            let secret = k256::SecretKey::from_slice(&scalar)
                .map_err(|e| invalid_private(curve, e.to_string()))?;
            let public = k256::PublicKey::from_sec1_bytes(public_point)
                .map_err(|e| invalid_public(curve, e.to_string()))?;
            let shared = k256::ecdh::diffie_hellman(secret.to_nonzero_scalar(), public.as_affine());
            out.copy_from_slice(shared.raw_secret_bytes());
        }
        Curve::Prime256v1 => {
            let secret = p256::SecretKey::from_slice(&scalar)
                .map_err(|e| invalid_private(curve, e.to_string()))?;
            let public = p256::PublicKey::from_sec1_bytes(public_point)
                .map_err(|e| invalid_public(curve, e.to_string()))?;
            let shared = p256::ecdh::diffie_hellman(secret.to_nonzero_scalar(), public.as_affine());
            out.copy_from_slice(shared.raw_secret_bytes());
        }
    }

    Ok(out)
}

/**
    Fit a private scalar into exactly 32 bytes.
*/
pub(crate) fn private_scalar(curve: Curve, bytes: &[u8]) -> AuthResult<[u8; SCALAR_LEN]> {
    fit_be_bytes::<SCALAR_LEN>(bytes).ok_or_else(|| {
        invalid_private(curve, format!("scalar is {} bytes, max {SCALAR_LEN}", bytes.len()))
    })
}

fn invalid_private(curve: Curve, reason: String) -> AuthError {
    AuthError::InvalidPrivateKey {
        curve: curve.to_name(),
        reason,
    }
}

fn invalid_public(curve: Curve, reason: String) -> AuthError {
    AuthError::InvalidPublicKey {
        curve: curve.to_name(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;
    use crate::error::ErrorKind;
    use crate::keys::{NativeToolkit, Toolkit};

    const K256_G: [u8; 65] = hex!(
        "04"
        "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"
    );
    const K256_2G_X: [u8; 32] =
        hex!("c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5");

    const P256_G: [u8; 65] = hex!(
        "04"
        "6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296"
        "4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5"
    );
    const P256_2G_X: [u8; 32] =
        hex!("7cf27b188d034f7e8a52380304b51ac3c08969e277f21b35a60b48fc47669978");

    #[test]
    fn secp256k1_known_point() {
        let secret = derive_secret(Curve::Secp256k1, &K256_G, &[0x02]).unwrap();
        assert_eq!(secret, K256_2G_X);
    }

    #[test]
    fn prime256v1_known_point() {
        let secret = derive_secret(Curve::Prime256v1, &P256_G, &[0x02]).unwrap();
        assert_eq!(secret, P256_2G_X);
    }

    #[test]
    fn sign_padded_scalar_is_accepted() {
        let mut scalar = [0u8; 33];
        scalar[32] = 0x02;
        let secret = derive_secret(Curve::Secp256k1, &K256_G, &scalar).unwrap();
        assert_eq!(secret, K256_2G_X);
    }

    #[test]
    fn agreement_is_symmetric() {
        for curve in [Curve::Secp256k1, Curve::Prime256v1] {
            let a = NativeToolkit.generate(curve).unwrap();
            let b = NativeToolkit.generate(curve).unwrap();
            let ab = derive_secret(curve, b.public_key(), a.private_key()).unwrap();
            let ba = derive_secret(curve, a.public_key(), b.private_key()).unwrap();
            assert_eq!(ab, ba);
        }
    }

    #[test]
    fn deterministic() {
        let keys = NativeToolkit.generate(Curve::Secp256k1).unwrap();
        let first = derive_secret(Curve::Secp256k1, keys.public_key(), keys.private_key()).unwrap();
        let second = derive_secret(Curve::Secp256k1, keys.public_key(), keys.private_key()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn point_on_wrong_curve_is_rejected() {
        let err = derive_secret(Curve::Secp256k1, &P256_G, &[0x02]).unwrap_err();
        assert!(matches!(err, AuthError::InvalidPublicKey { .. }));
        assert_eq!(err.kind(), ErrorKind::Crypto);
    }

    #[test]
    fn garbage_point_is_rejected() {
        let err = derive_secret(Curve::Prime256v1, &[0x04, 0x01, 0x02], &[0x02]).unwrap_err();
        assert!(matches!(err, AuthError::InvalidPublicKey { .. }));
    }

    #[test]
    fn zero_scalar_is_rejected() {
        let err = derive_secret(Curve::Secp256k1, &K256_G, &[0u8; 32]).unwrap_err();
        assert!(matches!(err, AuthError::InvalidPrivateKey { .. }));
    }

    #[test]
    fn oversized_scalar_is_rejected() {
        let err = derive_secret(Curve::Secp256k1, &K256_G, &[0x01; 33]).unwrap_err();
        assert!(matches!(err, AuthError::InvalidPrivateKey { .. }));
        assert_eq!(err.kind(), ErrorKind::Crypto);
    }
}
