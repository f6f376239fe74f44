use core::fmt;

use lock_core::{
    AUTHORIZATION_HEX_LEN, Curve, Expiry, NONCE_HEX_LEN, SECURITY_OPTION_NONE, SIGNATURE_HEX_LEN,
    TIMESTAMP_HEX_LEN, UserType,
};

use crate::crypto::Signature;
use crate::error::{AuthError, AuthResult};

const FLAG_HEX_LEN: usize = 2;
const HEADER_HEX_LEN: usize = FLAG_HEX_LEN + NONCE_HEX_LEN + TIMESTAMP_HEX_LEN + FLAG_HEX_LEN;

/**
    Lock authorization message.

    Wire form is 202 lowercase hex characters:
      [0..2]     user type flag, `00` owner / `01` guest
      [2..64]    encrypted nonce (truncated ciphertext)
      [64..72]   expiry timestamp, `ffffffff` for none
      [72..74]   security option, `00`
      [74..202]  signature R||S over the ASCII of [0..74]
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationMessage {
    pub user_type: UserType,
    nonce: String,
    pub expiry: Expiry,
    pub security_option: u8,
    pub signature: Signature,
}

impl AuthorizationMessage {
    /**
        Build a message with no security option.

        `nonce` must be hex. It is truncated to, or right-padded with `0` to,
        the 62-character field width.
    */
    pub fn new(
        user_type: UserType,
        nonce: &str,
        expiry: Expiry,
        signature: Signature,
    ) -> AuthResult<Self> {
        if !nonce.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AuthError::MessageMalformed("nonce is not hex".into()));
        }
        Ok(Self {
            user_type,
            nonce: fit_nonce(&nonce.to_ascii_lowercase()),
            expiry,
            security_option: SECURITY_OPTION_NONE,
            signature,
        })
    }

    /**
        The encrypted nonce field, always 62 hex characters.
    */
    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    /**
        The signed part of the message.
    */
    pub fn header(&self) -> String {
        header(self.user_type, &self.nonce, self.expiry, self.security_option)
    }

    pub fn to_hex(&self) -> String {
        let mut out = self.header();
        out.push_str(&self.signature.to_hex());
        out
    }

    /**
        Parse the 202-character wire form. Uppercase hex is accepted.
    */
    pub fn from_hex(s: &str) -> AuthResult<Self> {
        if !s.is_ascii() {
            return Err(AuthError::MessageMalformed("not ASCII".into()));
        }
        if s.len() != AUTHORIZATION_HEX_LEN {
            return Err(AuthError::MessageMalformed(format!(
                "expected {AUTHORIZATION_HEX_LEN} characters, got {}",
                s.len()
            )));
        }
        let s = s.to_ascii_lowercase();

        let (flag, rest) = s.split_at(FLAG_HEX_LEN);
        let (nonce, rest) = rest.split_at(NONCE_HEX_LEN);
        let (timestamp, rest) = rest.split_at(TIMESTAMP_HEX_LEN);
        let (option, signature) = rest.split_at(FLAG_HEX_LEN);
        debug_assert_eq!(signature.len(), SIGNATURE_HEX_LEN);

        let user_type = UserType::from_u8(hex_byte("user type", flag)?).ok_or_else(|| {
            AuthError::MessageMalformed(format!("unknown user type flag '{flag}'"))
        })?;
        if !nonce.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AuthError::MessageMalformed("nonce is not hex".into()));
        }

        Ok(Self {
            user_type,
            nonce: nonce.to_owned(),
            expiry: Expiry::from_hex(timestamp)?,
            security_option: hex_byte("security option", option)?,
            signature: Signature::from_hex(signature)?,
        })
    }

    /**
        Check the signature over the header against the lock's public key.
    */
    pub fn verify(&self, curve: Curve, public_key: &[u8]) -> AuthResult<()> {
        self.signature
            .verify(curve, public_key, self.header().as_bytes())
    }
}

impl fmt::Display for AuthorizationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

pub(crate) fn header(
    user_type: UserType,
    nonce: &str,
    expiry: Expiry,
    security_option: u8,
) -> String {
    let mut out = String::with_capacity(HEADER_HEX_LEN);
    out.push_str(&format!("{:02x}", user_type.to_u8()));
    out.push_str(nonce);
    out.push_str(&expiry.to_hex());
    out.push_str(&format!("{security_option:02x}"));
    out
}

/**
    Fit a nonce ciphertext to the fixed field width: truncate, or
    right-pad with `0` when the ciphertext is shorter.
*/
pub(crate) fn fit_nonce(ciphertext: &str) -> String {
    let truncated = ciphertext.get(..NONCE_HEX_LEN).unwrap_or(ciphertext);
    format!("{truncated:0<width$}", width = NONCE_HEX_LEN)
}

fn hex_byte(field: &'static str, s: &str) -> AuthResult<u8> {
    let mut out = [0u8; 1];
    hex::decode_to_slice(s, &mut out).map_err(|e| AuthError::hex(field, e))?;
    Ok(out[0])
}

impl Default for AuthorizationMessage {
    fn default() -> Self {
        Self {
            user_type: UserType::Owner,
            nonce: "0".repeat(NONCE_HEX_LEN),
            expiry: Expiry::Never,
            security_option: SECURITY_OPTION_NONE,
            signature: Signature::from_bytes([0u8; 64]),
        }
    }
}
