/**
    Width in bytes of a curve scalar, and of each signature component.
*/
pub const SCALAR_LEN: usize = 32;

/**
    Width in bytes of a normalized R||S signature.
*/
pub const SIGNATURE_LEN: usize = 2 * SCALAR_LEN;

/**
    Authorization message field widths, in hex characters.

    Layout:
      [0..2]     user type flag
      [2..64]    encrypted nonce (truncated ciphertext)
      [64..72]   expiry timestamp
      [72..74]   security option
      [74..202]  signature (R||S)
*/
pub const NONCE_HEX_LEN: usize = 62;
pub const TIMESTAMP_HEX_LEN: usize = 8;
pub const SIGNATURE_HEX_LEN: usize = 2 * SIGNATURE_LEN;
pub const AUTHORIZATION_HEX_LEN: usize = 2 + NONCE_HEX_LEN + TIMESTAMP_HEX_LEN + 2 + SIGNATURE_HEX_LEN;

/**
    Timestamp field value meaning "never expires".
*/
pub const TIMESTAMP_NO_EXPIRY: &str = "ffffffff";

/**
    Security option byte. Reserved, always zero for now.
*/
pub const SECURITY_OPTION_NONE: u8 = 0x00;
