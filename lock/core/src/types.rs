use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{TIMESTAMP_HEX_LEN, TIMESTAMP_NO_EXPIRY};
use crate::error::ParseError;
use crate::utils::{eq_ignore_ascii_case, trim_ascii};

/**
    Named elliptic curve.

    - **secp256k1**: lock device keys, storage encryption keys
    - **prime256v1**: server signing contexts (also known as P-256 / secp256r1)

    The name returned by [`Curve::to_name`] is the OpenSSL curve name, which is
    also the label that terminates the public key block of a key dump.
*/
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Curve {
    #[default]
    Secp256k1,
    #[serde(alias = "secp256r1", alias = "p256", alias = "p-256")]
    Prime256v1,
}

impl Curve {
    pub const fn from_name(name: &[u8]) -> Option<Self> {
        let name = trim_ascii(name);
        match name.len() {
            4 if eq_ignore_ascii_case(name, b"p256") => Some(Self::Prime256v1),
            5 if eq_ignore_ascii_case(name, b"p-256") => Some(Self::Prime256v1),
            9 if eq_ignore_ascii_case(name, b"secp256k1") => Some(Self::Secp256k1),
            9 if eq_ignore_ascii_case(name, b"secp256r1") => Some(Self::Prime256v1),
            10 if eq_ignore_ascii_case(name, b"prime256v1") => Some(Self::Prime256v1),
            _ => None,
        }
    }

    pub const fn to_name(self) -> &'static str {
        match self {
            Self::Secp256k1 => "secp256k1",
            Self::Prime256v1 => "prime256v1",
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_name())
    }
}

impl FromStr for Curve {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s.as_bytes()).ok_or_else(|| ParseError {
            kind: "curve",
            value: s.to_owned(),
        })
    }
}

/**
    User type flag, the first byte of an authorization message.
*/
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UserType {
    Owner = 0x00,
    Guest = 0x01,
}

impl UserType {
    pub const fn from_owner(is_owner: bool) -> Self {
        if is_owner { Self::Owner } else { Self::Guest }
    }

    pub const fn from_u8(u: u8) -> Option<Self> {
        match u {
            0x00 => Some(Self::Owner),
            0x01 => Some(Self::Guest),
            _ => None,
        }
    }

    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    pub const fn is_owner(self) -> bool {
        matches!(self, Self::Owner)
    }

    pub const fn to_name(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Guest => "guest",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_name())
    }
}

/**
    Expiry of an authorization, encoded as a 4-byte big-endian field.

    `Never` encodes as `ffffffff`. A timestamp of `u32::MAX` is
    indistinguishable from `Never` on the wire and decodes as such.
*/
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expiry {
    #[default]
    Never,
    At(u32),
}

impl Expiry {
    pub const fn from_u32(u: u32) -> Self {
        if u == u32::MAX { Self::Never } else { Self::At(u) }
    }

    pub const fn to_u32(self) -> u32 {
        match self {
            Self::Never => u32::MAX,
            Self::At(u) => u,
        }
    }

    /**
        Encode as the 8-character lowercase hex timestamp field.
    */
    pub fn to_hex(self) -> String {
        match self {
            Self::Never => TIMESTAMP_NO_EXPIRY.to_owned(),
            Self::At(u) => format!("{u:08x}"),
        }
    }

    /**
        Decode the 8-character hex timestamp field.
    */
    pub fn from_hex(field: &str) -> Result<Self, ParseError> {
        let err = || ParseError {
            kind: "timestamp",
            value: field.to_owned(),
        };
        if field.len() != TIMESTAMP_HEX_LEN || !field.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        u32::from_str_radix(field, 16)
            .map(Self::from_u32)
            .map_err(|_| err())
    }
}

impl From<Option<u32>> for Expiry {
    fn from(u: Option<u32>) -> Self {
        u.map(Self::from_u32).unwrap_or_default()
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Never => f.write_str("never"),
            Self::At(u) => write!(f, "{u}"),
        }
    }
}
