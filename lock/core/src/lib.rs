#![allow(clippy::doc_overindented_list_items)]

mod constants;
mod error;
mod types;

pub mod utils;

pub use self::constants::{
    AUTHORIZATION_HEX_LEN, NONCE_HEX_LEN, SCALAR_LEN, SECURITY_OPTION_NONE, SIGNATURE_HEX_LEN,
    SIGNATURE_LEN, TIMESTAMP_HEX_LEN, TIMESTAMP_NO_EXPIRY,
};
pub use self::error::ParseError;
pub use self::types::{Curve, Expiry, UserType};
pub use self::utils::{eq_ignore_ascii_case, fit_be_bytes, trim_ascii};
