use rand::Rng;
use sha2::{Digest, Sha256};

/**
    Width of the salt prefix of a stored password, in characters.
*/
pub const SALT_LEN: usize = 16;

const SALT_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/**
    Hash a password for storage.

    Returns `salt || hex(SHA-256(salt || password))`, where `salt` is
    16 random alphanumeric characters. The result is 80 characters.
*/
pub fn hash_password(password: &str) -> String {
    salted_digest(&random_salt(), password)
}

/**
    Check a password against a value produced by [`hash_password`].
*/
pub fn verify_password(password: &str, salted: &str) -> bool {
    match salted.get(..SALT_LEN) {
        Some(salt) => salted_digest(salt, password) == salted,
        None => false,
    }
}

fn salted_digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{salt}{}", hex::encode(hasher.finalize()))
}

fn random_salt() -> String {
    let mut rng = rand::rng();
    (0..SALT_LEN)
        .map(|_| SALT_CHARSET[rng.random_range(0..SALT_CHARSET.len())] as char)
        .collect()
}
