/*!
    Parser for the text dump of an EC private key, as printed by
    `openssl ec -in key.pem -text -noout`:

    ```text
    read EC key
    Private-Key: (256 bit)
    priv:
        0a:1b:...
        ...
    pub:
        04:79:...
        ...
    ASN1 OID: secp256k1
    ```

    Sections must appear in this order. The public point ends at the first
    line that names the curve.
*/

use lock_core::{Curve, trim_ascii};

use super::KeyPair;
use crate::error::{AuthError, AuthResult};

const PRIV_LABEL: &str = "priv:";
const PUB_LABEL: &str = "pub:";

/**
    Extract the private scalar and public point from a key dump.
*/
pub fn parse_key_dump(text: &str, curve: Curve) -> AuthResult<KeyPair> {
    let mut lines = text.lines().enumerate().map(|(i, line)| (i + 1, line));

    lines
        .by_ref()
        .find(|(_, line)| line.contains(PRIV_LABEL))
        .ok_or_else(|| AuthError::KeyDumpMissingLabel(PRIV_LABEL.to_string()))?;

    let private_key = collect_octets(&mut lines, |line| line.contains(PUB_LABEL))
        .ok_or_else(|| AuthError::KeyDumpMissingLabel(PUB_LABEL.to_string()))??;
    let public_key = collect_octets(&mut lines, |line| names_curve(line, curve))
        .ok_or_else(|| AuthError::KeyDumpMissingLabel(curve.to_name().to_string()))??;

    if private_key.is_empty() {
        return Err(AuthError::KeyDumpEmpty("private key"));
    }
    if public_key.is_empty() {
        return Err(AuthError::KeyDumpEmpty("public key"));
    }

    KeyPair::new(curve, public_key, &private_key)
}

/**
    Consume octet lines until `is_end` matches.

    Returns `None` if the input ends first.
*/
fn collect_octets<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    is_end: impl Fn(&str) -> bool,
) -> Option<AuthResult<Vec<u8>>> {
    let mut bytes = Vec::new();
    for (number, line) in lines {
        if is_end(line) {
            return Some(Ok(bytes));
        }
        if let Err(e) = push_octets(number, line, &mut bytes) {
            return Some(Err(e));
        }
    }
    None
}

fn push_octets(number: usize, line: &str, out: &mut Vec<u8>) -> AuthResult<()> {
    let trimmed = trim_ascii(line.as_bytes());
    if trimmed.is_empty() {
        return Ok(());
    }

    let mut tokens: Vec<&[u8]> = trimmed.split(|&b| b == b':').collect();
    if tokens.last().is_some_and(|t| t.is_empty()) {
        tokens.pop();
    }

    for token in tokens {
        let byte = match token {
            [hi, lo] if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => {
                (hex_value(*hi) << 4) | hex_value(*lo)
            }
            _ => {
                return Err(AuthError::KeyDumpMalformed {
                    line: number,
                    reason: format!("'{}' is not an octet", String::from_utf8_lossy(token)),
                });
            }
        };
        out.push(byte);
    }
    Ok(())
}

const fn hex_value(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => 0,
    }
}

fn names_curve(line: &str, curve: Curve) -> bool {
    line.contains(curve.to_name())
        || (curve == Curve::Prime256v1 && line.contains("P-256"))
}
