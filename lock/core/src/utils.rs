/**
    Const-compatible ASCII whitespace trimming (both ends).
*/
pub const fn trim_ascii(mut s: &[u8]) -> &[u8] {
    while let [first, rest @ ..] = s {
        if !first.is_ascii_whitespace() {
            break;
        }
        s = rest;
    }
    while let [rest @ .., last] = s {
        if !last.is_ascii_whitespace() {
            break;
        }
        s = rest;
    }
    s
}

/**
    Const-compatible case-insensitive ASCII byte comparison.
*/
pub const fn eq_ignore_ascii_case(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i].to_ascii_lowercase() != b[i].to_ascii_lowercase() {
            return false;
        }
        i += 1;
    }
    true
}

/**
    Fit a big-endian unsigned integer into exactly `N` bytes.

    Leading zero bytes are stripped (this covers ASN.1 sign padding and
    OpenSSL's `00` prefix on private scalars), then the remaining significant
    bytes are left-padded with zeros. Returns `None` if more than `N`
    significant bytes remain.
*/
pub fn fit_be_bytes<const N: usize>(bytes: &[u8]) -> Option<[u8; N]> {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    let significant = &bytes[start..];
    if significant.len() > N {
        return None;
    }
    let mut out = [0u8; N];
    out[N - significant.len()..].copy_from_slice(significant);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_both_ends() {
        assert_eq!(trim_ascii(b"  priv:\n"), b"priv:");
        assert_eq!(trim_ascii(b"\t\t"), b"");
        assert_eq!(trim_ascii(b""), b"");
        assert_eq!(trim_ascii(b"a b"), b"a b");
    }

    #[test]
    fn compares_ignoring_case() {
        assert!(eq_ignore_ascii_case(b"SECP256K1", b"secp256k1"));
        assert!(!eq_ignore_ascii_case(b"secp256k1", b"secp256r1"));
        assert!(!eq_ignore_ascii_case(b"p256", b"p-256"));
    }

    #[test]
    fn fit_strips_sign_padding() {
        let mut padded = vec![0x00];
        padded.extend([0xff; 32]);
        assert_eq!(fit_be_bytes::<32>(&padded), Some([0xff; 32]));
    }

    #[test]
    fn fit_left_pads_short_values() {
        let fitted = fit_be_bytes::<4>(&[0x12, 0x34]).unwrap();
        assert_eq!(fitted, [0x00, 0x00, 0x12, 0x34]);
    }

    #[test]
    fn fit_handles_zero_and_empty() {
        assert_eq!(fit_be_bytes::<4>(&[]), Some([0; 4]));
        assert_eq!(fit_be_bytes::<4>(&[0, 0, 0, 0, 0, 0]), Some([0; 4]));
    }

    #[test]
    fn fit_rejects_oversized() {
        assert_eq!(fit_be_bytes::<2>(&[0x01, 0x00, 0x00]), None);
    }
}
