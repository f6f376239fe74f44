/*!
    ASN.1 DER decoding of ECDSA signatures.

    An ECDSA signature in DER is:

      SEQUENCE {
        r INTEGER,
        s INTEGER,
      }

    Each INTEGER is big-endian two's complement, so a value with its top bit
    set carries a leading 0x00, and small values are shorter than the curve
    width. Lengths may use the long form (0x81 nn) for large encodings.
*/

use crate::crypto::signature::Signature;
use crate::error::{AuthError, AuthResult};

const TAG_INTEGER: u8 = 0x02;
const TAG_SEQUENCE: u8 = 0x30;

/**
    A decoded TLV node. Only the two tags an ECDSA signature uses are known.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node<'a> {
    Integer(&'a [u8]),
    Sequence(&'a [u8]),
}

/**
    Normalize a DER-encoded ECDSA signature into fixed-width R||S.

    Structural errors (unknown tag, bad length, trailing bytes) are
    [`AuthError::SignatureDer`]. An R or S wider than 32 bytes once its
    leading zeros are removed is [`AuthError::SignatureComponentTooLarge`].
*/
pub fn normalize_der_signature(der: &[u8]) -> AuthResult<Signature> {
    let (outer, trailing) = read_node(der)?;
    if !trailing.is_empty() {
        return Err(der_err(format!(
            "{} trailing bytes after SEQUENCE",
            trailing.len()
        )));
    }

    let Node::Sequence(body) = outer else {
        return Err(der_err("expected SEQUENCE"));
    };

    let (r, rest) = read_integer(body, 'R')?;
    let (s, rest) = read_integer(rest, 'S')?;
    if !rest.is_empty() {
        return Err(der_err(format!("{} unexpected bytes after S", rest.len())));
    }

    Signature::from_components(r, s)
}

fn read_integer(input: &[u8], component: char) -> AuthResult<(&[u8], &[u8])> {
    match read_node(input)? {
        (Node::Integer([]), _) => Err(der_err(format!("{component} is an empty INTEGER"))),
        (Node::Integer(value), rest) => Ok((value, rest)),
        (Node::Sequence(_), _) => Err(der_err(format!("expected INTEGER for {component}"))),
    }
}

fn read_node(input: &[u8]) -> AuthResult<(Node<'_>, &[u8])> {
    let (&tag, rest) = input
        .split_first()
        .ok_or_else(|| der_err("unexpected end of input"))?;
    let (len, rest) = read_length(rest)?;
    if rest.len() < len {
        return Err(der_err(format!(
            "length {len} exceeds remaining {} bytes",
            rest.len()
        )));
    }

    let (content, rest) = rest.split_at(len);
    let node = match tag {
        TAG_INTEGER => Node::Integer(content),
        TAG_SEQUENCE => Node::Sequence(content),
        other => return Err(der_err(format!("unexpected tag 0x{other:02x}"))),
    };
    Ok((node, rest))
}

fn read_length(input: &[u8]) -> AuthResult<(usize, &[u8])> {
    let (&first, rest) = input
        .split_first()
        .ok_or_else(|| der_err("missing length"))?;

    if first & 0x80 == 0 {
        return Ok((first as usize, rest));
    }

    // Long form. Indefinite lengths (0x80) are not DER.
    let count = (first & 0x7f) as usize;
    if count == 0 || count > 2 {
        return Err(der_err(format!("unsupported length octet 0x{first:02x}")));
    }
    if rest.len() < count {
        return Err(der_err("truncated length"));
    }

    let (octets, rest) = rest.split_at(count);
    let len = octets.iter().fold(0usize, |acc, &b| (acc << 8) | b as usize);
    Ok((len, rest))
}

fn der_err(reason: impl Into<String>) -> AuthError {
    AuthError::SignatureDer(reason.into())
}
