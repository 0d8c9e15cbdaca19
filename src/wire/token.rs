//! Random tokens: multipart boundaries, event GUIDs, correlation identifiers.

use rand::{RngCore, rngs::OsRng};

use super::BOUNDARY_LEN;

const BOUNDARY_ALPHABET: &[u8; 62] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Generate a fresh boundary token: [`BOUNDARY_LEN`] characters drawn from
/// `[0-9a-zA-Z]`, sourced from the operating system RNG and mapped into the
/// alphabet by modulo.
pub(crate) fn boundary() -> String {
    let mut raw = [0_u8; BOUNDARY_LEN];
    OsRng.fill_bytes(&mut raw);
    raw.iter()
        .map(|byte| BOUNDARY_ALPHABET[usize::from(*byte) % BOUNDARY_ALPHABET.len()] as char)
        .collect()
}

/// Generate a per-request correlation identifier: 16 random bytes,
/// hex-encoded to 32 characters.
pub(crate) fn correlation_id() -> String {
    let mut raw = [0_u8; 16];
    OsRng.fill_bytes(&mut raw);
    hex::encode(raw)
}

/// Generate a GUID in `8-4-4-4-12` lowercase hex form, used to stamp events
/// at construction.
pub(crate) fn guid() -> String {
    let mut raw = [0_u8; 16];
    OsRng.fill_bytes(&mut raw);
    let hex = hex::encode(raw);
    format!(
        "{}-{}-{}-{}-{}",
        &hex[..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_stays_inside_the_alphabet() {
        for _ in 0..32 {
            let token = boundary();
            assert_eq!(token.len(), BOUNDARY_LEN);
            assert!(token.bytes().all(|byte| byte.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn correlation_id_is_32_hex_characters() {
        let id = correlation_id();
        assert_eq!(id.len(), 32);
        assert!(id.bytes().all(|byte| byte.is_ascii_hexdigit()));
    }

    #[test]
    fn guid_has_canonical_grouping() {
        let id = guid();
        assert_eq!(id.len(), 36);
        let groups: Vec<&str> = id.split('-').collect();
        let lengths: Vec<usize> = groups.iter().map(|group| group.len()).collect();
        assert_eq!(lengths, [8, 4, 4, 4, 12]);
    }
}
