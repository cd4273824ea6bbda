//! Row identifier generation.
//!
//! Produces identifiers like `3F09-A21C-77D0-B5E4-9C12`: 20 uppercase hex
//! characters grouped in fours. Unique enough for row tagging; callers
//! must not rely on cryptographic uniqueness.

use rand::RngExt;

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Number of hex characters in a uid (dashes excluded).
pub const UID_HEX_LEN: usize = 20;

/// Total uid length including dashes. Matches the CHAR(24) audit column.
pub const UID_LEN: usize = 24;

/// Generates a fresh row identifier.
#[must_use]
pub fn generate() -> String {
    let mut rng = rand::rng();
    let mut out = String::with_capacity(UID_LEN);
    for i in 0..UID_HEX_LEN {
        if i > 0 && i % 4 == 0 {
            out.push('-');
        }
        out.push(HEX[rng.random_range(0..HEX.len())] as char);
    }
    out
}

/// Whether a string matches the `XXXX-XXXX-XXXX-XXXX-XXXX` uid shape.
#[must_use]
pub fn is_valid(uid: &str) -> bool {
    if uid.len() != UID_LEN {
        return false;
    }
    uid.chars().enumerate().all(|(i, ch)| {
        if i % 5 == 4 {
            ch == '-'
        } else {
            ch.is_ascii_digit() || ('A'..='F').contains(&ch)
        }
    })
}
