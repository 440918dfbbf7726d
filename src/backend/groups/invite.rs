//! Invite Codes
//!
//! Twelve symbols from an alphabet without the look-alikes `0 O I 1`, so a
//! code read aloud or copied by hand survives. The 60 bits needed come from
//! the random part of a v4 UUID.

use uuid::Uuid;

pub const INVITE_CODE_LEN: usize = 12;

const ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Generate a fresh invite code
pub fn generate_invite_code() -> String {
    // The low 60 bits of a v4 UUID hold no version or variant bits
    let mut bits = Uuid::new_v4().as_u128();
    (0..INVITE_CODE_LEN)
        .map(|_| {
            let symbol = ALPHABET[(bits & 0x1f) as usize] as char;
            bits >>= 5;
            symbol
        })
        .collect()
}

/// Canonical form of a user-entered code
pub fn normalize_invite_code(input: &str) -> String {
    input.trim().to_ascii_uppercase()
}
