//! Portal identifiers

use rand::Rng;

pub const PORTAL_ID_LEN: usize = 7;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a short, URL-friendly portal id (7 base-36 characters)
pub fn generate_portal_id() -> String {
    let mut rng = rand::rng();
    (0..PORTAL_ID_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}
