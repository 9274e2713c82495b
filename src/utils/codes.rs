// src/utils/codes.rs

use rand::Rng;

/// Uppercase base-36 alphabet room codes are drawn from.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Fixed room-code length. Short enough to type from a projector, large
/// enough a handful of creation retries absorbs collisions.
pub const ROOM_CODE_LEN: usize = 6;

/// Draws a fresh room code. Uniqueness is the caller's job.
pub fn generate_room_code() -> String {
    let mut rng = rand::thread_rng();
    (0..ROOM_CODE_LEN)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}
