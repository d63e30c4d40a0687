//! Document id conventions.
//!
//! Ids are 16 lowercase base-32 characters (`0-9a-v`): 9 characters of
//! millisecond timestamp followed by 7 characters of a process-wide sequence.

use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::CoreError;

pub const ID_LENGTH: usize = 16;

const TIMESTAMP_CHARS: usize = 9;
const SEQUENCE_CHARS: usize = 7;
const SEQUENCE_MASK: u64 = 0x1fff_ffff;
const BASE32_CHARS: &[u8; 32] = b"0123456789abcdefghijklmnopqrstuv";

static SEQUENCE: LazyLock<AtomicU64> =
    LazyLock::new(|| AtomicU64::new(now_millis() & SEQUENCE_MASK));

/// Whether `id` has the canonical 16-character base-32 shape.
pub fn is_valid_id(id: &str) -> bool {
    id.len() == ID_LENGTH && id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'v'))
}

/// Reject anything that is not a valid id.
pub fn check_id(id: &str) -> Result<(), CoreError> {
    if is_valid_id(id) {
        Ok(())
    } else {
        Err(CoreError::InvalidId(id.to_string()))
    }
}

/// Generate a new id.
pub fn next_id() -> String {
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed) & SEQUENCE_MASK;
    let mut id = String::with_capacity(ID_LENGTH);
    push_fixed(&mut id, now_millis(), TIMESTAMP_CHARS);
    push_fixed(&mut id, seq, SEQUENCE_CHARS);
    id
}

/// Append the lowest `width` base-32 digits of `n`, left-padded with '0'.
fn push_fixed(out: &mut String, n: u64, width: usize) {
    for i in (0..width).rev() {
        let digit = (n >> (i * 5)) & 0x1f;
        out.push(BASE32_CHARS[digit as usize] as char);
    }
}

fn now_millis() -> u64 {
    jiff::Timestamp::now().as_millisecond().max(0) as u64
}
