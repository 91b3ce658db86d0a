//! Time-sorted identifiers.
//!
//! 64-bit ids rendered as 13-character Crockford Base32 strings. The high
//! bits carry the millisecond timestamp, so lexicographic order of the
//! strings follows creation order.

use std::sync::atomic::{AtomicU16, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Crockford Base32 alphabet (no I, L, O, U)
const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

static SEQUENCE: AtomicU16 = AtomicU16::new(0);

pub struct TsidGenerator;

impl TsidGenerator {
    /// Generate a new id, e.g. `"0HZXEQ5Y8JY5Z"`.
    ///
    /// Layout: 42 bits of unix milliseconds, 10 random bits, and a 12-bit
    /// per-process sequence (4096 ids per millisecond before reuse).
    pub fn generate() -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        let noise = (rand::random::<u16>() as u64) & 0x3FF;
        let seq = (SEQUENCE.fetch_add(1, Ordering::Relaxed) as u64) & 0xFFF;

        encode(((millis & 0x3FF_FFFF_FFFF) << 22) | (noise << 12) | seq)
    }
}

fn encode(mut value: u64) -> String {
    let mut buf = [0u8; 13];
    for slot in buf.iter_mut().rev() {
        *slot = ALPHABET[(value & 0x1F) as usize];
        value >>= 5;
    }
    buf.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_13_chars_from_the_alphabet() {
        let id = TsidGenerator::generate();
        assert_eq!(id.len(), 13);
        assert!(id.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn ids_are_unique() {
        let mut ids: Vec<String> = (0..100).map(|_| TsidGenerator::generate()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn ids_sort_by_creation_time() {
        let first = TsidGenerator::generate();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = TsidGenerator::generate();
        assert!(first < second);
    }

    #[test]
    fn encode_is_big_endian() {
        assert_eq!(encode(0), "0000000000000");
        assert_eq!(encode(1), "0000000000001");
        assert_eq!(encode(31), "000000000000Z");
        assert_eq!(encode(32), "0000000000010");
    }
}
