//! Jenkins one-at-a-time hash and base-N encoding of its result.

const BASE_N_SYMBOLS: &[u8; 62] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// One-at-a-time hash over the UTF-8 bytes of `input`. Matches the i18n dump scripts.
pub fn jenkins_hash(input: &str) -> u32 {
    if input.is_empty() {
        return 0;
    }

    let mut hash: u32 = 0;
    for &byte in input.as_bytes() {
        hash = hash.wrapping_add(u32::from(byte));
        hash = hash.wrapping_add(hash << 10);
        hash ^= hash >> 6;
    }

    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash.wrapping_add(hash << 15)
}

/// Encode `number` in `base` (2..=62), most significant digit first, without padding.
///
/// Returns an empty string for an unsupported base.
pub fn uint_to_base_n(number: u64, base: u64) -> String {
    if !(2..=62).contains(&base) {
        return String::new();
    }

    let mut digits = Vec::new();
    let mut rest = number;
    loop {
        digits.push(BASE_N_SYMBOLS[(rest % base) as usize]);
        rest /= base;
        if rest == 0 {
            break;
        }
    }
    digits.iter().rev().map(|&b| char::from(b)).collect()
}

pub fn base62(number: u32) -> String {
    uint_to_base_n(u64::from(number), 62)
}
