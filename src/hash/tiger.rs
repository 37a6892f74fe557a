//! Tiger block hash with the legacy options used by the translation pipeline.
//!
//! Besides the classic `Tiger,3` digest this supports extra compression passes (`Tiger,4`
//! is one extra pass), 128/160/192-bit truncation and the historical PHP output whose
//! digest bytes were left in register order instead of being byte-swapped. That last
//! variant (`invert_byte = true`) is what phrase identifiers are computed with.

use super::tiger_tables::{T1, T2, T3, T4};

/// Output length of a [`Tiger`] digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestLength {
    L128,
    L160,
    L192,
}

impl DigestLength {
    pub const fn bits(self) -> usize {
        match self {
            DigestLength::L128 => 128,
            DigestLength::L160 => 160,
            DigestLength::L192 => 192,
        }
    }

    const fn hex_chars(self) -> usize {
        self.bits() / 4
    }
}

/// How input text is turned into bytes before hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Utf16Le,
}

const INITIAL_STATE: [u64; 3] = [0x0123456789abcdef, 0xfedcba9876543210, 0xf096a5b4c3b2e187];

/// Concatenating the registers as hex yields byte-pair-inverted output; this lookup restores
/// the standard digest order.
#[rustfmt::skip]
const INVERSION: [usize; 48] = [
    14, 15, 12, 13, 10, 11,  8,  9,  6,  7,  4,  5,  2,  3,  0,  1,
    30, 31, 28, 29, 26, 27, 24, 25, 22, 23, 20, 21, 18, 19, 16, 17,
    46, 47, 44, 45, 42, 43, 40, 41, 38, 39, 36, 37, 34, 35, 32, 33,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tiger {
    digest: DigestLength,
    extra_passes: u32,
    invert_byte: bool,
    encoding: TextEncoding,
}

impl Tiger {
    /// `extra_passes` counts passes after the first three: `Tiger,4` is `1`.
    pub const fn new(digest: DigestLength, extra_passes: u32, invert_byte: bool) -> Self {
        Self {
            digest,
            extra_passes,
            invert_byte,
            encoding: TextEncoding::Utf8,
        }
    }

    pub const fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Hex digest of `input`, encoded per this hasher's [`TextEncoding`].
    pub fn hash(&self, input: &str) -> String {
        let bytes: Vec<u8> = match self.encoding {
            TextEncoding::Utf8 => input.as_bytes().to_vec(),
            TextEncoding::Utf16Le => input.encode_utf16().flat_map(u16::to_le_bytes).collect(),
        };
        self.hash_bytes(&bytes)
    }

    pub fn hash_bytes(&self, bytes: &[u8]) -> String {
        let [a, b, c] = self.registers(bytes);
        let digest = format!("{:016x}{:016x}{:016x}", a, b, c);
        let chars = self.digest.hex_chars();

        if self.invert_byte {
            return digest[..chars].to_string();
        }
        let digest = digest.as_bytes();
        INVERSION[..chars]
            .iter()
            .map(|&i| char::from(digest[i]))
            .collect()
    }

    /// Final `a`, `b`, `c` registers after compressing every padded block.
    pub fn registers(&self, bytes: &[u8]) -> [u64; 3] {
        let mut state = INITIAL_STATE;
        for block in pad_message(bytes).chunks_exact(64) {
            let mut words = [0u64; 8];
            for (word, chunk) in words.iter_mut().zip(block.chunks_exact(8)) {
                let mut le = [0u8; 8];
                le.copy_from_slice(chunk);
                *word = u64::from_le_bytes(le);
            }
            compress(&mut state, words, self.extra_passes);
        }
        state
    }
}

/// MD4-style padding: a `0x01` byte, zeros up to 56 mod 64, then the bit length.
fn pad_message(bytes: &[u8]) -> Vec<u8> {
    let bit_len = (bytes.len() as u64).wrapping_mul(8);
    let mut message = Vec::with_capacity(bytes.len() + 72);
    message.extend_from_slice(bytes);
    message.push(0x01);
    while message.len() % 64 != 56 {
        message.push(0);
    }
    message.extend_from_slice(&bit_len.to_le_bytes());
    message
}

fn compress(state: &mut [u64; 3], mut x: [u64; 8], extra_passes: u32) {
    let saved = *state;
    let mut r = *state;
    let (mut a, mut b, mut c) = (0, 1, 2);

    pass(&mut r, a, b, c, &x, 5);
    key_schedule(&mut x);
    pass(&mut r, c, a, b, &x, 7);
    key_schedule(&mut x);
    pass(&mut r, b, c, a, &x, 9);

    for _ in 0..extra_passes {
        key_schedule(&mut x);
        pass(&mut r, a, b, c, &x, 9);
        // The rotated roles persist into feed-forward and later blocks.
        (a, b, c) = (c, a, b);
    }

    *state = [
        r[a] ^ saved[0],
        r[b].wrapping_sub(saved[1]),
        r[c].wrapping_add(saved[2]),
    ];
}

fn pass(r: &mut [u64; 3], a: usize, b: usize, c: usize, x: &[u64; 8], mul: u64) {
    round(r, a, b, c, x[0], mul);
    round(r, b, c, a, x[1], mul);
    round(r, c, a, b, x[2], mul);
    round(r, a, b, c, x[3], mul);
    round(r, b, c, a, x[4], mul);
    round(r, c, a, b, x[5], mul);
    round(r, a, b, c, x[6], mul);
    round(r, b, c, a, x[7], mul);
}

fn round(r: &mut [u64; 3], a: usize, b: usize, c: usize, x: u64, mul: u64) {
    r[c] ^= x;
    let d = r[c].to_le_bytes().map(usize::from);
    r[a] = r[a].wrapping_sub(T1[d[0]] ^ T2[d[2]] ^ T3[d[4]] ^ T4[d[6]]);
    r[b] = r[b].wrapping_add(T4[d[1]] ^ T3[d[3]] ^ T2[d[5]] ^ T1[d[7]]);
    r[b] = r[b].wrapping_mul(mul);
}

fn key_schedule(x: &mut [u64; 8]) {
    x[0] = x[0].wrapping_sub(x[7] ^ 0xa5a5a5a5a5a5a5a5);
    x[1] ^= x[0];
    x[2] = x[2].wrapping_add(x[1]);
    x[3] = x[3].wrapping_sub(x[2] ^ (!x[1] << 19));
    x[4] ^= x[3];
    x[5] = x[5].wrapping_add(x[4]);
    x[6] = x[6].wrapping_sub(x[5] ^ (!x[4] >> 23));
    x[7] ^= x[6];
    x[0] = x[0].wrapping_add(x[7]);
    x[1] = x[1].wrapping_sub(x[0] ^ (!x[7] << 19));
    x[2] ^= x[1];
    x[3] = x[3].wrapping_add(x[2]);
    x[4] = x[4].wrapping_sub(x[3] ^ (!x[2] >> 23));
    x[5] ^= x[4];
    x[6] = x[6].wrapping_add(x[5]);
    x[7] = x[7].wrapping_sub(x[6] ^ 0x0123456789abcdef);
}
