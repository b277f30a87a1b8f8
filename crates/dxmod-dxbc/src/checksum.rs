//! The digest stamped into bytes `4..20` of every `DXBC` header.
//!
//! The compression rounds are those of MD5, but the final block is laid out
//! differently: the bit length is written as the first word of the last block
//! (ahead of the tail bytes) and the last word carries `(bits >> 2) | 1`
//! instead of the high half of a 64-bit length. The four state words are
//! stored little-endian without further finalization.

use crate::error::DxbcError;

const INITIAL_STATE: [u32; 4] = [0x6745_2301, 0xefcd_ab89, 0x98ba_dcfe, 0x1032_5476];

const ROUND_SHIFTS: [u32; 64] = [
    7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22, //
    5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20, //
    4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23, //
    6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21,
];

const ROUND_CONSTANTS: [u32; 64] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee,
    0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be,
    0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa,
    0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed,
    0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c,
    0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05,
    0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039,
    0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1,
    0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

/// Byte offset where checksummed data starts (just past magic and checksum).
const CHECKSUMMED_FROM: usize = 20;

fn compress(state: &mut [u32; 4], block: &[u8; 64]) {
    let mut m = [0u32; 16];
    for (word, bytes) in m.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }

    let [mut a, mut b, mut c, mut d] = *state;
    for i in 0..64 {
        let (f, g) = match i / 16 {
            0 => ((b & c) | (!b & d), i),
            1 => ((d & b) | (!d & c), (5 * i + 1) % 16),
            2 => (b ^ c ^ d, (3 * i + 5) % 16),
            _ => (c ^ (b | !d), (7 * i) % 16),
        };
        let rotated = a
            .wrapping_add(f)
            .wrapping_add(ROUND_CONSTANTS[i])
            .wrapping_add(m[g])
            .rotate_left(ROUND_SHIFTS[i]);
        a = d;
        d = c;
        c = b;
        b = b.wrapping_add(rotated);
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
}

/// Computes the container digest of `data` as four state words.
pub fn dxbc_checksum(data: &[u8]) -> [u32; 4] {
    let mut state = INITIAL_STATE;

    let mut blocks = data.chunks_exact(64);
    for block in &mut blocks {
        let mut buf = [0u8; 64];
        buf.copy_from_slice(block);
        compress(&mut state, &buf);
    }
    let tail = blocks.remainder();

    let bits = (data.len() as u32).wrapping_mul(8);
    let trailer = (bits >> 2) | 1;

    let mut last = [0u8; 64];
    if tail.len() < 56 {
        last[..4].copy_from_slice(&bits.to_le_bytes());
        last[4..4 + tail.len()].copy_from_slice(tail);
        last[4 + tail.len()] = 0x80;
    } else {
        let mut padded = [0u8; 64];
        padded[..tail.len()].copy_from_slice(tail);
        padded[tail.len()] = 0x80;
        compress(&mut state, &padded);
        last[..4].copy_from_slice(&bits.to_le_bytes());
    }
    last[60..].copy_from_slice(&trailer.to_le_bytes());
    compress(&mut state, &last);

    state
}

/// Computes the checksum of a serialized container, as stored in its header.
///
/// Everything from byte 20 (the version word) to the end of `container` is
/// digested.
pub fn container_checksum(container: &[u8]) -> [u8; 16] {
    let words = dxbc_checksum(container.get(CHECKSUMMED_FROM..).unwrap_or_default());
    let mut out = [0u8; 16];
    for (dst, word) in out.chunks_exact_mut(4).zip(words) {
        dst.copy_from_slice(&word.to_le_bytes());
    }
    out
}

/// Recomputes the checksum of `container` and writes it into the header.
pub fn stamp_checksum(container: &mut [u8]) -> Result<[u8; 16], DxbcError> {
    if container.len() < CHECKSUMMED_FROM {
        return Err(DxbcError::malformed_header(format!(
            "cannot stamp checksum into {} bytes",
            container.len()
        )));
    }
    let checksum = container_checksum(container);
    container[4..CHECKSUMMED_FROM].copy_from_slice(&checksum);
    tracing::trace!(checksum = ?checksum, len = container.len(), "stamped DXBC checksum");
    Ok(checksum)
}
