//! Conversion between packed bytes and one-bit-per-byte expanded form.
//!
//! This is the MSB-first packing step: bit index `i` of the expanded stream
//! maps to bit `7 - (i % 8)` of byte `i / 8`. It is deliberately the
//! opposite bit order from [`crate::bitstuff`], which scans LSB-first —
//! preserving both conventions exactly is required for wire compatibility.

/// Packs a one-bit-per-byte stream (each entry 0 or 1) into `ceil(n/8)`
/// bytes, MSB-first. The final byte is zero-padded on the low-order side.
pub fn pack(bits: &[u8]) -> Vec<u8> {
    let nbytes = bits.len().div_ceil(8);
    let mut out = vec![0u8; nbytes];
    for (i, &bit) in bits.iter().enumerate() {
        if bit != 0 {
            out[i / 8] |= 1 << (7 - (i % 8));
        }
    }
    out
}

/// Expands packed, MSB-first bytes into a one-bit-per-byte stream of
/// length `bytes.len() * 8`.
pub fn unpack(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len() * 8);
    for &b in bytes {
        for i in 0..8 {
            out.push((b >> (7 - i)) & 1);
        }
    }
    out
}
