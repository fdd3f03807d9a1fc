//! CRC-16-CCITT (reflected), used as the AX.25 FCS.
//!
//! Polynomial 0x1021, init 0xFFFF, final XOR 0xFFFF, reflected input/output —
//! this is exactly `crc::CRC_16_X25`, so the `crc` crate computes it directly
//! rather than a hand-rolled table, mirroring `crc16_ccitt` in
//! `examples/loic-fejoz-hqfbp-rs/src/codec/crc16.rs`.

use crc::Crc;

/// Computes the AX.25 FCS over `data`. Pure and total: any non-empty or
/// empty slice is accepted.
pub fn fcs(data: &[u8]) -> u16 {
    const AX25_FCS: Crc<u16> = Crc::<u16>::new(&crc::CRC_16_X25);
    AX25_FCS.checksum(data)
}
