//! AX.25 two-address field: destination then source, 7 bytes each.

use crate::error::{Ax25Error, Result};

/// Length in bytes of a single encoded callsign+SSID slot.
pub const CALLSIGN_FIELD_LEN: usize = 7;
/// Length in bytes of the full destination+source address field.
pub const ADDRESS_FIELD_LEN: usize = 2 * CALLSIGN_FIELD_LEN;

const SPACE_SHIFTED: u8 = b' ' << 1;

fn encode_callsign(callsign: &[u8], ssid: u8, is_last: bool, out: &mut [u8; 7]) -> Result<()> {
    if callsign.len() > 6 {
        return Err(Ax25Error::InvalidParam(format!(
            "callsign longer than 6 characters ({} bytes)",
            callsign.len()
        )));
    }
    if ssid > 15 {
        return Err(Ax25Error::InvalidParam(format!(
            "SSID {ssid} exceeds the 4-bit range"
        )));
    }

    for (i, slot) in out.iter_mut().take(6).enumerate() {
        *slot = callsign.get(i).copied().unwrap_or(b' ') << 1;
    }
    out[6] = 0x60 | ((ssid & 0x0F) << 1) | if is_last { 0x01 } else { 0x00 };
    Ok(())
}

fn decode_callsign(field: &[u8; 7]) -> (Vec<u8>, u8, bool) {
    let mut callsign = Vec::with_capacity(6);
    for &b in field.iter().take(6) {
        let c = b >> 1;
        if c != b' ' {
            callsign.push(c);
        }
    }
    let ssid = (field[6] >> 1) & 0x0F;
    let is_last = field[6] & 0x01 != 0;
    (callsign, ssid, is_last)
}

/// Writes the 14-byte destination+source address field into `out`.
///
/// `out` must be exactly [`ADDRESS_FIELD_LEN`] bytes. Each argument is
/// written into its own dedicated slot: `dst_callsign`/`dst_ssid` never
/// touch the source half and vice versa.
pub fn encode_address(
    dst_callsign: &[u8],
    dst_ssid: u8,
    src_callsign: &[u8],
    src_ssid: u8,
    out: &mut [u8],
) -> Result<()> {
    if out.len() != ADDRESS_FIELD_LEN {
        return Err(Ax25Error::InvalidParam(format!(
            "address buffer must be {ADDRESS_FIELD_LEN} bytes, got {}",
            out.len()
        )));
    }

    let mut dst = [SPACE_SHIFTED; 7];
    encode_callsign(dst_callsign, dst_ssid, false, &mut dst)?;
    let mut src = [SPACE_SHIFTED; 7];
    encode_callsign(src_callsign, src_ssid, true, &mut src)?;

    out[0..7].copy_from_slice(&dst);
    out[7..14].copy_from_slice(&src);
    Ok(())
}

/// Decoded destination and source callsigns from a 14-byte address field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAddress {
    pub dst_callsign: Vec<u8>,
    pub dst_ssid: u8,
    pub src_callsign: Vec<u8>,
    pub src_ssid: u8,
}

/// Parses a 14-byte address field. Does not enforce the end-of-address-list
/// bit convention — callers that need to reject a malformed extension bit
/// should check `DecodedAddress` alongside [`address_extension_bits_valid`].
pub fn decode_address(field: &[u8]) -> Result<DecodedAddress> {
    if field.len() != ADDRESS_FIELD_LEN {
        return Err(Ax25Error::InvalidParam(format!(
            "address field must be {ADDRESS_FIELD_LEN} bytes, got {}",
            field.len()
        )));
    }
    let dst: [u8; 7] = field[0..7].try_into().unwrap();
    let src: [u8; 7] = field[7..14].try_into().unwrap();
    let (dst_callsign, dst_ssid, dst_last) = decode_callsign(&dst);
    let (src_callsign, src_ssid, src_last) = decode_callsign(&src);

    if !address_extension_bits_valid(dst_last, src_last) {
        return Err(Ax25Error::DecodeDesync(
            "address extension bits inconsistent with a single source/destination pair".into(),
        ));
    }

    Ok(DecodedAddress {
        dst_callsign,
        dst_ssid,
        src_callsign,
        src_ssid,
    })
}

/// A single source/destination pair (no digipeaters) always has the
/// destination's extension bit clear and the source's set.
pub fn address_extension_bits_valid(dst_last: bool, src_last: bool) -> bool {
    !dst_last && src_last
}
