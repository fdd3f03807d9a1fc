//! Unstuffed, byte-aligned AX.25 frame assembly.
//!
//! A frame in this module's sense is `[FLAG][addr 14][ctrl 1..2][PID?][info][FCS 2][FLAG]`
//! in plain bytes, with no bit-stuffing applied yet. [`crate::bitstuff`]
//! takes this representation and produces the on-wire stuffed bitstream.

use crate::crc;
use crate::error::{Ax25Error, Result};

/// HDLC flag byte, frame delimiter on both sides of the frame.
pub const FLAG: u8 = 0x7E;
/// Protocol identifier for "no layer 3", the only PID this codec emits.
pub const PID_NO_LAYER3: u8 = 0xF0;
/// Control byte for a UI frame.
pub const CONTROL_UI: u8 = 0x03;
/// Maximum information-field length for a single frame.
pub const MAX_INFO_LEN: usize = 240;

/// The AX.25 frame types this codec's grammar recognizes. Only [`FrameType::Ui`]
/// is implemented; the others exist so an unsupported frame is rejected with
/// a named variant instead of silently misparsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameType {
    I,
    S,
    U,
    Ui,
}

impl FrameType {
    fn require_supported(self) -> Result<()> {
        match self {
            FrameType::Ui => Ok(()),
            other => Err(Ax25Error::InvalidParam(format!(
                "frame type {other:?} is not implemented; only UI frames are supported"
            ))),
        }
    }
}

/// Builds an unstuffed, in-memory UI frame: leading flag, 14-byte address,
/// control byte(s), PID, information field, FCS (MSB first), trailing flag.
///
/// `control` is written little-endian (low byte first) when `control_len` is
/// 2; a `control_len` of 1 writes only the low byte. The FCS covers
/// `addr ‖ ctrl ‖ PID ‖ info` — the two flag bytes are excluded.
pub fn build_frame(
    frame_type: FrameType,
    address: &[u8],
    control: u16,
    control_len: usize,
    info: &[u8],
) -> Result<Vec<u8>> {
    frame_type.require_supported()?;

    if address.len() != crate::address::ADDRESS_FIELD_LEN {
        return Err(Ax25Error::InvalidParam(format!(
            "address field must be {} bytes",
            crate::address::ADDRESS_FIELD_LEN
        )));
    }
    if control_len != 1 && control_len != 2 {
        return Err(Ax25Error::InvalidParam(
            "control field length must be 1 or 2 bytes".into(),
        ));
    }
    if info.len() > MAX_INFO_LEN {
        return Err(Ax25Error::InvalidParam(format!(
            "information field of {} bytes exceeds the {MAX_INFO_LEN}-byte maximum",
            info.len()
        )));
    }

    let needs_pid = matches!(frame_type, FrameType::I | FrameType::Ui);

    let mut body = Vec::with_capacity(address.len() + control_len + 1 + info.len());
    body.extend_from_slice(address);
    body.push((control & 0xFF) as u8);
    if control_len == 2 {
        body.push(((control >> 8) & 0xFF) as u8);
    }
    if needs_pid {
        body.push(PID_NO_LAYER3);
    }
    body.extend_from_slice(info);

    let fcs = crc::fcs(&body);

    let mut frame = Vec::with_capacity(body.len() + 4);
    frame.push(FLAG);
    frame.extend_from_slice(&body);
    // FCS is appended MSB first, the reverse of the control field's
    // low-byte-first ordering. This asymmetry is an intentional AX.25
    // convention, not a bug to unify away.
    frame.push(((fcs >> 8) & 0xFF) as u8);
    frame.push((fcs & 0xFF) as u8);
    frame.push(FLAG);

    Ok(frame)
}
