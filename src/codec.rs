//! Glues the CRC, address, frame, bit-stuffing, and bit-packing layers into
//! one-shot `encode`/`recv` calls over a single UI frame.

use log::{debug, trace, warn};

use crate::address::{decode_address, encode_address, ADDRESS_FIELD_LEN};
use crate::bitpack;
use crate::bitstuff::{bits_to_bytes_lsb_first, destuff, find_flag};
use crate::config::Config;
use crate::crc;
use crate::error::{Ax25Error, Result};
use crate::frame::{build_frame, FrameType, CONTROL_UI, MAX_INFO_LEN};

/// Length of the AX.25 prefix (address + control + PID) every `recv()`
/// result starts with, ahead of the actual payload.
pub const HEADER_LEN: usize = ADDRESS_FIELD_LEN + 1 + 1;

/// A single-frame AX.25 codec bound to a fixed peer [`Config`].
pub struct Ax25Codec {
    config: Config,
}

/// A decoded UI frame, split into its address pair and payload for callers
/// that would rather not slice [`HEADER_LEN`] bytes themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    pub dst_callsign: Vec<u8>,
    pub dst_ssid: u8,
    pub src_callsign: Vec<u8>,
    pub src_ssid: u8,
    pub payload: Vec<u8>,
}

impl Ax25Codec {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Encodes `payload` as a UI frame from the satellite to the ground
    /// station, returning the complete stuffed, packed wire bytes.
    pub fn encode(&self, payload: &[u8]) -> Result<Vec<u8>> {
        trace!("encode: {} byte payload", payload.len());
        if payload.len() > MAX_INFO_LEN {
            return Err(Ax25Error::InvalidParam(format!(
                "payload of {} bytes exceeds the {MAX_INFO_LEN}-byte maximum",
                payload.len()
            )));
        }

        let mut address = vec![0u8; ADDRESS_FIELD_LEN];
        encode_address(
            self.config.grd_callsign.as_bytes(),
            self.config.grd_ssid,
            self.config.sat_callsign.as_bytes(),
            self.config.sat_ssid,
            &mut address,
        )?;

        let frame = build_frame(FrameType::Ui, &address, CONTROL_UI as u16, 1, payload)?;
        let stuffed = crate::bitstuff::stuff(&frame).inspect_err(|_| {
            warn!("encode: bit-stuffing abort on a {}-byte payload", payload.len());
        })?;
        let wire = bitpack::pack(&stuffed);
        trace!("encode: produced {} wire bytes", wire.len());
        Ok(wire)
    }

    /// Encodes into a caller-supplied buffer, for callers following the
    /// original fixed-buffer calling convention. Fails with
    /// [`Ax25Error::BufferOverflow`] if `out` is smaller than the encoded
    /// frame. Returns the number of bytes written.
    pub fn encode_into(&self, payload: &[u8], out: &mut [u8]) -> Result<usize> {
        let wire = self.encode(payload)?;
        if out.len() < wire.len() {
            warn!(
                "encode_into: output buffer of {} bytes too small for {}-byte frame",
                out.len(),
                wire.len()
            );
            return Err(Ax25Error::BufferOverflow);
        }
        out[..wire.len()].copy_from_slice(&wire);
        Ok(wire.len())
    }

    /// Decodes a single wire frame, returning the AX.25 header
    /// (address + control + PID, [`HEADER_LEN`] bytes) followed by the
    /// payload — callers skip [`HEADER_LEN`] bytes to reach the payload.
    pub fn recv(&self, wire: &[u8]) -> Result<Vec<u8>> {
        trace!("recv: {} wire bytes", wire.len());
        let bits = bitpack::unpack(wire);

        let start = find_flag(&bits, 0).ok_or_else(|| {
            warn!("recv: no leading flag found in {} wire bytes", wire.len());
            Ax25Error::DecodeDesync("no leading flag found".into())
        })?;
        let body_start = start + 8;
        let body_end = find_flag(&bits, body_start).ok_or_else(|| {
            warn!("recv: no trailing flag found after bit {body_start}");
            Ax25Error::DecodeDesync("no trailing flag found".into())
        })?;

        let destuffed_bits = destuff(&bits[body_start..body_end])?;
        let reconstructed = bits_to_bytes_lsb_first(&destuffed_bits);

        if reconstructed.len() < HEADER_LEN + 2 {
            warn!(
                "recv: only {} bytes reconstructed, need at least {}",
                reconstructed.len(),
                HEADER_LEN + 2
            );
            return Err(Ax25Error::DecodeDesync(format!(
                "only {} bytes reconstructed, expected at least {}",
                reconstructed.len(),
                HEADER_LEN + 2
            )));
        }

        let (body, fcs_bytes) = reconstructed.split_at(reconstructed.len() - 2);
        let expected = crc::fcs(body);
        let received = ((fcs_bytes[0] as u16) << 8) | fcs_bytes[1] as u16;
        if expected != received {
            warn!("recv: FCS mismatch (expected {expected:04x}, got {received:04x})");
            return Err(Ax25Error::FcsMismatch);
        }

        debug!("recv: decoded {} byte frame body", body.len());
        Ok(body.to_vec())
    }

    /// Decodes a single wire frame into its address pair and payload.
    pub fn decode(&self, wire: &[u8]) -> Result<DecodedFrame> {
        let body = self.recv(wire)?;
        let addr = decode_address(&body[0..ADDRESS_FIELD_LEN])?;
        Ok(DecodedFrame {
            dst_callsign: addr.dst_callsign,
            dst_ssid: addr.dst_ssid,
            src_callsign: addr.src_callsign,
            src_ssid: addr.src_ssid,
            payload: body[HEADER_LEN..].to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> Ax25Codec {
        Ax25Codec::new(Config::default())
    }

    #[test]
    fn round_trips_hello() {
        let codec = codec();
        let wire = codec.encode(b"Hello").unwrap();
        assert!(wire.len() >= 23);
        assert_eq!(wire[0], 0x7E);
        let decoded = codec.recv(&wire).unwrap();
        assert!(decoded.len() >= 21);
        assert_eq!(&decoded[16..21], b"Hello");
    }

    #[test]
    fn round_trips_flag_byte_payload() {
        let codec = codec();
        let payload = [0x7E, 0x7E, 0x7E, 0x7E];
        let wire = codec.encode(&payload).unwrap();
        let decoded = codec.recv(&wire).unwrap();
        assert_eq!(decoded.len(), HEADER_LEN + 4);
        assert_eq!(&decoded[16..20], &payload);
    }

    #[test]
    fn round_trips_counting_sequence() {
        let codec = codec();
        let payload: Vec<u8> = (0..100u32).map(|i| (i & 0xFF) as u8).collect();
        let wire = codec.encode(&payload).unwrap();
        let decoded = codec.recv(&wire).unwrap();
        assert_eq!(&decoded[16..116], payload.as_slice());
    }

    #[test]
    fn round_trips_empty_payload() {
        let codec = codec();
        let wire = codec.encode(&[]).unwrap();
        let decoded = codec.recv(&wire).unwrap();
        assert_eq!(decoded.len(), HEADER_LEN);
    }

    #[test]
    fn single_bit_flip_is_caught() {
        let codec = codec();
        let mut wire = codec.encode(b"Test Data\0").unwrap();
        let mid = wire.len() / 2;
        wire[mid] ^= 0x10;
        let result = codec.recv(&wire);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_oversized_payload() {
        let codec = codec();
        let payload = vec![0u8; MAX_INFO_LEN + 1];
        assert!(codec.encode(&payload).is_err());
    }

    #[test]
    fn decode_splits_header_from_payload() {
        let codec = codec();
        let wire = codec.encode(b"Hi").unwrap();
        let decoded = codec.decode(&wire).unwrap();
        assert_eq!(decoded.dst_callsign, b"ABCD");
        assert_eq!(decoded.src_callsign, b"PARSAT");
        assert_eq!(decoded.payload, b"Hi");
    }

    #[test]
    fn encode_into_rejects_small_buffer() {
        let codec = codec();
        let mut out = [0u8; 4];
        assert_eq!(
            codec.encode_into(b"Hello", &mut out),
            Err(Ax25Error::BufferOverflow)
        );
    }

    #[test]
    fn encode_into_succeeds_with_adequate_buffer() {
        let codec = codec();
        let mut out = [0u8; 256];
        let n = codec.encode_into(b"Hello", &mut out).unwrap();
        assert_eq!(&out[..n], codec.encode(b"Hello").unwrap().as_slice());
    }
}
