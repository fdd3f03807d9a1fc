//! Minimal KISS (TNC) framing, used only by this crate's CLI binaries to
//! carry a wire frame over a byte stream in place of a real radio/TNC.
//!
//! Not part of the AX.25 codec itself — [`crate::codec::Ax25Codec`] neither
//! produces nor consumes KISS framing. See
//! <https://en.wikipedia.org/wiki/KISS_(amateur_radio_protocol)>.

const FEND: u8 = 0xC0;
const FESC: u8 = 0xDB;
const TFEND: u8 = 0xDC;
const TFESC: u8 = 0xDD;
const DATA_FRAME_PORT_0: u8 = 0x00;

/// Wraps `wire` (an already-stuffed AX.25 wire frame) in a single KISS
/// data frame on port 0.
pub fn encode_frame(wire: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(wire.len() + 4);
    frame.push(FEND);
    frame.push(DATA_FRAME_PORT_0);
    for &byte in wire {
        match byte {
            FEND => frame.extend_from_slice(&[FESC, TFEND]),
            FESC => frame.extend_from_slice(&[FESC, TFESC]),
            b => frame.push(b),
        }
    }
    frame.push(FEND);
    frame
}

/// Incremental KISS deframer: feed it a byte stream and it emits each
/// complete frame's payload (command byte stripped) as it closes.
pub struct Deframer {
    in_frame: bool,
    escaped: bool,
    buffer: Vec<u8>,
}

impl Deframer {
    pub fn new() -> Self {
        Self {
            in_frame: false,
            escaped: false,
            buffer: Vec::new(),
        }
    }

    /// Feeds one byte. Returns the frame's payload (command byte already
    /// stripped) once a non-empty frame closes, `None` otherwise.
    pub fn process_byte(&mut self, byte: u8) -> Option<Vec<u8>> {
        if self.in_frame {
            if byte == FEND {
                self.in_frame = false;
                if self.buffer.len() > 1 && self.buffer[0] == DATA_FRAME_PORT_0 {
                    let frame = std::mem::take(&mut self.buffer);
                    return Some(frame[1..].to_vec());
                }
                self.buffer.clear();
                return None;
            } else if byte == FESC {
                self.escaped = true;
            } else if self.escaped {
                self.buffer.push(if byte == TFEND { FEND } else if byte == TFESC { FESC } else { byte });
                self.escaped = false;
            } else {
                self.buffer.push(byte);
            }
        } else if byte == FEND {
            self.in_frame = true;
            self.buffer.clear();
            self.escaped = false;
        }
        None
    }
}

impl Default for Deframer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(bytes: &[u8]) -> Vec<Vec<u8>> {
        let mut d = Deframer::new();
        bytes.iter().filter_map(|&b| d.process_byte(b)).collect()
    }

    #[test]
    fn round_trip_without_escapes() {
        let wire = b"Hello AX.25".to_vec();
        let framed = encode_frame(&wire);
        let frames = feed_all(&framed);
        assert_eq!(frames, vec![wire]);
    }

    #[test]
    fn escapes_fend_and_fesc_bytes() {
        let wire = vec![0xC0, 0xDB, 0x01, 0xC0];
        let framed = encode_frame(&wire);
        assert!(!framed[2..framed.len() - 1].contains(&0xC0));
        let frames = feed_all(&framed);
        assert_eq!(frames, vec![wire]);
    }

    #[test]
    fn back_to_back_frames_are_separated() {
        let a = b"first".to_vec();
        let b = b"second".to_vec();
        let mut stream = encode_frame(&a);
        stream.extend(encode_frame(&b));
        let frames = feed_all(&stream);
        assert_eq!(frames, vec![a, b]);
    }

    #[test]
    fn empty_frame_is_dropped() {
        let frames = feed_all(&[FEND, FEND]);
        assert!(frames.is_empty());
    }
}
