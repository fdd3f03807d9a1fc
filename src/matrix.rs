//! Fragments a flat `rows × cols` byte image across many UI frames and
//! reassembles it from a length-prefixed fragment stream.
//!
//! Every fragment's information field opens with an 11-byte, big-endian
//! metadata header so the receiver can reconstruct shape and ordering with
//! no side channel: `total_chunks u16, chunk_index u16, rows u16,
//! cols u16, data_len u16, element_size u8`.

use log::{debug, trace, warn};

use crate::codec::{Ax25Codec, HEADER_LEN};
use crate::error::{Ax25Error, Result};
use crate::frame::MAX_INFO_LEN;

/// Size in bytes of the fixed metadata header prefixed to every fragment's
/// information field.
pub const METADATA_LEN: usize = 11;
/// Largest payload a single fragment can carry once the metadata header
/// and the frame's overall information-field limit are accounted for.
pub const MAX_CHUNK_DATA_SIZE: usize = MAX_INFO_LEN - METADATA_LEN;
/// Sanity bound on a single length-prefixed fragment's byte length, used
/// by the reassembler to reject corrupted length fields early.
const MAX_FRAGMENT_LEN: u16 = 500;

/// The fixed-layout metadata every fragment's information field carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkMeta {
    pub total_chunks: u16,
    pub chunk_index: u16,
    pub rows: u16,
    pub cols: u16,
    pub data_len: u16,
    pub element_size: u8,
}

impl ChunkMeta {
    fn encode(&self) -> [u8; METADATA_LEN] {
        let mut out = [0u8; METADATA_LEN];
        out[0..2].copy_from_slice(&self.total_chunks.to_be_bytes());
        out[2..4].copy_from_slice(&self.chunk_index.to_be_bytes());
        out[4..6].copy_from_slice(&self.rows.to_be_bytes());
        out[6..8].copy_from_slice(&self.cols.to_be_bytes());
        out[8..10].copy_from_slice(&self.data_len.to_be_bytes());
        out[10] = self.element_size;
        out
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < METADATA_LEN {
            return Err(Ax25Error::DecodeDesync(format!(
                "metadata header truncated: {} bytes, need {METADATA_LEN}",
                bytes.len()
            )));
        }
        Ok(Self {
            total_chunks: u16::from_be_bytes([bytes[0], bytes[1]]),
            chunk_index: u16::from_be_bytes([bytes[2], bytes[3]]),
            rows: u16::from_be_bytes([bytes[4], bytes[5]]),
            cols: u16::from_be_bytes([bytes[6], bytes[7]]),
            data_len: u16::from_be_bytes([bytes[8], bytes[9]]),
            element_size: bytes[10],
        })
    }
}

/// Fragments `image` (a flat `rows × cols × element_size`-byte array) into
/// a length-prefixed stream of wire frames: `[u16 big-endian length][wire
/// frame bytes]` repeated once per chunk. Returns the stream and the chunk
/// count.
pub fn fragment(
    codec: &Ax25Codec,
    image: &[u8],
    rows: u16,
    cols: u16,
    element_size: u8,
) -> Result<(Vec<u8>, u16)> {
    let cfg = codec.config();
    if rows as usize > cfg.matrix_max_rows || cols as usize > cfg.matrix_max_cols {
        return Err(Ax25Error::InvalidParam(format!(
            "matrix {rows}x{cols} exceeds the configured {}x{} guardrail",
            cfg.matrix_max_rows, cfg.matrix_max_cols
        )));
    }
    let expected_len = rows as usize * cols as usize * element_size as usize;
    if image.len() != expected_len {
        return Err(Ax25Error::InvalidParam(format!(
            "image is {} bytes, expected {expected_len} for {rows}x{cols}x{element_size}",
            image.len()
        )));
    }

    let chunk_data_size = cfg.chunk_data_size();
    let total_chunks = if image.is_empty() {
        1
    } else {
        image.len().div_ceil(chunk_data_size)
    };
    let total_chunks: u16 = total_chunks.try_into().map_err(|_| {
        Ax25Error::InvalidParam(format!("image requires more than {} fragments", u16::MAX))
    })?;
    trace!("fragment: {} byte image into {total_chunks} chunks", image.len());

    let mut out = Vec::new();
    let mut offset = 0usize;
    for chunk_index in 0..total_chunks {
        let remaining = image.len() - offset;
        let data_len = remaining.min(chunk_data_size);
        let data = &image[offset..offset + data_len];

        let meta = ChunkMeta {
            total_chunks,
            chunk_index,
            rows,
            cols,
            data_len: data_len as u16,
            element_size,
        };

        let mut info = Vec::with_capacity(METADATA_LEN + data_len);
        info.extend_from_slice(&meta.encode());
        info.extend_from_slice(data);

        let wire = codec.encode(&info)?;
        let len: u16 = wire.len().try_into().map_err(|_| Ax25Error::BufferOverflow)?;
        out.extend_from_slice(&len.to_be_bytes());
        out.extend_from_slice(&wire);

        offset += data_len;
    }

    debug!("fragment: emitted {total_chunks} fragments, {} bytes total", out.len());
    Ok((out, total_chunks))
}

/// The shape latched from the first chunk of a reassembled matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixShape {
    pub rows: u16,
    pub cols: u16,
    pub element_size: u8,
}

/// Walks a length-prefixed fragment stream, decoding `total_chunks`
/// fragments in order and concatenating their payload bytes. The stream is
/// assumed in-order and complete — out-of-order or lossy delivery is an
/// explicit non-goal; use the latched [`ChunkMeta::chunk_index`] values
/// from a lower layer if loss detection is needed upstream of this call.
pub fn reassemble(
    codec: &Ax25Codec,
    mut stream: &[u8],
    total_chunks: u16,
) -> Result<(Vec<u8>, MatrixShape)> {
    let mut image = Vec::new();
    let mut shape: Option<MatrixShape> = None;

    for expected_index in 0..total_chunks {
        if stream.len() < 2 {
            return Err(Ax25Error::DecodeDesync(format!(
                "fragment stream ended after {expected_index} of {total_chunks} chunks"
            )));
        }
        let len = u16::from_be_bytes([stream[0], stream[1]]);
        if len == 0 || len > MAX_FRAGMENT_LEN {
            return Err(Ax25Error::InvalidParam(format!(
                "fragment length {len} outside the allowed 1..={MAX_FRAGMENT_LEN} range"
            )));
        }
        let len = len as usize;
        stream = &stream[2..];
        if stream.len() < len {
            return Err(Ax25Error::DecodeDesync(format!(
                "fragment {expected_index} truncated: need {len} bytes, have {}",
                stream.len()
            )));
        }
        let (wire_frame, rest) = stream.split_at(len);
        stream = rest;

        let body = codec.recv(wire_frame)?;
        if body.len() < HEADER_LEN + METADATA_LEN {
            return Err(Ax25Error::DecodeDesync(format!(
                "decoded fragment {expected_index} too short for a metadata header"
            )));
        }
        let info = &body[HEADER_LEN..];
        let meta = ChunkMeta::decode(info)?;

        if meta.chunk_index != expected_index {
            warn!(
                "reassemble: chunk_index {} at position {expected_index} — stream is not in order",
                meta.chunk_index
            );
            return Err(Ax25Error::DecodeDesync(format!(
                "chunk_index {} at stream position {expected_index}",
                meta.chunk_index
            )));
        }

        let this_shape = MatrixShape {
            rows: meta.rows,
            cols: meta.cols,
            element_size: meta.element_size,
        };
        match shape {
            None => shape = Some(this_shape),
            Some(latched) if latched != this_shape => {
                return Err(Ax25Error::DecodeDesync(format!(
                    "chunk {expected_index} shape {this_shape:?} disagrees with latched {latched:?}"
                )));
            }
            Some(_) => {}
        }

        let data_len = meta.data_len as usize;
        let data_start = METADATA_LEN;
        if info.len() < data_start + data_len {
            return Err(Ax25Error::DecodeDesync(format!(
                "chunk {expected_index} declares {data_len} data bytes but only has {}",
                info.len() - data_start
            )));
        }
        image.extend_from_slice(&info[data_start..data_start + data_len]);
    }

    let shape = shape.ok_or_else(|| {
        Ax25Error::InvalidParam("total_chunks must be at least 1".into())
    })?;
    debug!("reassemble: {} bytes from {total_chunks} chunks, shape {shape:?}", image.len());
    Ok((image, shape))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn codec() -> Ax25Codec {
        Ax25Codec::new(Config::default())
    }

    #[test]
    fn small_matrix_is_single_fragment() {
        let codec = codec();
        let image: Vec<u8> = (0..25u8).map(|i| 5 * (i / 5) + (i % 5)).collect();
        let (stream, chunks) = fragment(&codec, &image, 5, 5, 1).unwrap();
        assert_eq!(chunks, 1);
        let (recovered, shape) = reassemble(&codec, &stream, chunks).unwrap();
        assert_eq!(shape, MatrixShape { rows: 5, cols: 5, element_size: 1 });
        assert_eq!(recovered, image);
    }

    #[test]
    fn large_matrix_spans_multiple_fragments() {
        let codec = codec();
        let image: Vec<u8> = (0..2000u32).map(|i| (i % 256) as u8).collect();
        let (stream, chunks) = fragment(&codec, &image, 40, 50, 1).unwrap();
        assert!(chunks > 1);
        let (recovered, shape) = reassemble(&codec, &stream, chunks).unwrap();
        assert_eq!(shape.rows, 40);
        assert_eq!(shape.cols, 50);
        assert_eq!(recovered, image);
    }

    #[test]
    fn multi_byte_elements_round_trip() {
        let codec = codec();
        // 10x10 matrix of u16 elements (big/little endian irrelevant here,
        // the codec only moves bytes).
        let image: Vec<u8> = (0..200u32).map(|i| (i % 256) as u8).collect();
        let (stream, chunks) = fragment(&codec, &image, 10, 10, 2).unwrap();
        let (recovered, shape) = reassemble(&codec, &stream, chunks).unwrap();
        assert_eq!(shape.element_size, 2);
        assert_eq!(recovered, image);
    }

    #[test]
    fn rejects_mismatched_image_length() {
        let codec = codec();
        let image = vec![0u8; 10];
        assert!(fragment(&codec, &image, 5, 5, 1).is_err());
    }

    #[test]
    fn rejects_dimensions_beyond_guardrail() {
        let codec = codec();
        let image = vec![0u8; 4];
        assert!(fragment(&codec, &image, 2000, 2, 1).is_err());
    }

    #[test]
    fn reassemble_detects_truncated_stream() {
        let codec = codec();
        let image: Vec<u8> = (0..2000u32).map(|i| (i % 256) as u8).collect();
        let (stream, chunks) = fragment(&codec, &image, 40, 50, 1).unwrap();
        let truncated = &stream[..stream.len() / 2];
        assert!(reassemble(&codec, truncated, chunks).is_err());
    }

    #[test]
    fn reassemble_rejects_out_of_order_chunk_index() {
        let codec = codec();
        let image: Vec<u8> = (0..1000u32).map(|i| (i % 256) as u8).collect();
        let (mut stream, chunks) = fragment(&codec, &image, 20, 50, 1).unwrap();
        assert!(chunks >= 2);

        // Duplicate the first fragment in place of the second so the
        // second position sees chunk_index 0 again instead of 1.
        let first_len = u16::from_be_bytes([stream[0], stream[1]]) as usize;
        let first_fragment = stream[0..2 + first_len].to_vec();
        let second_len = u16::from_be_bytes([stream[2 + first_len], stream[3 + first_len]]) as usize;
        let second_start = 2 + first_len;
        stream.splice(
            second_start..second_start + 2 + second_len,
            first_fragment,
        );

        assert!(reassemble(&codec, &stream, chunks).is_err());
    }

    #[test]
    fn empty_image_produces_one_header_only_fragment() {
        let codec = codec();
        let (stream, chunks) = fragment(&codec, &[], 0, 0, 1).unwrap();
        assert_eq!(chunks, 1);
        let (recovered, shape) = reassemble(&codec, &stream, chunks).unwrap();
        assert!(recovered.is_empty());
        assert_eq!(shape, MatrixShape { rows: 0, cols: 0, element_size: 1 });
    }
}
