//! An AX.25 v2.2 link-layer codec for amateur-radio packet transmission
//! between a satellite node and a ground station.
//!
//! Produces and consumes HDLC-framed byte streams carrying Unnumbered
//! Information (UI) frames with a 16-bit CRC (FCS) and HDLC bit-stuffing
//! for frame transparency. A chunking layer on top fragments and
//! reassembles arbitrary-sized two-dimensional byte arrays across many UI
//! frames, preserving shape and element width.
//!
//! Only UI frames are implemented; I/S/U frame variants, digipeater paths,
//! sliding-window flow control, and loss-tolerant matrix reassembly are
//! explicit non-goals. The codec presumes a reliable byte pipe — radio
//! error correction, timing, and KISS framing of an actual transport are a
//! peer's responsibility, not this crate's.

pub mod address;
pub mod bitpack;
pub mod bitstuff;
pub mod codec;
pub mod config;
pub mod crc;
pub mod error;
pub mod frame;
pub mod kiss;
pub mod matrix;

pub use crate::codec::{Ax25Codec, DecodedFrame};
pub use crate::config::Config;
pub use crate::error::{Ax25Error, Result};
pub use crate::frame::FrameType;
pub use crate::matrix::{ChunkMeta, MatrixShape};
