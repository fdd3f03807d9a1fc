use thiserror::Error;

/// Error taxonomy for the AX.25 codec and matrix fragmentation layer.
///
/// Every fallible entry point returns one of these; nothing panics on
/// malformed peer input. See `to_legacy_code` for the historical
/// negative-integer sentinel convention some C callers still expect.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Ax25Error {
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    #[error("output buffer too small")]
    BufferOverflow,

    #[error("bit-stuffing abort: payload would produce an HDLC abort pattern")]
    EncodeAbort,

    #[error("FCS mismatch on decode")]
    FcsMismatch,

    #[error("decode desync: {0}")]
    DecodeDesync(String),
}

impl Ax25Error {
    /// Maps this error to the legacy negative-return-code convention
    /// (`-1` generic, `-2` invalid parameter, `-3` buffer overflow, `-4`
    /// FCS mismatch). `EncodeAbort` and `DecodeDesync` both map to the
    /// generic `-1` since the legacy convention has no dedicated slot for
    /// either.
    pub fn to_legacy_code(&self) -> i32 {
        match self {
            Ax25Error::InvalidParam(_) => -2,
            Ax25Error::BufferOverflow => -3,
            Ax25Error::FcsMismatch => -4,
            Ax25Error::EncodeAbort | Ax25Error::DecodeDesync(_) => -1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Ax25Error>;
