//! Codec configuration: peer identity and matrix fragmentation sizing.
//!
//! The historical reference build hard-codes the satellite and ground
//! callsigns as compile-time constants. This crate instead injects them
//! through [`Config`] at codec construction, so multiple peer identities
//! can coexist in one process.

/// Reference build's default satellite callsign.
pub const DEFAULT_SAT_CALLSIGN: &str = "PARSAT";
/// Reference build's default ground callsign.
pub const DEFAULT_GRD_CALLSIGN: &str = "ABCD";
/// Default target payload bytes per matrix fragment.
pub const DEFAULT_MATRIX_CHUNK_SIZE: usize = 200;
/// Default guardrail on matrix row count.
pub const DEFAULT_MATRIX_MAX_ROWS: usize = 1000;
/// Default guardrail on matrix column count.
pub const DEFAULT_MATRIX_MAX_COLS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub sat_callsign: String,
    pub sat_ssid: u8,
    pub grd_callsign: String,
    pub grd_ssid: u8,
    pub matrix_chunk_size: usize,
    pub matrix_max_rows: usize,
    pub matrix_max_cols: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sat_callsign: DEFAULT_SAT_CALLSIGN.to_string(),
            sat_ssid: 0,
            grd_callsign: DEFAULT_GRD_CALLSIGN.to_string(),
            grd_ssid: 0,
            matrix_chunk_size: DEFAULT_MATRIX_CHUNK_SIZE,
            matrix_max_rows: DEFAULT_MATRIX_MAX_ROWS,
            matrix_max_cols: DEFAULT_MATRIX_MAX_COLS,
        }
    }
}

impl Config {
    pub fn new(sat_callsign: impl Into<String>, grd_callsign: impl Into<String>) -> Self {
        Self {
            sat_callsign: sat_callsign.into(),
            grd_callsign: grd_callsign.into(),
            ..Self::default()
        }
    }

    pub fn with_sat_ssid(mut self, ssid: u8) -> Self {
        self.sat_ssid = ssid;
        self
    }

    pub fn with_grd_ssid(mut self, ssid: u8) -> Self {
        self.grd_ssid = ssid;
        self
    }

    /// Sets the target payload bytes per matrix fragment, clamped to the
    /// `240 - 11`-byte ceiling imposed by the metadata header and the
    /// single-frame information-field limit.
    pub fn with_matrix_chunk_size(mut self, size: usize) -> Self {
        self.matrix_chunk_size = size.min(crate::matrix::MAX_CHUNK_DATA_SIZE);
        self
    }

    pub fn with_matrix_max_dims(mut self, max_rows: usize, max_cols: usize) -> Self {
        self.matrix_max_rows = max_rows;
        self.matrix_max_cols = max_cols;
        self
    }

    /// Effective chunk payload size, already clamped.
    pub fn chunk_data_size(&self) -> usize {
        self.matrix_chunk_size.min(crate::matrix::MAX_CHUNK_DATA_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reference_identity() {
        let cfg = Config::default();
        assert_eq!(cfg.sat_callsign, "PARSAT");
        assert_eq!(cfg.grd_callsign, "ABCD");
        assert_eq!(cfg.sat_ssid, 0);
        assert_eq!(cfg.grd_ssid, 0);
    }

    #[test]
    fn matrix_chunk_size_is_clamped() {
        let cfg = Config::default().with_matrix_chunk_size(10_000);
        assert_eq!(cfg.chunk_data_size(), crate::matrix::MAX_CHUNK_DATA_SIZE);
    }

    #[test]
    fn builder_overrides_identity() {
        let cfg = Config::new("W1AW", "N0CALL")
            .with_sat_ssid(7)
            .with_grd_ssid(1);
        assert_eq!(cfg.sat_callsign, "W1AW");
        assert_eq!(cfg.grd_callsign, "N0CALL");
        assert_eq!(cfg.sat_ssid, 7);
        assert_eq!(cfg.grd_ssid, 1);
    }
}
