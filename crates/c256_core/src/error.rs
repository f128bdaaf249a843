//! Error type for the C256 core.
//!
//! Register decode, rendering and stack operations never fail; only loading
//! memory images can.

use thiserror::Error;

/// Result type, equivalent to [std::result::Result]<T, [enum@Error]>
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// An Intel HEX record did not begin with `:`
    #[error("hex line {line}: record does not start with ':'")]
    HexMissingStartCode { line: usize },
    /// An Intel HEX record contained something other than hex digit pairs
    #[error("hex line {line}: invalid hex digits")]
    HexInvalidDigits { line: usize },
    /// The byte count field disagrees with the record's actual length
    #[error("hex line {line}: record declares {declared} data bytes but carries {actual}")]
    HexLengthMismatch {
        line: usize,
        declared: usize,
        actual: usize,
    },
    /// The record checksum is wrong
    #[error("hex line {line}: checksum {found:02x}, expected {expected:02x}")]
    HexChecksum { line: usize, expected: u8, found: u8 },
    /// Record types other than data, EOF and address extensions
    #[error("hex line {line}: unsupported record type {kind:02x}")]
    HexRecordType { line: usize, kind: u8 },
    /// Error originated in [std::io]
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
