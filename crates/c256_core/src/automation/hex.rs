//! Intel HEX image parsing.

use crate::error::{Error, Result};

const DATA: u8 = 0x00;
const END_OF_FILE: u8 = 0x01;
const EXTENDED_SEGMENT_ADDRESS: u8 = 0x02;
const START_SEGMENT_ADDRESS: u8 = 0x03;
const EXTENDED_LINEAR_ADDRESS: u8 = 0x04;
const START_LINEAR_ADDRESS: u8 = 0x05;

/// Count, address (2), type and checksum.
const RECORD_OVERHEAD: usize = 5;

/// Parse `text` and hand every data byte to `store` with its linear address.
///
/// Stops at the end-of-file record. Start address records are accepted and
/// ignored. Returns the number of data bytes stored.
pub fn parse(text: &str, mut store: impl FnMut(u32, u8)) -> Result<usize> {
    let mut base: u32 = 0;
    let mut stored = 0;

    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let record = raw.trim();
        if record.is_empty() {
            continue;
        }
        let digits = record
            .strip_prefix(':')
            .ok_or(Error::HexMissingStartCode { line })?;
        let bytes = decode_digits(digits).ok_or(Error::HexInvalidDigits { line })?;
        if bytes.len() < RECORD_OVERHEAD {
            return Err(Error::HexLengthMismatch {
                line,
                declared: bytes.first().copied().unwrap_or(0) as usize,
                actual: 0,
            });
        }

        let declared = bytes[0] as usize;
        let actual = bytes.len() - RECORD_OVERHEAD;
        if declared != actual {
            return Err(Error::HexLengthMismatch {
                line,
                declared,
                actual,
            });
        }

        let (body, checksum) = bytes.split_at(bytes.len() - 1);
        let expected = body
            .iter()
            .fold(0u8, |sum, b| sum.wrapping_add(*b))
            .wrapping_neg();
        if expected != checksum[0] {
            return Err(Error::HexChecksum {
                line,
                expected,
                found: checksum[0],
            });
        }

        let offset = u16::from_be_bytes([bytes[1], bytes[2]]);
        let kind = bytes[3];
        let data = &bytes[4..4 + declared];
        match kind {
            DATA => {
                for (j, &b) in data.iter().enumerate() {
                    store(base + offset.wrapping_add(j as u16) as u32, b);
                }
                stored += data.len();
            }
            END_OF_FILE => break,
            EXTENDED_SEGMENT_ADDRESS if data.len() == 2 => {
                base = (u16::from_be_bytes([data[0], data[1]]) as u32) << 4;
            }
            EXTENDED_LINEAR_ADDRESS if data.len() == 2 => {
                base = (u16::from_be_bytes([data[0], data[1]]) as u32) << 16;
            }
            START_SEGMENT_ADDRESS | START_LINEAR_ADDRESS => {}
            _ => return Err(Error::HexRecordType { line, kind }),
        }
    }

    Ok(stored)
}

fn decode_digits(digits: &str) -> Option<Vec<u8>> {
    if digits.len() % 2 != 0 || !digits.is_ascii() {
        return None;
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&digits[i..i + 2], 16).ok())
        .collect()
}
