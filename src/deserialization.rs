use crate::error::{FieldError, RecordError};
use crate::field_value::{FieldNumber, FieldValue};
use crate::record::{Record, RecordType};
use crate::types::{FieldKind, ValueKind};
use smol_str::SmolStr;
use tracing::{debug, trace};

// ─── Scalar Reader ──────────────────────────────────────────────────────────

#[inline]
fn le_array<const N: usize>(raw: &[u8]) -> [u8; N] {
    let mut bytes = [0u8; N];
    bytes.copy_from_slice(&raw[..N]);
    bytes
}

/// Reconstruct the value held in a fixed-width field's bytes.
///
/// `raw` must be exactly the field's width; `FieldDescriptor` checks the
/// length before calling in.
pub(crate) fn decode_scalar(kind: FieldKind, raw: &[u8]) -> FieldValue {
    match kind.value_kind() {
        ValueKind::Number if kind.is_float() => {
            let f = match raw.len() {
                4 => f32::from_le_bytes(le_array::<4>(raw)) as f64,
                // 16-byte floats carry a double in their low eight bytes
                _ => f64::from_le_bytes(le_array::<8>(raw)),
            };
            FieldValue::Number(FieldNumber::Float(f))
        }
        ValueKind::Number => {
            let acc = raw
                .iter()
                .enumerate()
                .fold(0u128, |acc, (i, b)| acc | (*b as u128) << (8 * i));
            FieldValue::Number(FieldNumber::UInt(acc))
        }
        ValueKind::Character => FieldValue::from(char::from(raw[0])),
        ValueKind::Boolean => FieldValue::Bool(raw[0] == 1),
        ValueKind::Null => FieldValue::Null,
    }
}

/// Read a null-terminated string from the front of `bytes`.
///
/// Returns the string and the bytes consumed, terminator included.
pub fn scan_str(bytes: &[u8]) -> Result<(SmolStr, usize), FieldError> {
    let end = bytes
        .iter()
        .position(|b| *b == 0)
        .ok_or(FieldError::UnterminatedString {
            scanned: bytes.len(),
        })?;
    let s: SmolStr = bytes[..end].iter().map(|b| char::from(*b)).collect();
    Ok((s, end + 1))
}

// ════════════════════════════════════════════════════════════════════════
// Record decoding
// ════════════════════════════════════════════════════════════════════════

/// Decode one record from the front of `bytes`, ignoring anything after it.
pub fn decode(record_type: &RecordType, bytes: &[u8]) -> Result<Record, RecordError> {
    decode_prefix(record_type, bytes).map(|(record, _)| record)
}

/// Decode one record and report how many bytes it occupied.
///
/// All-or-nothing: the first failing field aborts and the partially built
/// record is dropped.
pub fn decode_prefix(
    record_type: &RecordType,
    bytes: &[u8],
) -> Result<(Record, usize), RecordError> {
    let mut record = record_type.new_instance();
    let mut offset = 0usize;

    for (i, field) in record.fields_mut().iter_mut().enumerate() {
        let name = record_type.field_name_smol(i);
        match field.decode(&bytes[offset..]) {
            Ok((_, consumed)) => {
                trace!(field = %name, offset, consumed, "decoded field");
                offset += consumed;
            }
            Err(e) => {
                debug!(field = %name, offset, error = %e, "record decode aborted");
                return Err(RecordError::at(name, e));
            }
        }
    }
    Ok((record, offset))
}

/// Like `decode`, but the record must span the whole buffer.
pub fn decode_exact(record_type: &RecordType, bytes: &[u8]) -> Result<Record, RecordError> {
    let (record, consumed) = decode_prefix(record_type, bytes)?;
    if consumed != bytes.len() {
        debug!(consumed, total = bytes.len(), "trailing bytes after record");
        return Err(RecordError::TrailingBytes {
            consumed,
            total: bytes.len(),
        });
    }
    Ok(record)
}

// ─── RecordStream ───────────────────────────────────────────────────────────

/// Decodes back-to-back records of one type from a single buffer.
///
/// Stops at the end of the buffer, or after yielding the first error.
pub struct RecordStream<'a> {
    record_type: &'a RecordType,
    bytes: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> RecordStream<'a> {
    pub fn new(record_type: &'a RecordType, bytes: &'a [u8]) -> Self {
        Self {
            record_type,
            bytes,
            offset: 0,
            failed: false,
        }
    }

    /// Bytes consumed by the records yielded so far.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl<'a> Iterator for RecordStream<'a> {
    type Item = Result<Record, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        // an empty layout consumes nothing and would never advance
        if self.failed || self.offset >= self.bytes.len() || self.record_type.is_empty() {
            return None;
        }
        match decode_prefix(self.record_type, &self.bytes[self.offset..]) {
            Ok((record, consumed)) => {
                self.offset += consumed;
                Some(Ok(record))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_scalar_accumulates_unsigned() {
        let v = decode_scalar(FieldKind::Int, &[0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(v, FieldValue::Number(FieldNumber::UInt(4294967295)));
        let v = decode_scalar(FieldKind::LongLong, &[0x01; 16]);
        assert_eq!(v.as_u128(), Some(u128::from_le_bytes([0x01; 16])));
    }

    #[test]
    fn test_decode_scalar_floats() {
        let v = decode_scalar(FieldKind::Float, &1.5f32.to_le_bytes());
        assert_eq!(v.as_f64(), Some(1.5));
        let v = decode_scalar(FieldKind::Double, &(-0.25f64).to_le_bytes());
        assert_eq!(v.as_f64(), Some(-0.25));

        let mut wide = [0xAAu8; 16];
        wide[..8].copy_from_slice(&6.0f64.to_le_bytes());
        let v = decode_scalar(FieldKind::LongDouble, &wide);
        assert_eq!(v.as_f64(), Some(6.0));
    }

    #[test]
    fn test_scan_str() {
        assert_eq!(scan_str(&[0]).unwrap(), (SmolStr::new(""), 1));
        assert_eq!(scan_str(b"ab\0cd\0").unwrap(), (SmolStr::new("ab"), 3));
        assert_eq!(
            scan_str(b"").unwrap_err(),
            FieldError::UnterminatedString { scanned: 0 }
        );
    }
}
