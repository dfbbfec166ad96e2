use crate::field_value::FieldValue;
use crate::record::Record;
use crate::types::{FieldKind, MAX_SCALAR_WIDTH, ValueKind};
use arrayvec::ArrayVec;

/// Encoded bytes of one scalar field, stack allocated.
pub type ScalarBytes = ArrayVec<u8, MAX_SCALAR_WIDTH>;

// ─── FieldSource Trait ──────────────────────────────────────────────────────

/// Trait for value types that can be assigned into record fields.
///
/// This abstracts over different value representations (FieldValue,
/// serde_json::Value, cbor4ii::core::Value) so a record can be filled from
/// any of them.
pub trait FieldSource {
    /// Convert into a field candidate. `None` for shapes no field can hold
    /// (arrays, maps, byte strings).
    fn to_field_value(&self) -> Option<FieldValue>;
}

// ─── FieldSource for FieldValue ─────────────────────────────────────────────

impl FieldSource for FieldValue {
    #[inline]
    fn to_field_value(&self) -> Option<FieldValue> {
        Some(self.clone())
    }
}

// ─── FieldSource for serde_json::Value ──────────────────────────────────────

impl FieldSource for serde_json::Value {
    fn to_field_value(&self) -> Option<FieldValue> {
        match self {
            serde_json::Value::Null => Some(FieldValue::Null),
            serde_json::Value::Bool(b) => Some(FieldValue::Bool(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(FieldValue::from(i))
                } else if let Some(u) = n.as_u64() {
                    Some(FieldValue::from(u))
                } else {
                    n.as_f64().map(FieldValue::from)
                }
            }
            serde_json::Value::String(s) => Some(FieldValue::from(s.as_str())),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
        }
    }
}

// ─── FieldSource for cbor4ii::core::Value ───────────────────────────────────

impl FieldSource for cbor4ii::core::Value {
    /// CBOR integers are 128-bit wide; keep them whole.
    fn to_field_value(&self) -> Option<FieldValue> {
        match self {
            cbor4ii::core::Value::Null => Some(FieldValue::Null),
            cbor4ii::core::Value::Bool(b) => Some(FieldValue::Bool(*b)),
            cbor4ii::core::Value::Integer(i) => Some(FieldValue::from(*i)),
            cbor4ii::core::Value::Float(f) => Some(FieldValue::from(*f)),
            cbor4ii::core::Value::Text(s) => Some(FieldValue::from(s.as_str())),
            _ => None,
        }
    }
}

// ─── FieldSource for &T ─────────────────────────────────────────────────────

/// Blanket implementation for references, so `&serde_json::Value` works too.
impl<T: FieldSource> FieldSource for &T {
    #[inline]
    fn to_field_value(&self) -> Option<FieldValue> {
        (**self).to_field_value()
    }
}

// ─── Domain Check ───────────────────────────────────────────────────────────

/// Whether `candidate` lies in the value domain of `kind`.
pub fn accepts(kind: FieldKind, candidate: &FieldValue) -> bool {
    match (kind.value_kind(), candidate) {
        (ValueKind::Number, FieldValue::Number(_)) => true,
        (ValueKind::Character, FieldValue::Str(s)) => match kind {
            FieldKind::Str => s.chars().all(|c| c != '\0' && (c as u32) <= 0xFF),
            _ => s.chars().count() == 1,
        },
        // integer code point
        (ValueKind::Character, FieldValue::Number(n)) => kind == FieldKind::Char && !n.is_float(),
        (ValueKind::Boolean, FieldValue::Bool(_)) => true,
        (ValueKind::Boolean, FieldValue::Number(n)) => {
            !n.is_float() && matches!(n.as_u128(), Some(0 | 1))
        }
        (ValueKind::Null, FieldValue::Null) => true,
        _ => false,
    }
}

// ─── Scalar Writer ──────────────────────────────────────────────────────────

/// Encode a candidate into the exact bytes of a fixed-width field.
///
/// Returns `None` for the string kind or a candidate outside the domain.
pub fn encode_scalar(kind: FieldKind, candidate: &FieldValue) -> Option<ScalarBytes> {
    let width = kind.width()?;
    if !accepts(kind, candidate) {
        return None;
    }
    let mut out = [0u8; MAX_SCALAR_WIDTH];

    match (kind.value_kind(), candidate) {
        (ValueKind::Number, FieldValue::Number(n)) => {
            if kind.is_float() {
                let f = n.as_f64();
                match width {
                    4 => out[..4].copy_from_slice(&(f as f32).to_le_bytes()),
                    // 8 and 16: double precision in the low eight bytes
                    _ => out[..8].copy_from_slice(&f.to_le_bytes()),
                }
            } else {
                out[..width].copy_from_slice(&n.wrapping_bits().to_le_bytes()[..width]);
            }
        }
        (ValueKind::Character, FieldValue::Str(s)) => {
            let code = s.chars().next().map_or(0, |c| c as u128);
            out[..width].copy_from_slice(&code.to_le_bytes()[..width]);
        }
        (ValueKind::Character, FieldValue::Number(n)) => {
            out[..width].copy_from_slice(&n.wrapping_bits().to_le_bytes()[..width]);
        }
        (ValueKind::Boolean, FieldValue::Bool(b)) => out[0] = *b as u8,
        (ValueKind::Boolean, FieldValue::Number(n)) => out[0] = (n.wrapping_bits() != 0) as u8,
        _ => out[0] = 0,
    }

    let mut bytes = ScalarBytes::new();
    bytes.try_extend_from_slice(&out[..width]).ok()?;
    Some(bytes)
}

/// Append a string's single-byte character codes and its terminator.
#[inline]
pub fn write_str_into(buf: &mut Vec<u8>, s: &str) {
    buf.reserve(s.len() + 1);
    buf.extend(s.chars().map(|c| c as u32 as u8));
    buf.push(0);
}

// ════════════════════════════════════════════════════════════════════════
// Record encoding
// ════════════════════════════════════════════════════════════════════════

/// Encode a record into a fresh buffer.
///
/// Fields are laid out in declaration order with no padding between them.
pub fn encode(record: &Record) -> Vec<u8> {
    let mut buf = Vec::with_capacity(record.encoded_len());
    write_record(record, &mut buf);
    buf
}

/// Encode a record into a reusable buffer.
///
/// Identical to `encode`, but reuses the caller's Vec to avoid an
/// allocation per record when encoding many records in sequence. The buffer
/// is cleared but retains its capacity. Returns the encoded length.
pub fn encode_into(record: &Record, buf: &mut Vec<u8>) -> usize {
    buf.clear();
    buf.reserve(record.encoded_len());
    write_record(record, buf);
    buf.len()
}

/// Append a record's bytes to the end of `buf` without clearing it.
pub fn append_to(record: &Record, buf: &mut Vec<u8>) -> usize {
    let start = buf.len();
    buf.reserve(record.encoded_len());
    write_record(record, buf);
    buf.len() - start
}

#[inline]
fn write_record(record: &Record, buf: &mut Vec<u8>) {
    for (_, field) in record.iter_fields() {
        buf.extend_from_slice(field.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_scalar_widths() {
        for kind in FieldKind::ALL {
            let candidate = match kind.value_kind() {
                ValueKind::Number => FieldValue::from(1u8),
                ValueKind::Character => FieldValue::from('a'),
                ValueKind::Boolean => FieldValue::Bool(true),
                ValueKind::Null => FieldValue::Null,
            };
            match kind.width() {
                Some(w) => assert_eq!(encode_scalar(kind, &candidate).unwrap().len(), w),
                None => assert!(encode_scalar(kind, &candidate).is_none()),
            }
        }
    }

    #[test]
    fn test_encode_int_little_endian() {
        let bytes = encode_scalar(FieldKind::Int, &FieldValue::from(1234)).unwrap();
        assert_eq!(bytes.as_slice(), &[210, 4, 0, 0]);
        let bytes = encode_scalar(FieldKind::Long, &FieldValue::from(0x0102030405060708u64)).unwrap();
        assert_eq!(bytes.as_slice(), &[8, 7, 6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_encode_rejects_out_of_domain() {
        assert!(encode_scalar(FieldKind::Int, &FieldValue::from("1")).is_none());
        assert!(encode_scalar(FieldKind::Bool, &FieldValue::from(7)).is_none());
        assert!(encode_scalar(FieldKind::Null, &FieldValue::from(0)).is_none());
    }

    #[test]
    fn test_write_str_into() {
        let mut buf = vec![9];
        write_str_into(&mut buf, "hi");
        assert_eq!(buf, vec![9, 104, 105, 0]);
    }

    #[test]
    fn test_json_source() {
        let v = serde_json::json!(-5);
        assert_eq!(v.to_field_value(), Some(FieldValue::from(-5i64)));
        let v = serde_json::json!(u64::MAX);
        assert_eq!(v.to_field_value(), Some(FieldValue::from(u64::MAX)));
        let v = serde_json::json!(2.5);
        assert_eq!(v.to_field_value(), Some(FieldValue::from(2.5)));
        let v = serde_json::json!("x");
        assert_eq!((&v).to_field_value(), Some(FieldValue::from("x")));
        assert_eq!(serde_json::json!([1]).to_field_value(), None);
        assert_eq!(serde_json::json!({}).to_field_value(), None);
    }

    #[test]
    fn test_cbor_source() {
        let v = cbor4ii::core::Value::Integer(1i128 << 100);
        assert_eq!(v.to_field_value(), Some(FieldValue::from(1i128 << 100)));
        let v = cbor4ii::core::Value::Text("a".into());
        assert_eq!(v.to_field_value(), Some(FieldValue::from("a")));
        let v = cbor4ii::core::Value::Array(vec![]);
        assert_eq!(v.to_field_value(), None);
    }

    #[test]
    fn test_scalar_shapes_from_every_source() {
        use cbor4ii::core::Value as Cbor;

        assert_eq!(serde_json::Value::Null.to_field_value(), Some(FieldValue::Null));
        assert_eq!(serde_json::json!(true).to_field_value(), Some(FieldValue::Bool(true)));
        assert_eq!(Cbor::Null.to_field_value(), Some(FieldValue::Null));
        assert_eq!(Cbor::Bool(false).to_field_value(), Some(FieldValue::Bool(false)));
        assert_eq!(Cbor::Float(-0.5).to_field_value(), Some(FieldValue::from(-0.5)));
        assert_eq!(Cbor::Integer(-7).to_field_value(), Some(FieldValue::from(-7i128)));
        assert_eq!(Cbor::Bytes(vec![1]).to_field_value(), None);

        let wide = FieldValue::from(u128::MAX);
        assert_eq!(wide.to_field_value(), Some(wide.clone()));
        assert_eq!((&wide).to_field_value(), Some(wide));
    }
}
