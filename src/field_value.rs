use smol_str::SmolStr;
use std::convert::TryFrom;

// ─── FieldNumber ────────────────────────────────────────────────────────────

/// A numeric field value.
///
/// Candidates may be signed, unsigned or floating. Values decoded from an
/// integer field are always `UInt`, since integer fields are read back as an
/// unsigned little-endian accumulation of their bytes.
#[derive(Clone, Copy, PartialEq)]
pub enum FieldNumber {
    Int(i128),
    UInt(u128),
    Float(f64),
}

impl std::fmt::Debug for FieldNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldNumber::Int(i) => write!(f, "Int({})", i),
            FieldNumber::UInt(u) => write!(f, "UInt({})", u),
            FieldNumber::Float(v) => write!(f, "Float({})", v),
        }
    }
}

impl FieldNumber {
    pub fn as_f64(self) -> f64 {
        match self {
            FieldNumber::Int(i) => i as f64,
            FieldNumber::UInt(u) => u as f64,
            FieldNumber::Float(f) => f,
        }
    }

    /// Two's-complement bit pattern, wrapping at 128 bits. Floats truncate
    /// toward zero and then wrap like integers; NaN and infinities become 0.
    pub fn wrapping_bits(self) -> u128 {
        match self {
            FieldNumber::Int(i) => i as u128,
            FieldNumber::UInt(u) => u,
            FieldNumber::Float(f) => float_wrapping_bits(f),
        }
    }

    pub fn as_i64(self) -> Option<i64> {
        match self {
            FieldNumber::Int(i) => i64::try_from(i).ok(),
            FieldNumber::UInt(u) => i64::try_from(u).ok(),
            FieldNumber::Float(f) => {
                if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
                    Some(f as i64)
                } else {
                    None
                }
            }
        }
    }

    pub fn as_u128(self) -> Option<u128> {
        match self {
            FieldNumber::UInt(u) => Some(u),
            FieldNumber::Int(i) => u128::try_from(i).ok(),
            FieldNumber::Float(f) => {
                if f.fract() == 0.0 && f >= 0.0 && f <= u128::MAX as f64 {
                    Some(f as u128)
                } else {
                    None
                }
            }
        }
    }

    #[inline]
    pub fn is_float(self) -> bool {
        matches!(self, FieldNumber::Float(_))
    }
}

/// Exact residue of `trunc(f)` modulo 2^128.
///
/// A finite double is `mantissa * 2^shift` with a 53-bit mantissa, so the
/// residue is the mantissa shifted into place, dropping bits at or above 2^128.
fn float_wrapping_bits(f: f64) -> u128 {
    if !f.is_finite() {
        return 0;
    }
    let t = f.trunc();
    let bits = t.abs().to_bits();
    let exp = ((bits >> 52) & 0x7FF) as i32;
    if exp == 0 {
        return 0; // zero, or a subnormal already truncated away
    }
    let mantissa = (bits & ((1u64 << 52) - 1)) | (1u64 << 52);
    let shift = exp - 1075;
    let magnitude = if shift >= 128 {
        0
    } else if shift >= 0 {
        (mantissa as u128) << shift
    } else if shift > -64 {
        (mantissa >> -shift) as u128
    } else {
        0
    };
    if t < 0.0 {
        magnitude.wrapping_neg()
    } else {
        magnitude
    }
}

// ─── FieldValue ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(FieldNumber),
    Str(SmolStr),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Null
    }
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_u128(&self) -> Option<u128> {
        match self {
            FieldValue::Number(n) => n.as_u128(),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<FieldNumber> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The single character held by a one-character string.
    pub fn as_char(&self) -> Option<char> {
        let mut chars = self.as_str()?.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

// ─── From impls ─────────────────────────────────────────────────────────────

macro_rules! from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for FieldValue {
            fn from(n: $t) -> Self {
                FieldValue::Number(FieldNumber::Int(n as i128))
            }
        }
    )*};
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for FieldValue {
            fn from(n: $t) -> Self {
                FieldValue::Number(FieldNumber::UInt(n as u128))
            }
        }
    )*};
}

from_signed!(i8, i16, i32, i64, i128, isize);
from_unsigned!(u8, u16, u32, u64, u128, usize);

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(FieldNumber::Float(n))
    }
}

impl From<f32> for FieldValue {
    fn from(n: f32) -> Self {
        FieldValue::Number(FieldNumber::Float(n as f64))
    }
}

impl From<FieldNumber> for FieldValue {
    fn from(n: FieldNumber) -> Self {
        FieldValue::Number(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<char> for FieldValue {
    fn from(c: char) -> Self {
        let mut buf = [0u8; 4];
        FieldValue::Str(SmolStr::new(c.encode_utf8(&mut buf)))
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Str(SmolStr::from(s))
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Str(SmolStr::from(s))
    }
}

impl From<SmolStr> for FieldValue {
    fn from(s: SmolStr) -> Self {
        FieldValue::Str(s)
    }
}

impl From<()> for FieldValue {
    fn from(_: ()) -> Self {
        FieldValue::Null
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(FieldValue::Null, Into::into)
    }
}

// ─── Into serde_json::Value ─────────────────────────────────────────────────

impl From<FieldValue> for serde_json::Value {
    fn from(val: FieldValue) -> Self {
        match val {
            FieldValue::Null => serde_json::Value::Null,
            FieldValue::Bool(b) => serde_json::Value::Bool(b),
            FieldValue::Number(n) => match n {
                FieldNumber::Int(i) => match i64::try_from(i) {
                    Ok(i) => serde_json::json!(i),
                    Err(_) => serde_json::Value::String(i.to_string()),
                },
                // 128-bit values that do not fit a JSON number are emitted as
                // decimal strings
                FieldNumber::UInt(u) => match u64::try_from(u) {
                    Ok(u) => serde_json::json!(u),
                    Err(_) => serde_json::Value::String(u.to_string()),
                },
                FieldNumber::Float(f) => serde_json::Number::from_f64(f)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null),
            },
            FieldValue::Str(s) => serde_json::Value::String(s.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapping_bits_negative() {
        assert_eq!(FieldNumber::Int(-1).wrapping_bits(), u128::MAX);
        assert_eq!(FieldNumber::Float(-2.7).wrapping_bits(), (-2i128) as u128);
        assert_eq!(FieldNumber::Float(3.9).wrapping_bits(), 3);
        assert_eq!(FieldNumber::Float(f64::NAN).wrapping_bits(), 0);
    }

    #[test]
    fn test_float_wrapping_is_modular() {
        assert_eq!(FieldNumber::Float(4294967301.0).wrapping_bits() as u32, 5);
        assert_eq!(FieldNumber::Float(-3.0).wrapping_bits() as u16, 65533);
        assert_eq!(FieldNumber::Float(2f64.powi(120) * 3.0).wrapping_bits(), 3u128 << 120);
        assert_eq!(FieldNumber::Float(2f64.powi(127) * 3.0).wrapping_bits(), 1u128 << 127);
        assert_eq!(FieldNumber::Float(2f64.powi(130)).wrapping_bits(), 0);
        assert_eq!(FieldNumber::Float(-(2f64.powi(130))).wrapping_bits(), 0);
        assert_eq!(FieldNumber::Float(1e40).wrapping_bits() as u32, 0);
        assert_eq!(FieldNumber::Float(-1e40).wrapping_bits() as u32, 0);
        assert_eq!(FieldNumber::Float(0.9).wrapping_bits(), 0);
        assert_eq!(FieldNumber::Float(-0.9).wrapping_bits(), 0);
        assert_eq!(FieldNumber::Float(f64::MIN_POSITIVE / 2.0).wrapping_bits(), 0);
    }

    #[test]
    fn test_non_finite_floats_wrap_to_zero() {
        assert_eq!(FieldNumber::Float(f64::INFINITY).wrapping_bits(), 0);
        assert_eq!(FieldNumber::Float(f64::NEG_INFINITY).wrapping_bits(), 0);
        assert_eq!(FieldNumber::Float(f64::NAN).wrapping_bits(), 0);
    }

    #[test]
    fn test_as_char() {
        assert_eq!(FieldValue::from('x').as_char(), Some('x'));
        assert_eq!(FieldValue::from("xy").as_char(), None);
        assert_eq!(FieldValue::from("").as_char(), None);
        assert_eq!(FieldValue::from(1i32).as_char(), None);
    }

    #[test]
    fn test_option_into_value() {
        assert_eq!(FieldValue::from(None::<i32>), FieldValue::Null);
        assert_eq!(FieldValue::from(Some(true)), FieldValue::Bool(true));
    }

    #[test]
    fn test_wide_uint_to_json_is_string() {
        let v: serde_json::Value = FieldValue::from(u128::MAX).into();
        assert_eq!(v, serde_json::Value::String(u128::MAX.to_string()));
        let v: serde_json::Value = FieldValue::from(7u8).into();
        assert_eq!(v, serde_json::json!(7));
    }
}
