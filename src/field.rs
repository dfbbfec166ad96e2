use crate::deserialization::{decode_scalar, scan_str};
use crate::error::FieldError;
use crate::field_value::FieldValue;
use crate::serialization::{accepts, encode_scalar, write_str_into};
use crate::types::FieldKind;
use smol_str::SmolStr;

// ─── FieldDescriptor ────────────────────────────────────────────────────────

/// One typed piece of record storage.
///
/// Owns the field's encoded bytes and the value they decode to. The two are
/// kept in lockstep: every successful `assign` or `decode` rewrites `raw`
/// and refreshes `value` from it, and every failure leaves both untouched.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    kind: FieldKind,
    raw: Vec<u8>,
    value: FieldValue,
}

impl FieldDescriptor {
    /// A zero-valued descriptor: all-zero bytes for scalars, the empty string
    /// (terminator only) for `Str`.
    pub fn new(kind: FieldKind) -> Self {
        let raw = vec![0u8; kind.min_width()];
        let value = match kind.width() {
            Some(_) => decode_scalar(kind, &raw),
            None => FieldValue::Str(SmolStr::default()),
        };
        Self { kind, raw, value }
    }

    #[inline]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Current encoded width. Fixed for scalars, `len + 1` for strings.
    #[inline]
    pub fn byte_width(&self) -> usize {
        self.raw.len()
    }

    #[inline]
    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    /// Current binary representation.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    #[inline]
    pub fn validate(&self, candidate: &FieldValue) -> bool {
        accepts(self.kind, candidate)
    }

    /// Validate and store a new value.
    ///
    /// Integer fields keep the low-order bytes of the candidate, so a `Byte`
    /// assigned 600 reads back as 88.
    pub fn assign(&mut self, candidate: impl Into<FieldValue>) -> Result<(), FieldError> {
        let candidate = candidate.into();
        if !self.validate(&candidate) {
            return Err(FieldError::InvalidValue {
                kind: self.kind,
                value: format!("{candidate:?}"),
            });
        }
        match candidate {
            FieldValue::Str(s) if self.kind.is_variable() => {
                self.raw.clear();
                write_str_into(&mut self.raw, &s);
                self.value = FieldValue::Str(s);
            }
            candidate => {
                let bytes = encode_scalar(self.kind, &candidate).ok_or_else(|| {
                    FieldError::InvalidValue {
                        kind: self.kind,
                        value: format!("{candidate:?}"),
                    }
                })?;
                self.raw.clear();
                self.raw.extend_from_slice(&bytes);
                self.value = decode_scalar(self.kind, &self.raw);
            }
        }
        Ok(())
    }

    /// Consume this field's bytes from the front of `bytes`.
    ///
    /// Returns the decoded value and the number of bytes consumed.
    pub fn decode(&mut self, bytes: &[u8]) -> Result<(FieldValue, usize), FieldError> {
        match self.kind.width() {
            Some(width) => {
                if bytes.len() < width {
                    return Err(FieldError::TruncatedBuffer {
                        kind: self.kind,
                        expected: width,
                        actual: bytes.len(),
                    });
                }
                self.raw.clear();
                self.raw.extend_from_slice(&bytes[..width]);
                self.value = decode_scalar(self.kind, &self.raw);
                Ok((self.value.clone(), width))
            }
            None => {
                let (s, consumed) = scan_str(bytes)?;
                self.raw.clear();
                self.raw.extend_from_slice(&bytes[..consumed]);
                self.value = FieldValue::Str(s);
                Ok((self.value.clone(), consumed))
            }
        }
    }
}

/// Descriptors compare by kind and bytes. `value` is always decoded from
/// `raw`, and comparing it would make a NaN field unequal to itself.
impl PartialEq for FieldDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.raw == other.raw
    }
}
