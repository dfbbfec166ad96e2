// ─── Error ──────────────────────────────────────────────────────────────────
use crate::types::FieldKind;
use smol_str::SmolStr;
use thiserror::Error;

/// Failure of a single field descriptor. The descriptor is left untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("Invalid value for {kind} field: {value}")]
    InvalidValue { kind: FieldKind, value: String },
    #[error("Truncated buffer for {kind} field: expected {expected} bytes, got {actual}")]
    TruncatedBuffer {
        kind: FieldKind,
        expected: usize,
        actual: usize,
    },
    #[error("Unterminated string: no terminator in {scanned} remaining bytes")]
    UnterminatedString { scanned: usize },
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Field `{name}`: {source}")]
    Field {
        name: SmolStr,
        #[source]
        source: FieldError,
    },
    #[error("Field not found: {0}")]
    UnknownField(SmolStr),
    #[error("Field already exists: {0}")]
    DuplicateField(SmolStr),
    #[error("Field index {index} out of range for {len} fields")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Can't fill a record from a non-object value")]
    NotAnObject,
    #[error("Trailing bytes: consumed {consumed} of {total}")]
    TrailingBytes { consumed: usize, total: usize },
    #[error("Unknown field kind: {0}")]
    UnknownKind(String),
    #[error("Layout document error: {0}")]
    Schema(#[from] serde_json::Error),
}

impl RecordError {
    #[inline]
    pub(crate) fn at(name: &SmolStr, source: FieldError) -> Self {
        RecordError::Field {
            name: name.clone(),
            source,
        }
    }

    /// The field-level failure behind this error, if any.
    pub fn field_error(&self) -> Option<&FieldError> {
        match self {
            RecordError::Field { source, .. } => Some(source),
            _ => None,
        }
    }
}
