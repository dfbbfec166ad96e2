use super::record::Record;
use crate::error::{FieldError, RecordError};
use crate::field_value::FieldValue;
use crate::serialization::FieldSource;
use smol_str::SmolStr;

impl Record {
    // ════════════════════════════════════════════════════════════════════════
    // Generic setters
    // ════════════════════════════════════════════════════════════════════════

    /// Assign a field by name. An invalid value leaves the field unchanged.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<(), RecordError> {
        let (i, _) = self.find_field(name)?;
        self.set_at(i, value)
    }

    /// Assign a field by declaration index.
    pub fn set_at(&mut self, i: usize, value: impl Into<FieldValue>) -> Result<(), RecordError> {
        let len = self.fields.len();
        let field = self
            .fields
            .get_mut(i)
            .ok_or(RecordError::IndexOutOfRange { index: i, len })?;
        field
            .assign(value)
            .map_err(|e| RecordError::at(self.record_type.field_name_smol(i), e))
    }

    /// Assign a field from any supported value representation.
    pub fn assign_from<V: FieldSource>(&mut self, name: &str, value: &V) -> Result<(), RecordError> {
        let (i, field) = self.find_field(name)?;
        let candidate = value.to_field_value().ok_or_else(|| {
            RecordError::at(
                self.record_type.field_name_smol(i),
                FieldError::InvalidValue {
                    kind: field.kind(),
                    value: "nested value".to_string(),
                },
            )
        })?;
        self.set_at(i, candidate)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Typed setters
    // ════════════════════════════════════════════════════════════════════════

    #[inline]
    pub fn set_int(&mut self, name: &str, value: i128) -> Result<(), RecordError> {
        self.set(name, value)
    }

    #[inline]
    pub fn set_u128(&mut self, name: &str, value: u128) -> Result<(), RecordError> {
        self.set(name, value)
    }

    #[inline]
    pub fn set_f64(&mut self, name: &str, value: f64) -> Result<(), RecordError> {
        self.set(name, value)
    }

    #[inline]
    pub fn set_bool(&mut self, name: &str, value: bool) -> Result<(), RecordError> {
        self.set(name, value)
    }

    #[inline]
    pub fn set_str(&mut self, name: &str, value: &str) -> Result<(), RecordError> {
        self.set(name, value)
    }

    #[inline]
    pub fn set_char(&mut self, name: &str, value: char) -> Result<(), RecordError> {
        self.set(name, value)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Bulk fill — all-or-nothing
    // ════════════════════════════════════════════════════════════════════════

    fn fill_from_entries<'v, V, I>(&mut self, entries: I) -> Result<(), RecordError>
    where
        V: FieldSource + 'v,
        I: IntoIterator<Item = (SmolStr, &'v V)>,
    {
        let mut staged = self.clone();
        for (name, value) in entries {
            staged.assign_from(&name, value)?;
        }
        *self = staged;
        Ok(())
    }

    /// Assign every entry of a JSON object. Fields not mentioned keep their
    /// current value; any bad entry leaves the whole record unchanged.
    pub fn fill_from_json(&mut self, value: &serde_json::Value) -> Result<(), RecordError> {
        let map = value.as_object().ok_or(RecordError::NotAnObject)?;
        self.fill_from_entries(map.iter().map(|(k, v)| (SmolStr::from(k.as_str()), v)))
    }

    /// Assign every entry of a CBOR map with text keys.
    pub fn fill_from_cbor(&mut self, value: &cbor4ii::core::Value) -> Result<(), RecordError> {
        let entries = match value {
            cbor4ii::core::Value::Map(entries) => entries,
            _ => return Err(RecordError::NotAnObject),
        };
        let mut named = Vec::with_capacity(entries.len());
        for (k, v) in entries {
            match k {
                cbor4ii::core::Value::Text(s) => named.push((SmolStr::from(s.as_str()), v)),
                other => return Err(RecordError::UnknownField(SmolStr::from(format!("{other:?}")))),
            }
        }
        self.fill_from_entries(named)
    }
}
