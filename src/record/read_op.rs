use super::record::Record;
use crate::error::RecordError;
use crate::field::FieldDescriptor;
use crate::field_value::FieldValue;
use crate::types::{FieldKind, ValueKind};
use smol_str::SmolStr;

impl Record {
    /// Find a field by name. Returns (index_position, descriptor).
    #[inline]
    pub fn find_field(&self, name: &str) -> Result<(usize, &FieldDescriptor), RecordError> {
        let i = self
            .record_type
            .index_of(name)
            .ok_or_else(|| RecordError::UnknownField(SmolStr::new(name)))?;
        Ok((i, &self.fields[i]))
    }

    // ════════════════════════════════════════════════════════════════════════
    // Read access
    // ════════════════════════════════════════════════════════════════════════

    /// Current decoded value of a field.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.field(name).map(FieldDescriptor::value)
    }

    #[inline]
    pub fn get_at(&self, i: usize) -> Option<&FieldValue> {
        self.fields.get(i).map(FieldDescriptor::value)
    }

    /// Get an integer field as its unsigned stored value.
    #[inline]
    pub fn get_int(&self, name: &str) -> Option<u128> {
        let field = self.field(name)?;
        if !field.kind().is_integer() {
            return None;
        }
        field.value().as_u128()
    }

    /// Get an integer field, if its stored value fits an i64.
    #[inline]
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        i64::try_from(self.get_int(name)?).ok()
    }

    /// Get a float field.
    #[inline]
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        let field = self.field(name)?;
        if !field.kind().is_float() {
            return None;
        }
        field.value().as_f64()
    }

    /// Get any numeric field as f64 (converting integers if needed).
    pub fn get_number_as_f64(&self, name: &str) -> Option<f64> {
        let field = self.field(name)?;
        if field.kind().value_kind() != ValueKind::Number {
            return None;
        }
        field.value().as_f64()
    }

    #[inline]
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        let field = self.field(name)?;
        if field.kind() != FieldKind::Bool {
            return None;
        }
        field.value().as_bool()
    }

    /// Get a string field.
    #[inline]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        let field = self.field(name)?;
        if field.kind() != FieldKind::Str {
            return None;
        }
        field.value().as_str()
    }

    #[inline]
    pub fn get_char(&self, name: &str) -> Option<char> {
        let field = self.field(name)?;
        if field.kind() != FieldKind::Char {
            return None;
        }
        field.value().as_char()
    }

    /// Get a field's encoded bytes.
    #[inline]
    pub fn get_raw(&self, name: &str) -> Option<&[u8]> {
        self.field(name).map(FieldDescriptor::as_bytes)
    }

    /// Check if a field exists.
    #[inline]
    pub fn has_field(&self, name: &str) -> bool {
        self.record_type.index_of(name).is_some()
    }

    #[inline]
    pub fn field_kind(&self, name: &str) -> Option<FieldKind> {
        self.field(name).map(FieldDescriptor::kind)
    }

    /// Convert to a JSON object keyed by field name.
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .iter_fields()
            .map(|(name, field)| (name.to_string(), field.value().clone().into()))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }
}
