use super::layout::RecordType;
use crate::field::FieldDescriptor;
use crate::types::FieldIter;

// ─── Record ─────────────────────────────────────────────────────────────────

/// One instance of a record type.
///
/// Owns one descriptor per declared field, in declaration order. Not
/// synchronized: share across threads only behind your own lock.
#[derive(Debug, Clone)]
pub struct Record {
    pub(crate) record_type: RecordType,
    pub(crate) fields: Vec<FieldDescriptor>,
}

impl Record {
    pub(crate) fn new(record_type: RecordType) -> Self {
        let fields = record_type
            .fields()
            .iter()
            .map(|spec| FieldDescriptor::new(spec.kind))
            .collect();
        Self {
            record_type,
            fields,
        }
    }

    #[inline]
    pub fn record_type(&self) -> &RecordType {
        &self.record_type
    }

    #[inline]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn field_at(&self, i: usize) -> Option<&FieldDescriptor> {
        self.fields.get(i)
    }

    #[inline]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(self.record_type.index_of(name)?)
    }

    #[inline]
    pub(crate) fn fields_mut(&mut self) -> &mut [FieldDescriptor] {
        &mut self.fields
    }

    /// Iterate over `(name, descriptor)` pairs in declaration order.
    #[inline]
    pub fn iter_fields(&self) -> FieldIter<'_> {
        FieldIter {
            record: self,
            pos: 0,
        }
    }

    /// Length `encode` would produce for the current values.
    pub fn encoded_len(&self) -> usize {
        self.fields.iter().map(FieldDescriptor::byte_width).sum()
    }

    /// Put every field back to its zero value.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            *field = FieldDescriptor::new(field.kind());
        }
    }
}

/// Records are equal when they share a layout and every field holds the
/// same bytes and value.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.record_type == other.record_type && self.fields == other.fields
    }
}
