use super::record::Record;
use crate::error::RecordError;
use crate::types::FieldKind;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::sync::Arc;
use xxhash_rust::xxh64::xxh64;

// ─── Layout Document ────────────────────────────────────────────────────────
//
//  { "fields": [ { "name": "id",  "kind": "int"  },
//                { "name": "tag", "kind": "char" } ] }
//
// Array order is binary layout order.

/// One named field of a record layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: SmolStr,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn new(name: impl Into<SmolStr>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct LayoutDoc {
    fields: Vec<FieldSpec>,
}

#[derive(Debug)]
struct Layout {
    fields: Vec<FieldSpec>,
    by_name: FxHashMap<SmolStr, usize>,
}

// ─── RecordType ─────────────────────────────────────────────────────────────

/// The ordered field list of a record type.
///
/// Immutable once defined; clones share the same layout.
#[derive(Debug, Clone)]
pub struct RecordType {
    layout: Arc<Layout>,
}

impl RecordType {
    /// Define a record type from ordered `(name, kind)` pairs.
    pub fn define<N, I>(fields: I) -> Result<Self, RecordError>
    where
        N: Into<SmolStr>,
        I: IntoIterator<Item = (N, FieldKind)>,
    {
        Self::from_specs(
            fields
                .into_iter()
                .map(|(name, kind)| FieldSpec::new(name, kind)),
        )
    }

    pub fn from_specs(specs: impl IntoIterator<Item = FieldSpec>) -> Result<Self, RecordError> {
        let fields: Vec<FieldSpec> = specs.into_iter().collect();
        let mut by_name = FxHashMap::default();
        by_name.reserve(fields.len());
        for (i, spec) in fields.iter().enumerate() {
            if by_name.insert(spec.name.clone(), i).is_some() {
                return Err(RecordError::DuplicateField(spec.name.clone()));
            }
        }
        Ok(Self {
            layout: Arc::new(Layout { fields, by_name }),
        })
    }

    /// Load a layout document.
    pub fn from_json(doc: &str) -> Result<Self, RecordError> {
        let doc: LayoutDoc = serde_json::from_str(doc)?;
        Self::from_specs(doc.fields)
    }

    pub fn to_json(&self) -> Result<String, RecordError> {
        let doc = LayoutDoc {
            fields: self.layout.fields.clone(),
        };
        Ok(serde_json::to_string(&doc)?)
    }

    /// A fresh record with every field zero-valued.
    pub fn new_instance(&self) -> Record {
        Record::new(self.clone())
    }

    #[inline]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.layout.fields
    }

    #[inline]
    pub fn field_count(&self) -> usize {
        self.layout.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layout.fields.is_empty()
    }

    #[inline]
    pub fn field_name(&self, i: usize) -> Option<&str> {
        self.layout.fields.get(i).map(|f| f.name.as_str())
    }

    /// Caller guarantees `i < field_count()`.
    #[inline]
    pub(crate) fn field_name_smol(&self, i: usize) -> &SmolStr {
        &self.layout.fields[i].name
    }

    #[inline]
    pub fn field_kind(&self, i: usize) -> Option<FieldKind> {
        self.layout.fields.get(i).map(|f| f.kind)
    }

    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.layout.by_name.get(name).copied()
    }

    /// Encoded size when every field is fixed-width, `None` if any `Str`
    /// field is present.
    pub fn fixed_size(&self) -> Option<usize> {
        self.layout.fields.iter().map(|f| f.kind.width()).sum()
    }

    /// Smallest possible encoding: every string empty.
    pub fn min_encoded_len(&self) -> usize {
        self.layout.fields.iter().map(|f| f.kind.min_width()).sum()
    }

    /// Stable 64-bit hash of the ordered field names and kinds.
    ///
    /// Two record types share a fingerprint only if they declare the same
    /// fields in the same order.
    pub fn fingerprint(&self) -> u64 {
        let mut buf = Vec::with_capacity(self.field_count() * 16);
        for spec in &self.layout.fields {
            buf.extend_from_slice(spec.name.as_bytes());
            buf.push(0);
            buf.extend_from_slice(spec.kind.name().as_bytes());
            buf.push(0);
        }
        xxh64(&buf, 0)
    }
}

impl PartialEq for RecordType {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.layout, &other.layout) || self.layout.fields == other.layout.fields
    }
}

impl Eq for RecordType {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecordType {
        RecordType::define([
            ("id", FieldKind::Int),
            ("grade", FieldKind::Char),
            ("name", FieldKind::Str),
        ])
        .unwrap()
    }

    #[test]
    fn test_define_preserves_order() {
        let rt = sample();
        assert_eq!(rt.field_count(), 3);
        assert_eq!(rt.field_name(0), Some("id"));
        assert_eq!(rt.field_name(2), Some("name"));
        assert_eq!(rt.field_name(3), None);
        assert_eq!(rt.index_of("grade"), Some(1));
        assert_eq!(rt.index_of("missing"), None);
        assert_eq!(rt.field_kind(1), Some(FieldKind::Char));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let err = RecordType::define([("a", FieldKind::Int), ("a", FieldKind::Byte)]).unwrap_err();
        assert!(matches!(err, RecordError::DuplicateField(ref n) if n == "a"));
    }

    #[test]
    fn test_sizes() {
        let rt = sample();
        assert_eq!(rt.fixed_size(), None);
        assert_eq!(rt.min_encoded_len(), 6);

        let fixed = RecordType::define([("a", FieldKind::LongLong), ("b", FieldKind::Short)]).unwrap();
        assert_eq!(fixed.fixed_size(), Some(18));
        assert_eq!(fixed.min_encoded_len(), 18);

        let empty = RecordType::define(Vec::<(&str, FieldKind)>::new()).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.fixed_size(), Some(0));
    }

    #[test]
    fn test_json_layout_roundtrip() {
        let doc = r#"{ "fields": [
            { "name": "id", "kind": "int" },
            { "name": "grade", "kind": "char" },
            { "name": "name", "kind": "str" }
        ] }"#;
        let rt = RecordType::from_json(doc).unwrap();
        assert_eq!(rt, sample());

        let back = RecordType::from_json(&rt.to_json().unwrap()).unwrap();
        assert_eq!(back, rt);
    }

    #[test]
    fn test_json_layout_errors() {
        let err = RecordType::from_json(r#"{ "fields": [ { "name": "x", "kind": "quad" } ] }"#)
            .unwrap_err();
        assert!(matches!(err, RecordError::Schema(_)));

        let err = RecordType::from_json(
            r#"{ "fields": [ { "name": "x", "kind": "int" }, { "name": "x", "kind": "int" } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, RecordError::DuplicateField(_)));
    }

    #[test]
    fn test_fingerprint() {
        let a = sample();
        assert_eq!(a.fingerprint(), sample().fingerprint());

        let reordered = RecordType::define([
            ("grade", FieldKind::Char),
            ("id", FieldKind::Int),
            ("name", FieldKind::Str),
        ])
        .unwrap();
        assert_ne!(a.fingerprint(), reordered.fingerprint());

        let retyped = RecordType::define([
            ("id", FieldKind::Long),
            ("grade", FieldKind::Char),
            ("name", FieldKind::Str),
        ])
        .unwrap();
        assert_ne!(a.fingerprint(), retyped.fingerprint());
    }

    #[test]
    fn test_clones_share_layout() {
        let a = sample();
        let b = a.clone();
        assert!(Arc::ptr_eq(&a.layout, &b.layout));
        assert_eq!(a, b);
    }
}
