use crate::error::RecordError;
use crate::field::FieldDescriptor;
use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ─── Value Kinds ────────────────────────────────────────────────────────────

/// How a field's bytes decode back into a value, independent of its width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Number,
    Character,
    Boolean,
    Null,
}

// ─── Field Kinds ────────────────────────────────────────────────────────────

/// The closed catalog of field types a record can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Bool,
    Char,
    Byte,
    Short,
    Int,
    Float,
    Long,
    Double,
    LongLong,
    LongDouble,
    Str,
    Null,
}

/// Widest scalar field, in bytes.
pub const MAX_SCALAR_WIDTH: usize = 16;

impl FieldKind {
    pub const ALL: [FieldKind; 12] = [
        FieldKind::Bool,
        FieldKind::Char,
        FieldKind::Byte,
        FieldKind::Short,
        FieldKind::Int,
        FieldKind::Float,
        FieldKind::Long,
        FieldKind::Double,
        FieldKind::LongLong,
        FieldKind::LongDouble,
        FieldKind::Str,
        FieldKind::Null,
    ];

    /// Fixed byte width, or `None` for the variable-width string kind.
    #[inline]
    pub const fn width(self) -> Option<usize> {
        Some(match self {
            FieldKind::Bool | FieldKind::Char | FieldKind::Byte | FieldKind::Null => 1,
            FieldKind::Short => 2,
            FieldKind::Int | FieldKind::Float => 4,
            FieldKind::Long | FieldKind::Double => 8,
            FieldKind::LongLong | FieldKind::LongDouble => 16,
            FieldKind::Str => return None,
        })
    }

    /// Smallest number of bytes this kind can occupy on the wire.
    #[inline]
    pub const fn min_width(self) -> usize {
        match self.width() {
            Some(w) => w,
            None => 1, // empty string: terminator only
        }
    }

    #[inline]
    pub const fn value_kind(self) -> ValueKind {
        match self {
            FieldKind::Bool => ValueKind::Boolean,
            FieldKind::Char | FieldKind::Str => ValueKind::Character,
            FieldKind::Null => ValueKind::Null,
            _ => ValueKind::Number,
        }
    }

    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(
            self,
            FieldKind::Float | FieldKind::Double | FieldKind::LongDouble
        )
    }

    #[inline]
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            FieldKind::Byte | FieldKind::Short | FieldKind::Int | FieldKind::Long | FieldKind::LongLong
        )
    }

    #[inline]
    pub const fn is_variable(self) -> bool {
        matches!(self, FieldKind::Str)
    }

    pub const fn name(self) -> &'static str {
        match self {
            FieldKind::Bool => "Bool",
            FieldKind::Char => "Char",
            FieldKind::Byte => "Byte",
            FieldKind::Short => "Short",
            FieldKind::Int => "Int",
            FieldKind::Float => "Float",
            FieldKind::Long => "Long",
            FieldKind::Double => "Double",
            FieldKind::LongLong => "LongLong",
            FieldKind::LongDouble => "LongDouble",
            FieldKind::Str => "Str",
            FieldKind::Null => "Null",
        }
    }
}

impl FieldKind {
    /// Layout-document name, as used by the serde representation.
    pub const fn snake_name(self) -> &'static str {
        match self {
            FieldKind::Bool => "bool",
            FieldKind::Char => "char",
            FieldKind::Byte => "byte",
            FieldKind::Short => "short",
            FieldKind::Int => "int",
            FieldKind::Float => "float",
            FieldKind::Long => "long",
            FieldKind::Double => "double",
            FieldKind::LongLong => "long_long",
            FieldKind::LongDouble => "long_double",
            FieldKind::Str => "str",
            FieldKind::Null => "null",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts both the catalog name (`LongLong`) and the layout-document name
/// (`long_long`).
impl FromStr for FieldKind {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKind::ALL
            .into_iter()
            .find(|k| k.name() == s || k.snake_name() == s)
            .ok_or_else(|| RecordError::UnknownKind(s.to_string()))
    }
}

// ─── Iterator ───────────────────────────────────────────────────────────────

/// Iterates a record's fields in declaration order.
pub struct FieldIter<'a> {
    pub(crate) record: &'a Record,
    pub(crate) pos: usize,
}

impl<'a> Iterator for FieldIter<'a> {
    type Item = (&'a str, &'a FieldDescriptor);

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.record.record_type().field_name(self.pos)?;
        let field = self.record.field_at(self.pos)?;
        self.pos += 1;
        Some((name, field))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.record.field_count() - self.pos;
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for FieldIter<'a> {}
