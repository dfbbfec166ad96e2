//! Fixed-order records of typed fields, packed into flat little-endian byte
//! buffers with no padding between fields.
//!
//! ```
//! use packed_record::{FieldKind, RecordType, decode, encode};
//!
//! let point = RecordType::define([
//!     ("id", FieldKind::Int),
//!     ("grade", FieldKind::Char),
//!     ("label", FieldKind::Str),
//! ])?;
//!
//! let mut rec = point.new_instance();
//! rec.set("id", 1234)?;
//! rec.set("grade", 'a')?;
//! rec.set("label", "hi")?;
//!
//! let bytes = encode(&rec);
//! assert_eq!(bytes, [210, 4, 0, 0, 97, 104, 105, 0]);
//! assert_eq!(decode(&point, &bytes)?, rec);
//! # Ok::<(), packed_record::RecordError>(())
//! ```

pub mod deserialization;
pub mod error;
pub mod field;
pub mod field_value;
pub mod record;
pub mod serialization;
pub mod types;

pub use deserialization::{RecordStream, decode, decode_exact, decode_prefix};
pub use error::{FieldError, RecordError};
pub use field::FieldDescriptor;
pub use field_value::{FieldNumber, FieldValue};
pub use record::{FieldSpec, Record, RecordType};
pub use serialization::{FieldSource, append_to, encode, encode_into};
pub use types::{FieldIter, FieldKind, ValueKind};
