pub mod layout;
mod read_op;
pub mod record;
mod write_op;

pub use layout::{FieldSpec, RecordType};
pub use record::Record;
