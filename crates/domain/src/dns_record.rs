mod name_record;
mod record_type;

pub use name_record::{append_root, NameRecord, NnsRecordType};
pub use record_type::RecordType;
