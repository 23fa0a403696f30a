pub mod next_handler;
pub mod record_type_map;
pub mod server;

pub use next_handler::StaticNextHandler;
pub use record_type_map::RecordTypeMapper;
pub use server::{DnsServerHandler, Transport, AXFR_RECORDS_PER_MESSAGE};
