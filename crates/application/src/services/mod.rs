pub mod nns_contract;
pub mod record_synthesizer;
pub mod resolution_policy;
pub mod stack_decoder;
pub mod zone_assembler;

pub use nns_contract::{ContractFunction, NnsContract};
pub use record_synthesizer::{soa_record, synthesize, RecordHeader};
pub use resolution_policy::{ResolutionPolicy, Selection};
pub use zone_assembler::assemble_zone;
