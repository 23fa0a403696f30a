pub mod resolve_query;
pub mod transfer_zone;

pub use resolve_query::{QueryOutcome, ResolveQueryUseCase};
pub use transfer_zone::TransferZoneUseCase;
