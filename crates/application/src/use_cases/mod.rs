pub mod dns;

pub use dns::{QueryOutcome, ResolveQueryUseCase, TransferZoneUseCase};
