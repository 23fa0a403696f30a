use crate::services::{assemble_zone, NnsContract};
use hickory_proto::rr::Record;
use nns_dns_domain::{DomainError, DomainMapping, NnsRecordType};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Streams a whole zone out of the contract for AXFR.
pub struct TransferZoneUseCase {
    contract: Arc<NnsContract>,
    mapping: DomainMapping,
}

impl TransferZoneUseCase {
    pub fn new(contract: Arc<NnsContract>, mapping: DomainMapping) -> Self {
        Self { contract, mapping }
    }

    /// Refuses with `NotAuthoritative` when the contract holds no SOA for
    /// the zone. Otherwise the zone is fetched and assembled on a background
    /// task that sends it as one batch and closes the channel. A failure
    /// there is logged and the channel closes without sending.
    ///
    /// `serial` is accepted for the host interface; the full zone is always
    /// sent.
    pub async fn execute(
        &self,
        zone: &str,
        serial: u32,
    ) -> Result<mpsc::Receiver<Vec<Record>>, DomainError> {
        let mapped = self.mapping.map_name(zone);
        info!(zone = %zone, mapped = %mapped, serial, "Zone transfer requested");

        match self.contract.get_records(&mapped, NnsRecordType::Soa).await {
            Ok(soa) if !soa.is_empty() => {}
            Ok(_) => {
                warn!(zone = %zone, mapped = %mapped, "Zone has no SOA record");
                return Err(DomainError::NotAuthoritative(zone.to_string()));
            }
            Err(e) => {
                warn!(zone = %zone, mapped = %mapped, error = %e, "Couldn't transfer zone");
                return Err(DomainError::NotAuthoritative(zone.to_string()));
            }
        }

        let (tx, rx) = mpsc::channel(1);
        let contract = Arc::clone(&self.contract);
        let zone = zone.to_string();

        tokio::spawn(async move {
            let assembled = match contract.get_all_records(&mapped).await {
                Ok(records) => assemble_zone(records),
                Err(e) => Err(e),
            };

            match assembled {
                Ok(records) => {
                    info!(zone = %zone, records = records.len(), "Zone transfer assembled");
                    if tx.send(records).await.is_err() {
                        debug!(zone = %zone, "Transfer receiver dropped before delivery");
                    }
                }
                Err(e) => {
                    warn!(zone = %zone, mapped = %mapped, error = %e, "Couldn't transfer zone");
                }
            }
        });

        Ok(rx)
    }
}
