use nns_dns_application::ports::ContractInvoker;
use nns_dns_application::services::{NnsContract, ResolutionPolicy};
use nns_dns_application::use_cases::{ResolveQueryUseCase, TransferZoneUseCase};
use nns_dns_domain::{Config, ContractHash};
use nns_dns_infrastructure::dns::{DnsServerHandler, StaticNextHandler};
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub handler: DnsServerHandler,
}

impl DnsServices {
    pub fn new(config: &Config, invoker: Arc<dyn ContractInvoker>, hash: ContractHash) -> Self {
        info!(
            contract = %hash,
            mode = ?config.resolution.mode,
            page_size = config.resolution.iterator_page_size,
            "Initializing DNS services"
        );

        let contract = Arc::new(
            NnsContract::new(invoker, hash).with_page_size(config.resolution.iterator_page_size),
        );
        let mapping = config.mapping.to_mapping();
        let policy = ResolutionPolicy::new(
            &config.resolution.gateway_host,
            &config.resolution.dnslink_prefix,
        );
        let next = Arc::new(StaticNextHandler::from_fallback(config.server.fallback));

        let resolve = Arc::new(
            ResolveQueryUseCase::new(Arc::clone(&contract), mapping.clone(), policy, next)
                .with_mode(config.resolution.mode)
                .with_answer_ttl(config.resolution.answer_ttl),
        );
        let transfer = Arc::new(TransferZoneUseCase::new(contract, mapping));

        Self {
            handler: DnsServerHandler::new(resolve, transfer),
        }
    }
}
