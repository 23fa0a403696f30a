mod helpers;

use helpers::*;
use hickory_proto::rr::RecordType as WireType;
use nns_dns_application::use_cases::TransferZoneUseCase;
use nns_dns_domain::{DomainError, DomainMapping, StackItem};
use std::sync::Arc;

const SOA_DATA: &str = "container ops@nspcc.ru 1700000000 3600 600 604800 300";

fn mapping() -> DomainMapping {
    DomainMapping::new("containers.testnet.fs.neo.org", "container")
}

fn zone_items() -> Vec<StackItem> {
    vec![
        record_item("a.container", 1, "10.0.0.1"),
        record_item("container", 6, SOA_DATA),
        record_item("b.container", 16, "hello"),
    ]
}

#[tokio::test]
async fn test_transfer_emits_single_ordered_batch() {
    let invoker = Arc::new(
        MockContractInvoker::new()
            .with_stack("getRecords", "container", string_array(&[SOA_DATA]))
            .with_all_records("container", zone_items()),
    );
    let use_case = TransferZoneUseCase::new(contract_with(invoker.clone()), mapping());

    let mut rx = use_case
        .execute("containers.testnet.fs.neo.org.", 0)
        .await
        .unwrap();

    let batch = rx.recv().await.unwrap();
    let types: Vec<WireType> = batch.iter().map(|r| r.record_type()).collect();
    assert_eq!(
        types,
        vec![WireType::SOA, WireType::A, WireType::TXT, WireType::SOA]
    );
    assert!(rx.recv().await.is_none());
    assert_eq!(
        invoker.operations(),
        vec!["getRecords".to_string(), "getAllRecords".to_string()]
    );
}

#[tokio::test]
async fn test_transfer_without_soa_is_not_authoritative() {
    let invoker = Arc::new(MockContractInvoker::new().with_stack(
        "getRecords",
        "container",
        StackItem::Null,
    ));
    let use_case = TransferZoneUseCase::new(contract_with(invoker.clone()), mapping());

    let result = use_case.execute("containers.testnet.fs.neo.org.", 0).await;

    assert_eq!(
        result.err(),
        Some(DomainError::NotAuthoritative(
            "containers.testnet.fs.neo.org.".to_string()
        ))
    );
    assert_eq!(invoker.operations(), vec!["getRecords".to_string()]);
}

#[tokio::test]
async fn test_transfer_precheck_fault_is_not_authoritative() {
    let invoker = Arc::new(MockContractInvoker::new().with_reply(
        "getRecords",
        "container",
        faulted("token not found"),
    ));
    let use_case = TransferZoneUseCase::new(contract_with(invoker), mapping());

    let result = use_case.execute("containers.testnet.fs.neo.org.", 0).await;

    assert!(matches!(result, Err(DomainError::NotAuthoritative(_))));
}

#[tokio::test]
async fn test_transfer_failure_closes_stream_without_records() {
    let invoker = Arc::new(
        MockContractInvoker::new()
            .with_stack("getRecords", "container", string_array(&[SOA_DATA]))
            .with_all_records(
                "container",
                vec![
                    record_item("container", 6, SOA_DATA),
                    record_item("container", 6, SOA_DATA),
                ],
            ),
    );
    let use_case = TransferZoneUseCase::new(contract_with(invoker), mapping());

    let mut rx = use_case
        .execute("containers.testnet.fs.neo.org.", 0)
        .await
        .unwrap();

    assert!(rx.recv().await.is_none());
}

#[tokio::test]
async fn test_transfer_fetch_error_closes_stream() {
    let invoker = Arc::new(
        MockContractInvoker::new()
            .with_stack("getRecords", "container", string_array(&[SOA_DATA]))
            .with_error(
                "getAllRecords",
                "container",
                DomainError::Transport("timeout".to_string()),
            ),
    );
    let use_case = TransferZoneUseCase::new(contract_with(invoker), mapping());

    let mut rx = use_case
        .execute("containers.testnet.fs.neo.org.", 0)
        .await
        .unwrap();

    assert!(rx.recv().await.is_none());
}
