#![allow(dead_code)]

use async_trait::async_trait;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RecordType};
use hickory_server::ServerFuture;
use nns_dns_application::ports::{ContractInvoker, ContractParam, InvocationResult};
use nns_dns_application::services::{NnsContract, ResolutionPolicy};
use nns_dns_application::use_cases::{ResolveQueryUseCase, TransferZoneUseCase};
use nns_dns_domain::config::ResolutionMode;
use nns_dns_domain::{ContractHash, DomainError, DomainMapping, IteratorHandle, StackItem};
use nns_dns_infrastructure::dns::{DnsServerHandler, StaticNextHandler};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub fn bytes(value: &str) -> StackItem {
    StackItem::ByteString(value.as_bytes().to_vec())
}

pub fn record_item(name: &str, record_type: i128, data: &str) -> StackItem {
    StackItem::Struct(vec![bytes(name), StackItem::Integer(record_type), bytes(data)])
}

/// Node double: replies keyed by operation and name, iterators served from
/// memory.
#[derive(Default)]
pub struct MockNode {
    replies: Mutex<HashMap<(String, String), InvocationResult>>,
    iterators: Mutex<HashMap<String, Vec<StackItem>>>,
}

impl MockNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stack(self, operation: &str, name: &str, top: StackItem) -> Self {
        self.replies.lock().unwrap().insert(
            (operation.to_string(), name.to_string()),
            InvocationResult::halt(vec![top]),
        );
        self
    }

    pub fn with_all_records(self, name: &str, items: Vec<StackItem>) -> Self {
        let iterator_id = format!("iter-{}", name);
        self.iterators
            .lock()
            .unwrap()
            .insert(iterator_id.clone(), items);
        let reply = InvocationResult::halt(vec![StackItem::InteropInterface(IteratorHandle {
            id: Some(iterator_id),
            values: Vec::new(),
            truncated: false,
        })])
        .with_session("session");
        self.replies
            .lock()
            .unwrap()
            .insert(("getAllRecords".to_string(), name.to_string()), reply);
        self
    }

    /// Scripts a zone: its SOA pre-check and the full record listing.
    pub fn with_zone(self, zone: &str, soa_data: &str, items: Vec<StackItem>) -> Self {
        self.with_stack(
            "getRecords",
            zone,
            StackItem::Array(vec![bytes(soa_data)]),
        )
        .with_all_records(zone, items)
    }
}

#[async_trait]
impl ContractInvoker for MockNode {
    async fn invoke_function(
        &self,
        _contract: &ContractHash,
        operation: &str,
        params: &[ContractParam],
    ) -> Result<InvocationResult, DomainError> {
        let name = match params.first() {
            Some(ContractParam::String(name)) => name.clone(),
            _ => String::new(),
        };
        self.replies
            .lock()
            .unwrap()
            .get(&(operation.to_string(), name.clone()))
            .cloned()
            .ok_or_else(|| DomainError::Invocation(format!("{} not found", name)))
    }

    async fn traverse_iterator(
        &self,
        _session: &str,
        iterator_id: &str,
        count: usize,
    ) -> Result<Vec<StackItem>, DomainError> {
        let mut iterators = self.iterators.lock().unwrap();
        let remaining = iterators
            .get_mut(iterator_id)
            .ok_or_else(|| DomainError::Transport(format!("unknown iterator {}", iterator_id)))?;
        let take = count.min(remaining.len());
        Ok(remaining.drain(..take).collect())
    }
}

pub fn handler_with(node: MockNode, mode: ResolutionMode) -> DnsServerHandler {
    let contract = Arc::new(NnsContract::new(Arc::new(node), ContractHash::default()));
    let mapping = DomainMapping::default();

    let resolve = ResolveQueryUseCase::new(
        contract.clone(),
        mapping.clone(),
        ResolutionPolicy::new("dweb.link", "_dnslink."),
        Arc::new(StaticNextHandler::default()),
    )
    .with_mode(mode);
    let transfer = TransferZoneUseCase::new(contract, mapping);

    DnsServerHandler::new(Arc::new(resolve), Arc::new(transfer))
}

pub fn handler(node: MockNode) -> DnsServerHandler {
    handler_with(node, ResolutionMode::AllRecords)
}

pub fn query_message(name: &str, record_type: RecordType) -> Message {
    let mut message = Message::new();
    message
        .set_id(4242)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true);
    message.add_query(Query::query(Name::from_ascii(name).unwrap(), record_type));
    message
}

pub fn query_bytes(name: &str, record_type: RecordType) -> Vec<u8> {
    query_message(name, record_type).to_vec().unwrap()
}

pub fn parse(wire: &[u8]) -> Message {
    Message::from_vec(wire).unwrap()
}

/// Serves `handler` on a loopback TCP port through `ServerFuture`.
pub async fn serve_tcp(handler: DnsServerHandler) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut server = ServerFuture::new(handler);
        server.register_listener(listener, Duration::from_secs(5));
        let _ = server.block_until_done().await;
    });
    addr
}

/// Sends one length-prefixed request and collects every response frame
/// until the server goes quiet.
pub async fn tcp_exchange(addr: SocketAddr, request: &Message) -> Vec<Message> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let wire = request.to_vec().unwrap();
    stream
        .write_all(&(wire.len() as u16).to_be_bytes())
        .await
        .unwrap();
    stream.write_all(&wire).await.unwrap();

    let mut messages = Vec::new();
    loop {
        let wait = if messages.is_empty() {
            Duration::from_secs(5)
        } else {
            Duration::from_millis(300)
        };
        let mut len_buf = [0u8; 2];
        match tokio::time::timeout(wait, stream.read_exact(&mut len_buf)).await {
            Ok(Ok(_)) => {}
            _ => break,
        }
        let mut body = vec![0u8; u16::from_be_bytes(len_buf) as usize];
        stream.read_exact(&mut body).await.unwrap();
        messages.push(parse(&body));
    }
    messages
}
