use crate::dns::record_type_map::RecordTypeMapper;
use hickory_proto::op::{Header, Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::{Record, RecordType as HickoryRecordType};
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use nns_dns_application::ports::NextOutcome;
use nns_dns_application::use_cases::{QueryOutcome, ResolveQueryUseCase, TransferZoneUseCase};
use nns_dns_domain::DnsQuery;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Upper bound of records carried by one AXFR response message.
pub const AXFR_RECORDS_PER_MESSAGE: usize = 100;

const DNS_HEADER_LEN: usize = 12;
const MAX_UDP_PAYLOAD: u16 = 512;

/// Transport a request arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Udp,
    Tcp,
}

/// One response message worth of answer, before it is framed.
#[derive(Debug, Clone, PartialEq)]
struct Reply {
    code: ResponseCode,
    authoritative: bool,
    answers: Vec<Record>,
}

impl Reply {
    fn rcode(code: ResponseCode) -> Self {
        Self {
            code,
            authoritative: false,
            answers: Vec::new(),
        }
    }

    fn authoritative(answers: Vec<Record>) -> Self {
        Self {
            code: ResponseCode::NoError,
            authoritative: true,
            answers,
        }
    }

    fn header_for(&self, request: &Header) -> Header {
        let mut header = Header::response_from_request(request);
        header
            .set_authoritative(self.authoritative)
            .set_recursion_available(false)
            .set_response_code(self.code);
        header
    }
}

/// Answers NNS-backed DNS requests. Datagrams come in as raw bytes through
/// [`DnsServerHandler::handle_udp`]; stream requests arrive through
/// `hickory_server::ServerFuture` as a [`RequestHandler`].
#[derive(Clone)]
pub struct DnsServerHandler {
    resolve: Arc<ResolveQueryUseCase>,
    transfer: Arc<TransferZoneUseCase>,
}

impl DnsServerHandler {
    pub fn new(resolve: Arc<ResolveQueryUseCase>, transfer: Arc<TransferZoneUseCase>) -> Self {
        Self { resolve, transfer }
    }

    /// One response datagram, or `None` when the packet is not worth
    /// answering.
    pub async fn handle_udp(&self, bytes: &[u8]) -> Option<Vec<u8>> {
        let request = match Message::from_vec(bytes) {
            Ok(message) => message,
            Err(e) => {
                debug!(error = %e, "Failed to parse request");
                return format_error(bytes).as_ref().and_then(encode);
            }
        };

        if request.message_type() != MessageType::Query {
            return None;
        }

        let reply = if request.op_code() != OpCode::Query {
            debug!(op_code = ?request.op_code(), "Unsupported opcode");
            Reply::rcode(ResponseCode::NotImp)
        } else {
            match request.queries() {
                [question] => self
                    .replies(question, Transport::Udp)
                    .await
                    .into_iter()
                    .next()?,
                questions => {
                    debug!(count = questions.len(), "Request must carry exactly one question");
                    Reply::rcode(ResponseCode::FormErr)
                }
            }
        };

        let response = to_message(&request, &reply);
        let wire = encode(&response)?;

        let max_payload = request
            .extensions()
            .as_ref()
            .map(|edns| edns.max_payload())
            .unwrap_or(MAX_UDP_PAYLOAD)
            .max(MAX_UDP_PAYLOAD);

        if wire.len() > usize::from(max_payload) {
            debug!(size = wire.len(), max_payload, "Response truncated for UDP");
            let mut truncated = to_message(&request, &Reply::rcode(reply.code));
            truncated.set_authoritative(reply.authoritative);
            truncated.set_truncated(true);
            return encode(&truncated);
        }

        Some(wire)
    }

    /// Replies to one question in sending order. Zone transfers produce
    /// several.
    async fn replies(&self, question: &Query, transport: Transport) -> Vec<Reply> {
        if question.query_type() == HickoryRecordType::AXFR {
            self.zone_transfer(question, transport).await
        } else {
            vec![self.query(question).await]
        }
    }

    async fn query(&self, question: &Query) -> Reply {
        let name = question.name().to_ascii();
        let query_type = question.query_type();

        let record_type = match RecordTypeMapper::from_hickory(query_type) {
            Some(rt) => rt,
            None => {
                warn!(name = %name, record_type = ?query_type, "Unsupported record type");
                return Reply::rcode(ResponseCode::NotImp);
            }
        };

        debug!(name = %name, record_type = %record_type, "DNS query received");

        let query = DnsQuery::new(name, record_type).with_class(u16::from(question.query_class()));

        match self.resolve.execute(&query).await {
            QueryOutcome::Answered(records) => Reply::authoritative(records),
            QueryOutcome::Deferred(NextOutcome::Answer(records)) => Reply {
                code: ResponseCode::NoError,
                authoritative: false,
                answers: records,
            },
            QueryOutcome::Deferred(NextOutcome::Rcode(code)) => Reply::rcode(code),
        }
    }

    async fn zone_transfer(&self, question: &Query, transport: Transport) -> Vec<Reply> {
        let zone = question.name().to_ascii();

        if transport == Transport::Udp {
            warn!(zone = %zone, "Zone transfer over UDP refused");
            return vec![Reply::rcode(ResponseCode::Refused)];
        }

        let mut rx = match self.transfer.execute(&zone, 0).await {
            Ok(rx) => rx,
            Err(e) => {
                warn!(zone = %zone, error = %e, "Zone transfer refused");
                return vec![Reply::rcode(ResponseCode::Refused)];
            }
        };

        let mut records: Vec<Record> = Vec::new();
        while let Some(batch) = rx.recv().await {
            records.extend(batch);
        }

        if records.is_empty() {
            error!(zone = %zone, "Zone transfer produced no records");
            return vec![Reply::rcode(ResponseCode::ServFail)];
        }

        info!(zone = %zone, records = records.len(), "Sending zone transfer");

        records
            .chunks(AXFR_RECORDS_PER_MESSAGE)
            .map(|chunk| Reply::authoritative(chunk.to_vec()))
            .collect()
    }
}

#[async_trait::async_trait]
impl RequestHandler for DnsServerHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let mut response_info = ResponseInfo::from(*request.header());

        if request.header().message_type() != MessageType::Query {
            debug!(client = %request.src(), "Ignoring response sent as a request");
            return response_info;
        }

        let transport = if request.protocol().is_datagram() {
            Transport::Udp
        } else {
            Transport::Tcp
        };

        let replies = if request.header().op_code() != OpCode::Query {
            debug!(op_code = ?request.header().op_code(), "Unsupported opcode");
            vec![Reply::rcode(ResponseCode::NotImp)]
        } else {
            match request.request_info() {
                Ok(info) => self.replies(info.query.original(), transport).await,
                Err(e) => {
                    debug!(error = %e, "Request must carry exactly one question");
                    vec![Reply::rcode(ResponseCode::FormErr)]
                }
            }
        };

        for reply in &replies {
            let builder = MessageResponseBuilder::from_message_request(request);
            let response = builder.build(
                reply.header_for(request.header()),
                reply.answers.iter(),
                &[],
                &[],
                &[],
            );

            match response_handle.send_response(response).await {
                Ok(info) => response_info = info,
                Err(e) => {
                    error!(error = %e, "Failed to send response");
                    break;
                }
            }
        }

        response_info
    }
}

/// Response message for `request` carrying `reply`.
fn to_message(request: &Message, reply: &Reply) -> Message {
    let mut response = Message::new();
    response
        .set_id(request.id())
        .set_message_type(MessageType::Response)
        .set_op_code(request.op_code())
        .set_recursion_desired(request.recursion_desired())
        .set_recursion_available(false)
        .set_authoritative(reply.authoritative)
        .set_response_code(reply.code);
    response.add_queries(request.queries().iter().cloned());
    response.add_answers(reply.answers.iter().cloned());
    response
}

/// FORMERR for a request that failed to parse, as long as its header is
/// readable.
fn format_error(bytes: &[u8]) -> Option<Message> {
    if bytes.len() < DNS_HEADER_LEN {
        return None;
    }
    // QR bit set: never answer a response.
    if bytes[2] & 0x80 != 0 {
        return None;
    }

    let mut response = Message::new();
    response
        .set_id(u16::from_be_bytes([bytes[0], bytes[1]]))
        .set_message_type(MessageType::Response)
        .set_op_code(OpCode::Query)
        .set_response_code(ResponseCode::FormErr);
    Some(response)
}

fn encode(message: &Message) -> Option<Vec<u8>> {
    match message.to_vec() {
        Ok(wire) => Some(wire),
        Err(e) => {
            error!(error = %e, "Failed to encode response");
            None
        }
    }
}
