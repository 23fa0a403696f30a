use hickory_proto::rr::rdata::{A, AAAA, CNAME, SOA, TXT};
use hickory_proto::rr::{DNSClass, Name, RData, Record};
use nns_dns_domain::{append_root, DomainError, RecordType, SoaFields};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Owner, class and TTL shared by synthesized records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordHeader {
    pub name: Name,
    pub dns_class: DNSClass,
    pub ttl: u32,
}

impl RecordHeader {
    pub fn new(name: Name, dns_class: DNSClass, ttl: u32) -> Self {
        Self {
            name,
            dns_class,
            ttl,
        }
    }

    pub fn parse(name: &str, dns_class: DNSClass, ttl: u32) -> Result<Self, DomainError> {
        Ok(Self::new(parse_name(name)?, dns_class, ttl))
    }

    fn record(&self, rdata: RData) -> Record {
        let mut record = Record::from_rdata(self.name.clone(), self.ttl, rdata);
        record.set_dns_class(self.dns_class);
        record
    }
}

pub(crate) fn parse_name(name: &str) -> Result<Name, DomainError> {
    Name::from_ascii(append_root(name))
        .map_err(|e| DomainError::InvalidName(format!("{}: {}", name, e)))
}

fn invalid(record_type: RecordType, value: &str) -> DomainError {
    DomainError::InvalidRecordData {
        record_type: record_type.to_string(),
        value: value.to_string(),
    }
}

/// Builds an A, AAAA, CNAME or TXT record from a contract value.
pub fn synthesize(
    header: &RecordHeader,
    record_type: RecordType,
    value: &str,
) -> Result<Record, DomainError> {
    let rdata = match record_type {
        RecordType::A => {
            let addr: Ipv4Addr = value.parse().map_err(|_| invalid(record_type, value))?;
            RData::A(A(addr))
        }
        RecordType::AAAA => {
            let addr: Ipv6Addr = value.parse().map_err(|_| invalid(record_type, value))?;
            RData::AAAA(AAAA(addr))
        }
        RecordType::CNAME => {
            if value.is_empty() {
                return Err(invalid(record_type, value));
            }
            let target =
                Name::from_ascii(append_root(value)).map_err(|_| invalid(record_type, value))?;
            RData::CNAME(CNAME(target))
        }
        RecordType::TXT => RData::TXT(TXT::new(vec![value.to_string()])),
        other => return Err(DomainError::UnsupportedType(other.to_string())),
    };

    Ok(header.record(rdata))
}

/// Builds the SOA record of a zone from its parsed fields. The owner and
/// primary server are both the zone apex, and the record TTL is the
/// minimum TTL.
pub fn soa_record(fields: &SoaFields) -> Result<Record, DomainError> {
    let apex = parse_name(&fields.primary_name)?;
    let mailbox = Name::from_ascii(&fields.mailbox)
        .map_err(|e| DomainError::InvalidName(format!("{}: {}", fields.mailbox, e)))?;

    let soa = SOA::new(
        apex.clone(),
        mailbox,
        fields.serial,
        wire_i32(fields.refresh),
        wire_i32(fields.retry),
        wire_i32(fields.expire),
        fields.minimum_ttl,
    );

    Ok(RecordHeader::new(apex, DNSClass::IN, fields.minimum_ttl).record(RData::SOA(soa)))
}

/// The SOA model keeps timers as `i32`; the wire field is an unsigned
/// 32-bit value, so only the bit pattern is carried over.
fn wire_i32(value: u32) -> i32 {
    i32::from_be_bytes(value.to_be_bytes())
}
