//! Mapping from `hickory_proto::rr::RecordType` to `nns_dns_domain::RecordType`.

use hickory_proto::rr::RecordType as HickoryRecordType;
use nns_dns_domain::RecordType;

/// Maps incoming hickory question types onto domain record types
pub struct RecordTypeMapper;

impl RecordTypeMapper {
    /// Convert hickory RecordType → domain RecordType (for incoming queries)
    ///
    /// Returns `None` for types with no domain counterpart, including
    /// transfer meta-types such as AXFR.
    pub fn from_hickory(hickory_type: HickoryRecordType) -> Option<RecordType> {
        match hickory_type {
            HickoryRecordType::A => Some(RecordType::A),
            HickoryRecordType::AAAA => Some(RecordType::AAAA),
            HickoryRecordType::CNAME => Some(RecordType::CNAME),
            HickoryRecordType::MX => Some(RecordType::MX),
            HickoryRecordType::TXT => Some(RecordType::TXT),
            HickoryRecordType::PTR => Some(RecordType::PTR),
            HickoryRecordType::SRV => Some(RecordType::SRV),
            HickoryRecordType::SOA => Some(RecordType::SOA),
            HickoryRecordType::NS => Some(RecordType::NS),
            HickoryRecordType::CAA => Some(RecordType::CAA),
            _ => None,
        }
    }
}
