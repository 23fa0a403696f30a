use super::record_synthesizer::{soa_record, synthesize, RecordHeader};
use hickory_proto::rr::{DNSClass, Record};
use nns_dns_domain::{DomainError, NameRecord, SoaFields};

/// Orders a zone's records for transfer: SOA, every other record, SOA.
///
/// The zone must hold exactly one SOA record. It is swapped into the first
/// position rather than sorted to the front, so the relative order of the
/// remaining records may change. Nothing is emitted unless every record
/// converts.
pub fn assemble_zone(records: Vec<NameRecord>) -> Result<Vec<Record>, DomainError> {
    if records.is_empty() {
        return Err(DomainError::EmptyZone);
    }

    let mut records: Vec<NameRecord> = records.into_iter().map(NameRecord::rooted).collect();

    let soa_positions: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.is_soa())
        .map(|(index, _)| index)
        .collect();
    if soa_positions.len() != 1 {
        return Err(DomainError::SoaCount(soa_positions.len()));
    }
    records.swap(0, soa_positions[0]);

    let fields = SoaFields::parse(&records[0])?;
    let soa = soa_record(&fields)?;

    let mut zone = Vec::with_capacity(records.len() + 1);
    zone.push(soa.clone());
    for record in &records[1..] {
        let record_type = record
            .record_type
            .to_dns()
            .ok_or_else(|| DomainError::UnsupportedType(record.record_type.to_string()))?;
        let header = RecordHeader::parse(&record.name, DNSClass::IN, fields.minimum_ttl)?;
        zone.push(synthesize(&header, record_type, &record.data)?);
    }
    zone.push(soa);

    Ok(zone)
}
