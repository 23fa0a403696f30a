use crate::dns_record::{append_root, NameRecord};
use crate::DomainError;

/// Timestamps with second precision fit in the first ten digits of a serial.
const SERIAL_MAX_DIGITS: usize = 10;
const SOA_FIELD_COUNT: usize = 7;

/// Start-of-authority data decoded from an SOA-typed contract record.
///
/// The contract stores SOA data as a single space separated string:
/// `primary mailbox serial refresh retry expire ttl`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoaFields {
    /// Root-terminated primary name; always equal to the record's own name.
    pub primary_name: String,
    /// Root-terminated mailbox with `@` replaced by a label separator.
    pub mailbox: String,
    pub serial: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum_ttl: u32,
}

impl SoaFields {
    pub fn parse(record: &NameRecord) -> Result<Self, DomainError> {
        if !record.is_soa() {
            return Err(DomainError::NotSoaRecord(record.record_type.to_string()));
        }

        let fields: Vec<&str> = record.data.split(' ').collect();
        if fields.len() != SOA_FIELD_COUNT {
            return Err(DomainError::SoaFieldCount(record.data.clone()));
        }

        let record_name = append_root(&record.name);
        let primary_name = append_root(fields[0]);
        if record_name != primary_name {
            return Err(DomainError::SoaMismatch {
                record: record_name,
                primary: primary_name,
            });
        }

        let serial_digits: String = fields[2].chars().take(SERIAL_MAX_DIGITS).collect();
        let serial = serial_digits
            .parse::<u32>()
            .map_err(|_| DomainError::SoaSerial(fields[2].to_string()))?;

        Ok(Self {
            primary_name,
            mailbox: append_root(fields[1]).replace('@', "."),
            serial,
            refresh: parse_field("refresh", fields[3])?,
            retry: parse_field("retry", fields[4])?,
            expire: parse_field("expire", fields[5])?,
            minimum_ttl: parse_field("ttl", fields[6])?,
        })
    }
}

fn parse_field(field: &'static str, value: &str) -> Result<u32, DomainError> {
    value.parse::<u32>().map_err(|_| DomainError::SoaField {
        field,
        value: value.to_string(),
    })
}
