//! Decoding of contract result stacks.
//!
//! Neo nodes return the VM result stack as an array whose **last** element
//! is the top of the stack. Every decoder here reads that element only.

use crate::ports::ContractInvoker;
use nns_dns_domain::{DomainError, NameRecord, NnsRecordType, StackItem};
use tracing::{debug, warn};

const RECORD_FIELDS: usize = 3;

fn top(stack: &[StackItem]) -> Result<&StackItem, DomainError> {
    stack.last().ok_or(DomainError::EmptyStack)
}

fn bytes_to_string(bytes: Vec<u8>) -> String {
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Top of the stack as a string; `Null` decodes to an empty string.
pub fn decode_string(stack: &[StackItem]) -> Result<String, DomainError> {
    let item = top(stack)?;
    if item.is_null() {
        return Ok(String::new());
    }
    item.try_bytes().map(bytes_to_string)
}

/// Top of the stack as an array of strings; `Null` decodes to no strings.
pub fn decode_string_array(stack: &[StackItem]) -> Result<Vec<String>, DomainError> {
    let item = top(stack)?;
    if item.is_null() {
        return Ok(Vec::new());
    }
    item.try_array()?
        .iter()
        .map(|element| element.try_bytes().map(bytes_to_string))
        .collect()
}

/// Top of the stack as an iterator of `(name, type, data)` structs, paged
/// through the invoker in batches of `page_size`.
pub async fn decode_record_iterator(
    stack: &[StackItem],
    session: Option<&str>,
    invoker: &dyn ContractInvoker,
    page_size: usize,
) -> Result<Vec<NameRecord>, DomainError> {
    let item = top(stack)?;
    if item.is_null() {
        return Ok(Vec::new());
    }
    let handle = item.try_iterator()?;

    let items = match handle.id.as_deref() {
        Some(iterator_id) => {
            let session = session.ok_or_else(|| {
                DomainError::Conversion(format!("iterator {} without session", iterator_id))
            })?;
            paginate(invoker, session, iterator_id, page_size).await?
        }
        None => {
            if handle.truncated {
                warn!(
                    items = handle.values.len(),
                    "Iterator expanded inline was truncated by the node"
                );
            }
            handle.values.clone()
        }
    };

    items.iter().map(decode_name_record).collect()
}

/// Reads an iterator until a batch shorter than `page_size` comes back.
pub async fn paginate(
    invoker: &dyn ContractInvoker,
    session: &str,
    iterator_id: &str,
    page_size: usize,
) -> Result<Vec<StackItem>, DomainError> {
    let page_size = page_size.max(1);
    let mut items = Vec::new();

    loop {
        let batch = invoker
            .traverse_iterator(session, iterator_id, page_size)
            .await?;
        let batch_len = batch.len();
        items.extend(batch);

        if batch_len < page_size {
            break;
        }
    }

    debug!(iterator = iterator_id, items = items.len(), "Iterator drained");
    Ok(items)
}

/// One iterator item: a struct of name bytes, a one-byte type and data bytes.
pub fn decode_name_record(item: &StackItem) -> Result<NameRecord, DomainError> {
    let fields = item.try_array()?;
    if fields.len() != RECORD_FIELDS {
        return Err(DomainError::MalformedRecord(fields.len()));
    }

    let name = fields[0].try_bytes()?;
    let type_code = fields[1].try_integer()?;
    let magnitude = type_code.unsigned_abs();
    let type_byte = u8::try_from(magnitude)
        .ok()
        .filter(|b| *b != 0)
        .ok_or_else(|| DomainError::InvalidType(type_code.to_string()))?;
    let data = fields[2].try_bytes()?;

    Ok(NameRecord::new(
        bytes_to_string(name),
        NnsRecordType::from_byte(type_byte),
        bytes_to_string(data),
    ))
}
