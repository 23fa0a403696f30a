//! JSON shapes of the Neo N3 RPC API and their conversion to domain values.
//!
//! ```text
//! {"type":"ByteString","value":"bmVvLm9yZw=="}
//! {"type":"Integer","value":"16"}
//! {"type":"Struct","value":[ ... ]}
//! {"type":"InteropInterface","interface":"IIterator","id":"0c94..."}
//! {"type":"InteropInterface","iterator":[ ... ],"truncated":false}
//! ```

use base64::{engine::general_purpose::STANDARD, Engine};
use nns_dns_application::ports::{ContractParam, InvocationResult};
use nns_dns_domain::{ContractHash, DomainError, IteratorHandle, StackItem};
use serde::Deserialize;
use serde_json::{json, Value};

/// One stack item as serialized by the node.
#[derive(Debug, Clone, Deserialize)]
pub struct StackItemDto {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub iterator: Option<Vec<StackItemDto>>,
    #[serde(default)]
    pub truncated: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct MapEntryDto {
    key: StackItemDto,
    value: StackItemDto,
}

/// `invokefunction` result.
#[derive(Debug, Clone, Deserialize)]
pub struct InvokeResultDto {
    pub state: String,
    #[serde(default)]
    pub exception: Option<String>,
    #[serde(default)]
    pub stack: Vec<StackItemDto>,
    #[serde(default)]
    pub session: Option<String>,
}

/// The part of a `getcontractstate` result this server needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractStateDto {
    pub id: i32,
    pub hash: String,
}

fn malformed(kind: &str, detail: impl std::fmt::Display) -> DomainError {
    DomainError::Transport(format!("malformed {} stack item: {}", kind, detail))
}

impl TryFrom<StackItemDto> for StackItem {
    type Error = DomainError;

    fn try_from(dto: StackItemDto) -> Result<Self, Self::Error> {
        let kind = dto.kind.as_str();
        match kind {
            "Any" => Ok(StackItem::Null),
            "Boolean" => match dto.value {
                Some(Value::Bool(b)) => Ok(StackItem::Boolean(b)),
                Some(Value::String(s)) => s
                    .parse::<bool>()
                    .map(StackItem::Boolean)
                    .map_err(|e| malformed(kind, e)),
                other => Err(malformed(kind, format!("{:?}", other))),
            },
            "Integer" => parse_integer(kind, dto.value).map(StackItem::Integer),
            "ByteString" => decode_base64(kind, dto.value).map(StackItem::ByteString),
            "Buffer" => decode_base64(kind, dto.value).map(StackItem::Buffer),
            "Array" => parse_items(kind, dto.value).map(StackItem::Array),
            "Struct" => parse_items(kind, dto.value).map(StackItem::Struct),
            "Map" => {
                let entries: Vec<MapEntryDto> = match dto.value {
                    Some(value) => serde_json::from_value(value).map_err(|e| malformed(kind, e))?,
                    None => Vec::new(),
                };
                entries
                    .into_iter()
                    .map(|entry| {
                        Ok((
                            StackItem::try_from(entry.key)?,
                            StackItem::try_from(entry.value)?,
                        ))
                    })
                    .collect::<Result<Vec<_>, DomainError>>()
                    .map(StackItem::Map)
            }
            "Pointer" => parse_integer(kind, dto.value)
                .and_then(|v| i64::try_from(v).map_err(|e| malformed(kind, e)))
                .map(StackItem::Pointer),
            "InteropInterface" => {
                let values = dto
                    .iterator
                    .unwrap_or_default()
                    .into_iter()
                    .map(StackItem::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(StackItem::InteropInterface(IteratorHandle {
                    id: dto.id,
                    values,
                    truncated: dto.truncated,
                }))
            }
            other => Err(DomainError::Transport(format!(
                "unknown stack item type: {}",
                other
            ))),
        }
    }
}

fn parse_integer(kind: &str, value: Option<Value>) -> Result<i128, DomainError> {
    match value {
        Some(Value::String(s)) => s.parse::<i128>().map_err(|e| malformed(kind, e)),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(i128::from)
            .ok_or_else(|| malformed(kind, n)),
        other => Err(malformed(kind, format!("{:?}", other))),
    }
}

fn decode_base64(kind: &str, value: Option<Value>) -> Result<Vec<u8>, DomainError> {
    match value {
        Some(Value::String(s)) => STANDARD.decode(s).map_err(|e| malformed(kind, e)),
        None | Some(Value::Null) => Ok(Vec::new()),
        other => Err(malformed(kind, format!("{:?}", other))),
    }
}

fn parse_items(kind: &str, value: Option<Value>) -> Result<Vec<StackItem>, DomainError> {
    let items: Vec<StackItemDto> = match value {
        Some(value) => serde_json::from_value(value).map_err(|e| malformed(kind, e))?,
        None => Vec::new(),
    };
    items.into_iter().map(StackItem::try_from).collect()
}

pub fn parse_stack(items: Vec<StackItemDto>) -> Result<Vec<StackItem>, DomainError> {
    items.into_iter().map(StackItem::try_from).collect()
}

impl TryFrom<InvokeResultDto> for InvocationResult {
    type Error = DomainError;

    fn try_from(dto: InvokeResultDto) -> Result<Self, Self::Error> {
        Ok(InvocationResult {
            state: dto.state,
            exception: dto.exception.filter(|e| !e.is_empty()),
            stack: parse_stack(dto.stack)?,
            session: dto.session,
        })
    }
}

impl TryFrom<ContractStateDto> for ContractHash {
    type Error = DomainError;

    fn try_from(dto: ContractStateDto) -> Result<Self, Self::Error> {
        dto.hash.parse()
    }
}

/// Contract parameter in `invokefunction` argument form.
pub fn param_to_json(param: &ContractParam) -> Value {
    match param {
        ContractParam::String(value) => json!({ "type": "String", "value": value }),
        ContractParam::Integer(value) => json!({ "type": "Integer", "value": value.to_string() }),
    }
}
