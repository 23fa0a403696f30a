//! Values returned on a Neo VM result stack.
//!
//! A contract invocation replies with an ordered stack of dynamically typed
//! values. `StackItem` closes that set into one enum, and each conversion
//! below returns a typed error instead of inspecting types at runtime.

use crate::DomainError;

/// Handle to a server-side iterator, as found in an `InteropInterface` item.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IteratorHandle {
    /// Iterator id within the invocation session. `None` when the node runs
    /// with sessions disabled and expands iterators inline.
    pub id: Option<String>,
    pub values: Vec<StackItem>,
    pub truncated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackItem {
    Null,
    Boolean(bool),
    Integer(i128),
    ByteString(Vec<u8>),
    Buffer(Vec<u8>),
    Array(Vec<StackItem>),
    Struct(Vec<StackItem>),
    Map(Vec<(StackItem, StackItem)>),
    Pointer(i64),
    InteropInterface(IteratorHandle),
}

impl StackItem {
    pub fn type_name(&self) -> &'static str {
        match self {
            StackItem::Null => "Any",
            StackItem::Boolean(_) => "Boolean",
            StackItem::Integer(_) => "Integer",
            StackItem::ByteString(_) => "ByteString",
            StackItem::Buffer(_) => "Buffer",
            StackItem::Array(_) => "Array",
            StackItem::Struct(_) => "Struct",
            StackItem::Map(_) => "Map",
            StackItem::Pointer(_) => "Pointer",
            StackItem::InteropInterface(_) => "InteropInterface",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, StackItem::Null)
    }

    /// Raw bytes of a primitive item.
    pub fn try_bytes(&self) -> Result<Vec<u8>, DomainError> {
        match self {
            StackItem::ByteString(bytes) | StackItem::Buffer(bytes) => Ok(bytes.clone()),
            StackItem::Boolean(value) => Ok(vec![u8::from(*value)]),
            StackItem::Integer(value) => Ok(integer_to_le_bytes(*value)),
            other => Err(conversion_error(other, "ByteString")),
        }
    }

    /// Numeric value of a primitive item.
    pub fn try_integer(&self) -> Result<i128, DomainError> {
        match self {
            StackItem::Integer(value) => Ok(*value),
            StackItem::Boolean(value) => Ok(i128::from(*value)),
            StackItem::ByteString(bytes) | StackItem::Buffer(bytes) => le_bytes_to_integer(bytes)
                .ok_or_else(|| {
                    DomainError::Conversion(format!("{} bytes do not fit an integer", bytes.len()))
                }),
            other => Err(conversion_error(other, "Integer")),
        }
    }

    /// Elements of an `Array` or `Struct`.
    pub fn try_array(&self) -> Result<&[StackItem], DomainError> {
        match self {
            StackItem::Array(items) | StackItem::Struct(items) => Ok(items),
            other => Err(conversion_error(other, "Array")),
        }
    }

    pub fn try_iterator(&self) -> Result<&IteratorHandle, DomainError> {
        match self {
            StackItem::InteropInterface(handle) => Ok(handle),
            other => Err(conversion_error(other, "InteropInterface")),
        }
    }
}

fn conversion_error(item: &StackItem, target: &str) -> DomainError {
    DomainError::Conversion(format!("{} to {}", item.type_name(), target))
}

/// Minimal little-endian two's complement encoding; zero encodes to no bytes.
pub fn integer_to_le_bytes(value: i128) -> Vec<u8> {
    if value == 0 {
        return Vec::new();
    }
    let mut bytes = value.to_le_bytes().to_vec();
    while bytes.len() > 1 {
        let last = bytes[bytes.len() - 1];
        let sign_of_prev = bytes[bytes.len() - 2] & 0x80;
        let redundant = (last == 0x00 && sign_of_prev == 0) || (last == 0xff && sign_of_prev != 0);
        if !redundant {
            break;
        }
        bytes.pop();
    }
    bytes
}

fn le_bytes_to_integer(bytes: &[u8]) -> Option<i128> {
    if bytes.len() > 16 {
        return None;
    }
    if bytes.is_empty() {
        return Some(0);
    }
    let fill = if bytes[bytes.len() - 1] & 0x80 != 0 {
        0xff
    } else {
        0x00
    };
    let mut buf = [fill; 16];
    buf[..bytes.len()].copy_from_slice(bytes);
    Some(i128::from_le_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_encoding_is_minimal() {
        assert!(integer_to_le_bytes(0).is_empty());
        assert_eq!(integer_to_le_bytes(1), vec![0x01]);
        assert_eq!(integer_to_le_bytes(128), vec![0x80, 0x00]);
        assert_eq!(integer_to_le_bytes(-1), vec![0xff]);
        assert_eq!(integer_to_le_bytes(-129), vec![0x7f, 0xff]);
    }

    #[test]
    fn test_integer_bytes_round_trip() {
        for value in [0i128, 1, 16, 28, 255, 256, -1, -256, i64::MAX as i128] {
            let bytes = integer_to_le_bytes(value);
            assert_eq!(le_bytes_to_integer(&bytes), Some(value));
        }
    }
}
