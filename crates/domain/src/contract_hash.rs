use crate::DomainError;
use std::fmt;
use std::str::FromStr;

const HASH_LEN: usize = 20;

/// Script hash of a deployed contract.
///
/// Kept in the order the node prints it (`0x` + little-endian hex), which is
/// also the order `invokefunction` expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ContractHash([u8; HASH_LEN]);

impl ContractHash {
    pub fn from_bytes(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl FromStr for ContractHash {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let decoded =
            hex::decode(digits).map_err(|e| DomainError::InvalidContractHash(e.to_string()))?;
        let bytes: [u8; HASH_LEN] = decoded.try_into().map_err(|v: Vec<u8>| {
            DomainError::InvalidContractHash(format!(
                "expected {} bytes, got {}",
                HASH_LEN,
                v.len()
            ))
        })?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for ContractHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}
