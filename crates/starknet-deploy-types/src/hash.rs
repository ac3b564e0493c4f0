//! Hash types and utilities for Starknet classes.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use starknet_types_core::felt::Felt;

/// The size of a hash in bytes.
pub const HASH_SIZE: usize = 32;

/// Content address of a Sierra (high-level) contract class.
///
/// This is the on-chain identity of "this code": declare transactions register it and
/// deploy transactions instantiate it.
///
/// # Examples
///
/// ```rust
/// use starknet_deploy_types::hash::ClassHash;
/// use starknet_types_core::felt::Felt;
///
/// let class_hash = ClassHash::new(Felt::from(0xabc_u64));
/// assert_eq!(class_hash.to_string(), "0xabc");
/// ```
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassHash(Felt);

/// Content address of a CASM (low-level) compiled class.
///
/// Submitted alongside the class hash in declare transactions to bind both representations.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompiledClassHash(Felt);

impl ClassHash {
    #[must_use]
    pub fn new(hash: Felt) -> Self {
        Self(hash)
    }

    /// Creates a class hash from a 32-byte array in big-endian format.
    #[must_use]
    pub fn from_bytes_be(bytes: [u8; HASH_SIZE]) -> Self {
        Self(Felt::from_bytes_be(&bytes))
    }

    #[must_use]
    pub fn as_felt(&self) -> &Felt {
        &self.0
    }
}

impl CompiledClassHash {
    #[must_use]
    pub fn new(hash: Felt) -> Self {
        Self(hash)
    }

    /// Creates a compiled class hash from a 32-byte array in big-endian format.
    #[must_use]
    pub fn from_bytes_be(bytes: [u8; HASH_SIZE]) -> Self {
        Self(Felt::from_bytes_be(&bytes))
    }

    #[must_use]
    pub fn as_felt(&self) -> &Felt {
        &self.0
    }
}

impl Deref for ClassHash {
    type Target = Felt;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Deref for CompiledClassHash {
    type Target = Felt;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Felt> for ClassHash {
    fn from(value: Felt) -> Self {
        Self(value)
    }
}

impl From<ClassHash> for Felt {
    fn from(class_hash: ClassHash) -> Self {
        class_hash.0
    }
}

impl From<Felt> for CompiledClassHash {
    fn from(value: Felt) -> Self {
        Self(value)
    }
}

impl From<CompiledClassHash> for Felt {
    fn from(compiled_class_hash: CompiledClassHash) -> Self {
        compiled_class_hash.0
    }
}

impl fmt::Display for ClassHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex_string())
    }
}

impl fmt::Display for CompiledClassHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex_string())
    }
}
