//! Cairo 1 Sierra contract class types and utilities.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use starknet_core::types::contract::SierraClass;
use starknet_core::types::FlattenedSierraClass;

use crate::error::ContractClassError;
use crate::hash::ClassHash;

/// A Sierra contract class backed by the bytes of a `*.contract_class.json` artifact.
///
/// Parsing, flattening and hashing happen lazily and at most once: the struct uses
/// `OnceCell` for each derived representation and `Arc` so that the flattened class can be
/// handed to a declare transaction without copying the program.
///
/// # Examples
///
/// ```rust,ignore
/// use starknet_deploy_types::sierra_contract_class::GenericSierraContractClass;
///
/// let sierra_bytes = std::fs::read("target/dev/hello_Hello.contract_class.json")?;
/// let sierra_class = GenericSierraContractClass::from_bytes(sierra_bytes);
/// let class_hash = sierra_class.class_hash()?;
/// ```
#[derive(Debug, Clone)]
pub struct GenericSierraContractClass {
    /// Raw artifact bytes, as produced by the compiler.
    serialized_class: Arc<Vec<u8>>,
    /// Lazy-initialized flattened class, the form submitted on-chain.
    flattened_class: OnceCell<Arc<FlattenedSierraClass>>,
    /// Lazy-initialized computed class hash.
    class_hash: OnceCell<ClassHash>,
}

impl GenericSierraContractClass {
    /// Creates a new Sierra contract class from serialized bytes.
    ///
    /// Nothing is parsed here; malformed content surfaces on first use.
    #[must_use]
    pub fn from_bytes(serialized_class: Vec<u8>) -> Self {
        Self {
            serialized_class: Arc::new(serialized_class),
            flattened_class: OnceCell::new(),
            class_hash: OnceCell::new(),
        }
    }

    pub fn serialized_class(&self) -> &[u8] {
        &self.serialized_class
    }

    fn build_sierra_class(&self) -> Result<SierraClass, ContractClassError> {
        serde_json::from_slice(&self.serialized_class).map_err(ContractClassError::SerdeError)
    }

    fn build_flattened_class(&self) -> Result<FlattenedSierraClass, ContractClassError> {
        let sierra_class = self.build_sierra_class()?;
        sierra_class.flatten().map_err(|e| ContractClassError::FlattenError(e.to_string()))
    }

    /// Gets the flattened class (ABI serialized to a string), flattening it if necessary.
    ///
    /// The returned `Arc` is shared with this instance.
    pub fn flattened_class(&self) -> Result<Arc<FlattenedSierraClass>, ContractClassError> {
        self.flattened_class.get_or_try_init(|| self.build_flattened_class().map(Arc::new)).cloned()
    }

    /// Returns the JSON-encoded ABI of the class.
    pub fn abi(&self) -> Result<String, ContractClassError> {
        Ok(self.flattened_class()?.abi.clone())
    }

    fn compute_class_hash(&self) -> Result<ClassHash, ContractClassError> {
        let flattened_class = self.flattened_class()?;
        Ok(ClassHash::new(flattened_class.class_hash()))
    }

    /// Gets the class hash for this contract class, computing it if necessary.
    ///
    /// # Errors
    ///
    /// Returns a `ContractClassError` if the artifact cannot be parsed or flattened.
    pub fn class_hash(&self) -> Result<ClassHash, ContractClassError> {
        self.class_hash.get_or_try_init(|| self.compute_class_hash()).copied()
    }
}
