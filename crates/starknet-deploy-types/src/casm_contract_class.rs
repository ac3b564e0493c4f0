use std::sync::Arc;

use once_cell::sync::OnceCell;
use starknet_core::types::contract::CompiledClass;

use crate::error::ContractClassError;
use crate::hash::CompiledClassHash;

/// A CASM contract class backed by the bytes of a `*.compiled_contract_class.json` artifact.
///
/// Operations are implemented as lazily as possible, i.e. the artifact is only parsed when
/// the compiled class hash is first requested.
/// Fields are boxed in an `Arc` for cheap cloning.
#[derive(Debug, Clone)]
pub struct GenericCasmContractClass {
    serialized_class: Arc<Vec<u8>>,
    casm_class: OnceCell<Arc<CompiledClass>>,
    class_hash: OnceCell<CompiledClassHash>,
}

fn casm_class_from_bytes(bytes: &[u8]) -> Result<CompiledClass, ContractClassError> {
    let contract_class = serde_json::from_slice(bytes)?;
    Ok(contract_class)
}

impl GenericCasmContractClass {
    pub fn from_bytes(serialized_class: Vec<u8>) -> Self {
        Self { serialized_class: Arc::new(serialized_class), casm_class: OnceCell::new(), class_hash: OnceCell::new() }
    }

    pub fn serialized_class(&self) -> &[u8] {
        &self.serialized_class
    }

    pub fn get_casm_class(&self) -> Result<&CompiledClass, ContractClassError> {
        self.casm_class
            .get_or_try_init(|| casm_class_from_bytes(&self.serialized_class).map(Arc::new))
            .map(|boxed| boxed.as_ref())
    }

    fn compute_class_hash(&self) -> Result<CompiledClassHash, ContractClassError> {
        let compiled_class = self.get_casm_class()?;
        let class_hash_felt = compiled_class.class_hash().map_err(|e| ContractClassError::HashError(e.to_string()))?;

        Ok(CompiledClassHash::new(class_hash_felt))
    }

    pub fn class_hash(&self) -> Result<CompiledClassHash, ContractClassError> {
        self.class_hash.get_or_try_init(|| self.compute_class_hash()).copied()
    }
}
