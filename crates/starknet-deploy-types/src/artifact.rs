//! The compiled artifact pair of a contract and the artifact hasher.
//!
//! The Cairo toolchain emits two representations of every contract:
//!
//! - representation A, the CASM (`*.compiled_contract_class.json`), low-level bytecode whose
//!   content address is the [`CompiledClassHash`];
//! - representation B, the Sierra class (`*.contract_class.json`), high-level bytecode whose
//!   content address is the [`ClassHash`].

use std::fmt;
use std::path::{Path, PathBuf};

use crate::casm_contract_class::GenericCasmContractClass;
use crate::error::ContractClassError;
use crate::hash::{ClassHash, CompiledClassHash};
use crate::sierra_contract_class::GenericSierraContractClass;

/// File name suffix of the CASM artifact emitted by `scarb build`.
pub const CASM_ARTIFACT_SUFFIX: &str = "compiled_contract_class.json";
/// File name suffix of the Sierra artifact emitted by `scarb build`.
pub const SIERRA_ARTIFACT_SUFFIX: &str = "contract_class.json";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ArtifactKind {
    Casm,
    Sierra,
}

impl ArtifactKind {
    /// The file name suffix identifying this representation for the given contract.
    pub fn file_suffix(&self, contract_name: &str) -> String {
        match self {
            ArtifactKind::Casm => format!("{contract_name}.{CASM_ARTIFACT_SUFFIX}"),
            ArtifactKind::Sierra => format!("{contract_name}.{SIERRA_ARTIFACT_SUFFIX}"),
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Casm => f.write_str("CASM"),
            ArtifactKind::Sierra => f.write_str("Sierra"),
        }
    }
}

/// Computes the class hash of a Sierra artifact.
pub fn hash_class(representation_b: &[u8]) -> Result<ClassHash, ContractClassError> {
    if representation_b.is_empty() {
        return Err(ContractClassError::EmptyArtifact(ArtifactKind::Sierra));
    }
    GenericSierraContractClass::from_bytes(representation_b.to_vec()).class_hash()
}

/// Computes the compiled class hash of a CASM artifact.
pub fn hash_compiled_class(representation_a: &[u8]) -> Result<CompiledClassHash, ContractClassError> {
    if representation_a.is_empty() {
        return Err(ContractClassError::EmptyArtifact(ArtifactKind::Casm));
    }
    GenericCasmContractClass::from_bytes(representation_a.to_vec()).class_hash()
}

/// The two compiled representations of one contract.
///
/// Both byte streams are guaranteed non-empty. The pair is immutable once built; hashes are
/// computed lazily and cached by the underlying classes.
#[derive(Debug, Clone)]
pub struct CompiledArtifactPair {
    casm: GenericCasmContractClass,
    sierra: GenericSierraContractClass,
    casm_path: PathBuf,
    sierra_path: PathBuf,
}

impl CompiledArtifactPair {
    pub fn new(
        casm_bytes: Vec<u8>,
        sierra_bytes: Vec<u8>,
        casm_path: impl Into<PathBuf>,
        sierra_path: impl Into<PathBuf>,
    ) -> Result<Self, ContractClassError> {
        if casm_bytes.is_empty() {
            return Err(ContractClassError::EmptyArtifact(ArtifactKind::Casm));
        }
        if sierra_bytes.is_empty() {
            return Err(ContractClassError::EmptyArtifact(ArtifactKind::Sierra));
        }

        Ok(Self {
            casm: GenericCasmContractClass::from_bytes(casm_bytes),
            sierra: GenericSierraContractClass::from_bytes(sierra_bytes),
            casm_path: casm_path.into(),
            sierra_path: sierra_path.into(),
        })
    }

    /// Reads both artifacts from disk.
    pub fn from_files(casm_path: impl AsRef<Path>, sierra_path: impl AsRef<Path>) -> Result<Self, ContractClassError> {
        let casm_path = casm_path.as_ref();
        let sierra_path = sierra_path.as_ref();

        let casm_bytes = read_artifact(casm_path)?;
        let sierra_bytes = read_artifact(sierra_path)?;

        Self::new(casm_bytes, sierra_bytes, casm_path, sierra_path)
    }

    pub fn casm(&self) -> &GenericCasmContractClass {
        &self.casm
    }

    pub fn sierra(&self) -> &GenericSierraContractClass {
        &self.sierra
    }

    pub fn casm_path(&self) -> &Path {
        &self.casm_path
    }

    pub fn sierra_path(&self) -> &Path {
        &self.sierra_path
    }

    pub fn class_hash(&self) -> Result<ClassHash, ContractClassError> {
        self.sierra.class_hash()
    }

    pub fn compiled_class_hash(&self) -> Result<CompiledClassHash, ContractClassError> {
        self.casm.class_hash()
    }
}

fn read_artifact(path: &Path) -> Result<Vec<u8>, ContractClassError> {
    std::fs::read(path).map_err(|source| ContractClassError::Io { path: path.to_path_buf(), source })
}
