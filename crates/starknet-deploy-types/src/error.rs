use std::path::PathBuf;

use crate::artifact::ArtifactKind;

#[derive(thiserror::Error, Debug)]
pub enum ContractClassError {
    #[error("{0} artifact is empty")]
    EmptyArtifact(ArtifactKind),

    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),

    #[error("Failed to flatten Sierra class: {0}")]
    FlattenError(String),

    #[error("Failed to hash class: {0}")]
    HashError(String),

    #[error("Failed to read artifact {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Uint256Error {
    #[error("Value does not fit in 256 bits")]
    Overflow,

    #[error("Felt {} does not fit in 128 bits", .0.to_hex_string())]
    LimbOverflow(starknet_types_core::felt::Felt),

    #[error("Expected at least one felt to decode a u256")]
    MissingLimbs,

    #[error("Expected at most two felts to decode a u256, got {0}")]
    TooManyLimbs(usize),

    #[error("Invalid decimal amount '{0}'")]
    InvalidAmount(String),

    #[error("Amount '{amount}' has more than {decimals} fractional digits")]
    TooPrecise { amount: String, decimals: u32 },
}
