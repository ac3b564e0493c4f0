use std::path::PathBuf;
use std::time::Duration;

use rpc_client::types::TransactionReceipt;
use rpc_client::LedgerError;
use starknet_deploy_types::error::ContractClassError;
use starknet_deploy_types::hash::ClassHash;
use starknet_deploy_types::uint256::Uint256;
use starknet_types_core::felt::Felt;

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum DeployerError {
    #[error("Compilation of {} failed ({status}): {stderr}", contract_dir.display())]
    CompilationFailed { contract_dir: PathBuf, status: String, stderr: String },

    #[error("Artifact not found: {}", path.display())]
    ArtifactNotFound { path: PathBuf },

    #[error("Malformed artifact: {0}")]
    MalformedArtifact(#[from] ContractClassError),

    #[error("Network error: {0}")]
    Network(#[from] LedgerError),

    #[error("Transaction {} was not confirmed within {timeout:?}", .transaction_hash.to_hex_string())]
    ConfirmationTimeout { transaction_hash: Felt, timeout: Duration },

    #[error("Declaration of class {class_hash} was rejected: {receipt}")]
    DeclarationRejected { class_hash: ClassHash, receipt: TransactionReceipt },

    #[error("Deployment of class {class_hash} was rejected: {receipt}")]
    DeploymentRejected { class_hash: ClassHash, receipt: TransactionReceipt },

    #[error("Insufficient balance: {balance} < {required}")]
    InsufficientBalance { balance: Uint256, required: Uint256 },

    #[error("Transfer was rejected: {receipt}")]
    TransferRejected { receipt: TransactionReceipt },

    #[error(
        "Address {} already holds class {found}, expected {expected}",
        .address.to_hex_string()
    )]
    DeploymentCollision { address: Felt, expected: ClassHash, found: ClassHash },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
