//! Request and response types exchanged with the ledger.

use std::fmt;
use std::sync::Arc;

use starknet::core::types::{
    Call, FlattenedSierraClass, TransactionExecutionStatus, TransactionStatus as RpcTransactionStatus,
};
use starknet_types_core::felt::Felt;

/// Result of looking a class hash up on the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassLookup {
    Declared,
    NotDeclared,
}

/// A declare transaction, ready to be signed by the account.
#[derive(Debug, Clone)]
pub struct DeclareTransaction {
    pub contract_class: Arc<FlattenedSierraClass>,
    pub compiled_class_hash: Felt,
    pub max_fee: Felt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclareSubmission {
    pub transaction_hash: Felt,
    /// Class hash as reported by the node.
    pub class_hash: Felt,
}

/// An invoke transaction executing one or more calls from the account.
#[derive(Debug, Clone)]
pub struct InvokeTransaction {
    pub calls: Vec<Call>,
    pub max_fee: Felt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvokeSubmission {
    pub transaction_hash: Felt,
}

/// How far a transaction has progressed towards finality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalityStatus {
    /// Unknown to the node yet, or received but not in a block.
    Pending,
    AcceptedOnL2,
    AcceptedOnL1,
    Rejected,
}

impl fmt::Display for FinalityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self {
            FinalityStatus::Pending => "PENDING",
            FinalityStatus::AcceptedOnL2 => "ACCEPTED_ON_L2",
            FinalityStatus::AcceptedOnL1 => "ACCEPTED_ON_L1",
            FinalityStatus::Rejected => "REJECTED",
        };
        f.write_str(status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStatus {
    Succeeded,
    Reverted,
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionStatus::Succeeded => f.write_str("SUCCEEDED"),
            ExecutionStatus::Reverted => f.write_str("REVERTED"),
        }
    }
}

impl From<TransactionExecutionStatus> for ExecutionStatus {
    fn from(status: TransactionExecutionStatus) -> Self {
        match status {
            TransactionExecutionStatus::Succeeded => ExecutionStatus::Succeeded,
            TransactionExecutionStatus::Reverted => ExecutionStatus::Reverted,
        }
    }
}

/// The ledger's current view of a submitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionReceipt {
    pub transaction_hash: Felt,
    pub finality_status: FinalityStatus,
    /// Only known once the transaction made it into a block.
    pub execution_status: Option<ExecutionStatus>,
}

impl TransactionReceipt {
    pub fn pending(transaction_hash: Felt) -> Self {
        Self { transaction_hash, finality_status: FinalityStatus::Pending, execution_status: None }
    }

    pub fn from_rpc_status(transaction_hash: Felt, status: RpcTransactionStatus) -> Self {
        let (finality_status, execution_status) = match status {
            RpcTransactionStatus::Received => (FinalityStatus::Pending, None),
            RpcTransactionStatus::Rejected { .. } => (FinalityStatus::Rejected, None),
            RpcTransactionStatus::AcceptedOnL2(execution) => (FinalityStatus::AcceptedOnL2, Some(execution.into())),
            RpcTransactionStatus::AcceptedOnL1(execution) => (FinalityStatus::AcceptedOnL1, Some(execution.into())),
        };
        Self { transaction_hash, finality_status, execution_status }
    }

    /// Whether the status can no longer change in a way that matters to the caller.
    pub fn is_terminal(&self) -> bool {
        !matches!(self.finality_status, FinalityStatus::Pending)
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self.finality_status, FinalityStatus::AcceptedOnL2 | FinalityStatus::AcceptedOnL1)
    }

    /// Accepted and not reverted.
    pub fn is_successful(&self) -> bool {
        self.is_accepted() && self.execution_status != Some(ExecutionStatus::Reverted)
    }
}

impl fmt::Display for TransactionReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transaction {} {}", self.transaction_hash.to_hex_string(), self.finality_status)?;
        if let Some(execution_status) = self.execution_status {
            write!(f, " ({execution_status})")?;
        }
        Ok(())
    }
}
