use rpc_client::types::{ClassLookup, TransactionReceipt};
use rpc_client::{Ledger, LedgerError};
use starknet_deploy_types::hash::ClassHash;
use starknet_deploy_types::uint256::Uint256;
use starknet_types_core::felt::Felt;

use crate::error::DeployerError;

/// Whether a class is registered on the ledger.
///
/// A failed lookup is kept apart from a negative answer so that callers never mistake a
/// flaky node for an undeclared class.
#[derive(Debug)]
pub enum ClassPresence {
    Found,
    NotFound,
    QueryFailed(LedgerError),
}

/// Read-only queries against the ledger. Each call is a single round trip.
pub struct LedgerQueries<'a, L> {
    ledger: &'a L,
}

impl<'a, L: Ledger> LedgerQueries<'a, L> {
    pub fn new(ledger: &'a L) -> Self {
        Self { ledger }
    }

    pub async fn class_presence(&self, class_hash: ClassHash) -> ClassPresence {
        match self.ledger.get_class(*class_hash).await {
            Ok(ClassLookup::Declared) => ClassPresence::Found,
            Ok(ClassLookup::NotDeclared) => ClassPresence::NotFound,
            Err(e) => ClassPresence::QueryFailed(e),
        }
    }

    /// `true` only when the class is positively known to the ledger.
    pub async fn class_exists(&self, class_hash: ClassHash) -> bool {
        matches!(self.class_presence(class_hash).await, ClassPresence::Found)
    }

    /// Balance of `owner` in the ERC20 `token_contract`.
    pub async fn get_balance(&self, token_contract: Felt, owner: Felt) -> Result<Uint256, DeployerError> {
        let result = self.ledger.call(token_contract, "balanceOf", vec![owner]).await?;
        Uint256::from_felts(&result).map_err(|e| {
            DeployerError::Network(LedgerError::CustomError(format!("Unexpected balanceOf response: {e}")))
        })
    }

    pub async fn get_receipt(&self, transaction_hash: Felt) -> Result<TransactionReceipt, DeployerError> {
        Ok(self.ledger.get_receipt(transaction_hash).await?)
    }

    /// Class of the contract deployed at `address`, if there is one.
    pub async fn deployed_class_hash(&self, address: Felt) -> Result<Option<ClassHash>, DeployerError> {
        Ok(self.ledger.class_hash_at(address).await?.map(ClassHash::new))
    }
}
