use starknet_types_core::felt::Felt;

use crate::error::LedgerError;
use crate::types::{
    ClassLookup, DeclareSubmission, DeclareTransaction, InvokeSubmission, InvokeTransaction, TransactionReceipt,
};

/// Read and write access to a Starknet ledger through a single funded account.
///
/// Reads are made against the pending block so that transactions accepted moments ago are
/// visible. Submissions are signed by the account returned by [`Ledger::account_address`].
#[allow(async_fn_in_trait)]
pub trait Ledger {
    /// Address of the account that signs submissions.
    fn account_address(&self) -> Felt;

    /// Looks a class up by hash.
    ///
    /// `Ok(ClassLookup::NotDeclared)` is only returned when the node positively reports the class
    /// as unknown; any other failure is an error.
    async fn get_class(&self, class_hash: Felt) -> Result<ClassLookup, LedgerError>;

    /// Returns the class hash of the contract deployed at `contract_address`, if any.
    async fn class_hash_at(&self, contract_address: Felt) -> Result<Option<Felt>, LedgerError>;

    /// Calls a view entry point.
    async fn call(
        &self,
        contract_address: Felt,
        entry_point: &str,
        calldata: Vec<Felt>,
    ) -> Result<Vec<Felt>, LedgerError>;

    /// Fetches the current status of a transaction. Unknown hashes are reported as pending.
    async fn get_receipt(&self, transaction_hash: Felt) -> Result<TransactionReceipt, LedgerError>;

    async fn submit_declare(&self, transaction: DeclareTransaction) -> Result<DeclareSubmission, LedgerError>;

    async fn submit_invoke(&self, transaction: InvokeTransaction) -> Result<InvokeSubmission, LedgerError>;
}
