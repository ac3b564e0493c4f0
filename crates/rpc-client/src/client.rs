use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use starknet::accounts::{Account, ConnectedAccount, ExecutionEncoding, SingleOwnerAccount};
use starknet::core::types::{BlockId, BlockTag, FunctionCall, StarknetError};
use starknet::core::utils::get_selector_from_name;
use starknet::providers::jsonrpc::HttpTransport;
use starknet::providers::{JsonRpcClient, Provider, ProviderError};
use starknet::signers::{LocalWallet, SigningKey};
use starknet_types_core::felt::Felt;

use crate::constants::DEFAULT_REQUEST_TIMEOUT_SECONDS;
use crate::error::LedgerError;
use crate::ledger::Ledger;
use crate::types::{
    ClassLookup, DeclareSubmission, DeclareTransaction, InvokeSubmission, InvokeTransaction, TransactionReceipt,
};

type DeployerAccount = SingleOwnerAccount<JsonRpcClient<HttpTransport>, LocalWallet>;

/// Credentials of the account that signs and pays for transactions.
#[derive(Clone, Copy)]
pub struct AccountConfig {
    pub address: Felt,
    pub private_key: Felt,
    pub chain_id: Felt,
}

impl std::fmt::Debug for AccountConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountConfig")
            .field("address", &self.address)
            .field("private_key", &"<redacted>")
            .field("chain_id", &self.chain_id)
            .finish()
    }
}

struct RpcClientInner {
    /// starknet-rs account, wrapping the provider used for every read.
    account: DeployerAccount,
}

impl RpcClientInner {
    fn new(rpc_url: &str, account_config: &AccountConfig) -> Result<Self, LedgerError> {
        log::info!("Starknet RPC URL: {}", rpc_url);
        let url = Url::parse(rpc_url)
            .map_err(|e| LedgerError::InvalidUrl { url: rpc_url.to_string(), reason: e.to_string() })?;
        let http_client =
            reqwest::Client::builder().timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECONDS)).build()?;
        let provider = JsonRpcClient::new(HttpTransport::new_with_client(url, http_client));

        let signer = LocalWallet::from(SigningKey::from_secret_scalar(account_config.private_key));
        let account = SingleOwnerAccount::new(
            provider,
            signer,
            account_config.address,
            account_config.chain_id,
            ExecutionEncoding::New,
        );

        Ok(Self { account })
    }
}

/// [`Ledger`] implementation backed by a Starknet JSON-RPC node.
#[derive(Clone)]
pub struct RpcClient {
    inner: Arc<RpcClientInner>,
}

impl RpcClient {
    pub fn new(rpc_url: &str, account_config: &AccountConfig) -> Result<Self, LedgerError> {
        Ok(Self { inner: Arc::new(RpcClientInner::new(rpc_url, account_config)?) })
    }

    pub fn starknet_rpc(&self) -> &JsonRpcClient<HttpTransport> {
        self.inner.account.provider()
    }

    fn block_id() -> BlockId {
        BlockId::Tag(BlockTag::Pending)
    }
}

impl Ledger for RpcClient {
    fn account_address(&self) -> Felt {
        self.inner.account.address()
    }

    async fn get_class(&self, class_hash: Felt) -> Result<ClassLookup, LedgerError> {
        match self.starknet_rpc().get_class(Self::block_id(), class_hash).await {
            Ok(_) => Ok(ClassLookup::Declared),
            Err(ProviderError::StarknetError(StarknetError::ClassHashNotFound)) => Ok(ClassLookup::NotDeclared),
            Err(e) => Err(e.into()),
        }
    }

    async fn class_hash_at(&self, contract_address: Felt) -> Result<Option<Felt>, LedgerError> {
        match self.starknet_rpc().get_class_hash_at(Self::block_id(), contract_address).await {
            Ok(class_hash) => Ok(Some(class_hash)),
            Err(ProviderError::StarknetError(StarknetError::ContractNotFound)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn call(
        &self,
        contract_address: Felt,
        entry_point: &str,
        calldata: Vec<Felt>,
    ) -> Result<Vec<Felt>, LedgerError> {
        let entry_point_selector = get_selector_from_name(entry_point)
            .map_err(|e| LedgerError::CustomError(format!("Invalid entry point '{entry_point}': {e}")))?;
        let request = FunctionCall { contract_address, entry_point_selector, calldata };
        let result = self.starknet_rpc().call(request, Self::block_id()).await?;
        Ok(result)
    }

    async fn get_receipt(&self, transaction_hash: Felt) -> Result<TransactionReceipt, LedgerError> {
        match self.starknet_rpc().get_transaction_status(transaction_hash).await {
            Ok(status) => Ok(TransactionReceipt::from_rpc_status(transaction_hash, status)),
            Err(ProviderError::StarknetError(StarknetError::TransactionHashNotFound)) => {
                Ok(TransactionReceipt::pending(transaction_hash))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn submit_declare(&self, transaction: DeclareTransaction) -> Result<DeclareSubmission, LedgerError> {
        let result = self
            .inner
            .account
            .declare_v2(transaction.contract_class, transaction.compiled_class_hash)
            .max_fee(transaction.max_fee)
            .send()
            .await?;
        log::debug!("Declare transaction submitted: {}", result.transaction_hash.to_hex_string());

        Ok(DeclareSubmission { transaction_hash: result.transaction_hash, class_hash: result.class_hash })
    }

    async fn submit_invoke(&self, transaction: InvokeTransaction) -> Result<InvokeSubmission, LedgerError> {
        let result = self.inner.account.execute_v1(transaction.calls).max_fee(transaction.max_fee).send().await?;
        log::debug!("Invoke transaction submitted: {}", result.transaction_hash.to_hex_string());

        Ok(InvokeSubmission { transaction_hash: result.transaction_hash })
    }
}
