use rpc_client::types::TransactionReceipt;
use rpc_client::Ledger;
use starknet_deploy_types::artifact::CompiledArtifactPair;
use starknet_deploy_types::hash::ClassHash;
use starknet_deploy_types::uint256::Uint256;
use starknet_types_core::felt::Felt;

use crate::config::{ConfigError, DeclareConfig, DeployConfig, DeployerConfig, PollerConfig, TransferConfig};
use crate::declare::{DeclarationResult, DeclarationWorkflow};
use crate::deploy::{ContractInstance, DeploymentRequest, DeploymentWorkflow};
use crate::error::DeployerError;
use crate::poller::{Clock, ConfirmationPoller};
use crate::queries::LedgerQueries;
use crate::transfer::{FundedTransferWorkflow, TransferResult};

/// Configuration of every workflow the [`Deployer`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowConfigs {
    pub poller: PollerConfig,
    pub declare: DeclareConfig,
    pub deploy: DeployConfig,
    pub transfer: TransferConfig,
}

impl TryFrom<&DeployerConfig> for WorkflowConfigs {
    type Error = ConfigError;

    fn try_from(config: &DeployerConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            poller: config.poller_config(),
            declare: config.declare_config()?,
            deploy: config.deploy_config()?,
            transfer: config.transfer_config()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentSummary {
    pub declaration: DeclarationResult,
    pub instance: ContractInstance,
}

/// Runs the workflows against one ledger account.
pub struct Deployer<L, C> {
    ledger: L,
    clock: C,
    configs: WorkflowConfigs,
}

impl<L: Ledger, C: Clock> Deployer<L, C> {
    pub fn new(ledger: L, clock: C, configs: WorkflowConfigs) -> Self {
        Self { ledger, clock, configs }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn configs(&self) -> &WorkflowConfigs {
        &self.configs
    }

    pub async fn declare(&self, artifacts: &CompiledArtifactPair) -> Result<DeclarationResult, DeployerError> {
        DeclarationWorkflow::new(&self.ledger, &self.clock, self.configs.declare).declare(artifacts).await
    }

    /// Deploys an already declared class. The salt is drawn at random unless one is configured.
    pub async fn deploy(
        &self,
        class_hash: ClassHash,
        constructor_calldata: Vec<Felt>,
        abi: Option<String>,
    ) -> Result<ContractInstance, DeployerError> {
        let salt = self.configs.deploy.salt.unwrap_or_else(random_salt);
        let request = DeploymentRequest { class_hash, constructor_calldata, salt, abi };
        DeploymentWorkflow::new(&self.ledger, &self.clock, self.configs.deploy).deploy(request).await
    }

    pub async fn declare_and_deploy(
        &self,
        artifacts: &CompiledArtifactPair,
        constructor_calldata: Vec<Felt>,
    ) -> Result<DeploymentSummary, DeployerError> {
        let declaration = self.declare(artifacts).await?;
        let abi = match artifacts.sierra().abi() {
            Ok(abi) => Some(abi),
            Err(e) => {
                log::warn!("Could not read the ABI from {}: {}", artifacts.sierra_path().display(), e);
                None
            }
        };
        let instance = self.deploy(declaration.class_hash, constructor_calldata, abi).await?;

        Ok(DeploymentSummary { declaration, instance })
    }

    pub async fn fund(&self, recipient: Felt, amount: Uint256) -> Result<TransferResult, DeployerError> {
        FundedTransferWorkflow::new(&self.ledger, &self.clock, self.configs.transfer).transfer(recipient, amount).await
    }

    /// Balance of `owner` in the fee token.
    pub async fn balance(&self, owner: Felt) -> Result<Uint256, DeployerError> {
        LedgerQueries::new(&self.ledger).get_balance(self.configs.transfer.fee_token_address, owner).await
    }

    /// Current receipt of a transaction, without waiting.
    pub async fn receipt(&self, transaction_hash: Felt) -> Result<TransactionReceipt, DeployerError> {
        LedgerQueries::new(&self.ledger).get_receipt(transaction_hash).await
    }

    pub async fn await_receipt(&self, transaction_hash: Felt) -> Result<TransactionReceipt, DeployerError> {
        ConfirmationPoller::new(&self.ledger, &self.clock, self.configs.poller).await_finality(transaction_hash).await
    }
}

fn random_salt() -> Felt {
    Felt::from(rand::random::<u128>())
}
