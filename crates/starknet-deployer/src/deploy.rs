use rpc_client::types::InvokeTransaction;
use rpc_client::Ledger;
use starknet::core::types::Call;
use starknet::macros::selector;
use starknet_core::utils::get_contract_address;
use starknet_crypto::pedersen_hash;
use starknet_deploy_types::hash::ClassHash;
use starknet_types_core::felt::Felt;

use crate::config::DeployConfig;
use crate::error::DeployerError;
use crate::poller::{Clock, ConfirmationPoller};
use crate::queries::LedgerQueries;

/// Address of the Universal Deployer Contract, identical on every public network.
pub const UDC_ADDRESS: Felt =
    Felt::from_hex_unchecked("0x041a78e741e5af2fec34b695679bc6891742439f7afb8484ecd7766661ad02bf");

const DEPLOY_CONTRACT_SELECTOR: Felt = selector!("deployContract");

/// A deployed instance of a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractInstance {
    pub address: Felt,
    pub class_hash: ClassHash,
    /// JSON ABI taken from the Sierra artifact, when it was available.
    pub abi: Option<String>,
    /// `None` when the instance already existed and nothing was submitted.
    pub transaction_hash: Option<Felt>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    pub class_hash: ClassHash,
    pub constructor_calldata: Vec<Felt>,
    pub salt: Felt,
    pub abi: Option<String>,
}

/// Address at which the UDC deploys `class_hash`.
///
/// With `unique` the salt is bound to the deployer account, so two accounts using the same
/// salt get different addresses.
pub fn udc_deployment_address(
    class_hash: ClassHash,
    salt: Felt,
    unique: bool,
    deployer: Felt,
    constructor_calldata: &[Felt],
) -> Felt {
    let (salt, deployer_address) =
        if unique { (pedersen_hash(&deployer, &salt), UDC_ADDRESS) } else { (salt, Felt::ZERO) };
    get_contract_address(salt, *class_hash, constructor_calldata, deployer_address)
}

/// The `deployContract` call: `[class_hash, salt, unique, calldata_len, calldata...]`.
pub fn udc_deploy_call(class_hash: ClassHash, salt: Felt, unique: bool, constructor_calldata: &[Felt]) -> Call {
    let unique = if unique { Felt::ONE } else { Felt::ZERO };
    let mut calldata = vec![*class_hash, salt, unique, Felt::from(constructor_calldata.len() as u64)];
    calldata.extend_from_slice(constructor_calldata);

    Call { to: UDC_ADDRESS, selector: DEPLOY_CONTRACT_SELECTOR, calldata }
}

/// Instantiates a declared class through the Universal Deployer Contract.
pub struct DeploymentWorkflow<'a, L, C> {
    ledger: &'a L,
    clock: &'a C,
    config: DeployConfig,
}

impl<'a, L: Ledger, C: Clock> DeploymentWorkflow<'a, L, C> {
    pub fn new(ledger: &'a L, clock: &'a C, config: DeployConfig) -> Self {
        Self { ledger, clock, config }
    }

    pub async fn deploy(&self, request: DeploymentRequest) -> Result<ContractInstance, DeployerError> {
        let DeploymentRequest { class_hash, constructor_calldata, salt, abi } = request;
        let address = udc_deployment_address(
            class_hash,
            salt,
            self.config.unique,
            self.ledger.account_address(),
            &constructor_calldata,
        );
        log::info!("Deploying class {} at {}", class_hash, address.to_hex_string());

        if self.config.skip_existing {
            log::info!("Checking for an existing contract at {}", address.to_hex_string());
            match LedgerQueries::new(self.ledger).deployed_class_hash(address).await? {
                Some(found) if found == class_hash => {
                    log::info!(
                        "Class {} is already deployed at {}, skipping deployment",
                        class_hash,
                        address.to_hex_string()
                    );
                    return Ok(ContractInstance { address, class_hash, abi, transaction_hash: None });
                }
                Some(found) => {
                    log::error!("Address {} already holds class {}", address.to_hex_string(), found);
                    return Err(DeployerError::DeploymentCollision { address, expected: class_hash, found });
                }
                None => log::info!("No contract at {}, deploying", address.to_hex_string()),
            }
        }

        let transaction = InvokeTransaction {
            calls: vec![udc_deploy_call(class_hash, salt, self.config.unique, &constructor_calldata)],
            max_fee: self.config.max_fee,
        };
        let submission = self.ledger.submit_invoke(transaction).await?;
        log::info!("Deploy transaction sent: {}", submission.transaction_hash.to_hex_string());

        let poller = ConfirmationPoller::new(self.ledger, self.clock, self.config.poller);
        let receipt = poller.await_finality(submission.transaction_hash).await?;
        if !receipt.is_successful() {
            log::error!("Deployment of class {} failed: {}", class_hash, receipt);
            return Err(DeployerError::DeploymentRejected { class_hash, receipt });
        }
        log::info!("Contract deployed at {}", address.to_hex_string());

        Ok(ContractInstance { address, class_hash, abi, transaction_hash: Some(submission.transaction_hash) })
    }
}
