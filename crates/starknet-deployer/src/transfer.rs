use rpc_client::types::InvokeTransaction;
use rpc_client::Ledger;
use starknet::core::types::Call;
use starknet::macros::selector;
use starknet_deploy_types::uint256::Uint256;
use starknet_types_core::felt::Felt;

use crate::config::TransferConfig;
use crate::error::DeployerError;
use crate::poller::{Clock, ConfirmationPoller};
use crate::queries::LedgerQueries;

const TRANSFER_SELECTOR: Felt = selector!("transfer");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferResult {
    pub transaction_hash: Felt,
    pub recipient: Felt,
    pub amount: Uint256,
    /// Recipient balance read back after confirmation, if the query succeeded.
    pub recipient_balance: Option<Uint256>,
}

/// ERC20 `transfer(recipient, amount)` call, with the amount as `[low, high]`.
pub fn transfer_call(token: Felt, recipient: Felt, amount: Uint256) -> Call {
    let [low, high] = amount.to_felts();
    Call { to: token, selector: TRANSFER_SELECTOR, calldata: vec![recipient, low, high] }
}

/// Sends fee tokens from the deployer account, refusing to submit anything it cannot pay.
pub struct FundedTransferWorkflow<'a, L, C> {
    ledger: &'a L,
    clock: &'a C,
    config: TransferConfig,
}

impl<'a, L: Ledger, C: Clock> FundedTransferWorkflow<'a, L, C> {
    pub fn new(ledger: &'a L, clock: &'a C, config: TransferConfig) -> Self {
        Self { ledger, clock, config }
    }

    pub async fn transfer(&self, recipient: Felt, amount: Uint256) -> Result<TransferResult, DeployerError> {
        let queries = LedgerQueries::new(self.ledger);
        let payer = self.ledger.account_address();
        let token = self.config.fee_token_address;

        log::info!("Checking balance of {}", payer.to_hex_string());
        let balance = queries.get_balance(token, payer).await?;
        log::info!("Balance of {}: {}", payer.to_hex_string(), balance);
        if balance < amount {
            log::error!("Insufficient balance: {} < {}", balance, amount);
            return Err(DeployerError::InsufficientBalance { balance, required: amount });
        }

        log::info!("Transferring {} to {}", amount, recipient.to_hex_string());
        let transaction =
            InvokeTransaction { calls: vec![transfer_call(token, recipient, amount)], max_fee: self.config.max_fee };
        let submission = self.ledger.submit_invoke(transaction).await?;
        log::info!("Transfer transaction sent: {}", submission.transaction_hash.to_hex_string());

        let poller = ConfirmationPoller::new(self.ledger, self.clock, self.config.poller);
        let receipt = poller.await_finality(submission.transaction_hash).await?;
        if !receipt.is_successful() {
            log::error!("Transfer failed: {}", receipt);
            return Err(DeployerError::TransferRejected { receipt });
        }

        let recipient_balance = match queries.get_balance(token, recipient).await {
            Ok(balance) => {
                log::info!("New balance of {}: {}", recipient.to_hex_string(), balance);
                Some(balance)
            }
            Err(e) => {
                log::warn!("Could not read the new balance of {}: {}", recipient.to_hex_string(), e);
                None
            }
        };

        Ok(TransferResult { transaction_hash: submission.transaction_hash, recipient, amount, recipient_balance })
    }
}
