//! Waiting for submitted transactions to reach a terminal status.

use std::time::{Duration, Instant};

use rpc_client::types::TransactionReceipt;
use rpc_client::Ledger;
use starknet_types_core::felt::Felt;

use crate::config::PollerConfig;
use crate::error::DeployerError;

/// Source of time for the poller.
#[allow(async_fn_in_trait)]
pub trait Clock {
    fn now(&self) -> Instant;

    async fn sleep(&self, duration: Duration);
}

/// Wall-clock time, sleeping on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

pub struct ConfirmationPoller<'a, L, C> {
    ledger: &'a L,
    clock: &'a C,
    config: PollerConfig,
}

impl<'a, L: Ledger, C: Clock> ConfirmationPoller<'a, L, C> {
    pub fn new(ledger: &'a L, clock: &'a C, config: PollerConfig) -> Self {
        Self { ledger, clock, config }
    }

    /// Polls the receipt of `transaction_hash` until its finality status is terminal.
    ///
    /// A rejected or reverted receipt is still returned as `Ok`: deciding what it means is up
    /// to the caller. Once the timeout has elapsed no further poll is made.
    pub async fn await_finality(&self, transaction_hash: Felt) -> Result<TransactionReceipt, DeployerError> {
        let started = self.clock.now();
        log::info!("Waiting for transaction {} to be accepted", transaction_hash.to_hex_string());

        loop {
            let receipt = self.ledger.get_receipt(transaction_hash).await?;
            if receipt.is_terminal() {
                log::info!("Transaction {} is {}", transaction_hash.to_hex_string(), receipt.finality_status);
                return Ok(receipt);
            }

            let elapsed = self.clock.now().saturating_duration_since(started);
            let mut wait = self.config.poll_interval;
            if let Some(timeout) = self.config.timeout {
                if elapsed >= timeout {
                    log::error!("Transaction {} still pending after {:?}", transaction_hash.to_hex_string(), elapsed);
                    return Err(DeployerError::ConfirmationTimeout { transaction_hash, timeout });
                }
                wait = wait.min(timeout - elapsed);
            }

            log::debug!(
                "Transaction {} is {}, polling again in {:?}",
                transaction_hash.to_hex_string(),
                receipt.finality_status,
                wait
            );
            self.clock.sleep(wait).await;
        }
    }
}
