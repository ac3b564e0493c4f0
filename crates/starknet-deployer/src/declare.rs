use rpc_client::types::DeclareTransaction;
use rpc_client::Ledger;
use starknet_deploy_types::artifact::CompiledArtifactPair;
use starknet_deploy_types::hash::{ClassHash, CompiledClassHash};
use starknet_types_core::felt::Felt;

use crate::config::DeclareConfig;
use crate::error::DeployerError;
use crate::poller::{Clock, ConfirmationPoller};
use crate::queries::{ClassPresence, LedgerQueries};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationOutcome {
    /// The class was already registered; nothing was submitted.
    AlreadyDeclared,
    Declared { transaction_hash: Felt },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclarationResult {
    pub class_hash: ClassHash,
    pub compiled_class_hash: CompiledClassHash,
    pub outcome: DeclarationOutcome,
}

impl DeclarationResult {
    pub fn transaction_hash(&self) -> Option<Felt> {
        match self.outcome {
            DeclarationOutcome::AlreadyDeclared => None,
            DeclarationOutcome::Declared { transaction_hash } => Some(transaction_hash),
        }
    }
}

/// Registers a class on the ledger, at most once.
pub struct DeclarationWorkflow<'a, L, C> {
    ledger: &'a L,
    clock: &'a C,
    config: DeclareConfig,
}

impl<'a, L: Ledger, C: Clock> DeclarationWorkflow<'a, L, C> {
    pub fn new(ledger: &'a L, clock: &'a C, config: DeclareConfig) -> Self {
        Self { ledger, clock, config }
    }

    pub async fn declare(&self, artifacts: &CompiledArtifactPair) -> Result<DeclarationResult, DeployerError> {
        let compiled_class_hash = artifacts.compiled_class_hash()?;
        let class_hash = artifacts.class_hash()?;
        log::info!("Class hash: {}", class_hash);
        log::info!("Compiled class hash: {}", compiled_class_hash);

        if self.is_declared(class_hash).await? {
            log::info!("Class {} is already declared, skipping declaration", class_hash);
            return Ok(DeclarationResult {
                class_hash,
                compiled_class_hash,
                outcome: DeclarationOutcome::AlreadyDeclared,
            });
        }

        let transaction = DeclareTransaction {
            contract_class: artifacts.sierra().flattened_class()?,
            compiled_class_hash: *compiled_class_hash,
            max_fee: self.config.max_fee,
        };
        log::info!("Declaring class {}", class_hash);
        let submission = self.ledger.submit_declare(transaction).await?;
        log::info!("Declare transaction sent: {}", submission.transaction_hash.to_hex_string());
        if submission.class_hash != *class_hash {
            log::warn!(
                "Node reported class hash {} for declared class {}",
                submission.class_hash.to_hex_string(),
                class_hash
            );
        }

        let poller = ConfirmationPoller::new(self.ledger, self.clock, self.config.poller);
        let receipt = poller.await_finality(submission.transaction_hash).await?;
        if !receipt.is_successful() {
            log::error!("Declaration of class {} failed: {}", class_hash, receipt);
            return Err(DeployerError::DeclarationRejected { class_hash, receipt });
        }
        log::info!("Class {} declared", class_hash);

        Ok(DeclarationResult {
            class_hash,
            compiled_class_hash,
            outcome: DeclarationOutcome::Declared { transaction_hash: submission.transaction_hash },
        })
    }

    /// Looks the class up, retrying failed queries before escalating them.
    async fn is_declared(&self, class_hash: ClassHash) -> Result<bool, DeployerError> {
        let queries = LedgerQueries::new(self.ledger);
        let mut attempt = 0;
        loop {
            log::info!("Checking whether class {} is declared", class_hash);
            match queries.class_presence(class_hash).await {
                ClassPresence::Found => return Ok(true),
                ClassPresence::NotFound => return Ok(false),
                ClassPresence::QueryFailed(e) if attempt >= self.config.class_query_retries => {
                    log::error!("Could not determine whether class {} is declared: {}", class_hash, e);
                    return Err(e.into());
                }
                ClassPresence::QueryFailed(e) => {
                    attempt += 1;
                    log::warn!(
                        "Class lookup failed ({}), retrying ({}/{})",
                        e,
                        attempt,
                        self.config.class_query_retries
                    );
                    self.clock.sleep(self.config.poller.poll_interval).await;
                }
            }
        }
    }
}
