use std::time::Duration;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use rpc_client::types::FinalityStatus;
use rstest::rstest;
use starknet_deployer::config::PollerConfig;
use starknet_deployer::poller::ConfirmationPoller;
use starknet_deployer::DeployerError;
use starknet_types_core::felt::Felt;

use crate::common::mock_ledger::{ACCEPTED, PENDING, REJECTED};
use crate::common::{clock, ledger, poller_config, ManualClock, MockLedger};

const TRANSACTION_HASH: Felt = Felt::from_hex_unchecked("0x7a5");

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn timeout_stops_polling(ledger: MockLedger, clock: ManualClock) {
    let ledger = ledger.with_receipt_statuses(vec![PENDING]);
    let config = PollerConfig { poll_interval: Duration::from_secs(5), timeout: Some(Duration::from_secs(12)) };

    let result = ConfirmationPoller::new(&ledger, &clock, config).await_finality(TRANSACTION_HASH).await;

    assert_matches!(
        result,
        Err(DeployerError::ConfirmationTimeout { transaction_hash, timeout })
            if transaction_hash == TRANSACTION_HASH && timeout == Duration::from_secs(12)
    );
    // Polls at 0s, 5s, 10s and 12s; the last wait is cut to the remaining time.
    assert_eq!(ledger.receipt_polls(), 4);
    assert_eq!(clock.sleeps(), vec![Duration::from_secs(5), Duration::from_secs(5), Duration::from_secs(2)]);
    assert_eq!(clock.elapsed(), Duration::from_secs(12));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn polls_until_terminal_without_timeout(ledger: MockLedger, clock: ManualClock) {
    let ledger = ledger.with_receipt_statuses(vec![PENDING, PENDING, PENDING, PENDING, ACCEPTED]);
    let config = PollerConfig { poll_interval: Duration::from_millis(500), timeout: None };

    let receipt = ConfirmationPoller::new(&ledger, &clock, config).await_finality(TRANSACTION_HASH).await.unwrap();

    assert_eq!(receipt.finality_status, FinalityStatus::AcceptedOnL2);
    assert_eq!(receipt.transaction_hash, TRANSACTION_HASH);
    assert_eq!(ledger.receipt_polls(), 5);
    assert_eq!(clock.elapsed(), Duration::from_secs(2));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejection_is_returned_to_the_caller(ledger: MockLedger, clock: ManualClock, poller_config: PollerConfig) {
    let ledger = ledger.with_receipt_statuses(vec![REJECTED]);

    let receipt =
        ConfirmationPoller::new(&ledger, &clock, poller_config).await_finality(TRANSACTION_HASH).await.unwrap();

    assert_eq!(receipt.finality_status, FinalityStatus::Rejected);
    assert!(!receipt.is_successful());
    assert!(clock.sleeps().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transport_failure_is_not_retried(ledger: MockLedger, clock: ManualClock, poller_config: PollerConfig) {
    let ledger = ledger.with_failing_receipts();

    let result = ConfirmationPoller::new(&ledger, &clock, poller_config).await_finality(TRANSACTION_HASH).await;

    assert_matches!(result, Err(DeployerError::Network(_)));
    assert_eq!(ledger.requests().len(), 1);
    assert!(clock.sleeps().is_empty());
}
