use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use rstest::rstest;
use starknet::macros::selector;
use starknet_deploy_types::uint256::Uint256;
use starknet_deployer::config::TransferConfig;
use starknet_deployer::transfer::FundedTransferWorkflow;
use starknet_deployer::DeployerError;
use starknet_types_core::felt::Felt;

use crate::common::mock_ledger::{InvokedCall, LedgerRequest, ACCEPTED, PENDING, REVERTED};
use crate::common::{clock, ledger, transfer_config, ManualClock, MockLedger, ACCOUNT_ADDRESS, FEE_TOKEN_ADDRESS};

const RECIPIENT: Felt = Felt::from_hex_unchecked("0xbeef");

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn insufficient_balance_blocks_the_transfer(
    ledger: MockLedger,
    clock: ManualClock,
    transfer_config: TransferConfig,
) {
    let ledger = ledger.with_balance(ACCOUNT_ADDRESS, 500u128);

    let result = FundedTransferWorkflow::new(&ledger, &clock, transfer_config)
        .transfer(RECIPIENT, Uint256::from(1000u128))
        .await;

    let Err(error) = result else {
        panic!("transfer should have failed");
    };
    assert_eq!(error.to_string(), "Insufficient balance: 500 < 1000");
    assert_matches!(
        error,
        DeployerError::InsufficientBalance { balance, required }
            if balance == Uint256::from(500u128) && required == Uint256::from(1000u128)
    );
    assert!(ledger.submissions().is_empty());
}

#[rstest]
#[case::one_above(1001, 1000, false)]
#[case::exact(1000, 1000, true)]
#[case::high_limb(u128::MAX, 0, false)]
#[case::zero(0, 0, true)]
#[tokio::test(flavor = "multi_thread")]
async fn balance_gate(
    #[case] amount: u128,
    #[case] balance: u128,
    #[case] allowed: bool,
    ledger: MockLedger,
    clock: ManualClock,
    transfer_config: TransferConfig,
) {
    let ledger = ledger.with_balance(ACCOUNT_ADDRESS, balance);

    let result = FundedTransferWorkflow::new(&ledger, &clock, transfer_config)
        .transfer(RECIPIENT, Uint256::from(amount))
        .await;

    assert_eq!(result.is_ok(), allowed);
    assert_eq!(ledger.submissions().len(), usize::from(allowed));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transfer_reports_new_recipient_balance(
    ledger: MockLedger,
    clock: ManualClock,
    transfer_config: TransferConfig,
) {
    let amount = Uint256::from(10_000_000_000_000_000u128);
    let ledger = ledger
        .with_balance(ACCOUNT_ADDRESS, 50_000_000_000_000_000u128)
        .with_balance(RECIPIENT, 1u128)
        .with_receipt_statuses(vec![PENDING, ACCEPTED]);

    let result =
        FundedTransferWorkflow::new(&ledger, &clock, transfer_config).transfer(RECIPIENT, amount).await.unwrap();

    assert_eq!(result.amount, amount);
    assert_eq!(result.recipient_balance, Some(Uint256::from(10_000_000_000_000_001u128)));
    assert_eq!(ledger.balance_of(ACCOUNT_ADDRESS), Uint256::from(40_000_000_000_000_000u128));
    assert_eq!(
        ledger.submissions(),
        vec![LedgerRequest::SubmitInvoke {
            calls: vec![InvokedCall {
                to: FEE_TOKEN_ADDRESS,
                selector: selector!("transfer"),
                calldata: vec![RECIPIENT, Felt::from(10_000_000_000_000_000u128), Felt::ZERO],
            }]
        }]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reverted_transfer_is_a_failure(ledger: MockLedger, clock: ManualClock, transfer_config: TransferConfig) {
    let ledger = ledger.with_balance(ACCOUNT_ADDRESS, 1000u128).with_receipt_statuses(vec![REVERTED]);

    let result = FundedTransferWorkflow::new(&ledger, &clock, transfer_config)
        .transfer(RECIPIENT, Uint256::from(10u128))
        .await;

    assert_matches!(result, Err(DeployerError::TransferRejected { .. }));
}
