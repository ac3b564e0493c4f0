use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use rstest::rstest;
use starknet::macros::selector;
use starknet_deploy_types::hash::ClassHash;
use starknet_deployer::config::DeployConfig;
use starknet_deployer::deploy::{udc_deployment_address, DeploymentRequest, DeploymentWorkflow, UDC_ADDRESS};
use starknet_deployer::DeployerError;
use starknet_types_core::felt::Felt;

use crate::common::mock_ledger::{InvokedCall, LedgerRequest, ACCEPTED, PENDING, REJECTED};
use crate::common::{clock, deploy_config, ledger, ManualClock, MockLedger, ACCOUNT_ADDRESS};

const CLASS_HASH: Felt = Felt::from_hex_unchecked("0xc1a55");
const SALT: Felt = Felt::from_hex_unchecked("0x5a17");

fn request() -> DeploymentRequest {
    DeploymentRequest {
        class_hash: ClassHash::new(CLASS_HASH),
        constructor_calldata: vec![ACCOUNT_ADDRESS, Felt::from(42u8)],
        salt: SALT,
        abi: Some("[]".to_string()),
    }
}

fn expected_address(unique: bool) -> Felt {
    udc_deployment_address(
        ClassHash::new(CLASS_HASH),
        SALT,
        unique,
        ACCOUNT_ADDRESS,
        &[ACCOUNT_ADDRESS, Felt::from(42u8)],
    )
}

#[rstest]
#[case::unique(true)]
#[case::not_unique(false)]
#[tokio::test(flavor = "multi_thread")]
async fn deploys_through_the_udc(
    #[case] unique: bool,
    ledger: MockLedger,
    clock: ManualClock,
    deploy_config: DeployConfig,
) {
    let ledger = ledger.with_receipt_statuses(vec![PENDING, ACCEPTED]);
    let config = DeployConfig { unique, ..deploy_config };

    let instance = DeploymentWorkflow::new(&ledger, &clock, config).deploy(request()).await.unwrap();

    assert_eq!(instance.address, expected_address(unique));
    assert_eq!(instance.class_hash, ClassHash::new(CLASS_HASH));
    assert_eq!(instance.abi.as_deref(), Some("[]"));
    assert!(instance.transaction_hash.is_some());

    let unique_flag = if unique { Felt::ONE } else { Felt::ZERO };
    assert_eq!(
        ledger.submissions(),
        vec![LedgerRequest::SubmitInvoke {
            calls: vec![InvokedCall {
                to: UDC_ADDRESS,
                selector: selector!("deployContract"),
                calldata: vec![CLASS_HASH, SALT, unique_flag, Felt::TWO, ACCOUNT_ADDRESS, Felt::from(42u8)],
            }]
        }]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_address_is_checked_before_submission(
    ledger: MockLedger,
    clock: ManualClock,
    deploy_config: DeployConfig,
) {
    let ledger = ledger.with_receipt_statuses(vec![ACCEPTED]);

    DeploymentWorkflow::new(&ledger, &clock, deploy_config).deploy(request()).await.unwrap();

    let requests = ledger.requests();
    let lookup = requests.iter().position(|r| *r == LedgerRequest::ClassHashAt(expected_address(true)));
    let submission = requests.iter().position(|r| matches!(r, LedgerRequest::SubmitInvoke { .. }));
    assert_eq!(lookup, Some(0));
    assert_eq!(submission, Some(1));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn existing_instance_is_reused(ledger: MockLedger, clock: ManualClock, deploy_config: DeployConfig) {
    let ledger = ledger.with_deployed_contract(expected_address(true), CLASS_HASH);

    let instance = DeploymentWorkflow::new(&ledger, &clock, deploy_config).deploy(request()).await.unwrap();

    assert_eq!(instance.address, expected_address(true));
    assert_eq!(instance.transaction_hash, None);
    assert!(ledger.submissions().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn different_class_at_address_is_a_collision(
    ledger: MockLedger,
    clock: ManualClock,
    deploy_config: DeployConfig,
) {
    let other_class = Felt::from_hex_unchecked("0x07e4");
    let ledger = ledger.with_deployed_contract(expected_address(true), other_class);

    let result = DeploymentWorkflow::new(&ledger, &clock, deploy_config).deploy(request()).await;

    assert_matches!(
        result,
        Err(DeployerError::DeploymentCollision { address, expected, found })
            if address == expected_address(true)
                && expected == ClassHash::new(CLASS_HASH)
                && found == ClassHash::new(other_class)
    );
    assert!(ledger.submissions().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn existence_check_can_be_disabled(ledger: MockLedger, clock: ManualClock, deploy_config: DeployConfig) {
    let ledger = ledger.with_deployed_contract(expected_address(true), CLASS_HASH);
    let config = DeployConfig { skip_existing: false, ..deploy_config };

    DeploymentWorkflow::new(&ledger, &clock, config).deploy(request()).await.unwrap();

    assert!(!ledger.requests().iter().any(|r| matches!(r, LedgerRequest::ClassHashAt(_))));
    assert_eq!(ledger.submissions().len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_deployment_is_a_failure(ledger: MockLedger, clock: ManualClock, deploy_config: DeployConfig) {
    let ledger = ledger.with_receipt_statuses(vec![PENDING, REJECTED]);

    let result = DeploymentWorkflow::new(&ledger, &clock, deploy_config).deploy(request()).await;

    assert_matches!(
        result,
        Err(DeployerError::DeploymentRejected { class_hash, receipt })
            if class_hash == ClassHash::new(CLASS_HASH) && !receipt.is_successful()
    );
}
