use assert_matches::assert_matches;
use indoc::indoc;
use pretty_assertions::assert_eq;
use rstest::rstest;
use starknet_deploy_types::artifact::CompiledArtifactPair;
use starknet_deployer::config::DeployerConfig;
use starknet_deployer::declare::DeclarationOutcome;
use starknet_deployer::deploy::udc_deployment_address;
use starknet_deployer::orchestrator::WorkflowConfigs;
use starknet_deployer::{Deployer, DeployerError};
use starknet_types_core::felt::Felt;

use crate::common::mock_ledger::{LedgerRequest, PENDING, REJECTED};
use crate::common::{artifacts, clock, ledger, ManualClock, MockLedger, ACCOUNT_ADDRESS};

const CONFIG: &str = indoc! {r#"
    network: devnet
    networks:
      devnet:
        rpc_url: http://localhost:5050
        chain_id: SN_SEPOLIA
        fee_token_address: "0xfee"
        account:
          address: "0xacc0"
          private_key: "0x1"
    settings:
      poll_interval_ms: 1000
      confirmation_timeout_secs: 30
      salt: "0x5a17"
    contracts:
      evaluator:
        name: Evaluator
        path: contracts/evaluator
        constructor_args: ["$account"]
"#};

fn deployer(ledger: &MockLedger, clock: &ManualClock) -> (DeployerConfig, Deployer<MockLedger, ManualClock>) {
    let config = DeployerConfig::from_yaml_str(CONFIG).unwrap();
    let configs = WorkflowConfigs::try_from(&config).unwrap();
    (config, Deployer::new(ledger.clone(), clock.clone(), configs))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn declare_and_deploy(artifacts: CompiledArtifactPair, ledger: MockLedger, clock: ManualClock) {
    let (config, deployer) = deployer(&ledger, &clock);
    let calldata = config.contract("evaluator").unwrap().constructor_calldata(ACCOUNT_ADDRESS).unwrap();

    let summary = deployer.declare_and_deploy(&artifacts, calldata.clone()).await.unwrap();

    let class_hash = artifacts.class_hash().unwrap();
    assert_eq!(summary.declaration.class_hash, class_hash);
    assert_matches!(summary.declaration.outcome, DeclarationOutcome::Declared { .. });
    assert_eq!(summary.instance.class_hash, class_hash);
    assert_eq!(
        summary.instance.address,
        udc_deployment_address(class_hash, Felt::from_hex_unchecked("0x5a17"), true, ACCOUNT_ADDRESS, &calldata)
    );
    assert_eq!(summary.instance.abi.as_deref(), Some("[]"));

    let submissions = ledger.submissions();
    assert_eq!(submissions.len(), 2);
    assert_matches!(submissions[0], LedgerRequest::SubmitDeclare { .. });
    assert_matches!(submissions[1], LedgerRequest::SubmitInvoke { .. });
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn redeploying_an_already_published_contract_submits_nothing(
    artifacts: CompiledArtifactPair,
    ledger: MockLedger,
    clock: ManualClock,
) {
    let (_, deployer) = deployer(&ledger, &clock);

    let first = deployer.declare_and_deploy(&artifacts, vec![ACCOUNT_ADDRESS]).await.unwrap();
    let submissions = ledger.submissions().len();
    let ledger = ledger.with_deployed_contract(first.instance.address, *first.instance.class_hash);
    let second = deployer.declare_and_deploy(&artifacts, vec![ACCOUNT_ADDRESS]).await.unwrap();

    assert_eq!(second.declaration.outcome, DeclarationOutcome::AlreadyDeclared);
    assert_eq!(second.instance.address, first.instance.address);
    assert_eq!(second.instance.transaction_hash, None);
    assert_eq!(ledger.submissions().len(), submissions);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_declaration_stops_before_deployment(
    artifacts: CompiledArtifactPair,
    ledger: MockLedger,
    clock: ManualClock,
) {
    let ledger = ledger.with_receipt_statuses(vec![PENDING, REJECTED]);
    let (_, deployer) = deployer(&ledger, &clock);

    let result = deployer.declare_and_deploy(&artifacts, vec![ACCOUNT_ADDRESS]).await;

    assert_matches!(result, Err(DeployerError::DeclarationRejected { .. }));
    assert_eq!(ledger.submissions().len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn balance_and_receipt_queries(ledger: MockLedger, clock: ManualClock) {
    let ledger = ledger.with_balance(ACCOUNT_ADDRESS, 1234u128).with_receipt_statuses(vec![PENDING]);
    let (_, deployer) = deployer(&ledger, &clock);

    assert_eq!(deployer.balance(ACCOUNT_ADDRESS).await.unwrap().to_string(), "1234");
    let receipt = deployer.receipt(Felt::from(0x7001u64)).await.unwrap();
    assert!(!receipt.is_terminal());

    let result = deployer.await_receipt(Felt::from(0x7001u64)).await;
    assert_matches!(result, Err(DeployerError::ConfirmationTimeout { .. }));
}

#[test]
fn workflow_configs_follow_settings() {
    let config = DeployerConfig::from_yaml_str(CONFIG).unwrap();
    let configs = WorkflowConfigs::try_from(&config).unwrap();

    assert_eq!(configs.poller.poll_interval.as_millis(), 1000);
    assert_eq!(configs.deploy.salt, Some(Felt::from_hex_unchecked("0x5a17")));
    assert_eq!(configs.transfer.fee_token_address, Felt::from_hex_unchecked("0xfee"));
    assert_eq!(configs.declare.poller, configs.poller);
    assert!(configs.deploy.unique && configs.deploy.skip_existing);
}
