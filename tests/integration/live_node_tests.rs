use rpc_client::constants::DEPLOYER_RPC_URL_ENV;
use rpc_client::{AccountConfig, RpcClient};
use starknet_deploy_types::hash::ClassHash;
use starknet_deployer::queries::{ClassPresence, LedgerQueries};
use starknet_types_core::felt::Felt;

fn rpc_client() -> RpcClient {
    let rpc_url = std::env::var(DEPLOYER_RPC_URL_ENV).unwrap();
    let account = AccountConfig {
        address: Felt::from_hex_unchecked("0x1"),
        private_key: Felt::from_hex_unchecked("0x1"),
        chain_id: starknet::core::chain_id::SEPOLIA,
    };
    RpcClient::new(&rpc_url, &account).unwrap()
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "Requires a running Starknet node"]
async fn unknown_class_is_not_found() {
    let client = rpc_client();
    let queries = LedgerQueries::new(&client);

    let presence = queries.class_presence(ClassHash::new(Felt::from_hex_unchecked("0xdead"))).await;
    assert!(matches!(presence, ClassPresence::NotFound), "unexpected lookup result: {presence:?}");
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "Requires a running Starknet node"]
async fn no_contract_at_unused_address() {
    let client = rpc_client();
    let queries = LedgerQueries::new(&client);

    assert_eq!(queries.deployed_class_hash(Felt::from_hex_unchecked("0xdead")).await.unwrap(), None);
}
