use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rpc_client::{Ledger, RpcClient};
use starknet_deploy_types::artifact::CompiledArtifactPair;
use starknet_deploy_types::hash::ClassHash;
use starknet_deploy_types::uint256::{Uint256, FEE_TOKEN_DECIMALS};
use starknet_deployer::compiler::ContractCompiler;
use starknet_deployer::config::{
    parse_felt, resolve_constructor_args, ConfigError, DeployerConfig, DEFAULT_CONFIG_FILE,
};
use starknet_deployer::orchestrator::WorkflowConfigs;
use starknet_deployer::poller::TokioClock;
use starknet_deployer::{Deployer, DeployerError};

#[derive(Parser, Debug)]
#[command(about = "Declare, deploy and fund Starknet contracts")]
struct Args {
    /// Configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Network to use instead of the one selected in the configuration
    #[arg(long, global = true)]
    network: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a contract and declare its class
    Declare {
        /// Key of the contract in the configuration
        contract: String,

        /// Use the artifacts already present in the target directory
        #[arg(long)]
        skip_build: bool,
    },

    /// Deploy an already declared class
    Deploy {
        #[arg(long)]
        class_hash: String,

        /// Constructor argument, repeatable. `$account` stands for the deployer address
        #[arg(long = "arg")]
        constructor_args: Vec<String>,
    },

    /// Declare a contract, then deploy it with its configured constructor arguments
    DeclareAndDeploy {
        contract: String,

        #[arg(long)]
        skip_build: bool,
    },

    /// Transfer fee tokens to an account
    Fund {
        recipient: String,

        /// Amount in token units, e.g. 0.01. Defaults to settings.funding_amount
        #[arg(long)]
        amount: Option<String>,
    },

    /// Show the status of a transaction
    Receipt {
        transaction_hash: String,

        /// Wait until the transaction is accepted or rejected
        #[arg(long)]
        wait: bool,
    },

    /// Compute the class hashes of a contract without touching the network
    ClassHash {
        contract: String,

        #[arg(long)]
        skip_build: bool,
    },
}

fn init_logging() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp(None)
        .try_init()
        .unwrap_or_else(|e| eprintln!("Failed to configure env_logger: {e}"));
}

fn load_artifacts(
    config: &DeployerConfig,
    contract: &str,
    skip_build: bool,
) -> Result<CompiledArtifactPair, DeployerError> {
    let contract = config.contract(contract)?;
    let compiler = ContractCompiler::new(config.settings.compiler.clone(), config.settings.target_dir.clone());
    if skip_build {
        compiler.load_artifacts(&contract.path, &contract.name)
    } else {
        compiler.compile(&contract.path, &contract.name)
    }
}

fn connect(config: &DeployerConfig) -> Result<Deployer<RpcClient, TokioClock>, DeployerError> {
    let network = config.active_network()?;
    let account = config.account_config()?;
    log::info!("Using network '{}' with account {}", config.network, account.address.to_hex_string());

    let client = RpcClient::new(&network.rpc_url, &account)?;
    Ok(Deployer::new(client, TokioClock, WorkflowConfigs::try_from(config)?))
}

async fn run(args: Args) -> Result<(), DeployerError> {
    let mut config = DeployerConfig::from_file(&args.config)?;
    if let Some(network) = &args.network {
        config.select_network(network)?;
    }

    match args.command {
        Command::Declare { contract, skip_build } => {
            let artifacts = load_artifacts(&config, &contract, skip_build)?;
            let deployer = connect(&config)?;
            let declaration = deployer.declare(&artifacts).await?;
            println!("Class hash: {}", declaration.class_hash);
            if let Some(transaction_hash) = declaration.transaction_hash() {
                println!("Transaction hash: {}", transaction_hash.to_hex_string());
            }
        }
        Command::Deploy { class_hash, constructor_args } => {
            let class_hash = ClassHash::new(parse_felt("class_hash", &class_hash)?);
            let deployer = connect(&config)?;
            let calldata = resolve_constructor_args(&constructor_args, deployer.ledger().account_address())?;
            let instance = deployer.deploy(class_hash, calldata, None).await?;
            println!("Contract address: {}", instance.address.to_hex_string());
        }
        Command::DeclareAndDeploy { contract, skip_build } => {
            let artifacts = load_artifacts(&config, &contract, skip_build)?;
            let deployer = connect(&config)?;
            let calldata = config.contract(&contract)?.constructor_calldata(deployer.ledger().account_address())?;
            let summary = deployer.declare_and_deploy(&artifacts, calldata).await?;
            println!("Class hash: {}", summary.declaration.class_hash);
            println!("Contract address: {}", summary.instance.address.to_hex_string());
        }
        Command::Fund { recipient, amount } => {
            let recipient = parse_felt("recipient", &recipient)?;
            let amount = match amount {
                Some(amount) => Uint256::from_decimal_units(&amount, FEE_TOKEN_DECIMALS).map_err(ConfigError::from)?,
                None => config.funding_amount()?.ok_or(ConfigError::MissingFundingAmount)?,
            };
            let deployer = connect(&config)?;
            let transfer = deployer.fund(recipient, amount).await?;
            println!("Transaction hash: {}", transfer.transaction_hash.to_hex_string());
            if let Some(balance) = transfer.recipient_balance {
                println!("New balance: {} ({} base units)", balance.format_units(FEE_TOKEN_DECIMALS), balance);
            }
        }
        Command::Receipt { transaction_hash, wait } => {
            let transaction_hash = parse_felt("transaction_hash", &transaction_hash)?;
            let deployer = connect(&config)?;
            let receipt = if wait {
                deployer.await_receipt(transaction_hash).await?
            } else {
                deployer.receipt(transaction_hash).await?
            };
            println!("Finality status: {}", receipt.finality_status);
            match receipt.execution_status {
                Some(execution_status) => println!("Execution status: {execution_status}"),
                None => println!("Execution status: unknown"),
            }
        }
        Command::ClassHash { contract, skip_build } => {
            let artifacts = load_artifacts(&config, &contract, skip_build)?;
            println!("Class hash: {}", artifacts.class_hash()?);
            println!("Compiled class hash: {}", artifacts.compiled_class_hash()?);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<DeployerError>> {
    init_logging();

    let args = Args::parse();
    if let Err(err) = run(args).await {
        eprintln!("Error: {err}");
        return Err(Box::new(err));
    }
    Ok(())
}
