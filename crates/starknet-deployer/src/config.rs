//! Run configuration, loaded once from a YAML document.
//!
//! The file selects a network, describes how to reach it and which account pays, and lists
//! the contracts that can be published. Workflows never read the file themselves: they get
//! the plain values derived here ([`PollerConfig`], [`DeclareConfig`], [`DeployConfig`],
//! [`TransferConfig`]).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rpc_client::AccountConfig;
use serde::Deserialize;
use starknet_deploy_types::chain_id::chain_id_to_felt;
use starknet_deploy_types::error::Uint256Error;
use starknet_deploy_types::uint256::{Uint256, FEE_TOKEN_DECIMALS};
use starknet_types_core::felt::Felt;

pub const DEFAULT_CONFIG_FILE: &str = "deployer.yaml";

/// Fallback for `networks.<name>.account.private_key`.
pub const PRIVATE_KEY_ENV: &str = "DEPLOYER_PRIVATE_KEY";

/// Constructor argument replaced by the deploying account's address.
pub const ACCOUNT_PLACEHOLDER: &str = "$account";

/// 0.01 ETH.
const DEFAULT_MAX_FEE: &str = "0x2386f26fc10000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Network '{0}' is not configured")]
    UnknownNetwork(String),

    #[error("Contract '{0}' is not configured")]
    UnknownContract(String),

    #[error("No private key for network '{network}': set it in the configuration or in DEPLOYER_PRIVATE_KEY")]
    MissingPrivateKey { network: String },

    #[error("Invalid value for {field}: '{value}'")]
    InvalidFelt { field: String, value: String },

    #[error("Invalid chain ID '{0}'")]
    InvalidChainId(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] Uint256Error),

    #[error("No amount given and settings.funding_amount is not set")]
    MissingFundingAmount,
}

/// Parses a felt written either in hex (`0x` prefix) or in decimal.
pub fn parse_felt(field: &str, value: &str) -> Result<Felt, ConfigError> {
    let trimmed = value.trim();
    let parsed = if trimmed.starts_with("0x") {
        Felt::from_hex(trimmed).ok()
    } else {
        Felt::from_dec_str(trimmed).ok()
    };
    parsed.ok_or_else(|| ConfigError::InvalidFelt { field: field.to_string(), value: value.to_string() })
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeployerConfig {
    /// Key of the active entry in `networks`.
    pub network: String,
    pub networks: HashMap<String, NetworkConfig>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub contracts: HashMap<String, ContractConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    pub rpc_url: String,
    /// Short-string chain name, e.g. `SN_SEPOLIA`.
    pub chain_id: String,
    pub fee_token_address: String,
    pub account: AccountSection,
}

#[derive(Clone, Deserialize)]
pub struct AccountSection {
    pub address: String,
    #[serde(default)]
    pub private_key: Option<String>,
}

impl std::fmt::Debug for AccountSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountSection")
            .field("address", &self.address)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub max_fee: String,
    /// Artifact directory, relative to the contract directory.
    pub target_dir: PathBuf,
    pub compiler: String,
    pub poll_interval_ms: u64,
    pub confirmation_timeout_secs: Option<u64>,
    pub class_query_retries: u32,
    pub skip_existing_deployments: bool,
    pub unique_deployment: bool,
    /// Fixed deployment salt. A random one is drawn for each deployment otherwise.
    pub salt: Option<String>,
    /// Default amount for `fund`, in fee token units.
    pub funding_amount: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_fee: DEFAULT_MAX_FEE.to_string(),
            target_dir: PathBuf::from("target/dev"),
            compiler: "scarb".to_string(),
            poll_interval_ms: 5000,
            confirmation_timeout_secs: Some(600),
            class_query_retries: 3,
            skip_existing_deployments: true,
            unique_deployment: true,
            salt: None,
            funding_amount: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContractConfig {
    /// Contract name as it appears in the artifact file names.
    pub name: String,
    pub path: PathBuf,
    #[serde(default)]
    pub constructor_args: Vec<String>,
}

impl ContractConfig {
    pub fn constructor_calldata(&self, account_address: Felt) -> Result<Vec<Felt>, ConfigError> {
        resolve_constructor_args(&self.constructor_args, account_address)
    }
}

/// Resolves constructor arguments to felts, substituting [`ACCOUNT_PLACEHOLDER`].
pub fn resolve_constructor_args(args: &[String], account_address: Felt) -> Result<Vec<Felt>, ConfigError> {
    args.iter()
        .map(|arg| {
            if arg.trim() == ACCOUNT_PLACEHOLDER {
                Ok(account_address)
            } else {
                parse_felt("constructor_args", arg)
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerConfig {
    pub poll_interval: Duration,
    /// No timeout when `None`.
    pub timeout: Option<Duration>,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self { poll_interval: Duration::from_secs(5), timeout: Some(Duration::from_secs(600)) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclareConfig {
    pub max_fee: Felt,
    /// Extra attempts after a failed class lookup before giving up.
    pub class_query_retries: u32,
    pub poller: PollerConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployConfig {
    pub max_fee: Felt,
    pub unique: bool,
    pub salt: Option<Felt>,
    pub skip_existing: bool,
    pub poller: PollerConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferConfig {
    pub fee_token_address: Felt,
    pub max_fee: Felt,
    pub poller: PollerConfig,
}

impl DeployerConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(contents)?;
        config.active_network()?;
        Ok(config)
    }

    /// Switches the active network, failing if it is not configured.
    pub fn select_network(&mut self, network: &str) -> Result<(), ConfigError> {
        if !self.networks.contains_key(network) {
            return Err(ConfigError::UnknownNetwork(network.to_string()));
        }
        self.network = network.to_string();
        Ok(())
    }

    pub fn active_network(&self) -> Result<&NetworkConfig, ConfigError> {
        self.networks.get(&self.network).ok_or_else(|| ConfigError::UnknownNetwork(self.network.clone()))
    }

    pub fn contract(&self, key: &str) -> Result<&ContractConfig, ConfigError> {
        self.contracts.get(key).ok_or_else(|| ConfigError::UnknownContract(key.to_string()))
    }

    /// Account credentials for the active network.
    ///
    /// The private key comes from the configuration, or from [`PRIVATE_KEY_ENV`] when absent.
    pub fn account_config(&self) -> Result<AccountConfig, ConfigError> {
        self.account_config_with_fallback(std::env::var(PRIVATE_KEY_ENV).ok())
    }

    fn account_config_with_fallback(&self, fallback_key: Option<String>) -> Result<AccountConfig, ConfigError> {
        let network = self.active_network()?;
        let private_key = network
            .account
            .private_key
            .clone()
            .or(fallback_key)
            .ok_or_else(|| ConfigError::MissingPrivateKey { network: self.network.clone() })?;

        Ok(AccountConfig {
            address: parse_felt("account.address", &network.account.address)?,
            private_key: parse_felt("account.private_key", &private_key)?,
            chain_id: chain_id_to_felt(&network.chain_id)
                .ok_or_else(|| ConfigError::InvalidChainId(network.chain_id.clone()))?,
        })
    }

    pub fn max_fee(&self) -> Result<Felt, ConfigError> {
        parse_felt("settings.max_fee", &self.settings.max_fee)
    }

    pub fn poller_config(&self) -> PollerConfig {
        PollerConfig {
            poll_interval: Duration::from_millis(self.settings.poll_interval_ms),
            timeout: self.settings.confirmation_timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn declare_config(&self) -> Result<DeclareConfig, ConfigError> {
        Ok(DeclareConfig {
            max_fee: self.max_fee()?,
            class_query_retries: self.settings.class_query_retries,
            poller: self.poller_config(),
        })
    }

    pub fn deploy_config(&self) -> Result<DeployConfig, ConfigError> {
        let salt = self.settings.salt.as_deref().map(|salt| parse_felt("settings.salt", salt)).transpose()?;
        Ok(DeployConfig {
            max_fee: self.max_fee()?,
            unique: self.settings.unique_deployment,
            salt,
            skip_existing: self.settings.skip_existing_deployments,
            poller: self.poller_config(),
        })
    }

    pub fn transfer_config(&self) -> Result<TransferConfig, ConfigError> {
        let network = self.active_network()?;
        Ok(TransferConfig {
            fee_token_address: parse_felt("fee_token_address", &network.fee_token_address)?,
            max_fee: self.max_fee()?,
            poller: self.poller_config(),
        })
    }

    /// The configured default funding amount, in fee token base units.
    pub fn funding_amount(&self) -> Result<Option<Uint256>, ConfigError> {
        self.settings
            .funding_amount
            .as_deref()
            .map(|amount| Uint256::from_decimal_units(amount, FEE_TOKEN_DECIMALS).map_err(ConfigError::from))
            .transpose()
    }
}
