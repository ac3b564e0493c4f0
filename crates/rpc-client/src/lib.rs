//! # RPC Client
//!
//! This crate provides the ledger access used by the deployer: class and contract lookups,
//! view calls, transaction status queries and signed submissions through a single account.
//!
//! ## Modules
//!
//! - [`ledger`] - The [`Ledger`] trait the workflows are written against
//! - [`client`] - [`RpcClient`], the JSON-RPC implementation of [`Ledger`]
//! - [`types`] - Transactions, submissions and receipts
//! - [`error`] - [`LedgerError`]
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rpc_client::{AccountConfig, Ledger, RpcClient};
//! use starknet_types_core::felt::Felt;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let account = AccountConfig {
//!         address: Felt::from_hex_unchecked("0x1234"),
//!         private_key: Felt::from_hex_unchecked("0x5678"),
//!         chain_id: starknet::core::chain_id::SEPOLIA,
//!     };
//!     let client = RpcClient::new("http://localhost:5050", &account)?;
//!
//!     let class_hash = Felt::from_hex_unchecked("0xabcd");
//!     println!("{:?}", client.get_class(class_hash).await?);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod constants;
pub mod error;
pub mod ledger;
pub mod types;

pub use client::{AccountConfig, RpcClient};
pub use error::LedgerError;
pub use ledger::Ledger;
