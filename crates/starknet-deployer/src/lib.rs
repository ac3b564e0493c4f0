//! # Starknet Deployer
//!
//! Declares Cairo contract classes, deploys them through the Universal Deployer Contract and
//! funds accounts with the fee token.
//!
//! Every workflow is written against the [`rpc_client::Ledger`] trait and a [`poller::Clock`],
//! which makes them runnable against an in-memory ledger and simulated time.
//!
//! ## Modules
//!
//! - [`config`] - YAML configuration and the per-workflow settings derived from it
//! - [`compiler`] - Out-of-process compilation and artifact lookup
//! - [`queries`] - Read-only ledger queries
//! - [`poller`] - Waiting for transactions to reach a terminal status
//! - [`declare`] - Idempotent class declaration
//! - [`deploy`] - Contract deployment through the UDC
//! - [`transfer`] - Balance-checked fee token transfers
//! - [`orchestrator`] - [`Deployer`], which sequences the workflows

pub mod compiler;
pub mod config;
pub mod declare;
pub mod deploy;
pub mod error;
pub mod orchestrator;
pub mod poller;
pub mod queries;
pub mod transfer;

pub use error::DeployerError;
pub use orchestrator::Deployer;
