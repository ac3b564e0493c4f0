//! # Starknet Deploy Types
//!
//! Value types shared by the deployment workflows: content hashes of compiled contract
//! classes, the pair of compiled artifacts produced by the Cairo toolchain, 256-bit token
//! amounts and chain identifiers.
//!
//! ## Modules
//!
//! - [`artifact`] - The compiled artifact pair (CASM + Sierra) and the artifact hasher
//! - [`casm_contract_class`] - Lazily parsed CASM contract classes
//! - [`sierra_contract_class`] - Lazily parsed Sierra contract classes
//! - [`hash`] - Class hash and compiled class hash types
//! - [`uint256`] - 256-bit unsigned integers split into 128-bit limbs
//! - [`chain_id`] - Chain ID conversion utilities
//! - [`error`] - Error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use starknet_deploy_types::artifact::CompiledArtifactPair;
//!
//! let artifacts = CompiledArtifactPair::from_files(
//!     "target/dev/hello_Hello.compiled_contract_class.json",
//!     "target/dev/hello_Hello.contract_class.json",
//! )?;
//! let class_hash = artifacts.class_hash()?;
//! let compiled_class_hash = artifacts.compiled_class_hash()?;
//! ```

pub mod artifact;
pub mod casm_contract_class;
pub mod chain_id;
pub mod error;
pub mod hash;
pub mod sierra_contract_class;
pub mod uint256;
