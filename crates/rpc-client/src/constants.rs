//! Constants used throughout the RPC client

/// Environment variable read by live-node tests for the RPC endpoint.
pub const DEPLOYER_RPC_URL_ENV: &str = "DEPLOYER_RPC_URL";

/// Default timeout for RPC requests in seconds.
///
/// Applies to each HTTP round trip; confirmation waits have their own timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;
