use starknet::accounts::AccountError;
use starknet::providers::ProviderError;

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Encountered a provider error: {0}")]
    Provider(#[from] ProviderError),
    #[error("Encountered a request error: {0}")]
    ReqwestError(#[from] reqwest::Error),
    #[error("Invalid RPC URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("Failed to submit transaction: {0}")]
    Submission(String),
    #[error("Encountered a custom error: {0}")]
    CustomError(String),
}

impl<S: std::fmt::Display> From<AccountError<S>> for LedgerError {
    fn from(error: AccountError<S>) -> Self {
        match error {
            AccountError::Provider(provider_error) => LedgerError::Provider(provider_error),
            other => LedgerError::Submission(other.to_string()),
        }
    }
}
