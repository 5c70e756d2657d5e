use thiserror::Error;

/// Result alias used across the bridge
pub type Result<T> = std::result::Result<T, Error>;

/// Every way a bridge invocation can fail.
/// None of these are retried; `main` turns each one into
/// `Error: <message>` on stderr and exit status 1.
#[derive(Error, Debug)]
pub enum Error
{   /// Credential variable is unset or empty
    #[error("{0} not found in environment.")]
    MissingApiKey(String)
  , /// Bad config file or request values
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String)
  , /// Tokenizer could not be resolved, or encode/decode failed
    #[error("Tokenizer error: {0}")]
    Tokenizer(String)
  , /// HTTP transport error
    #[error("HTTP error: {0}")]
    HttpError(String)
  , /// Sampling service answered with a non-success status
    #[error("API error: {0}")]
    ApiError(String)
  , /// Failed to parse a service response
    #[error("Parse error: {0}")]
    ParseError(String)
  , /// The sampling future resolved to a failure
    #[error("Sampling failed: {0}")]
    SamplingFailed(String)
}
