use thiserror::Error;

/// Errors from upstream API calls.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// A network error occurred during the API call.
    #[error("network: {0}")]
    Network(String),

    /// The upstream service returned an error response.
    #[error("upstream api: {0}")]
    Api(String),

    /// The upstream response could not be parsed.
    #[error("invalid upstream response: {0}")]
    InvalidResponse(String),
}
