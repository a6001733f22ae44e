//! Routing error types.

/// Reasons a driving distance could not be obtained.
///
/// All variants mean the same thing to the fare core: the distance is
/// unavailable.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Routing backend returned an error status
    #[error("routing API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Backend answered but found no route
    #[error("no route found ({code})")]
    NoRoute { code: String },

    /// No routing backend is available
    #[error("routing unavailable: {0}")]
    Unavailable(String),
}
