//! Domain error types.

/// A fare request that cannot be priced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Neither a usable distance nor two named endpoints were supplied.
    #[error("invalid request: must provide either distance or both start and end locations")]
    MissingDistance,
}
