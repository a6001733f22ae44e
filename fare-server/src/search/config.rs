//! Search configuration.

/// Result limit used when none (or a non-positive one) is requested.
pub const DEFAULT_LIMIT: usize = 20;

/// Upper bound on the result limit.
pub const MAX_LIMIT: usize = 100;

/// Configuration parameters for location search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Limit applied when the caller gives none or a non-positive one.
    pub default_limit: usize,

    /// Requested limits above this are clamped down to it.
    pub max_limit: usize,
}

impl SearchConfig {
    pub fn new(default_limit: usize, max_limit: usize) -> Self {
        Self {
            default_limit,
            max_limit,
        }
    }

    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    pub fn with_max_limit(mut self, limit: usize) -> Self {
        self.max_limit = limit;
        self
    }

    /// Resolve a requested limit to the one actually applied.
    ///
    /// Never errors: absent or non-positive limits fall back to the
    /// default, oversized ones are clamped to the ceiling.
    pub fn effective_limit(&self, requested: Option<i64>) -> usize {
        let ceiling = self.max_limit.max(1);
        match requested {
            Some(n) if n > 0 => usize::try_from(n).unwrap_or(usize::MAX).min(ceiling),
            _ => self.default_limit.clamp(1, ceiling),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
        }
    }
}
