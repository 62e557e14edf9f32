//! Error taxonomy for the token table core
//!
//! Only programmer-error-class conditions and generation failures are
//! errors. Lookups that find nothing, samples larger than the store,
//! empty stores, and zero subscribers are normal outcomes modeled as
//! `Option` / shorter sequences, never as error values.

use thiserror::Error;

/// Top-level error for the token-feed core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeedError {
    #[error("generation error: {0}")]
    Generation(#[from] GeneratorError),

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Errors from the external generate/mutate capability.
///
/// Fatal when raised during store initialization; logged and skipped
/// for the affected record when raised during a scheduler tick.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneratorError {
    #[error("generated value for {field} is not representable")]
    Numeric { field: &'static str },

    #[error("generator failure: {message}")]
    Failed { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_error_wraps_into_feed_error() {
        let inner = GeneratorError::Numeric { field: "price" };
        let outer: FeedError = inner.clone().into();
        assert_eq!(outer, FeedError::Generation(inner));
    }

    #[test]
    fn test_error_messages() {
        let err = FeedError::InvalidConfig {
            message: "tokens_per_section must be non-zero".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid configuration: tokens_per_section must be non-zero"
        );

        let err = GeneratorError::Numeric { field: "marketCap" };
        assert_eq!(
            err.to_string(),
            "generated value for marketCap is not representable"
        );
    }
}
