//! Diagnostics raised while reducing a property.
//!
//! Every variant aborts the reduction of the property being processed. Internal
//! invariant violations are not represented here: they panic.

use thiserror::Error;

use crate::dialect::Dialect;
use crate::op::Op;

/// A failure reducing a PSL term.
///
/// Terms are carried pre-rendered so the error outlives the arena that built them.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PslError {
    /// The construct is recognized but deliberately not reduced.
    #[error("not supported feature: {reason} (in `{term}`)")]
    NotSupportedFeature {
        /// What is unsupported.
        reason: String,
        /// The offending sub-formula.
        term: String,
    },

    /// A literal integer was required.
    #[error("expected a number in `{term}`")]
    ExpectedNumber {
        /// The expression that did not resolve to an integer.
        term: String,
    },

    /// A literal was resolved but its value is not acceptable.
    #[error("invalid numeric value {value}: {reason} (in `{term}`)")]
    InvalidNumericValue {
        /// The rejected value.
        value: i64,
        /// Why the value is rejected.
        reason: &'static str,
        /// The offending sub-formula.
        term: String,
    },

    /// A replicator rebinds an identifier already bound by an enclosing replicator.
    #[error("repeated replicator id `{id}`")]
    RepeatedReplicatorId {
        /// The identifier bound twice.
        id: String,
    },

    /// An operator has no symbol in the requested dialect.
    #[error("unsupported conversion: `{op}` has no {dialect} symbol")]
    UnsupportedConversion {
        /// The operator being converted.
        op: Op,
        /// The target dialect.
        dialect: Dialect,
    },

    /// The formula nests deeper than the configured limit.
    #[error("formula nesting depth {depth} exceeds the limit of {limit}")]
    NestingTooDeep {
        /// Measured nesting depth.
        depth: usize,
        /// Configured limit.
        limit: usize,
    },
}

/// Result type used throughout the PSL crates.
pub type PslResult<T> = Result<T, PslError>;

/// Reason attached to every low-bound-exceeds-high-bound failure.
pub const INVALID_RANGE: &str = "invalid range: low bound exceeds high bound";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_failure() {
        let err = PslError::InvalidNumericValue {
            value: 3,
            reason: INVALID_RANGE,
            term: "5..3".into(),
        };
        assert!(err.to_string().contains("invalid range"));

        let err = PslError::RepeatedReplicatorId { id: "i".into() };
        assert_eq!(err.to_string(), "repeated replicator id `i`");

        let err = PslError::UnsupportedConversion {
            op: Op::SereConcat,
            dialect: Dialect::Core,
        };
        assert_eq!(
            err.to_string(),
            "unsupported conversion: `;` has no core symbol"
        );
    }
}
