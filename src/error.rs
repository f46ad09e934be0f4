//! Error kinds surfaced by the HMM core.
//!
//! `InvalidParameter` and `ContractViolation` are fatal from the caller's point of
//! view: nothing inside the core retries them, and the outer sampler is expected
//! to abort the run on seeing either one. The gamma sampler's numeric edge case
//! (`a` near 1, where Johnk's method would divide by `1 - a`) is resolved
//! internally by routing to the exponential fallback and never surfaces here.

use std::fmt;

/// Fatal errors raised by construction, count bookkeeping, or sampling.
#[derive(Debug, thiserror::Error)]
pub enum HmmError {
    /// A construction or sampler argument was out of its legal domain
    /// (non-positive codebook/unit counts, a negative Dirichlet mass, a
    /// non-positive rate or scale).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The caller violated a structural invariant: mismatched alignment and
    /// feature lengths, a state jump that isn't self/advance/unit-boundary,
    /// or an out-of-range feature code.
    #[error("contract violation: {0}")]
    ContractViolation(String),
}

impl HmmError {
    pub fn invalid_parameter(msg: impl fmt::Display) -> Self {
        HmmError::InvalidParameter(msg.to_string())
    }

    pub fn contract_violation(msg: impl fmt::Display) -> Self {
        HmmError::ContractViolation(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HmmError>;
