//! Engine error kinds surfaced to the transport layer

use thiserror::Error;

/// Failure modes of a planning run.
///
/// The engine either returns a complete result or fails with one of these;
/// there are no partial results. An empty account set is a valid degenerate
/// result, not an error. HTTP status mapping is the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// Strategy name is not avalanche, snowball, or custom
    #[error("unrecognized strategy: {name}")]
    InvalidStrategy { name: String },

    /// Custom order references an unknown account, or the custom strategy
    /// was requested without an order
    #[error("invalid custom order: {reason}")]
    InvalidCustomOrder { reason: String },

    /// The account's minimum payment does not cover its accruing interest,
    /// so the balance grows forever instead of amortizing
    #[error("minimum payment on account {account_id} is too low to ever pay off its balance")]
    DebtNeverPaidOff { account_id: String },
}
