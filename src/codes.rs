//! Failure-reason identifiers - the closed "identifier domain".
//!
//! When a payment fails the backend reports one of a fixed enumeration of
//! reason codes (`FAILURE_REASON_*`). Callers that know they are holding one of
//! these codes pass `is_known_identifier_domain = true`, which enables exact
//! identifier matching in the condition table.
//!
//! # Identity
//!
//! Identifiers are compared case-sensitively and exactly. `failure_reason_timeout`
//! is NOT `FAILURE_REASON_TIMEOUT`; the backend never lowercases these.
//!
//! # Translation Keys
//!
//! Each reason maps to a stable catalog key of the form `error.failureReason*`.
//! Keys never change once shipped: translators key their strings on them.
//!
//! # Example
//!
//! ```rust
//! use friendly_errors::FailureReason;
//!
//! let reason = FailureReason::from_identifier("FAILURE_REASON_NO_ROUTE").unwrap();
//! assert_eq!(reason, FailureReason::NoRoute);
//! assert_eq!(reason.translation_key(), "error.failureReasonNoRoute");
//! ```

use std::fmt;

/// Payment failure reason reported by the backend.
///
/// Small Copy enum - pass by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureReason {
    /// The payment attempt timed out before any route settled.
    Timeout,
    /// Pathfinding found no route with enough liquidity.
    NoRoute,
    /// Unspecified, non-recoverable error at the backend.
    Error,
    /// The destination rejected the payment hash, amount or final CLTV.
    IncorrectPaymentDetails,
    /// The local wallet could not cover the amount plus fees.
    InsufficientBalance,
    /// The payment was canceled by the user or the backend.
    Canceled,
}

impl FailureReason {
    /// Every reason, in declaration order.
    pub const ALL: [FailureReason; 6] = [
        Self::Timeout,
        Self::NoRoute,
        Self::Error,
        Self::IncorrectPaymentDetails,
        Self::InsufficientBalance,
        Self::Canceled,
    ];

    /// Wire identifier exactly as the backend emits it.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "FAILURE_REASON_TIMEOUT",
            Self::NoRoute => "FAILURE_REASON_NO_ROUTE",
            Self::Error => "FAILURE_REASON_ERROR",
            Self::IncorrectPaymentDetails => "FAILURE_REASON_INCORRECT_PAYMENT_DETAILS",
            Self::InsufficientBalance => "FAILURE_REASON_INSUFFICIENT_BALANCE",
            Self::Canceled => "FAILURE_REASON_CANCELED",
        }
    }

    /// Stable catalog key for the base translation.
    #[inline]
    pub const fn translation_key(self) -> &'static str {
        match self {
            Self::Timeout => "error.failureReasonTimeout",
            Self::NoRoute => "error.failureReasonNoRoute",
            Self::Error => "error.failureReasonError",
            Self::IncorrectPaymentDetails => "error.failureReasonIncorrectPaymentDetails",
            Self::InsufficientBalance => "error.failureReasonInsufficientBalance",
            Self::Canceled => "error.failureReasonCanceled",
        }
    }

    /// Parse a wire identifier. Exact, case-sensitive.
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == identifier)
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Context tags understood by the built-in condition table.
///
/// Tags are plain text so callers can pass labels straight from their payment
/// flow. Unknown tags are ignored, never rejected.
pub mod context_tags {
    /// The payment was a spontaneous keysend (no invoice).
    pub const KEYSEND: &str = "Keysend";

    /// The payment used atomic multi-path.
    pub const AMP: &str = "AMP";
}

/// Catalog keys for context-specific sentences appended to a base translation.
pub mod augmentation_keys {
    /// Appended to `FAILURE_REASON_INCORRECT_PAYMENT_DETAILS` for keysend payments.
    pub const INCORRECT_PAYMENT_DETAILS_KEYSEND: &str =
        "error.failureReasonIncorrectPaymentDetailsKeysend";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_round_trip_through_parse() {
        for reason in FailureReason::ALL {
            assert_eq!(FailureReason::from_identifier(reason.as_str()), Some(reason));
        }
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!(FailureReason::from_identifier("failure_reason_timeout"), None);
        assert_eq!(FailureReason::from_identifier(" FAILURE_REASON_TIMEOUT"), None);
    }

    #[test]
    fn translation_keys_are_unique() {
        let mut keys: Vec<_> = FailureReason::ALL.iter().map(|r| r.translation_key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), FailureReason::ALL.len());
    }

    #[test]
    fn display_uses_wire_identifier() {
        assert_eq!(
            FailureReason::InsufficientBalance.to_string(),
            "FAILURE_REASON_INSUFFICIENT_BALANCE"
        );
    }
}
