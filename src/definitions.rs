//! Built-in known conditions.
//!
//! # Layout
//!
//! The table is data only. Two blocks, checked in this order:
//!
//! - **Identifier block**: exact `FAILURE_REASON_*` codes, resolved through
//!   the translation catalog. Participates only in identifier-domain calls.
//! - **Diagnostic block**: substrings of transport, proxy and embedded-Tor
//!   errors, resolved to literal actionable text.
//!
//! # Ordering
//!
//! Within the diagnostic block, more specific needles come first. The Tor
//! bootstrap panic (`BootStrapError("Timeout waiting for ...")`) precedes the
//! bare bootstrap timeout it contains. `conditions::tests::builtin_table_is_valid`
//! runs the shadowing check over this table.
//!
//! # Spelling Variants
//!
//! Some backend releases spell the bootstrap message `boostrap`. Both spellings
//! are listed as needles of the same condition so they produce identical text.

use crate::codes::{augmentation_keys, context_tags, FailureReason};
use crate::conditions::{Augmentation, KnownCondition, Outcome};

/// Friendly text for a Tor bootstrap panic in the embedded client.
pub const TOR_BOOTSTRAP_TEXT: &str = "Error starting up Tor on your phone. Try restarting the app. \
If the problem persists consider using the Orbot app to connect to Tor, \
or an alternative connection method like Lightning Node Connect or Tailscale.";

/// Friendly text for a bootstrap timeout surfaced outside the embedded client.
pub const BOOTSTRAP_TIMEOUT_TEXT: &str =
    "Tor took too long to start. Check your internet connection and try again.";

/// Friendly text for a SOCKS proxy refusing the connection.
pub const SOCKS_REFUSED_TEXT: &str = "The Tor proxy refused the connection. \
Check that your node is online and that its onion address is correct.";

/// Friendly text for an unreachable onion host.
pub const SOCKS_UNREACHABLE_TEXT: &str = "Your node's onion address could not be reached over Tor. \
Try restarting your node or its Tor service.";

/// Friendly text for a plain connection failure.
pub const NODE_UNREACHABLE_TEXT: &str =
    "Unable to connect to your node. Check that it is online and that the host and port are correct.";

const INCORRECT_PAYMENT_DETAILS_AUGMENTATIONS: &[Augmentation] = &[Augmentation::new(
    context_tags::KEYSEND,
    Outcome::Key(augmentation_keys::INCORRECT_PAYMENT_DETAILS_KEYSEND),
)];

const fn failure_reason(name: &'static str, reason: FailureReason) -> KnownCondition {
    KnownCondition::exact(name, reason.as_str(), Outcome::Key(reason.translation_key()))
}

/// The shipped table, in priority order.
pub const BUILTIN_CONDITIONS: &[KnownCondition] = &[
    // -------------------------------------------------------------------------
    // Identifier block
    // -------------------------------------------------------------------------
    failure_reason("failure_reason_timeout", FailureReason::Timeout),
    failure_reason("failure_reason_no_route", FailureReason::NoRoute),
    failure_reason("failure_reason_error", FailureReason::Error),
    failure_reason(
        "failure_reason_incorrect_payment_details",
        FailureReason::IncorrectPaymentDetails,
    )
    .with_augmentations(INCORRECT_PAYMENT_DETAILS_AUGMENTATIONS),
    failure_reason(
        "failure_reason_insufficient_balance",
        FailureReason::InsufficientBalance,
    ),
    failure_reason("failure_reason_canceled", FailureReason::Canceled),
    // -------------------------------------------------------------------------
    // Diagnostic block
    // -------------------------------------------------------------------------
    KnownCondition::contains(
        "tor_bootstrap_panic",
        &[
            "BootStrapError(\"Timeout waiting for bootstrap\")",
            "BootStrapError(\"Timeout waiting for boostrap\")",
        ],
        Outcome::Literal(TOR_BOOTSTRAP_TEXT),
    ),
    KnownCondition::contains(
        "bootstrap_timeout",
        &["Timeout waiting for bootstrap", "Timeout waiting for boostrap"],
        Outcome::Literal(BOOTSTRAP_TIMEOUT_TEXT),
    ),
    KnownCondition::contains(
        "socks_connection_refused",
        &["SOCKS: Connection refused"],
        Outcome::Literal(SOCKS_REFUSED_TEXT),
    ),
    KnownCondition::contains(
        "socks_host_unreachable",
        &["SOCKS: Host unreachable"],
        Outcome::Literal(SOCKS_UNREACHABLE_TEXT),
    ),
    KnownCondition::contains(
        "node_unreachable",
        &["Failed to connect to", "Unable to resolve host"],
        Outcome::Literal(NODE_UNREACHABLE_TEXT),
    ),
];
