//! # Friendly Errors
//!
//! Turns raw backend errors into a single sentence an end user can read.
//!
//! ## Design Philosophy
//!
//! 1. **Users never see raw diagnostics** unless nothing better exists
//! 2. **Normalization is total**: every input yields a string, nothing fails
//! 3. **Recognition is data**: an ordered, validated table decides what is known
//! 4. **Copy lives in the catalog**: identifier outcomes are translation keys,
//!    resolved through an injected [`TranslationCatalog`]
//! 5. **Raw text stays internal**: available to support tooling through
//!    [`NormalizationLog`] and [`DiagnosticJournal`]; the owned
//!    [`RawError`] is zeroized on drop, journal copies are not
//!
//! ## Pipeline
//!
//! Each stage either produces the final text or defers to the next:
//!
//! 1. **Extraction** - unwrap one level of JSON envelope (`message` or
//!    `error.message`); anything else is used as-is
//! 2. **Known conditions** - exact failure-reason identifiers (identifier domain
//!    only), then diagnostic substrings; first match wins, with optional
//!    context augmentation
//! 3. **Humanization** - `PascalCaseIdentifiers` become `Pascal case identifiers`
//! 4. **Pass-through** - the extracted text, unchanged
//!
//! ## Quick Start
//!
//! ```rust
//! use friendly_errors::{error_to_user_friendly, MapCatalog, RawError};
//!
//! let catalog = MapCatalog::new()
//!     .with("error.failureReasonIncorrectPaymentDetails", "Payment details were rejected.")
//!     .with(
//!         "error.failureReasonIncorrectPaymentDetailsKeysend",
//!         "The receiving node may not accept keysend payments.",
//!     );
//!
//! let err = RawError::new("FAILURE_REASON_INCORRECT_PAYMENT_DETAILS");
//! assert_eq!(
//!     error_to_user_friendly(&err, true, &["Keysend"], &catalog),
//!     "Payment details were rejected. The receiving node may not accept keysend payments."
//! );
//!
//! let err = RawError::new(r#"{"code":2,"message":"transaction output is dust","details":[]}"#);
//! assert_eq!(error_to_user_friendly(&err, false, &[], &catalog), "transaction output is dust");
//! ```
//!
//! ## Features
//!
//! - `trusted_debug`: materialized debug formatting of [`NormalizationLog`]
//!   (debug builds only)

#![warn(missing_docs)]
#![cfg_attr(test, deny(missing_docs))]
#![warn(clippy::all)]

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

pub mod catalog;
pub mod codes;
pub mod conditions;
pub mod definitions;
pub mod envelope;
pub mod humanize;
pub mod logging;
pub mod ring_buffer;

pub use catalog::*;
pub use codes::*;
pub use conditions::*;
pub use definitions::*;
pub use envelope::*;
pub use humanize::*;
pub use logging::*;
pub use ring_buffer::*;

// ============================================================================
// Raw Error
// ============================================================================

/// Error as received from the backend.
///
/// Owned text is zeroized on drop: backend diagnostics routinely carry node
/// addresses, onion hosts and payment hashes.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct RawError {
    message: String,
    name: Option<String>,
}

impl RawError {
    /// Wrap a message.
    #[inline]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            name: None,
        }
    }

    /// Wrap a message with a diagnostic label (`"Error"`, `"GrpcError"`, ...).
    ///
    /// The label is carried for logs only and never used for matching.
    #[inline]
    pub fn with_name(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            name: Some(name.into()),
        }
    }

    /// Capture any standard error by its `Display` text.
    pub fn from_error(error: &(dyn std::error::Error + 'static)) -> Self {
        Self::new(error.to_string())
    }

    /// Raw message text.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Diagnostic label, if any.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl fmt::Debug for RawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawError")
            .field("name", &self.name)
            .field("message", &format_args!("<{} bytes>", self.message.len()))
            .finish()
    }
}

impl From<&str> for RawError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for RawError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

// ============================================================================
// Normalization Outcome
// ============================================================================

/// Pipeline stage that produced the friendly text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Exact failure-reason identifier match.
    Identifier,
    /// Diagnostic substring match.
    Diagnostic,
    /// Identifier split into words.
    Humanized,
    /// Nothing matched; extracted text returned unchanged.
    PassThrough,
}

impl Stage {
    /// Short label for structured logs.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::Diagnostic => "diagnostic",
            Self::Humanized => "humanized",
            Self::PassThrough => "pass_through",
        }
    }

    /// True if a known condition matched.
    #[inline]
    pub const fn is_recognized(self) -> bool {
        matches!(self, Self::Identifier | Self::Diagnostic)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "the friendly text is the point of normalizing"]
pub struct Normalization {
    friendly: String,
    stage: Stage,
    shape: Shape,
    rule: Option<&'static str>,
    augmentation: Option<&'static str>,
}

impl Normalization {
    /// Text to show the user.
    #[inline]
    pub fn friendly(&self) -> &str {
        &self.friendly
    }

    /// Take the text to show the user.
    #[inline]
    pub fn into_friendly(self) -> String {
        self.friendly
    }

    /// Stage that produced the text.
    #[inline]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Detected shape of the raw message.
    #[inline]
    pub const fn shape(&self) -> Shape {
        self.shape
    }

    /// Name of the matching condition, if any.
    #[inline]
    pub const fn rule(&self) -> Option<&'static str> {
        self.rule
    }

    /// Context tag that selected an augmentation, if any.
    #[inline]
    pub const fn augmentation(&self) -> Option<&'static str> {
        self.augmentation
    }

    /// Borrowed structured record for internal logging.
    ///
    /// The record cannot outlive `self` or `error`.
    #[inline]
    pub fn log<'a>(&'a self, error: &'a RawError) -> NormalizationLog<'a> {
        NormalizationLog::new(error, self)
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Run the pipeline. Pure: no logging, no journal.
fn run<C>(
    table: &KnownConditionTable,
    catalog: &C,
    error: &RawError,
    is_known_identifier_domain: bool,
    context_tags: &[&str],
) -> Normalization
where
    C: TranslationCatalog + ?Sized,
{
    let extracted = envelope::extract(error.message());
    let shape = extracted.shape();
    let text = extracted.text();

    if let Some(hit) = table.find(text, is_known_identifier_domain, context_tags) {
        if let Some(friendly) = hit.render(catalog) {
            let stage = match hit.condition().matcher() {
                Matcher::Exact(_) => Stage::Identifier,
                Matcher::Contains(_) => Stage::Diagnostic,
            };
            return Normalization {
                friendly,
                stage,
                shape,
                rule: Some(hit.condition().name()),
                augmentation: hit.augmentation().map(Augmentation::tag),
            };
        }
    }

    let (friendly, stage) = match humanize::humanize_identifier(text) {
        Some(words) => (words, Stage::Humanized),
        None => (extracted.into_text().into_owned(), Stage::PassThrough),
    };

    Normalization {
        friendly,
        stage,
        shape,
        rule: None,
        augmentation: None,
    }
}

/// Convert a backend error into a user-presentable sentence.
///
/// - `is_known_identifier_domain`: the message is expected to be one of the
///   backend's `FAILURE_REASON_*` codes; enables exact identifier matching
/// - `context_tags`: situational labels (e.g. [`context_tags::KEYSEND`]) that
///   may select an augmented translation; unknown tags are ignored
/// - `catalog`: translation lookup for identifier outcomes
///
/// Total: never fails, never panics, and returns non-empty text for
/// non-empty input. Uses the built-in condition table.
pub fn error_to_user_friendly<C>(
    error: &RawError,
    is_known_identifier_domain: bool,
    context_tags: &[&str],
    catalog: &C,
) -> String
where
    C: TranslationCatalog + ?Sized,
{
    run(
        &KnownConditionTable::builtin(),
        catalog,
        error,
        is_known_identifier_domain,
        context_tags,
    )
    .into_friendly()
}

// ============================================================================
// Translator
// ============================================================================

/// Configured normalizer: catalog, condition table and optional journal.
///
/// Emits one `tracing` debug event per normalization (stage, shape, rule).
/// Raw backend text never goes into tracing fields; it goes to the journal,
/// if one is attached.
///
/// ```rust
/// use friendly_errors::{KnownCondition, KnownConditionTable, Outcome, RawError, Translator};
///
/// const EXTRA: &[KnownCondition] = &[KnownCondition::contains(
///     "rate_limited",
///     &["429 Too Many Requests"],
///     Outcome::Literal("The server is busy. Please wait a moment and try again."),
/// )];
///
/// let table = KnownConditionTable::checked_static(EXTRA).unwrap();
/// let translator = Translator::new(|key: &str| key.to_owned()).with_table(table);
///
/// let text = translator.translate(&RawError::new("HTTP 429 Too Many Requests"), false, &[]);
/// assert_eq!(text, "The server is busy. Please wait a moment and try again.");
/// ```
pub struct Translator<C> {
    catalog: C,
    table: KnownConditionTable,
    journal: Option<DiagnosticJournal>,
}

impl<C: TranslationCatalog> Translator<C> {
    /// Translator over the built-in table, no journal.
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            table: KnownConditionTable::builtin(),
            journal: None,
        }
    }

    /// Replace the condition table.
    pub fn with_table(mut self, table: KnownConditionTable) -> Self {
        self.table = table;
        self
    }

    /// Record every normalization into `journal`.
    pub fn with_journal(mut self, journal: DiagnosticJournal) -> Self {
        self.journal = Some(journal);
        self
    }

    /// Injected translation catalog.
    #[inline]
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Condition table in use.
    #[inline]
    pub fn table(&self) -> &KnownConditionTable {
        &self.table
    }

    /// Attached journal, if any.
    #[inline]
    pub fn journal(&self) -> Option<&DiagnosticJournal> {
        self.journal.as_ref()
    }

    /// Run the pipeline and report how the text was produced.
    pub fn normalize(
        &self,
        error: &RawError,
        is_known_identifier_domain: bool,
        context_tags: &[&str],
    ) -> Normalization {
        let outcome = run(
            &self.table,
            &self.catalog,
            error,
            is_known_identifier_domain,
            context_tags,
        );

        tracing::debug!(
            stage = %outcome.stage(),
            shape = %outcome.shape(),
            rule = outcome.rule().unwrap_or("-"),
            augmented = outcome.augmentation().is_some(),
            identifier_domain = is_known_identifier_domain,
            "normalized backend error"
        );

        if let Some(journal) = &self.journal {
            journal.record(&outcome.log(error));
        }

        outcome
    }

    /// Friendly text only. See [`error_to_user_friendly`].
    #[inline]
    pub fn translate(
        &self,
        error: &RawError,
        is_known_identifier_domain: bool,
        context_tags: &[&str],
    ) -> String {
        self.normalize(error, is_known_identifier_domain, context_tags)
            .into_friendly()
    }
}

impl<C> fmt::Debug for Translator<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("conditions", &self.table.len())
            .field("journal", &self.journal)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    fn catalog() -> MapCatalog {
        MapCatalog::new()
            .with("error.failureReasonTimeout", "The payment timed out.")
            .with("error.failureReasonNoRoute", "No route to the destination was found.")
    }

    #[test]
    fn identifier_domain_gates_exact_matches() {
        let err = RawError::new("FAILURE_REASON_TIMEOUT");
        assert_eq!(error_to_user_friendly(&err, true, &[], &catalog()), "The payment timed out.");
        // Outside the identifier domain the code is just text. No case
        // boundary, so it passes through.
        assert_eq!(
            error_to_user_friendly(&err, false, &[], &catalog()),
            "FAILURE_REASON_TIMEOUT"
        );
    }

    #[test]
    fn identifier_inside_envelope_is_matched() {
        let err = RawError::new(r#"{"message":"FAILURE_REASON_NO_ROUTE"}"#);
        let outcome = Translator::new(catalog()).normalize(&err, true, &[]);
        assert_eq!(outcome.friendly(), "No route to the destination was found.");
        assert_eq!(outcome.stage(), Stage::Identifier);
        assert_eq!(outcome.shape(), Shape::FlatEnvelope);
        assert_eq!(outcome.rule(), Some("failure_reason_no_route"));
    }

    #[test]
    fn empty_translation_falls_through() {
        let empty = |_: &str| String::new();
        let err = RawError::new("FAILURE_REASON_TIMEOUT");
        assert_eq!(error_to_user_friendly(&err, true, &[], &empty), "FAILURE_REASON_TIMEOUT");
    }

    #[test]
    fn humanized_outcome_has_no_rule() {
        let err = RawError::new("ChannelExpiryBlocksTooHighInCreateOrderRequest");
        let outcome = Translator::new(catalog()).normalize(&err, false, &[]);
        assert_eq!(outcome.stage(), Stage::Humanized);
        assert_eq!(outcome.shape(), Shape::Identifier);
        assert_eq!(outcome.rule(), None);
    }

    #[test]
    fn envelope_message_is_humanized() {
        let err = RawError::new(r#"{"error":{"message":"InvoiceAlreadyPaid"}}"#);
        assert_eq!(
            error_to_user_friendly(&err, false, &[], &catalog()),
            "Invoice already paid"
        );
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(error_to_user_friendly(&RawError::new(""), false, &[], &catalog()), "");
    }

    #[test]
    fn debug_redacts_message() {
        let err = RawError::with_name("Error", "secret onion host abc.onion");
        let debug = format!("{:?}", err);
        assert!(!debug.contains("onion"));
        assert!(debug.contains("Error"));
    }

    #[test]
    fn raw_error_zeroizes() {
        let mut err = RawError::with_name("Error", "payment hash deadbeef");
        err.zeroize();
        assert_eq!(err.message(), "");
        assert_eq!(err.name(), None);
    }

    #[test]
    fn from_std_error_uses_display() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "SOCKS: Host unreachable");
        let err = RawError::from_error(&io);
        assert_eq!(err.message(), "SOCKS: Host unreachable");
    }

    #[test]
    fn translator_debug_omits_catalog() {
        let translator = Translator::new(catalog());
        let debug = format!("{:?}", translator);
        assert!(debug.contains("conditions"));
        assert!(!debug.contains("timed out"));
    }
}
