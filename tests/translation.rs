//! End-to-end behaviour of the normalization pipeline.

use friendly_errors::{
    BOOTSTRAP_TIMEOUT_TEXT, DiagnosticJournal, FailureReason, MapCatalog, NODE_UNREACHABLE_TEXT,
    RawError, SOCKS_REFUSED_TEXT, SOCKS_UNREACHABLE_TEXT, Shape, Stage, TOR_BOOTSTRAP_TEXT,
    Translator, context_tags, error_to_user_friendly,
};

const INCORRECT_DETAILS: &str = "Payment failed: incorrect payment details.";
const KEYSEND_NOTE: &str = "The receiving node may not accept keysend payments.";

fn catalog() -> MapCatalog {
    MapCatalog::new()
        .with("error.failureReasonTimeout", "Payment timed out.")
        .with("error.failureReasonNoRoute", "No route found.")
        .with("error.failureReasonError", "Payment failed.")
        .with("error.failureReasonIncorrectPaymentDetails", INCORRECT_DETAILS)
        .with("error.failureReasonIncorrectPaymentDetailsKeysend", KEYSEND_NOTE)
        .with("error.failureReasonInsufficientBalance", "Insufficient balance.")
        .with("error.failureReasonCanceled", "Payment canceled.")
}

fn friendly(message: &str) -> String {
    error_to_user_friendly(&RawError::new(message), false, &[], &catalog())
}

// ============================================================================
// Extraction
// ============================================================================

#[test]
fn flat_envelope_passes_through_inner_message() {
    assert_eq!(
        friendly(r#"{"code":2,"message":"transaction output is dust","details":[]}"#),
        "transaction output is dust"
    );
}

#[test]
fn nested_envelope_passes_through_inner_message() {
    assert_eq!(
        friendly(r#"{"error":{"code":2,"message":"invoice is already paid","details":[]}}"#),
        "invoice is already paid"
    );
}

#[test]
fn envelope_message_feeds_substring_matching() {
    assert_eq!(
        friendly(r#"{"code":14,"message":"Error: SOCKS: Connection refused","details":[]}"#),
        SOCKS_REFUSED_TEXT
    );
}

#[test]
fn malformed_envelope_is_not_an_error() {
    let raw = r#"{"code":2,"message":"#;
    assert_eq!(friendly(raw), raw);
}

// ============================================================================
// Diagnostic substrings
// ============================================================================

#[test]
fn tor_bootstrap_panic_tolerates_historical_misspelling() {
    let correct = friendly(
        r#"Error: called `Result::unwrap()` on an `Err` value: BootStrapError("Timeout waiting for bootstrap")"#,
    );
    let misspelled = friendly(
        r#"Error: called `Result::unwrap()` on an `Err` value: BootStrapError("Timeout waiting for boostrap")"#,
    );
    assert_eq!(correct, TOR_BOOTSTRAP_TEXT);
    assert_eq!(misspelled, TOR_BOOTSTRAP_TEXT);
}

#[test]
fn specific_bootstrap_condition_wins_over_generic() {
    let translator = Translator::new(catalog());
    let panic = translator.normalize(
        &RawError::new(r#"BootStrapError("Timeout waiting for bootstrap")"#),
        false,
        &[],
    );
    assert_eq!(panic.rule(), Some("tor_bootstrap_panic"));

    let generic = translator.normalize(&RawError::new("tor: Timeout waiting for boostrap"), false, &[]);
    assert_eq!(generic.rule(), Some("bootstrap_timeout"));
    assert_eq!(generic.friendly(), BOOTSTRAP_TIMEOUT_TEXT);
}

#[test]
fn transport_signatures_are_recognized_inside_wrappers() {
    assert_eq!(friendly("Error: SOCKS: Host unreachable (code 4)"), SOCKS_UNREACHABLE_TEXT);
    assert_eq!(
        friendly("Error: Failed to connect to /10.0.0.2:10009"),
        NODE_UNREACHABLE_TEXT
    );
    assert_eq!(friendly("Unable to resolve host \"node.local\""), NODE_UNREACHABLE_TEXT);
}

#[test]
fn substring_matching_applies_in_identifier_domain_too() {
    let err = RawError::new("SOCKS: Connection refused");
    assert_eq!(error_to_user_friendly(&err, true, &[], &catalog()), SOCKS_REFUSED_TEXT);
}

// ============================================================================
// Identifier domain
// ============================================================================

#[test]
fn incorrect_payment_details_keysend_is_augmented() {
    let err = RawError::new("FAILURE_REASON_INCORRECT_PAYMENT_DETAILS");
    assert_eq!(
        error_to_user_friendly(&err, true, &[context_tags::KEYSEND], &catalog()),
        format!("{} {}", INCORRECT_DETAILS, KEYSEND_NOTE)
    );
}

#[test]
fn unrecognized_context_yields_base_translation() {
    let err = RawError::new("FAILURE_REASON_INCORRECT_PAYMENT_DETAILS");
    assert_eq!(
        error_to_user_friendly(&err, true, &[context_tags::AMP], &catalog()),
        INCORRECT_DETAILS
    );
    assert_eq!(error_to_user_friendly(&err, true, &[], &catalog()), INCORRECT_DETAILS);
}

#[test]
fn context_only_augments_conditions_that_recognize_it() {
    let err = RawError::new("FAILURE_REASON_TIMEOUT");
    assert_eq!(
        error_to_user_friendly(&err, true, &[context_tags::KEYSEND], &catalog()),
        "Payment timed out."
    );
}

#[test]
fn every_failure_reason_translates() {
    let catalog = catalog();
    for reason in FailureReason::ALL {
        let err = RawError::new(reason.as_str());
        let text = error_to_user_friendly(&err, true, &[], &catalog);
        assert_ne!(text, reason.as_str(), "{} was not translated", reason);
    }
}

#[test]
fn unknown_identifier_passes_through() {
    let err = RawError::new("FAILURE_REASON_SOMETHING_NEW");
    assert_eq!(
        error_to_user_friendly(&err, true, &[], &catalog()),
        "FAILURE_REASON_SOMETHING_NEW"
    );
}

// ============================================================================
// Fallbacks
// ============================================================================

#[test]
fn pascal_case_identifier_is_humanized() {
    assert_eq!(
        friendly("ChannelExpiryBlocksTooHighInCreateOrderRequest"),
        "Channel expiry blocks too high in create order request"
    );
}

#[test]
fn free_text_passes_through_unchanged() {
    assert_eq!(friendly("Random message"), "Random message");
    assert_eq!(friendly("Payment timed out"), "Payment timed out");
}

#[test]
fn pass_through_is_idempotent() {
    for input in ["Random message", "Payment timed out", "invoice is already paid"] {
        let once = friendly(input);
        assert_eq!(friendly(&once), once);
    }
}

#[test]
fn humanized_output_is_stable_on_reapplication() {
    let once = friendly("ChannelExpiryBlocksTooHighInCreateOrderRequest");
    assert_eq!(friendly(&once), once);
}

// ============================================================================
// Translator
// ============================================================================

#[test]
fn translator_reports_stage_and_shape() {
    let translator = Translator::new(catalog());

    let cases = [
        ("FAILURE_REASON_NO_ROUTE", true, Stage::Identifier, Shape::Identifier),
        ("SOCKS: Connection refused", false, Stage::Diagnostic, Shape::FreeText),
        ("InvoiceExpired", false, Stage::Humanized, Shape::Identifier),
        (r#"{"message":"dust"}"#, false, Stage::PassThrough, Shape::FlatEnvelope),
    ];

    for (input, domain, stage, shape) in cases {
        let outcome = translator.normalize(&RawError::new(input), domain, &[]);
        assert_eq!(outcome.stage(), stage, "{}", input);
        assert_eq!(outcome.shape(), shape, "{}", input);
    }
}

#[test]
fn translator_journals_raw_text_for_support() {
    let journal = DiagnosticJournal::new(16, 2048);
    let translator = Translator::new(catalog()).with_journal(journal.clone());

    let err = RawError::new("FAILURE_REASON_INCORRECT_PAYMENT_DETAILS");
    let text = translator.translate(&err, true, &[context_tags::KEYSEND]);

    let entry = &journal.get_recent(1)[0];
    assert_eq!(entry.raw.as_ref(), "FAILURE_REASON_INCORRECT_PAYMENT_DETAILS");
    assert_eq!(entry.friendly.as_ref(), text);
    assert_eq!(entry.stage, Stage::Identifier);
    assert_eq!(entry.augmentation.as_deref(), Some(context_tags::KEYSEND));
}

#[test]
fn translator_and_free_function_agree() {
    let translator = Translator::new(catalog());
    for input in [
        "FAILURE_REASON_ERROR",
        "Random message",
        "SOCKS: Host unreachable",
        "TooManyPendingHtlcs",
    ] {
        let err = RawError::new(input);
        assert_eq!(
            translator.translate(&err, true, &[]),
            error_to_user_friendly(&err, true, &[], &catalog())
        );
    }
}
