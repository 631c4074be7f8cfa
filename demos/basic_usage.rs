//! Translate a handful of typical backend errors.
//!
//! Run with: `cargo run --example basic_usage`

use friendly_errors::{MapCatalog, RawError, Translator, context_tags};

fn main() {
    let catalog = MapCatalog::new()
        .with("error.failureReasonTimeout", "The payment timed out.")
        .with("error.failureReasonNoRoute", "No route to the destination was found.")
        .with(
            "error.failureReasonIncorrectPaymentDetails",
            "The recipient rejected the payment details.",
        )
        .with(
            "error.failureReasonIncorrectPaymentDetailsKeysend",
            "The receiving node may not accept keysend payments.",
        );

    let translator = Translator::new(catalog);

    let cases: &[(&str, bool, &[&str])] = &[
        ("FAILURE_REASON_NO_ROUTE", true, &[]),
        ("FAILURE_REASON_INCORRECT_PAYMENT_DETAILS", true, &[context_tags::KEYSEND]),
        (r#"{"code":2,"message":"transaction output is dust","details":[]}"#, false, &[]),
        (
            r#"Error: called `Result::unwrap()` on an `Err` value: BootStrapError("Timeout waiting for boostrap")"#,
            false,
            &[],
        ),
        ("ChannelExpiryBlocksTooHighInCreateOrderRequest", false, &[]),
        ("Random message", false, &[]),
    ];

    for (message, domain, tags) in cases {
        let err = RawError::new(*message);
        let outcome = translator.normalize(&err, *domain, tags);
        println!("[{:<12}] {}", outcome.stage(), outcome.friendly());
    }
}
